use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    device_middleware::DeviceContext,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ResetPlannerStateResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/state",
    tag = "planner",
    summary = "Reset this device's planner state",
    description = "Clears the report, error and remembered live location. A fetch still in flight is answered with 409 when it lands.",
    responses(
        (status = 200, body = ResetPlannerStateResponse)
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn reset_planner_state(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
) -> Result<Response<ResetPlannerStateResponse>, ApiError> {
    device
        .sessions
        .planner
        .reset(state.service.config().planner.default_soil_type);
    tracing::debug!(device_id = %device.device_id, "Planner session reset");

    Ok(Response::OK(ResetPlannerStateResponse {
        message: "Planner state reset".to_string(),
    }))
}
