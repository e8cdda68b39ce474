use axum::Extension;
use serde::Serialize;
use terranova_core::domain::planner::session::PlannerState;
use utoipa::ToSchema;

use crate::application::{
    device_middleware::DeviceContext,
    http::server::api_entities::{api_error::ApiError, response::Response},
};

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct PlannerStateResponse {
    pub data: PlannerState,
}

#[utoipa::path(
    get,
    path = "/state",
    tag = "planner",
    summary = "Read this device's planner state",
    description = "Selected soil type, location status, loading flag, last field report and last error of the device session. The report survives a later failure so the dashboard can show both.",
    responses(
        (status = 200, body = PlannerStateResponse)
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn get_planner_state(
    Extension(device): Extension<DeviceContext>,
) -> Result<Response<PlannerStateResponse>, ApiError> {
    Ok(Response::OK(PlannerStateResponse {
        data: device.sessions.planner.snapshot(),
    }))
}
