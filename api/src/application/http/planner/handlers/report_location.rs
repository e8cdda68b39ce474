use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use terranova_core::domain::planner::{entities::FieldReport, ports::PlannerService};
use utoipa::ToSchema;

use crate::application::{
    device_middleware::DeviceContext,
    http::{
        planner::validators::ReportLocationValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FieldReportResponse {
    pub data: FieldReport,
}

#[utoipa::path(
    post,
    path = "/location",
    tag = "planner",
    summary = "Report the device location and load the field report",
    description = "Starts the Smart Planner: resolves the bounding box from the reported geolocation outcome (falling back to the demo farm) and fetches satellite recommendations for the session's soil type. Reporting again retries from scratch.",
    request_body = ReportLocationValidator,
    responses(
        (status = 200, body = FieldReportResponse),
        (status = 409, description = "Superseded by a newer planner request"),
        (status = 502, description = "Backend reported a failure"),
        (status = 503, description = "Backend unreachable")
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn report_location(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    ValidateJson(payload): ValidateJson<ReportLocationValidator>,
) -> Result<Response<FieldReportResponse>, ApiError> {
    let provider = payload.into_reported()?;

    let report = state
        .service
        .start(&device.sessions.planner, &provider)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(FieldReportResponse { data: report }))
}
