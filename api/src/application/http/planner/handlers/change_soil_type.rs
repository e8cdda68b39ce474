use axum::{Extension, extract::State};
use terranova_core::domain::planner::ports::PlannerService;

use super::report_location::FieldReportResponse;
use crate::application::{
    device_middleware::DeviceContext,
    http::{
        planner::validators::ChangeSoilTypeValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "/soil-type",
    tag = "planner",
    summary = "Change the soil type",
    description = "Re-fetches recommendations for the new soil type using the last live bounding box of this device, or the demo farm if none was resolved.",
    request_body = ChangeSoilTypeValidator,
    responses(
        (status = 200, body = FieldReportResponse),
        (status = 400, description = "Unknown soil type"),
        (status = 409, description = "Superseded by a newer planner request"),
        (status = 502, description = "Backend reported a failure"),
        (status = 503, description = "Backend unreachable")
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn change_soil_type(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    ValidateJson(payload): ValidateJson<ChangeSoilTypeValidator>,
) -> Result<Response<FieldReportResponse>, ApiError> {
    let soil_type = payload.soil_type()?;

    let report = state
        .service
        .change_soil_type(&device.sessions.planner, soil_type)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(FieldReportResponse { data: report }))
}
