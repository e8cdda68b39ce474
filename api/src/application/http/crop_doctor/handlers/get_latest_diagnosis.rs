use axum::Extension;
use serde::{Deserialize, Serialize};
use terranova_core::domain::diagnosis::entities::DiagnosisReport;
use utoipa::ToSchema;

use crate::application::{
    device_middleware::DeviceContext,
    http::server::api_entities::{api_error::ApiError, response::Response},
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LatestDiagnosisResponse {
    pub data: Option<DiagnosisReport>,
}

#[utoipa::path(
    get,
    path = "/latest",
    tag = "crop-doctor",
    summary = "Read this device's last diagnosis",
    description = "`data` is null before the first diagnosis, while a new upload is in flight, and after a failed one.",
    responses(
        (status = 200, body = LatestDiagnosisResponse)
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn get_latest_diagnosis(
    Extension(device): Extension<DeviceContext>,
) -> Result<Response<LatestDiagnosisResponse>, ApiError> {
    Ok(Response::OK(LatestDiagnosisResponse {
        data: device.sessions.diagnosis.latest(),
    }))
}
