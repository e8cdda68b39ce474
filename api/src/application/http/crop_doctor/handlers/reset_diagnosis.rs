use axum::Extension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    device_middleware::DeviceContext,
    http::server::api_entities::{api_error::ApiError, response::Response},
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ResetDiagnosisResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/latest",
    tag = "crop-doctor",
    summary = "Discard this device's diagnosis",
    description = "Drops the last result. An upload still in flight is answered with 409 when it lands.",
    responses(
        (status = 200, body = ResetDiagnosisResponse)
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn reset_diagnosis(
    Extension(device): Extension<DeviceContext>,
) -> Result<Response<ResetDiagnosisResponse>, ApiError> {
    device.sessions.diagnosis.reset();
    tracing::debug!(device_id = %device.device_id, "Diagnosis session reset");

    Ok(Response::OK(ResetDiagnosisResponse {
        message: "Diagnosis discarded".to_string(),
    }))
}
