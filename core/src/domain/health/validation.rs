use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        error_body::{DIAGNOSIS_MESSAGE_FIELDS, http_failure, is_success},
    },
    health::entities::BackendHealth,
};

pub const HEALTH_TRANSPORT_MESSAGE: &str = "AI backend is offline";
pub const HEALTH_FAILED_MESSAGE: &str = "Failed to check backend health";

pub fn interpret_health_response(status: u16, body: &[u8]) -> Result<BackendHealth, CoreError> {
    if !is_success(status) {
        return Err(http_failure(
            status,
            body,
            &DIAGNOSIS_MESSAGE_FIELDS,
            HEALTH_FAILED_MESSAGE,
        ));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Invalid health format: {}", e);
        CoreError::InvalidResponse(format!("invalid health format: {}", e))
    })
}
