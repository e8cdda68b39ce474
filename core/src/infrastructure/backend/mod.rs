use reqwest::Client;

use crate::domain::common::{BackendConfig, entities::app_errors::CoreError};

pub mod diagnosis_client;
pub mod health_client;
pub mod planner_client;

pub use diagnosis_client::ReqwestDiagnosisClient;
pub use health_client::ReqwestHealthCheckClient;
pub use planner_client::ReqwestPlannerClient;

/// Shared HTTP client for every backend adapter.
pub fn build_http_client(config: &BackendConfig) -> Result<Client, CoreError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        CoreError::Invalid(format!("cannot build HTTP client: {}", e))
    })
}
