use reqwest::Client;

use crate::domain::{
    common::{BackendConfig, entities::app_errors::CoreError},
    health::{
        entities::BackendHealth,
        ports::HealthCheckClient,
        validation::{HEALTH_TRANSPORT_MESSAGE, interpret_health_response},
    },
};

#[derive(Debug, Clone)]
pub struct ReqwestHealthCheckClient {
    client: Client,
    url: String,
}

impl ReqwestHealthCheckClient {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            url: config.endpoint(&config.health_path),
        }
    }
}

fn transport_error(e: reqwest::Error) -> CoreError {
    tracing::warn!("Health check failed: {}", e);
    CoreError::Transport {
        message: HEALTH_TRANSPORT_MESSAGE.to_string(),
    }
}

impl HealthCheckClient for ReqwestHealthCheckClient {
    async fn health(&self) -> Result<BackendHealth, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        interpret_health_response(status, &body)
    }
}
