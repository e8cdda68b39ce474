use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Readiness report of the AI backend (`GET /health`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub ai_ready: Option<bool>,
    #[serde(default)]
    pub local_model_ready: Option<bool>,
    #[serde(default)]
    pub hybrid_mode: Option<bool>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_configured: Option<bool>,
}

impl BackendHealth {
    /// Online, and not explicitly reporting the AI engine as down.
    pub fn can_diagnose(&self) -> bool {
        self.status == "online" && self.ai_ready.unwrap_or(true)
    }
}
