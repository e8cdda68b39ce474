use axum::extract::State;
use serde::{Deserialize, Serialize};
use terranova_core::domain::health::{entities::BackendHealth, ports::HealthCheckService};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BackendHealthResponse {
    pub data: BackendHealth,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "AI backend readiness",
    responses(
        (status = 200, body = BackendHealthResponse),
        (status = 503, description = "Backend unreachable")
    ),
)]
pub async fn backend_health(
    State(state): State<AppState>,
) -> Result<Response<BackendHealthResponse>, ApiError> {
    let health = state
        .service
        .backend_health()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(BackendHealthResponse { data: health }))
}
