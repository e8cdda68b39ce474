use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::application::{http::server::app_state::AppState, sessions::DeviceSessions};

pub const DEVICE_ID_HEADER: &str = "x-device-id";
pub const DEFAULT_DEVICE_ID: &str = "default_device";

/// Device session context stored in request extensions
#[derive(Clone, Debug)]
pub struct DeviceContext {
    pub device_id: String,
    pub sessions: Arc<DeviceSessions>,
}

/// Resolves the caller's session from the `X-Device-Id` header.
pub async fn device_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let device_id = req
        .headers()
        .get(DEVICE_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DEVICE_ID)
        .to_string();

    let sessions = state.sessions.get_or_create(&device_id).await;

    req.extensions_mut().insert(DeviceContext {
        device_id,
        sessions,
    });

    next.run(req).await
}
