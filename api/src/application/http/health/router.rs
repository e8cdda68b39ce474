use axum::{Router, routing::get};

use super::handlers::backend_health::backend_health;
use crate::application::http::server::app_state::AppState;

pub fn health_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/health", state.args.server.root_path),
        get(backend_health),
    )
}
