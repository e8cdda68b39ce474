use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use terranova_core::{application::create_service, domain::common::TerraNovaConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::device_middleware::DEVICE_ID_HEADER;
use crate::application::http::crop_doctor::router::crop_doctor_routes;
use crate::application::http::health::router::health_routes;
use crate::application::http::planner::router::planner_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = TerraNovaConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    Ok(AppState::new(args, service))
}

/// The global metrics recorder can only be installed once per process.
fn metrics() -> &'static (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    METRICS.get_or_init(PrometheusMetricLayer::pair)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring malformed allowed origin");
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT,
            HeaderName::from_static(DEVICE_ID_HEADER),
        ])
        .allow_credentials(true);

    let (prometheus_layer, metric_handle) = metrics().clone();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(SwaggerUi::new(format!("{}/swagger-ui", root_path)).url(api_docs_url, openapi))
        .merge(crop_doctor_routes(state.clone()))
        .merge(planner_routes(state.clone()))
        .merge(health_routes(state.clone()))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}
