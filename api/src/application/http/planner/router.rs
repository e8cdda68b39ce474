use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

use super::handlers::{
    change_soil_type::{__path_change_soil_type, change_soil_type},
    get_planner_config::{__path_get_planner_config, get_planner_config},
    get_planner_state::{__path_get_planner_state, get_planner_state},
    list_soil_types::{__path_list_soil_types, list_soil_types},
    recommend::{__path_recommend, recommend},
    report_location::{__path_report_location, report_location},
    reset_planner_state::{__path_reset_planner_state, reset_planner_state},
};
use crate::application::{device_middleware::device_middleware, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    report_location,
    change_soil_type,
    get_planner_state,
    reset_planner_state,
    get_planner_config,
    recommend,
    list_soil_types
))]
pub struct PlannerApiDoc;

pub fn planner_routes(state: AppState) -> Router<AppState> {
    let session_routes = Router::new()
        .route(
            &format!("{}/planner/location", state.args.server.root_path),
            post(report_location),
        )
        .route(
            &format!("{}/planner/soil-type", state.args.server.root_path),
            put(change_soil_type),
        )
        .route(
            &format!("{}/planner/state", state.args.server.root_path),
            get(get_planner_state).delete(reset_planner_state),
        )
        .layer(middleware::from_fn_with_state(state.clone(), device_middleware));

    Router::new()
        .route(
            &format!("{}/planner/config", state.args.server.root_path),
            get(get_planner_config),
        )
        .route(
            &format!("{}/planner/recommend", state.args.server.root_path),
            post(recommend),
        )
        .route(
            &format!("{}/planner/soil-types", state.args.server.root_path),
            get(list_soil_types),
        )
        .merge(session_routes)
}
