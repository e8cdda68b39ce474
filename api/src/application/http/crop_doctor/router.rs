use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    diagnose_crop::{MAX_IMAGE_SIZE, __path_diagnose_crop, diagnose_crop},
    get_latest_diagnosis::{__path_get_latest_diagnosis, get_latest_diagnosis},
    reset_diagnosis::{__path_reset_diagnosis, reset_diagnosis},
};
use crate::application::{device_middleware::device_middleware, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(diagnose_crop, get_latest_diagnosis, reset_diagnosis))]
pub struct CropDoctorApiDoc;

pub fn crop_doctor_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/crop-doctor/diagnose", state.args.server.root_path),
            // room for the multipart framing around a maximum-size image
            post(diagnose_crop).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 64 * 1024)),
        )
        .route(
            &format!("{}/crop-doctor/latest", state.args.server.root_path),
            get(get_latest_diagnosis).delete(reset_diagnosis),
        )
        .layer(middleware::from_fn_with_state(state.clone(), device_middleware))
}
