use utoipa::OpenApi;

use crate::application::http::{
    crop_doctor::router::CropDoctorApiDoc,
    health::handlers::backend_health::__path_backend_health,
    planner::router::PlannerApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TerraNova API"
    ),
    paths(backend_health),
    nest(
        (path = "/crop-doctor", api = CropDoctorApiDoc),
        (path = "/planner", api = PlannerApiDoc),
    )
)]
pub struct ApiDoc;
