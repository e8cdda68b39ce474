use axum::extract::State;
use serde::{Deserialize, Serialize};
use terranova_core::domain::planner::entities::SoilType;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SoilTypesResponse {
    pub data: Vec<SoilType>,
    pub default: SoilType,
}

#[utoipa::path(
    get,
    path = "/soil-types",
    tag = "planner",
    summary = "List soil types",
    responses(
        (status = 200, body = SoilTypesResponse)
    ),
)]
pub async fn list_soil_types(
    State(state): State<AppState>,
) -> Result<Response<SoilTypesResponse>, ApiError> {
    Ok(Response::OK(SoilTypesResponse {
        data: SoilType::ALL.to_vec(),
        default: state.service.config().planner.default_soil_type,
    }))
}
