use axum::extract::State;
use serde::{Deserialize, Serialize};
use terranova_core::domain::planner::{entities::SoilRecommendationResponse, ports::PlannerService};
use utoipa::ToSchema;

use crate::application::http::{
    planner::validators::RecommendValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecommendResponse {
    pub data: SoilRecommendationResponse,
}

#[utoipa::path(
    post,
    path = "/recommend",
    tag = "planner",
    summary = "Recommend crops for an explicit box",
    description = "Stateless recommendation request. Climate readings left out of the body use the configured defaults.",
    request_body = RecommendValidator,
    responses(
        (status = 200, body = RecommendResponse),
        (status = 400, description = "Invalid box or soil type"),
        (status = 502, description = "Backend reported a failure"),
        (status = 503, description = "Backend unreachable")
    ),
)]
pub async fn recommend(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RecommendValidator>,
) -> Result<Response<RecommendResponse>, ApiError> {
    let bbox = payload.bbox()?;
    let soil_type = payload.soil_type()?;
    let climate = payload.climate(state.service.config().planner.climate);

    let response = state
        .service
        .recommend(bbox, soil_type, climate)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RecommendResponse { data: response }))
}
