use axum::extract::State;
use serde::{Deserialize, Serialize};
use terranova_core::domain::{
    common::GeolocationConfig,
    planner::entities::{BoundingBox, Climate, SoilType},
};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

/// Options the device passes to its position lookup before reporting the
/// outcome to `POST /planner/location`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl From<&GeolocationConfig> for GeolocationOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            enable_high_accuracy: config.high_accuracy,
            timeout_ms: u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX),
            maximum_age_ms: u64::try_from(config.maximum_age.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PlannerSettings {
    pub geolocation: GeolocationOptions,
    #[schema(value_type = Vec<f64>)]
    pub default_bbox: BoundingBox,
    pub default_soil_type: SoilType,
    pub climate: Climate,
    pub max_recommendations: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PlannerConfigResponse {
    pub data: PlannerSettings,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "planner",
    summary = "Planner settings for the device",
    description = "Geolocation options the device should use for its position lookup, plus the demo farm box, default soil type and climate the server fetches with.",
    responses(
        (status = 200, body = PlannerConfigResponse)
    ),
)]
pub async fn get_planner_config(
    State(state): State<AppState>,
) -> Result<Response<PlannerConfigResponse>, ApiError> {
    let config = state.service.config();

    Ok(Response::OK(PlannerConfigResponse {
        data: PlannerSettings {
            geolocation: GeolocationOptions::from(&config.geolocation),
            default_bbox: config.planner.default_bbox,
            default_soil_type: config.planner.default_soil_type,
            climate: config.planner.climate,
            max_recommendations: config.planner.max_recommendations,
        },
    }))
}
