use std::time::Duration;

use crate::domain::planner::entities::{BoundingBox, Climate, SoilType};

pub mod entities;
pub mod error_body;
pub mod sequencing;
pub mod services;

#[derive(Clone, Debug, Default)]
pub struct TerraNovaConfig {
    pub backend: BackendConfig,
    pub planner: PlannerConfig,
    pub geolocation: GeolocationConfig,
}

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub diagnose_path: String,
    pub recommend_path: String,
    pub health_path: String,
    /// `None` leaves requests without a client-side timeout.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            diagnose_path: "/diagnose".to_string(),
            recommend_path: "/api/planner/recommend_satellite".to_string(),
            health_path: "/health".to_string(),
            request_timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Reference farm used whenever no live position is available.
    pub default_bbox: BoundingBox,
    pub default_soil_type: SoilType,
    pub climate: Climate,
    /// Degrees added on each side of a live position.
    pub bbox_half_span: f64,
    pub max_recommendations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_bbox: BoundingBox::new(11.0168, 76.9558, 11.0268, 76.9658),
            default_soil_type: SoilType::RedLoam,
            climate: Climate::default(),
            bbox_half_span: 0.005,
            max_recommendations: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeolocationConfig {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}
