use serde::{Deserialize, Serialize};
use terranova_core::{
    domain::planner::entities::{BoundingBox, Climate, SoilType},
    infrastructure::geolocation::ReportedGeolocation,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationOutcome {
    Position,
    Error,
    Unsupported,
}

/// Result of the device's own geolocation lookup.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReportLocationValidator {
    pub outcome: LocationOutcome,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    #[serde(default)]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    #[serde(default)]
    pub longitude: Option<f64>,

    /// 1 permission denied, 2 position unavailable, 3 timeout.
    #[validate(range(min = 1, message = "code must be positive"))]
    #[serde(default)]
    pub code: Option<u16>,
}

impl ReportLocationValidator {
    pub fn into_reported(self) -> Result<ReportedGeolocation, ApiError> {
        match self.outcome {
            LocationOutcome::Position => match (self.latitude, self.longitude) {
                (Some(latitude), Some(longitude)) => Ok(ReportedGeolocation::Position {
                    latitude,
                    longitude,
                }),
                _ => Err(ApiError::BadRequest(
                    "latitude and longitude are required for a position".to_string(),
                )),
            },
            LocationOutcome::Error => self
                .code
                .map(|code| ReportedGeolocation::Error { code })
                .ok_or_else(|| ApiError::BadRequest("code is required for an error".to_string())),
            LocationOutcome::Unsupported => Ok(ReportedGeolocation::Unsupported),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangeSoilTypeValidator {
    #[validate(length(min = 1, message = "soil_type is required"))]
    #[schema(example = "Black Soil")]
    pub soil_type: String,
}

impl ChangeSoilTypeValidator {
    pub fn soil_type(&self) -> Result<SoilType, ApiError> {
        Ok(self.soil_type.parse()?)
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecommendValidator {
    /// south, west, north, east
    #[schema(value_type = Vec<f64>)]
    pub coords: [f64; 4],

    #[validate(length(min = 1, message = "soil_type is required"))]
    pub soil_type: String,

    #[validate(range(min = -60.0, max = 60.0, message = "temperature must be between -60 and 60"))]
    #[serde(default)]
    pub temperature: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "humidity must be between 0 and 100"))]
    #[serde(default)]
    pub humidity: Option<f64>,

    #[validate(range(min = 0.0, message = "rainfall cannot be negative"))]
    #[serde(default)]
    pub rainfall: Option<f64>,
}

impl RecommendValidator {
    pub fn bbox(&self) -> Result<BoundingBox, ApiError> {
        let [south, west, north, east] = self.coords;

        let latitudes_ok = (-90.0..=90.0).contains(&south) && (-90.0..=90.0).contains(&north);
        let longitudes_ok = (-180.0..=180.0).contains(&west) && (-180.0..=180.0).contains(&east);
        if !latitudes_ok || !longitudes_ok || south > north || west > east {
            return Err(ApiError::BadRequest(
                "coords must be [south, west, north, east] within valid ranges".to_string(),
            ));
        }

        Ok(BoundingBox::new(south, west, north, east))
    }

    pub fn soil_type(&self) -> Result<SoilType, ApiError> {
        Ok(self.soil_type.parse()?)
    }

    /// Missing readings fall back to `defaults`.
    pub fn climate(&self, defaults: Climate) -> Climate {
        Climate {
            temperature: self.temperature.unwrap_or(defaults.temperature),
            humidity: self.humidity.unwrap_or(defaults.humidity),
            rainfall: self.rainfall.unwrap_or(defaults.rainfall),
        }
    }
}
