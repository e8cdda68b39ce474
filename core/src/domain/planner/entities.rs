use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, planner::nutrients::NutrientLevel,
};

/// Area sent to the satellite service, serialized as `[south, west, north, east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Square box of `half_span` degrees on each side of `center`.
    pub fn around(center: Coordinates, half_span: f64) -> Self {
        Self {
            south: center.latitude - half_span,
            west: center.longitude - half_span,
            north: center.latitude + half_span,
            east: center.longitude + half_span,
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.south, self.west, self.north, self.east]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([south, west, north, east]: [f64; 4]) -> Self {
        Self::new(south, west, north, east)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.as_array()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SoilType {
    #[default]
    #[serde(rename = "Red Loam")]
    RedLoam,
    #[serde(rename = "Black Soil")]
    BlackSoil,
    Alluvial,
    Sandy,
    Clayey,
    Laterite,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::RedLoam,
        SoilType::BlackSoil,
        SoilType::Alluvial,
        SoilType::Sandy,
        SoilType::Clayey,
        SoilType::Laterite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::RedLoam => "Red Loam",
            SoilType::BlackSoil => "Black Soil",
            SoilType::Alluvial => "Alluvial",
            SoilType::Sandy => "Sandy",
            SoilType::Clayey => "Clayey",
            SoilType::Laterite => "Laterite",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ");
        SoilType::ALL
            .into_iter()
            .find(|soil| soil.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CoreError::Invalid(format!("unknown soil type: {}", s)))
    }
}

/// Climate inputs of a recommendation request. Not measured yet, so they come
/// from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Climate {
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// mm per month
    pub rainfall: f64,
}

impl Default for Climate {
    fn default() -> Self {
        Self {
            temperature: 28.0,
            humidity: 65.0,
            rainfall: 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SoilRecommendationRequest {
    #[schema(value_type = Vec<f64>)]
    pub coords: BoundingBox,
    pub soil_type: SoilType,
    #[serde(flatten)]
    pub climate: Climate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SoilData {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_estimated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CropRecommendation {
    pub crop: String,
    /// 0 to 100. Older backends call it `score`.
    #[serde(alias = "score")]
    pub suitability: f64,
    #[serde(default)]
    pub reason: String,
}

/// Inputs the backend reports having used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EchoedLocation {
    #[serde(default)]
    #[schema(value_type = Option<Vec<f64>>)]
    pub coords: Option<BoundingBox>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub rainfall: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SoilRecommendationResponse {
    pub status: ResponseStatus,
    pub soil_data: SoilData,
    #[serde(default)]
    pub recommendations: Vec<CropRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EchoedLocation>,
}

/// Display-ready outcome of one planner fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldReport {
    pub request_id: u64,
    pub soil_type: SoilType,
    /// pH as the dashboard prints it, e.g. `"6.8"` or `"7"`.
    pub ph: String,
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
    pub soil_data: SoilData,
    pub recommendations: Vec<CropRecommendation>,
    #[schema(value_type = Vec<f64>)]
    pub bbox: BoundingBox,
    pub location_status: String,
    pub received_at: DateTime<Utc>,
}
