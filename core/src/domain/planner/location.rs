use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::{
    common::{GeolocationConfig, PlannerConfig},
    planner::{entities::BoundingBox, ports::GeolocationProvider},
};

pub const LIVE_LOCATION_STATUS: &str = "Using Your Live Location";
pub const UNSUPPORTED_STATUS: &str = "Geolocation not supported";
const FALLBACK_SUFFIX: &str = " - Using Demo Farm";

/// Geolocation failure reported by the device, keyed by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Permission Denied")]
    PermissionDenied,
    #[error("Signal Unavailable")]
    PositionUnavailable,
    #[error("GPS Timeout")]
    Timeout,
    #[error("Location Error")]
    Other(u16),
}

impl GeolocationError {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            other => GeolocationError::Other(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            GeolocationError::PermissionDenied => 1,
            GeolocationError::PositionUnavailable => 2,
            GeolocationError::Timeout => 3,
            GeolocationError::Other(code) => *code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationFailure {
    #[error(transparent)]
    Error(#[from] GeolocationError),
    /// The device has no geolocation capability at all.
    #[error("Geolocation not supported")]
    Unsupported,
}

impl GeolocationFailure {
    pub fn status_text(&self) -> String {
        match self {
            GeolocationFailure::Error(err) => format!("{}{}", err, FALLBACK_SUFFIX),
            GeolocationFailure::Unsupported => UNSUPPORTED_STATUS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    Live,
    Fallback,
}

/// Outcome of the location step; always yields a box to fetch with.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResolution {
    pub bbox: BoundingBox,
    pub source: LocationSource,
    pub status: String,
    pub failure: Option<GeolocationFailure>,
}

impl LocationResolution {
    pub fn live(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            source: LocationSource::Live,
            status: LIVE_LOCATION_STATUS.to_string(),
            failure: None,
        }
    }

    pub fn fallback(default_bbox: BoundingBox, failure: GeolocationFailure) -> Self {
        Self {
            bbox: default_bbox,
            source: LocationSource::Fallback,
            status: failure.status_text(),
            failure: Some(failure),
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == LocationSource::Live
    }
}

/// Asks `provider` for a position and derives the request box, falling back to
/// the reference farm on any failure.
pub async fn resolve_location<G>(
    provider: &G,
    geolocation: &GeolocationConfig,
    planner: &PlannerConfig,
) -> LocationResolution
where
    G: GeolocationProvider,
{
    match provider.current_position(geolocation.clone()).await {
        Ok(position) => {
            tracing::debug!(
                latitude = position.latitude,
                longitude = position.longitude,
                "Live position resolved"
            );
            LocationResolution::live(BoundingBox::around(position, planner.bbox_half_span))
        }
        Err(failure) => {
            tracing::info!(reason = %failure, "Falling back to default location");
            LocationResolution::fallback(planner.default_bbox, failure)
        }
    }
}
