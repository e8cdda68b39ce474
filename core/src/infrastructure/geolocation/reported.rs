use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::GeolocationConfig,
    planner::{
        entities::Coordinates,
        location::{GeolocationError, GeolocationFailure},
        ports::GeolocationProvider,
    },
};

/// Position lookup already performed by the device and reported back to us.
///
/// The device runs the lookup with the options served by `GET /planner/config`;
/// here they are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReportedGeolocation {
    Position { latitude: f64, longitude: f64 },
    Error { code: u16 },
    Unsupported,
}

impl GeolocationProvider for ReportedGeolocation {
    async fn current_position(
        &self,
        options: GeolocationConfig,
    ) -> Result<Coordinates, GeolocationFailure> {
        tracing::debug!(
            high_accuracy = options.high_accuracy,
            timeout_ms = options.timeout.as_millis() as u64,
            "Using device reported geolocation"
        );

        match *self {
            ReportedGeolocation::Position {
                latitude,
                longitude,
            } if in_range(latitude, longitude) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            ReportedGeolocation::Position { .. } => {
                Err(GeolocationError::PositionUnavailable.into())
            }
            ReportedGeolocation::Error { code } => Err(GeolocationError::from_code(code).into()),
            ReportedGeolocation::Unsupported => Err(GeolocationFailure::Unsupported),
        }
    }
}

fn in_range(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    async fn resolve(report: serde_json::Value) -> Result<Coordinates, GeolocationFailure> {
        let reported: ReportedGeolocation = serde_json::from_value(report).unwrap();
        reported
            .current_position(GeolocationConfig::default())
            .await
    }

    #[tokio::test]
    async fn test_position_report() {
        let position = resolve(json!({"outcome": "position", "latitude": 12.97, "longitude": 77.59}))
            .await
            .unwrap();
        assert_eq!(position.latitude, 12.97);
        assert_eq!(position.longitude, 77.59);
    }

    #[tokio::test]
    async fn test_error_codes_map_to_failures() {
        for (code, expected) in [
            (1, GeolocationError::PermissionDenied),
            (2, GeolocationError::PositionUnavailable),
            (3, GeolocationError::Timeout),
            (7, GeolocationError::Other(7)),
        ] {
            let failure = resolve(json!({"outcome": "error", "code": code}))
                .await
                .unwrap_err();
            assert_eq!(failure, GeolocationFailure::Error(expected));
        }
    }

    #[tokio::test]
    async fn test_unsupported_and_nonsense_positions() {
        assert_eq!(
            resolve(json!({"outcome": "unsupported"})).await.unwrap_err(),
            GeolocationFailure::Unsupported
        );
        assert_eq!(
            resolve(json!({"outcome": "position", "latitude": 123.0, "longitude": 0.0}))
                .await
                .unwrap_err(),
            GeolocationFailure::Error(GeolocationError::PositionUnavailable)
        );
    }
}
