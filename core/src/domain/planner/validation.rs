use serde_json::Value;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        error_body::{PLANNER_MESSAGE_FIELDS, first_message, http_failure, is_success},
    },
    planner::entities::SoilRecommendationResponse,
};

pub const PLANNER_TRANSPORT_MESSAGE: &str = "Connect to local AI backend to view live analysis";
pub const PLANNER_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Interprets a completed `recommend_satellite` exchange.
///
/// An explicit `status` in the body wins over the HTTP status, except that a
/// `"success"` body on a non-2xx response is still treated as a failure.
pub fn interpret_recommendation_response(
    status: u16,
    body: &[u8],
) -> Result<SoilRecommendationResponse, CoreError> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) if is_success(status) => {
            tracing::error!("Recommendation body is not JSON: {}", e);
            return Err(CoreError::InvalidResponse(format!(
                "recommendation body is not JSON: {}",
                e
            )));
        }
        Err(_) => {
            return Err(CoreError::HttpOpaque {
                status,
                message: PLANNER_FAILED_MESSAGE.to_string(),
            });
        }
    };

    match value.get("status").and_then(Value::as_str) {
        Some("success") if is_success(status) => decode_success(value),
        Some("success") | None if !is_success(status) => Err(http_failure(
            status,
            body,
            &PLANNER_MESSAGE_FIELDS,
            PLANNER_FAILED_MESSAGE,
        )),
        Some(reported) if reported != "success" => Err(CoreError::ServiceLogic(
            first_message(&value, &PLANNER_MESSAGE_FIELDS)
                .unwrap_or_else(|| PLANNER_FAILED_MESSAGE.to_string()),
        )),
        _ => Err(CoreError::InvalidResponse(
            "missing `status` in recommendation body".to_string(),
        )),
    }
}

fn decode_success(value: Value) -> Result<SoilRecommendationResponse, CoreError> {
    if value.get("soil_data").is_none_or(Value::is_null) {
        return Err(CoreError::InvalidResponse(
            "missing `soil_data` in recommendation body".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Invalid recommendation format: {}", e);
        CoreError::InvalidResponse(format!("invalid recommendation format: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::planner::entities::ResponseStatus;

    const SUCCESS_BODY: &str = r#"{
        "status": "success",
        "soil_data": {"n": 120, "p": 60, "k": 45, "ph": 6.8, "type": "Red Loam"},
        "recommendations": [{"crop": "Cotton", "suitability": 88, "reason": "Deep red loam holds moisture"}],
        "location": {"coords": [11.0168, 76.9558, 11.0268, 76.9658], "temperature": 28, "humidity": 65, "rainfall": 120}
    }"#;

    #[test]
    fn test_success_body_is_decoded() {
        let response = interpret_recommendation_response(200, SUCCESS_BODY.as_bytes()).unwrap();
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.soil_data.n, 120.0);
        assert_eq!(response.soil_data.soil_type.as_deref(), Some("Red Loam"));
        assert_eq!(response.recommendations[0].crop, "Cotton");
        assert_eq!(
            response.location.and_then(|l| l.temperature),
            Some(28.0)
        );
    }

    #[test]
    fn test_error_status_surfaces_message() {
        let err = interpret_recommendation_response(
            200,
            br#"{"status":"error","message":"Sentinel tile unavailable"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::ServiceLogic("Sentinel tile unavailable".to_string())
        );

        let err = interpret_recommendation_response(200, br#"{"status":"error"}"#).unwrap_err();
        assert_eq!(err.to_string(), PLANNER_FAILED_MESSAGE);
    }

    #[test]
    fn test_missing_status_on_success_is_invalid() {
        let err = interpret_recommendation_response(200, br#"{"soil_data":{}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));

        let err = interpret_recommendation_response(200, br#"{"status":"success"}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }

    #[test]
    fn test_backend_exception_body() {
        let err = interpret_recommendation_response(
            500,
            br#"{"error":"Expecting value: line 1 column 1","message":"Failed to generate crop recommendations"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::Http {
                status: 500,
                message: "Failed to generate crop recommendations".to_string()
            }
        );
    }

    #[test]
    fn test_unparseable_bodies() {
        let err = interpret_recommendation_response(502, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            CoreError::HttpOpaque {
                status: 502,
                message: PLANNER_FAILED_MESSAGE.to_string()
            }
        );

        let err = interpret_recommendation_response(200, b"not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }
}
