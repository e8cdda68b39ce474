use reqwest::Client;

use crate::domain::{
    common::{BackendConfig, entities::app_errors::CoreError},
    planner::{
        entities::{SoilRecommendationRequest, SoilRecommendationResponse},
        ports::PlannerClient,
        validation::{PLANNER_TRANSPORT_MESSAGE, interpret_recommendation_response},
    },
};

#[derive(Debug, Clone)]
pub struct ReqwestPlannerClient {
    client: Client,
    url: String,
}

impl ReqwestPlannerClient {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            url: config.endpoint(&config.recommend_path),
        }
    }
}

fn transport_error(e: reqwest::Error) -> CoreError {
    tracing::error!("Recommendation request failed: {}", e);
    CoreError::Transport {
        message: PLANNER_TRANSPORT_MESSAGE.to_string(),
    }
}

impl PlannerClient for ReqwestPlannerClient {
    async fn recommend(
        &self,
        request: SoilRecommendationRequest,
    ) -> Result<SoilRecommendationResponse, CoreError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        interpret_recommendation_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        domain::planner::entities::{BoundingBox, Climate, SoilType},
        test_support::{refused_base_url, serve},
    };

    /// Local `recommend_satellite` that records each JSON body and answers
    /// with `status` and `body`.
    async fn planner_backend(
        status: StatusCode,
        body: Value,
    ) -> (ReqwestPlannerClient, Arc<Mutex<Vec<Value>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let router = Router::new().route(
            "/api/planner/recommend_satellite",
            post(move |Json(sent): Json<Value>| {
                sink.lock().unwrap().push(sent);
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );

        let config = BackendConfig {
            base_url: serve(router).await,
            ..BackendConfig::default()
        };
        (ReqwestPlannerClient::new(Client::new(), &config), received)
    }

    fn request() -> SoilRecommendationRequest {
        SoilRecommendationRequest {
            coords: BoundingBox::new(11.0168, 76.9558, 11.0268, 76.9658),
            soil_type: SoilType::BlackSoil,
            climate: Climate::default(),
        }
    }

    #[test]
    fn test_custom_recommend_path() {
        let config = BackendConfig {
            base_url: "http://127.0.0.1:9000".to_string(),
            recommend_path: "/v2/recommend".to_string(),
            ..BackendConfig::default()
        };
        let client = ReqwestPlannerClient::new(Client::new(), &config);
        assert_eq!(client.url, "http://127.0.0.1:9000/v2/recommend");
    }

    #[tokio::test]
    async fn test_posts_flat_json_request() {
        let (client, received) = planner_backend(
            StatusCode::OK,
            json!({
                "status": "success",
                "soil_data": { "n": 120, "p": 60, "k": 45, "ph": 6.8 },
                "recommendations": [{ "crop": "Cotton", "suitability": 88, "reason": "Deep soil" }]
            }),
        )
        .await;

        let response = client.recommend(request()).await.unwrap();

        assert_eq!(response.soil_data.ph, 6.8);
        assert_eq!(response.recommendations[0].crop, "Cotton");
        assert_eq!(
            *received.lock().unwrap(),
            vec![json!({
                "coords": [11.0168, 76.9558, 11.0268, 76.9658],
                "soil_type": "Black Soil",
                "temperature": 28.0,
                "humidity": 65.0,
                "rainfall": 120.0
            })]
        );
    }

    #[tokio::test]
    async fn test_server_error_prefers_message_field() {
        let (client, _) = planner_backend(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": "KeyError: 'coords'",
                "message": "Failed to generate crop recommendations"
            }),
        )
        .await;

        let err = client.recommend(request()).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::Http {
                status: 500,
                message: "Failed to generate crop recommendations".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_on_ok_response_is_service_logic() {
        let (client, _) = planner_backend(
            StatusCode::OK,
            json!({ "status": "error", "message": "Sentinel tile unavailable" }),
        )
        .await;

        let err = client.recommend(request()).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::ServiceLogic("Sentinel tile unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_transport_error() {
        let config = BackendConfig {
            base_url: refused_base_url().await,
            ..BackendConfig::default()
        };
        let client = ReqwestPlannerClient::new(Client::new(), &config);

        let err = client.recommend(request()).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::Transport {
                message: PLANNER_TRANSPORT_MESSAGE.to_string()
            }
        );
    }
}
