use reqwest::{
    Client,
    multipart::{Form, Part},
};

use crate::domain::{
    common::{BackendConfig, entities::app_errors::CoreError, error_body::is_success},
    diagnosis::{
        entities::DiagnosisResult,
        ports::DiagnosisClient,
        validation::{DIAGNOSIS_TRANSPORT_MESSAGE, interpret_diagnosis_response},
        value_objects::DiagnosisImage,
    },
};

#[derive(Debug, Clone)]
pub struct ReqwestDiagnosisClient {
    client: Client,
    url: String,
}

impl ReqwestDiagnosisClient {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            url: config.endpoint(&config.diagnose_path),
        }
    }

    fn form(image: DiagnosisImage) -> Result<Form, CoreError> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name_or_default().to_string())
            .mime_str(image.content_type_or_default())
            .map_err(|e| CoreError::Invalid(format!("invalid image content type: {}", e)))?;

        Ok(Form::new().part("file", part))
    }
}

fn transport_error(e: reqwest::Error) -> CoreError {
    tracing::error!("Diagnosis request failed: {}", e);
    CoreError::Transport {
        message: DIAGNOSIS_TRANSPORT_MESSAGE.to_string(),
    }
}

impl DiagnosisClient for ReqwestDiagnosisClient {
    async fn diagnose(&self, image: DiagnosisImage) -> Result<DiagnosisResult, CoreError> {
        let form = Self::form(image)?;

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        if !is_success(status) {
            tracing::error!(status, "Diagnosis backend returned an error");
        }

        interpret_diagnosis_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, extract::Multipart, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;
    use crate::test_support::{refused_base_url, serve};

    #[derive(Debug, Clone, PartialEq)]
    struct ReceivedPart {
        name: String,
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    }

    /// Local `/diagnose` that records every multipart part and answers with
    /// `status` and `body`.
    async fn diagnose_backend(
        status: StatusCode,
        body: Value,
    ) -> (ReqwestDiagnosisClient, Arc<Mutex<Vec<ReceivedPart>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let router = Router::new().route(
            "/diagnose",
            post(move |mut multipart: Multipart| {
                let sink = sink.clone();
                let body = body.clone();
                async move {
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        let file_name = field.file_name().map(str::to_string);
                        let content_type = field.content_type().map(str::to_string);
                        let bytes = field.bytes().await.unwrap().to_vec();
                        sink.lock().unwrap().push(ReceivedPart {
                            name,
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                    (status, Json(body))
                }
            }),
        );

        let config = BackendConfig {
            base_url: serve(router).await,
            ..BackendConfig::default()
        };
        (ReqwestDiagnosisClient::new(Client::new(), &config), received)
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = BackendConfig {
            base_url: "http://farm-box:8000/".to_string(),
            ..BackendConfig::default()
        };
        let client = ReqwestDiagnosisClient::new(Client::new(), &config);
        assert_eq!(client.url, "http://farm-box:8000/diagnose");
    }

    #[test]
    fn test_form_rejects_malformed_content_type() {
        let image = DiagnosisImage::new(vec![1u8, 2, 3]).with_content_type("not a mime");
        assert!(matches!(
            ReqwestDiagnosisClient::form(image),
            Err(CoreError::Invalid(_))
        ));

        let image = DiagnosisImage::new(vec![1u8, 2, 3]).with_content_type("image/png");
        assert!(ReqwestDiagnosisClient::form(image).is_ok());
    }

    #[tokio::test]
    async fn test_uploads_single_file_part() {
        let (client, received) = diagnose_backend(
            StatusCode::OK,
            json!({
                "disease": "Early Blight",
                "crop": "Tomato",
                "confidence": 92,
                "severity": "medium",
                "symptoms": ["dark concentric rings"],
                "treatment": "Apply Mancozeb 75 WP",
                "affected_area": "10-20%",
                "recovery_plan": [{ "day": 1, "action": "Remove infected leaves", "expectation": "Fewer new spots" }]
            }),
        )
        .await;
        let image = DiagnosisImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .with_file_name("leaf.jpg")
            .with_content_type("image/jpeg");

        let result = client.diagnose(image).await.unwrap();

        assert_eq!(result.disease, "Early Blight");
        assert_eq!(result.crop, "Tomato");
        assert_eq!(
            *received.lock().unwrap(),
            vec![ReceivedPart {
                name: "file".to_string(),
                file_name: Some("leaf.jpg".to_string()),
                content_type: Some("image/jpeg".to_string()),
                bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            }]
        );
    }

    #[tokio::test]
    async fn test_unnamed_upload_gets_default_part_metadata() {
        let (client, received) = diagnose_backend(
            StatusCode::OK,
            json!({ "disease": "Healthy", "crop": "Rice" }),
        )
        .await;

        client.diagnose(DiagnosisImage::new(vec![7u8; 16])).await.ok();

        let parts = received.lock().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].file_name.as_deref(), Some("upload.jpg"));
        assert_eq!(
            parts[0].content_type.as_deref(),
            Some("application/octet-stream")
        );
    }

    #[tokio::test]
    async fn test_rejected_upload_maps_to_http_error() {
        let (client, _) = diagnose_backend(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid image file" }),
        )
        .await;

        let err = client
            .diagnose(DiagnosisImage::new(vec![1u8, 2, 3]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::Http {
                status: 400,
                message: "Invalid image file".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_transport_error() {
        let config = BackendConfig {
            base_url: refused_base_url().await,
            ..BackendConfig::default()
        };
        let client = ReqwestDiagnosisClient::new(Client::new(), &config);

        let err = client
            .diagnose(DiagnosisImage::new(vec![1u8, 2, 3]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::Transport {
                message: DIAGNOSIS_TRANSPORT_MESSAGE.to_string()
            }
        );
    }
}
