use axum::{
    Json,
    extract::{FromRequest, Request, multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use terranova_core::domain::common::entities::app_errors::{CoreError, ErrorKind};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

fn core_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Transport => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Http
        | ErrorKind::HttpOpaque
        | ErrorKind::InvalidResponse
        | ErrorKind::ServiceLogic => StatusCode::BAD_GATEWAY,
        ErrorKind::Superseded => StatusCode::CONFLICT,
        ErrorKind::Invalid => StatusCode::BAD_REQUEST,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(err) => core_status(err.kind()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::PayloadTooLarge(_) => "E_PAYLOAD_TOO_LARGE",
            ApiError::UnprocessableEntity(_) => "E_UNPROCESSABLE_ENTITY",
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
            ApiError::Core(err) => err.kind().as_str(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Core(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ApiErrorResponse {
            code: self.code().to_string(),
            status: status.as_u16(),
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor that runs the payload's `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}
