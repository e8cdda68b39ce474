use axum::{
    Extension,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use terranova_core::domain::diagnosis::{
    entities::DiagnosisReport, ports::DiagnosisService, value_objects::DiagnosisImage,
};
use tracing::warn;
use utoipa::ToSchema;

use crate::application::{
    device_middleware::DeviceContext,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Multipart form accepted by [`diagnose_crop`].
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct DiagnoseCropForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DiagnoseCropResponse {
    pub data: DiagnosisReport,
}

#[utoipa::path(
    post,
    path = "/diagnose",
    tag = "crop-doctor",
    summary = "Diagnose a crop photo",
    description = "Forwards the uploaded leaf or plant photo to the AI backend and returns the diagnosis. A newer upload from the same device supersedes this one.",
    request_body(content = DiagnoseCropForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = DiagnoseCropResponse),
        (status = 400, description = "Missing or empty `file` field"),
        (status = 409, description = "Superseded by a newer upload"),
        (status = 413, description = "Image too large"),
        (status = 502, description = "Backend reported a failure"),
        (status = 503, description = "Backend unreachable")
    ),
    params(
        ("x-device-id" = Option<String>, Header, description = "Device session id"),
    ),
)]
pub async fn diagnose_crop(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    mut multipart: Multipart,
) -> Result<Response<DiagnoseCropResponse>, ApiError> {
    let mut image: Option<DiagnosisImage> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        if data.is_empty() {
            warn!(device_id = %device.device_id, "Empty image upload attempted");
            return Err(ApiError::BadRequest("File cannot be empty".to_string()));
        }

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::PayloadTooLarge(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }

        let mut upload = DiagnosisImage::new(data);
        if let Some(file_name) = file_name {
            upload = upload.with_file_name(file_name);
        }
        if let Some(content_type) = content_type {
            upload = upload.with_content_type(content_type);
        }
        image = Some(upload);
    }

    let image = image
        .ok_or_else(|| ApiError::BadRequest("Missing 'file' field in multipart form".to_string()))?;

    let report = state
        .service
        .diagnose_in_session(&device.sessions.diagnosis, image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DiagnoseCropResponse { data: report }))
}
