use serde_json::{Map, Value};

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        error_body::{DIAGNOSIS_MESSAGE_FIELDS, http_failure, is_success},
    },
    diagnosis::entities::DiagnosisResult,
};

pub const ANALYZE_FAILED_MESSAGE: &str = "Failed to analyze image";
pub const DIAGNOSIS_TRANSPORT_MESSAGE: &str =
    "Error analyzing crop image. Make sure the backend is running.";

const REQUIRED_FIELDS: [&str; 2] = ["disease", "crop"];

/// Interprets a completed `/diagnose` exchange.
pub fn interpret_diagnosis_response(status: u16, body: &[u8]) -> Result<DiagnosisResult, CoreError> {
    if !is_success(status) {
        return Err(http_failure(
            status,
            body,
            &DIAGNOSIS_MESSAGE_FIELDS,
            ANALYZE_FAILED_MESSAGE,
        ));
    }

    parse_diagnosis_body(body)
}

/// Decodes a successful diagnosis body, rejecting payloads without a usable
/// `disease` and `crop`.
pub fn parse_diagnosis_body(body: &[u8]) -> Result<DiagnosisResult, CoreError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Diagnosis body is not JSON: {}", e);
        CoreError::InvalidResponse(format!("diagnosis body is not JSON: {}", e))
    })?;

    validate_diagnosis_value(value)
}

pub fn validate_diagnosis_value(mut value: Value) -> Result<DiagnosisResult, CoreError> {
    let object = value.as_object_mut().ok_or_else(|| {
        CoreError::InvalidResponse("diagnosis body is not a JSON object".to_string())
    })?;

    for field in REQUIRED_FIELDS {
        if !is_truthy_text(object.get(field)) {
            return Err(CoreError::InvalidResponse(format!(
                "missing or empty `{}`",
                field
            )));
        }
    }

    normalize(object);

    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Invalid diagnosis format: {}", e);
        CoreError::InvalidResponse(format!("invalid diagnosis format: {}", e))
    })
}

fn is_truthy_text(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(text)) if !text.is_empty())
}

fn normalize(object: &mut Map<String, Value>) {
    // nulls fall back to field defaults
    object.retain(|_, value| !value.is_null());

    if let Some(Value::Object(notes)) = object.get("additional_notes") {
        let flattened = flatten_notes(notes);
        object.insert("additional_notes".to_string(), Value::String(flattened));
    }
}

/// `{"Cautions": "a", "Tips": "b"}` becomes `"Cautions: a Tips: b"`.
fn flatten_notes(notes: &Map<String, Value>) -> String {
    notes
        .iter()
        .map(|(key, value)| match value {
            Value::String(text) => format!("{}: {}", key, text),
            other => format!("{}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
