use serde_json::Value;

use crate::domain::common::entities::app_errors::CoreError;

/// Field lookup order for the diagnosis service's failure bodies.
pub const DIAGNOSIS_MESSAGE_FIELDS: [&str; 3] = ["error", "message", "detail"];

/// The planner surfaces the human-readable `message` before the raw `error`.
pub const PLANNER_MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// First of `fields` holding a truthy scalar, rendered as text.
///
/// Empty strings, `0`, `false` and `null` are skipped; arrays and objects
/// never make a message.
pub fn first_message(value: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match value.get(field) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    })
}

/// Maps a non-2xx response to [`CoreError::Http`] when the body names a
/// message, else to [`CoreError::HttpOpaque`] carrying `fallback`.
pub fn http_failure(status: u16, body: &[u8], fields: &[&str], fallback: &str) -> CoreError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| first_message(&value, fields));

    match message {
        Some(message) => CoreError::Http { status, message },
        None => CoreError::HttpOpaque {
            status,
            message: fallback.to_string(),
        },
    }
}
