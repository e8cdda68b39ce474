use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The backend could not be reached at all.
    #[error("{message}")]
    Transport { message: String },

    /// Non-2xx response carrying an `error` / `message` / `detail` field.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Non-2xx response whose body gave nothing usable.
    #[error("{message}")]
    HttpOpaque { status: u16, message: String },

    /// 2xx response that is structurally invalid.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// The body explicitly reports `status: "error"`.
    #[error("{0}")]
    ServiceLogic(String),

    /// A newer request was started in the same session before this one completed.
    #[error("Request {token} was superseded by request {latest}")]
    Superseded { token: u64, latest: u64 },

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl CoreError {
    /// Text shown to the farmer when the request fails.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::InvalidResponse(_) => {
                "The AI backend returned an unexpected response. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Transport { .. } => ErrorKind::Transport,
            CoreError::Http { .. } => ErrorKind::Http,
            CoreError::HttpOpaque { .. } => ErrorKind::HttpOpaque,
            CoreError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            CoreError::ServiceLogic(_) => ErrorKind::ServiceLogic,
            CoreError::Superseded { .. } => ErrorKind::Superseded,
            CoreError::Invalid(_) => ErrorKind::Invalid,
        }
    }
}

/// Flat classification of [`CoreError`], used for logs and API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Http,
    HttpOpaque,
    InvalidResponse,
    ServiceLogic,
    Superseded,
    Invalid,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "E_TRANSPORT",
            ErrorKind::Http => "E_HTTP",
            ErrorKind::HttpOpaque => "E_HTTP_OPAQUE",
            ErrorKind::InvalidResponse => "E_INVALID_RESPONSE",
            ErrorKind::ServiceLogic => "E_SERVICE_LOGIC",
            ErrorKind::Superseded => "E_SUPERSEDED",
            ErrorKind::Invalid => "E_INVALID_INPUT",
        }
    }
}
