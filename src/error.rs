use thiserror::Error;

/// Error types that can occur when preparing a request for, or talking to,
/// the remote model service.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No usable credential or invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    Auth(String),
    /// Errors returned by the model provider
    #[error("Provider error: {0}")]
    Provider(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormat {
        message: String,
        raw_response: String,
    },
    /// Unsupported or corrupt caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    Json(String),
}

/// Coarse classification of an [`AssistantError`], carried by
/// [`TurnResult`](crate::session::TurnResult) so callers can distinguish a
/// misconfigured client from a failed round trip or a bad upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable credential; no network attempt was made
    Configuration,
    /// A text or multimodal round trip failed
    RemoteCall,
    /// The uploaded input was rejected before any remote call
    Input,
}

impl AssistantError {
    /// Classify this error for the [`TurnResult`](crate::session::TurnResult) taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssistantError::Configuration(_) => ErrorKind::Configuration,
            AssistantError::InvalidInput(_) => ErrorKind::Input,
            AssistantError::Http(_)
            | AssistantError::Auth(_)
            | AssistantError::Provider(_)
            | AssistantError::ResponseFormat { .. }
            | AssistantError::Json(_) => ErrorKind::RemoteCall,
        }
    }
}

/// Converts reqwest HTTP errors into AssistantErrors
impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::Json(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
