use thiserror::Error;

/// Error types that can occur when talking to remote providers.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP transport errors (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors raised before a request is sent
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Non-success HTTP status returned by the provider
    #[error("Provider returned status {status}: {message}")]
    ProviderStatus { status: u16, message: String },
    /// Errors reported by the provider inside a successful response
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
}

impl LLMError {
    /// HTTP status carried by the error, when the provider answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LLMError::ProviderStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Converts reqwest HTTP errors into LLMErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LLMError::ProviderStatus {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => LLMError::HttpError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
