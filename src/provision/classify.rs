use std::fmt;

use crate::error::LLMError;

/// Provider failure classes that drive retry and user guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unavailable,
    RateLimited,
    Unauthorized,
    Other,
}

impl ErrorKind {
    /// Classifies a provider error, preferring the typed status over text.
    pub fn classify(err: &LLMError) -> Self {
        if let LLMError::AuthError(_) = err {
            return ErrorKind::Unauthorized;
        }
        match err.status() {
            Some(503) => ErrorKind::Unavailable,
            Some(429) => ErrorKind::RateLimited,
            Some(401) | Some(403) => ErrorKind::Unauthorized,
            _ => Self::from_message(&err.to_string()),
        }
    }

    /// Substring fallback for errors that carry no status code.
    pub fn from_message(message: &str) -> Self {
        if message.contains("503") || message.contains("Service unavailable") {
            ErrorKind::Unavailable
        } else if message.contains("429") {
            ErrorKind::RateLimited
        } else if message.contains("401") {
            ErrorKind::Unauthorized
        } else {
            ErrorKind::Other
        }
    }

    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::Unavailable | ErrorKind::RateLimited)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Unavailable => "service unavailable",
            ErrorKind::RateLimited => "rate limit exceeded",
            ErrorKind::Unauthorized => "authentication failed",
            ErrorKind::Other => "provider error",
        };
        f.write_str(label)
    }
}
