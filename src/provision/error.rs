use thiserror::Error;

use super::classify::ErrorKind;

/// Reasons provisioning could not produce a model handle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded after {attempts} attempts: {last_message}")]
    RateLimited {
        attempts: usize,
        last_message: String,
    },
    #[error("Groq service unavailable after {attempts} attempts: {last_message}")]
    ServiceUnavailable {
        attempts: usize,
        last_message: String,
    },
    #[error("Error initializing model: {0}")]
    Provision(String),
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProvisionError::Authentication(_) => ErrorKind::Unauthorized,
            ProvisionError::RateLimited { .. } => ErrorKind::RateLimited,
            ProvisionError::ServiceUnavailable { .. } => ErrorKind::Unavailable,
            ProvisionError::Provision(_) => ErrorKind::Other,
        }
    }
}
