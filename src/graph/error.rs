use thiserror::Error;

use crate::{error::LLMError, provision::ErrorKind};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("model call failed: {0}")]
    Model(#[from] LLMError),
    #[error("checkpoint error: {0}")]
    Checkpoint(String),
    #[error("recursion limit of {0} steps reached without a final answer")]
    RecursionLimit(usize),
    #[error("tool-augmented graph requires a tool registry")]
    MissingTools,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::Model(err) => ErrorKind::classify(err),
            other => ErrorKind::from_message(&other.to_string()),
        }
    }
}
