use thiserror::Error;

use crate::{
    graph::GraphError,
    provision::{ErrorKind, ProvisionError},
    tools::ToolError,
};

pub const GROQ_STATUS_PAGE: &str = "https://groqstatus.com/";

/// Why a turn was abandoned. The session keeps no assistant entry for it.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    #[error("Graph execution failed: {message}")]
    GraphExecution { kind: ErrorKind, message: String },
}

impl TurnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TurnError::Provision(err) => err.kind(),
            TurnError::GraphExecution { kind, .. } => *kind,
        }
    }

    /// What the user can do about it.
    pub fn guidance(&self) -> String {
        match self.kind() {
            ErrorKind::Unavailable => format!(
                "The Groq service is temporarily unavailable. Check {GROQ_STATUS_PAGE} and try again in a few minutes, or pick a different model."
            ),
            ErrorKind::RateLimited => {
                "Rate limit exceeded. Wait a moment before sending another message.".to_string()
            }
            ErrorKind::Unauthorized => {
                "Check that your Groq API key is valid and has access to the selected model."
                    .to_string()
            }
            ErrorKind::Other => "Try again, or choose a different model or use case.".to_string(),
        }
    }
}

impl From<GraphError> for TurnError {
    fn from(err: GraphError) -> Self {
        TurnError::GraphExecution {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<ToolError> for TurnError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        TurnError::GraphExecution {
            kind: ErrorKind::from_message(&message),
            message,
        }
    }
}
