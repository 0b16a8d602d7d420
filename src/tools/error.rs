//! Tool execution error types.

/// Failures raised while looking up or running a tool.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Invalid arguments provided to the tool.
    #[error("invalid tool arguments: {0}")]
    InvalidArgs(String),

    /// Tool execution failed with a message to show the model.
    #[error("tool execution failed: {0}")]
    Execution(String),

    /// Tool not found in registry.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Tool cannot run, usually for lack of credentials or a collaborator.
    #[error("tool unavailable: {0}")]
    Unavailable(String),
}
