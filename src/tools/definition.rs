use async_trait::async_trait;

use super::error::ToolError;

/// Name and description shown to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A tool that answers a text query with text.
#[async_trait]
pub trait TextTool: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    async fn call(&self, query: &str) -> Result<String, ToolError>;
}
