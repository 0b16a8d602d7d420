use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::tool::Tool;
use super::traits::{ChatProvider, ChatResponse};

/// A ready-to-call chat model, owned by the request that provisioned it.
pub type ModelHandle = Arc<dyn ChatProvider>;

/// Attaches a fixed tool set to a model handle.
pub trait BindTools {
    fn bind_tools(self, tools: Vec<Tool>) -> ModelHandle;
}

impl BindTools for ModelHandle {
    fn bind_tools(self, tools: Vec<Tool>) -> ModelHandle {
        Arc::new(ToolBoundModel::new(self, tools))
    }
}

/// Model handle that sends its bound tools with every chat call.
pub struct ToolBoundModel {
    inner: ModelHandle,
    tools: Vec<Tool>,
}

impl ToolBoundModel {
    pub fn new(inner: ModelHandle, tools: Vec<Tool>) -> Self {
        Self { inner, tools }
    }
}

#[async_trait]
impl ChatProvider for ToolBoundModel {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let tools = tools.or_else(|| self.tools());
        self.inner.chat_with_tools(messages, tools).await
    }

    fn tools(&self) -> Option<&[Tool]> {
        if self.tools.is_empty() {
            None
        } else {
            Some(&self.tools)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{text_reply, ScriptedModel};

    #[tokio::test]
    async fn bound_model_forwards_tools() {
        let scripted = Arc::new(ScriptedModel::new(vec![text_reply("ok")]));
        let handle: ModelHandle = scripted.clone();
        let tool = crate::builder::FunctionBuilder::new("search")
            .description("Search")
            .build();
        let bound = handle.bind_tools(vec![tool]);

        let msg = ChatMessage::user().content("hi").build();
        let response = bound.chat(&[msg]).await.expect("chat");

        assert_eq!(response.text().as_deref(), Some("ok"));
        assert_eq!(scripted.tool_counts(), vec![1]);
    }
}
