use crate::{
    chat::{ChatMessage, ChatRole},
    FunctionCall, ToolCall,
};

/// One entry of the conversation a graph operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    User(String),
    Assistant(String),
    /// The model asked for tools instead of answering.
    ToolCalls(Vec<ToolCall>),
    /// Output of one tool call.
    Tool {
        call_id: String,
        name: String,
        content: String,
    },
}

impl Message {
    pub fn assistant_text(&self) -> Option<&str> {
        match self {
            Message::Assistant(text) => Some(text),
            _ => None,
        }
    }

    pub fn to_chat_message(&self) -> ChatMessage {
        match self {
            Message::User(text) => ChatMessage::user().content(text.clone()).build(),
            Message::Assistant(text) => ChatMessage::assistant().content(text.clone()).build(),
            Message::ToolCalls(calls) => ChatMessage::assistant().tool_use(calls.clone()).build(),
            Message::Tool {
                call_id,
                name,
                content,
            } => ChatMessage::user()
                .tool_result(vec![ToolCall {
                    id: call_id.clone(),
                    call_type: "function".to_string(),
                    function: FunctionCall {
                        name: name.clone(),
                        arguments: content.clone(),
                    },
                }])
                .build(),
        }
    }

    pub fn role(&self) -> ChatRole {
        match self {
            Message::User(_) | Message::Tool { .. } => ChatRole::User,
            Message::Assistant(_) | Message::ToolCalls(_) => ChatRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
}

impl ConversationState {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::User(text.into())],
        }
    }

    /// Converts the conversation for a model call. An assistant message
    /// directly followed by tool calls travels as one tool-use message.
    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        let mut out = Vec::with_capacity(self.messages.len());
        let mut iter = self.messages.iter().peekable();
        while let Some(message) = iter.next() {
            if let (Message::Assistant(text), Some(Message::ToolCalls(calls))) =
                (message, iter.peek())
            {
                out.push(
                    ChatMessage::assistant()
                        .content(text.clone())
                        .tool_use(calls.clone())
                        .build(),
                );
                iter.next();
                continue;
            }
            out.push(message.to_chat_message());
        }
        out
    }

    pub fn first_assistant(&self) -> Option<&str> {
        self.messages.iter().find_map(Message::assistant_text)
    }

    pub fn last_assistant(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(Message::assistant_text)
    }
}

/// Messages produced by one executed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEvent {
    pub node: &'static str,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// `chatbot` once, history carried by the checkpointer.
    Basic,
    /// `chatbot` and `tools` looping until the model stops requesting tools.
    ToolAugmented,
}
