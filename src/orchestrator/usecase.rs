use std::fmt;
use std::str::FromStr;

use crate::{error::LLMError, graph::Topology};

/// Conversation flows offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    BasicChatbot,
    ChatbotWithWeb,
}

impl UseCase {
    pub const ALL: [UseCase; 2] = [UseCase::BasicChatbot, UseCase::ChatbotWithWeb];

    pub fn label(self) -> &'static str {
        match self {
            UseCase::BasicChatbot => "Basic Chatbot",
            UseCase::ChatbotWithWeb => "Chatbot With Web",
        }
    }

    pub fn topology(self) -> Topology {
        match self {
            UseCase::BasicChatbot => Topology::Basic,
            UseCase::ChatbotWithWeb => Topology::ToolAugmented,
        }
    }

    pub fn needs_search_key(self) -> bool {
        matches!(self, UseCase::ChatbotWithWeb)
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UseCase {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic chatbot" | "basic" => Ok(UseCase::BasicChatbot),
            "chatbot with web" | "web" | "tools" => Ok(UseCase::ChatbotWithWeb),
            _ => Err(LLMError::InvalidRequest(format!("Unknown use case: {s}"))),
        }
    }
}
