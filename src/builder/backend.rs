use std::fmt;

use crate::error::LLMError;

/// Supported LLM backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMBackend {
    Groq,
}

impl LLMBackend {
    /// Environment variable holding the backend's API key.
    pub fn env_key(self) -> &'static str {
        match self {
            LLMBackend::Groq => "GROQ_API_KEY",
        }
    }
}

impl fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LLMBackend::Groq => f.write_str("Groq"),
        }
    }
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(LLMBackend::Groq),
            _ => Err(LLMError::InvalidRequest(format!(
                "Unsupported LLM backend: {s}"
            ))),
        }
    }
}
