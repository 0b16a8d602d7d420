//! Conversational agent runtime for Groq-hosted chat models.
//!
//! The crate obtains model handles through a retrying [`provision::Provisioner`],
//! runs one of two conversation graphs (a plain chat loop or a tool-augmented
//! loop with web search and site retrieval) and keeps per-session history in
//! an [`orchestrator::Orchestrator`].

use serde::{Deserialize, Serialize};

pub mod backends;
pub mod builder;
pub mod chat;
pub mod config;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod observer;
pub mod orchestrator;
pub mod provision;
pub mod retrieval;
pub mod session;
pub mod status;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

/// A tool invocation requested by the model.
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub struct ToolCall {
    /// The ID of the tool call.
    pub id: String,
    /// The type of the tool call (usually "function").
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function to call.
    pub function: FunctionCall,
}

/// Function name and JSON arguments of a [`ToolCall`].
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,
    /// The arguments to pass to the function, as a JSON string.
    pub arguments: String,
}
