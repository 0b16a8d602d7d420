//! Text-in, text-out tools that can be bound to a chat model.

#[path = "tools/definition.rs"]
mod definition;

#[path = "tools/error.rs"]
mod error;

#[path = "tools/registry.rs"]
mod registry;

#[path = "tools/web_search.rs"]
mod web_search;

#[path = "tools/loader.rs"]
mod loader;

pub use definition::{TextTool, ToolDescriptor};
pub use error::ToolError;
pub use loader::{StandardToolLoader, ToolLoader};
pub use registry::ToolRegistry;
pub use web_search::{SearchSettings, TavilySearch, TAVILY_TOOL_NAME};
