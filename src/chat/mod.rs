mod bound;
mod message;
mod tool;
mod traits;
mod usage;

pub use bound::{BindTools, ModelHandle, ToolBoundModel};
pub use message::{ChatMessage, ChatMessageBuilder, ChatRole, MessageType};
pub use tool::{FunctionTool, ParameterProperty, ParametersSchema, Tool, ToolChoice};
pub use traits::{ChatProvider, ChatResponse};
pub use usage::Usage;
