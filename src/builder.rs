#[path = "builder/backend.rs"]
mod backend;

#[path = "builder/llm_builder.rs"]
mod llm_builder;

#[path = "builder/tools.rs"]
mod tools;

#[path = "builder/state.rs"]
mod state;

#[path = "builder/build.rs"]
mod build;

pub use backend::LLMBackend;
pub use llm_builder::LLMBuilder;
pub use tools::{FunctionBuilder, ParamBuilder};
