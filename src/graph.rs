//! Fixed-topology conversation graphs.
//!
//! A graph alternates between a `chatbot` node, which calls the model, and
//! (for the tool-augmented topology) a `tools` node, which runs requested
//! tool calls. Execution is exposed both as an event stream, one event per
//! executed node, and as a one-shot `invoke` returning the final state.

#[path = "graph/state.rs"]
mod state;

#[path = "graph/error.rs"]
mod error;

#[path = "graph/checkpoint.rs"]
mod checkpoint;

#[path = "graph/engine.rs"]
mod engine;

#[path = "graph/builder.rs"]
mod builder;


pub use builder::GraphBuilder;
pub use checkpoint::{Checkpointer, InMemoryCheckpointer};
pub use engine::{CompiledGraph, RunConfig, DEFAULT_RECURSION_LIMIT};
pub use error::GraphError;
pub use state::{ConversationState, GraphEvent, Message, Topology};
