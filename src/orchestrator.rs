//! Per-turn coordination: provision a model, build the selected graph, run
//! it and record the reply in the session.

#[path = "orchestrator/usecase.rs"]
mod usecase;

#[path = "orchestrator/error.rs"]
mod error;

#[path = "orchestrator/turn.rs"]
mod turn;


pub use error::{TurnError, GROQ_STATUS_PAGE};
pub use turn::{Orchestrator, TurnRequest};
pub use usecase::UseCase;
