use std::sync::Arc;

use crate::{
    chat::{BindTools, ModelHandle},
    observer::{self, SharedObserver},
    orchestrator::UseCase,
    tools::ToolRegistry,
};

use super::{
    checkpoint::Checkpointer,
    engine::{CompiledGraph, DEFAULT_RECURSION_LIMIT},
    error::GraphError,
    state::Topology,
};

/// Assembles one of the two graph topologies around a model handle.
pub struct GraphBuilder {
    model: ModelHandle,
    checkpointer: Option<Arc<dyn Checkpointer>>,
    tools: Option<Arc<ToolRegistry>>,
    observer: SharedObserver,
    recursion_limit: usize,
}

impl GraphBuilder {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            checkpointer: None,
            tools: None,
            observer: observer::noop(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Checkpointer used by the basic topology to carry history across runs.
    pub fn checkpointer(mut self, checkpointer: Arc<dyn Checkpointer>) -> Self {
        self.checkpointer = Some(checkpointer);
        self
    }

    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// `chatbot` then end, with history persisted per thread.
    pub fn basic_chatbot_build_graph(self) -> CompiledGraph {
        CompiledGraph {
            topology: Topology::Basic,
            model: self.model,
            tools: None,
            checkpointer: self.checkpointer,
            observer: self.observer,
            recursion_limit: self.recursion_limit,
        }
    }

    /// `chatbot` with tools bound, routing to `tools` while the model asks
    /// for them. No checkpointer: each run sees only its input.
    pub fn chatbot_with_tools_build_graph(self) -> Result<CompiledGraph, GraphError> {
        let tools = self.tools.ok_or(GraphError::MissingTools)?;
        let model = self.model.bind_tools(tools.function_specs());
        Ok(CompiledGraph {
            topology: Topology::ToolAugmented,
            model,
            tools: Some(tools),
            checkpointer: None,
            observer: self.observer,
            recursion_limit: self.recursion_limit,
        })
    }

    pub fn setup_graph(self, usecase: UseCase) -> Result<CompiledGraph, GraphError> {
        match usecase.topology() {
            Topology::Basic => Ok(self.basic_chatbot_build_graph()),
            Topology::ToolAugmented => self.chatbot_with_tools_build_graph(),
        }
    }
}
