use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};

use crate::{
    chat::{ChatMessage, ModelHandle},
    observer::{SharedObserver, TraceEvent},
    tools::ToolRegistry,
};

use super::{
    checkpoint::Checkpointer,
    error::GraphError,
    state::{ConversationState, GraphEvent, Message, Topology},
};

pub const DEFAULT_RECURSION_LIMIT: usize = 25;

const CHATBOT_NODE: &str = "chatbot";
const TOOLS_NODE: &str = "tools";

/// Per-run options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Checkpoint key; runs without one start from the input alone.
    pub thread_id: Option<String>,
}

impl RunConfig {
    pub fn thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
        }
    }
}

/// A graph ready to run; construct one with [`super::GraphBuilder`].
pub struct CompiledGraph {
    pub(super) topology: Topology,
    pub(super) model: ModelHandle,
    pub(super) tools: Option<Arc<ToolRegistry>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer>>,
    pub(super) observer: SharedObserver,
    pub(super) recursion_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Load,
    Chatbot,
    Tools,
    Save,
    Done,
}

struct Run {
    state: ConversationState,
    step: Step,
    steps: usize,
    thread_id: Option<String>,
}

impl Run {
    fn new(input: ConversationState, config: RunConfig) -> Self {
        Self {
            state: input,
            step: Step::Load,
            steps: 0,
            thread_id: config.thread_id,
        }
    }
}

impl CompiledGraph {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Runs the graph incrementally, yielding one event per executed node.
    ///
    /// The stream ends after the first error. Checkpoints are written once
    /// the last node has run, so callers must drain the stream for history
    /// to persist.
    pub fn stream(
        &self,
        input: ConversationState,
        config: RunConfig,
    ) -> BoxStream<'_, Result<GraphEvent, GraphError>> {
        stream::unfold(Run::new(input, config), move |mut run| async move {
            let item = self.advance(&mut run).await?;
            Some((item, run))
        })
        .boxed()
    }

    /// Runs the graph to completion and returns the final state.
    pub async fn invoke(
        &self,
        input: ConversationState,
        config: RunConfig,
    ) -> Result<ConversationState, GraphError> {
        let mut run = Run::new(input, config);
        while let Some(item) = self.advance(&mut run).await {
            item?;
        }
        Ok(run.state)
    }

    async fn advance(&self, run: &mut Run) -> Option<Result<GraphEvent, GraphError>> {
        loop {
            match run.step {
                Step::Load => {
                    self.observer.on_event(&TraceEvent::GraphStarted {
                        topology: self.topology,
                        thread_id: run.thread_id.clone(),
                    });
                    if let (Some(checkpointer), Some(thread_id)) =
                        (&self.checkpointer, run.thread_id.clone())
                    {
                        match checkpointer.load(&thread_id).await {
                            Ok(Some(saved)) => {
                                let mut messages = saved.messages;
                                messages.append(&mut run.state.messages);
                                run.state.messages = messages;
                            }
                            Ok(None) => {}
                            Err(e) => return self.fail(run, e),
                        }
                    }
                    run.step = Step::Chatbot;
                }
                Step::Chatbot => {
                    if let Some(err) = self.check_limit(run) {
                        return self.fail(run, err);
                    }
                    let produced = match self.call_model(&run.state).await {
                        Ok(produced) => produced,
                        Err(e) => return self.fail(run, e),
                    };
                    run.state.messages.extend(produced.iter().cloned());
                    run.step = self.route(&run.state);
                    return Some(Ok(GraphEvent {
                        node: CHATBOT_NODE,
                        messages: produced,
                    }));
                }
                Step::Tools => {
                    if let Some(err) = self.check_limit(run) {
                        return self.fail(run, err);
                    }
                    let Some(registry) = &self.tools else {
                        return self.fail(run, GraphError::MissingTools);
                    };
                    let produced = run_tools(registry, &run.state).await;
                    run.state.messages.extend(produced.iter().cloned());
                    run.step = Step::Chatbot;
                    return Some(Ok(GraphEvent {
                        node: TOOLS_NODE,
                        messages: produced,
                    }));
                }
                Step::Save => {
                    if let (Some(checkpointer), Some(thread_id)) =
                        (&self.checkpointer, run.thread_id.clone())
                    {
                        if let Err(e) = checkpointer.save(&thread_id, &run.state).await {
                            return self.fail(run, e);
                        }
                    }
                    run.step = Step::Done;
                    self.observer.on_event(&TraceEvent::GraphFinished {
                        topology: self.topology,
                        ok: true,
                    });
                    return None;
                }
                Step::Done => return None,
            }
        }
    }

    fn check_limit(&self, run: &mut Run) -> Option<GraphError> {
        if run.steps >= self.recursion_limit {
            return Some(GraphError::RecursionLimit(self.recursion_limit));
        }
        run.steps += 1;
        None
    }

    fn fail(&self, run: &mut Run, err: GraphError) -> Option<Result<GraphEvent, GraphError>> {
        log::debug!("graph {:?} failed: {err}", self.topology);
        run.step = Step::Done;
        self.observer.on_event(&TraceEvent::GraphFinished {
            topology: self.topology,
            ok: false,
        });
        Some(Err(err))
    }

    fn route(&self, state: &ConversationState) -> Step {
        match (self.topology, state.messages.last()) {
            (Topology::ToolAugmented, Some(Message::ToolCalls(_))) => Step::Tools,
            _ => Step::Save,
        }
    }

    async fn call_model(&self, state: &ConversationState) -> Result<Vec<Message>, GraphError> {
        let messages: Vec<ChatMessage> = state.chat_messages();
        let response = self.model.chat(&messages).await?;

        // Text sent alongside tool calls is kept ahead of them so routing
        // still sees the calls last.
        let mut produced: Vec<Message> = response
            .text()
            .filter(|text| !text.is_empty())
            .map(Message::Assistant)
            .into_iter()
            .collect();
        if let Some(calls) = response.tool_calls().filter(|calls| !calls.is_empty()) {
            produced.push(Message::ToolCalls(calls));
        }
        Ok(produced)
    }
}

async fn run_tools(registry: &ToolRegistry, state: &ConversationState) -> Vec<Message> {
    let calls = match state.messages.last() {
        Some(Message::ToolCalls(calls)) => calls.clone(),
        _ => return Vec::new(),
    };

    let mut produced = Vec::with_capacity(calls.len());
    for call in calls {
        let content = match registry
            .execute(&call.function.name, &call.function.arguments)
            .await
        {
            Ok(output) => output,
            Err(e) => {
                log::warn!("tool {} failed: {e}", call.function.name);
                format!("Error: {e}")
            }
        };
        produced.push(Message::Tool {
            call_id: call.id,
            name: call.function.name,
            content,
        });
    }
    produced
}
