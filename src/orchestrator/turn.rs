use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::OnceCell;

use crate::{
    chat::ModelHandle,
    graph::{
        Checkpointer, ConversationState, GraphBuilder, InMemoryCheckpointer, Message, RunConfig,
    },
    observer::{self, SharedObserver},
    provision::{Credentials, Provisioner},
    session::{Session, SessionId},
    tools::{ToolLoader, ToolRegistry},
};

use super::{error::TurnError, usecase::UseCase};

/// What the user selected for this turn.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub usecase: UseCase,
    pub model_id: String,
    pub credentials: Credentials,
}

/// Runs turns against sessions owned by the caller.
///
/// The basic-chat checkpoint store and the tool registry outlive individual
/// turns; model handles do not, each turn provisions its own.
pub struct Orchestrator {
    provisioner: Provisioner,
    checkpointer: Arc<dyn Checkpointer>,
    loader: Arc<dyn ToolLoader>,
    tools: OnceCell<Arc<ToolRegistry>>,
    observer: SharedObserver,
}

impl Orchestrator {
    pub fn new(provisioner: Provisioner, loader: Arc<dyn ToolLoader>) -> Self {
        Self {
            provisioner,
            checkpointer: Arc::new(InMemoryCheckpointer::new()),
            loader,
            tools: OnceCell::new(),
            observer: observer::noop(),
        }
    }

    pub fn with_checkpointer(mut self, checkpointer: Arc<dyn Checkpointer>) -> Self {
        self.checkpointer = checkpointer;
        self
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Uses a prebuilt registry instead of asking the loader.
    pub fn with_tools(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tools = OnceCell::new_with(Some(registry));
        self
    }

    /// Processes one user message and returns the reply, if the graph produced one.
    ///
    /// The user entry is recorded before anything can fail; the assistant
    /// entry only when a reply exists.
    pub async fn process_turn(
        &self,
        session: &mut Session,
        request: &TurnRequest,
        message: &str,
    ) -> Result<Option<String>, TurnError> {
        session.push_user(message);
        log::debug!(
            "turn: session={} usecase={} model={}",
            session.id(),
            request.usecase,
            request.model_id
        );

        let model = self
            .provisioner
            .provision(&request.credentials, &request.model_id)
            .await?;

        let reply = match request.usecase {
            UseCase::BasicChatbot => self.run_basic(model, session.id(), message).await?,
            UseCase::ChatbotWithWeb => self.run_with_tools(model, request, message).await?,
        };

        match &reply {
            Some(text) => session.push_assistant(text.clone()),
            None => log::debug!("turn produced no assistant message"),
        }
        Ok(reply)
    }

    /// Drops the session's checkpoint and starts it over with a new id.
    pub async fn reset_session(&self, session: &mut Session) {
        if let Err(e) = self.checkpointer.clear(&session.id().to_string()).await {
            log::warn!("failed to clear checkpoint for {}: {e}", session.id());
        }
        session.clear();
    }

    async fn run_basic(
        &self,
        model: ModelHandle,
        session_id: SessionId,
        message: &str,
    ) -> Result<Option<String>, TurnError> {
        let graph = GraphBuilder::new(model)
            .checkpointer(self.checkpointer.clone())
            .observer(self.observer.clone())
            .setup_graph(UseCase::BasicChatbot)?;

        let mut events = graph.stream(
            ConversationState::from_user(message),
            RunConfig::thread(session_id.to_string()),
        );

        let mut reply = None;
        while let Some(event) = events.next().await {
            let event = event?;
            log::trace!("graph event from {}: {:?}", event.node, event.messages);
            if let Some(text) = event.messages.iter().rev().find_map(Message::assistant_text) {
                reply = Some(text.to_string());
            }
        }
        Ok(reply)
    }

    async fn run_with_tools(
        &self,
        model: ModelHandle,
        request: &TurnRequest,
        message: &str,
    ) -> Result<Option<String>, TurnError> {
        let tools = self
            .tools
            .get_or_try_init(|| async {
                self.loader.load(&request.credentials).await.map(Arc::new)
            })
            .await?
            .clone();

        let graph = GraphBuilder::new(model)
            .tools(tools)
            .observer(self.observer.clone())
            .setup_graph(UseCase::ChatbotWithWeb)?;

        let state = graph
            .invoke(ConversationState::from_user(message), RunConfig::default())
            .await?;
        Ok(state.first_assistant().map(str::to_string))
    }
}
