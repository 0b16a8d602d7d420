use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, ModelHandle, Tool},
    embedding::EmbeddingProvider,
    error::LLMError,
    observer::{Observer, TraceEvent},
    provision::{ModelFactory, Notice, ProgressSink},
    retrieval::{FetchError, FetchedPage, PageFetcher, TokenCounter},
    tools::{TextTool, ToolDescriptor, ToolError, ToolRegistry},
    FunctionCall, ToolCall,
};

#[derive(Debug, Clone)]
pub struct ScriptedReply {
    text: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

impl fmt::Display for ScriptedReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text.as_deref().unwrap_or_default())
    }
}

impl ChatResponse for ScriptedReply {
    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        self.tool_calls.clone()
    }
}

pub enum Step {
    Reply(ScriptedReply),
    Fail(LLMError),
}

pub fn text_reply(text: &str) -> Step {
    Step::Reply(ScriptedReply {
        text: Some(text.to_string()),
        tool_calls: None,
    })
}

pub fn empty_reply() -> Step {
    Step::Reply(ScriptedReply {
        text: None,
        tool_calls: None,
    })
}

pub fn tool_call_reply(id: &str, name: &str, query: &str) -> Step {
    Step::Reply(ScriptedReply {
        text: None,
        tool_calls: Some(vec![tool_call(id, name, query)]),
    })
}

/// Tool call that arrives with assistant text in the same response.
pub fn tool_call_reply_with_text(text: &str, id: &str, name: &str, query: &str) -> Step {
    Step::Reply(ScriptedReply {
        text: Some(text.to_string()),
        tool_calls: Some(vec![tool_call(id, name, query)]),
    })
}

pub fn failure(err: LLMError) -> Step {
    Step::Fail(err)
}

pub fn tool_call(id: &str, name: &str, query: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        call_type: "function".to_string(),
        function: FunctionCall {
            name: name.to_string(),
            arguments: serde_json::json!({ "query": query }).to_string(),
        },
    }
}

/// Chat model that replays a fixed script and records what it was sent.
pub struct ScriptedModel {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    tool_counts: Mutex<Vec<usize>>,
}

impl ScriptedModel {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
            tool_counts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tool_counts(&self) -> Vec<usize> {
        self.tool_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedModel {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.tool_counts
            .lock()
            .unwrap()
            .push(tools.map(|t| t.len()).unwrap_or(0));
        match self.script.lock().unwrap().pop_front() {
            Some(Step::Reply(reply)) => Ok(Box::new(reply)),
            Some(Step::Fail(err)) => Err(err),
            None => Err(LLMError::Generic("script exhausted".to_string())),
        }
    }
}

/// Factory whose attempts fail or succeed according to a script.
pub struct FlakyFactory {
    outcomes: Mutex<VecDeque<Result<(), LLMError>>>,
    model: Arc<ScriptedModel>,
    attempts: Mutex<Vec<tokio::time::Instant>>,
}

impl FlakyFactory {
    pub fn new(outcomes: Vec<Result<(), LLMError>>) -> Self {
        Self::with_model(outcomes, Arc::new(ScriptedModel::new(Vec::new())))
    }

    pub fn with_model(outcomes: Vec<Result<(), LLMError>>, model: Arc<ScriptedModel>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            model,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn attempt_times(&self) -> Vec<tokio::time::Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelFactory for FlakyFactory {
    async fn create(&self, _api_key: &str, _model_id: &str) -> Result<ModelHandle, LLMError> {
        self.attempts
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Err(err)) => Err(err),
            Some(Ok(())) | None => Ok(self.model.clone()),
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for RecordingObserver {
    fn on_event(&self, event: &TraceEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingProgress {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Page fetcher serving canned responses; unknown URLs fail at transport level.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FetchedPage>,
    requests: Mutex<Vec<(String, Duration)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<(String, Duration)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), timeout));
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("connection refused: {url}")))
    }
}

/// Letter-frequency embedder; similar texts land close together.
#[derive(Default)]
pub struct FakeEmbedder {
    pub fail: bool,
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        if self.fail {
            return Err(LLMError::ProviderStatus {
                status: 500,
                message: "embedding backend down".to_string(),
            });
        }
        Ok(input
            .iter()
            .map(|text| {
                let mut v = vec![0f32; 26];
                for c in text.to_lowercase().chars() {
                    if c.is_ascii_lowercase() {
                        v[(c as u8 - b'a') as usize] += 1.0;
                    }
                }
                v
            })
            .collect())
    }
}

/// Counts whitespace-separated words as tokens.
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Tool that echoes its query; the query `fail` makes it error.
pub struct EchoTool(pub &'static str);

#[async_trait]
impl TextTool for EchoTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.0, "Echoes the query")
    }

    async fn call(&self, query: &str) -> Result<String, ToolError> {
        if query == "fail" {
            return Err(ToolError::Execution("boom".to_string()));
        }
        Ok(format!("{} says {query}", self.0))
    }
}

pub fn echo_registry() -> ToolRegistry {
    ToolRegistry::new(vec![Arc::new(EchoTool("web")), Arc::new(EchoTool("site"))])
}
