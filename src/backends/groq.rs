//! Groq API client for chat completions with tool calling.
//!
//! Groq exposes an OpenAI-compatible surface under `/openai/v1/`, so requests
//! use the familiar `messages`/`tools`/`tool_calls` shapes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, MessageType, Tool, ToolChoice, Usage},
    error::LLMError,
    ToolCall,
};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Configuration for the Groq client.
#[derive(Debug)]
pub struct GroqConfig {
    /// API key for authentication with Groq.
    pub api_key: String,
    /// Base URL, always ending in `/`.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// System prompt to guide model behavior.
    pub system: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for interacting with Groq's API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct Groq {
    pub config: Arc<GroqConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct GroqChatMessage<'a> {
    role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<&'a [ToolCall]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Serialize)]
struct GroqChatRequest<'a> {
    model: &'a str,
    messages: Vec<GroqChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Tool]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GroqChatResponse {
    choices: Vec<GroqChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct GroqChatChoice {
    message: GroqChatMsg,
}

#[derive(Deserialize, Debug)]
struct GroqChatMsg {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct GroqErrorEnvelope {
    error: GroqErrorBody,
}

#[derive(Deserialize)]
struct GroqErrorBody {
    message: String,
}

impl std::fmt::Display for GroqChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{self:?}"),
        }
    }
}

impl ChatResponse for GroqChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        self.choices
            .first()
            .and_then(|c| c.message.tool_calls.clone())
            .filter(|calls| !calls.is_empty())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage
    }
}

impl Groq {
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let client = builder
            .build()
            .map_err(|e| LLMError::HttpError(format!("Failed to build HTTP client: {e}")))?;

        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            config: Arc::new(GroqConfig {
                api_key: api_key.into(),
                base_url,
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens,
                temperature,
                system,
                timeout_seconds,
            }),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.config.timeout_seconds
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks that the configured model exists and the key is accepted.
    ///
    /// Groq validates both on `GET /models/{id}`, which lets provisioning
    /// surface auth and availability failures before the first chat turn.
    pub async fn verify_model(&self) -> Result<(), LLMError> {
        if self.config.api_key.is_empty() {
            return Err(LLMError::AuthError("Missing Groq API key".to_string()));
        }

        let url = format!("{}models/{}", self.config.base_url, self.config.model);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        log::debug!("Groq model check HTTP status: {}", resp.status());
        check_status(resp).await.map(|_| ())
    }

    fn build_messages<'a>(&'a self, messages: &'a [ChatMessage]) -> Vec<GroqChatMessage<'a>> {
        let mut out = Vec::with_capacity(messages.len() + 1);

        if let Some(system) = &self.config.system {
            out.push(GroqChatMessage {
                role: "system",
                content: Some(system),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        for msg in messages {
            match &msg.message_type {
                MessageType::Text => out.push(GroqChatMessage {
                    role: msg.role.as_str(),
                    content: Some(&msg.content),
                    tool_calls: None,
                    tool_call_id: None,
                }),
                MessageType::ToolUse(calls) => out.push(GroqChatMessage {
                    role: ChatRole::Assistant.as_str(),
                    content: (!msg.content.is_empty()).then_some(msg.content.as_str()),
                    tool_calls: Some(calls),
                    tool_call_id: None,
                }),
                MessageType::ToolResult(results) => {
                    out.extend(results.iter().map(|result| GroqChatMessage {
                        role: "tool",
                        content: Some(&result.function.arguments),
                        tool_calls: None,
                        tool_call_id: Some(&result.id),
                    }))
                }
            }
        }

        out
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, LLMError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GroqErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| body.clone())
        });

    Err(LLMError::ProviderStatus {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChatProvider for Groq {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.config.api_key.is_empty() {
            return Err(LLMError::AuthError("Missing Groq API key".to_string()));
        }

        let tool_choice = tools.map(|_| ToolChoice::Auto);

        let body = GroqChatRequest {
            model: &self.config.model,
            messages: self.build_messages(messages),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            tools,
            tool_choice,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Groq request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(format!("{}chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        log::debug!("Groq HTTP status: {}", resp.status());

        let resp = check_status(resp).await?;
        let raw = resp.text().await?;
        let json_resp: GroqChatResponse =
            serde_json::from_str(&raw).map_err(|e| LLMError::ResponseFormatError {
                message: format!("Failed to decode Groq response: {e}"),
                raw_response: raw.clone(),
            })?;

        if let Some(usage) = json_resp.usage {
            log::debug!("Groq usage: {usage}");
        }

        Ok(Box::new(json_resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FunctionCall;
    use mockito::Matcher;

    fn client(server: &mockito::Server, system: Option<&str>) -> Groq {
        Groq::new(
            "test-key",
            Some(server.url()),
            Some("llama3-8b-8192".to_string()),
            None,
            Some(0.0),
            Some(5),
            system.map(str::to_string),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn chat_returns_assistant_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama3-8b-8192",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}],
                    "usage":{"prompt_tokens":3,"completion_tokens":2,"total_tokens":5}}"#,
            )
            .create_async()
            .await;

        let groq = client(&server, Some("be brief"));
        let msg = ChatMessage::user().content("hello").build();
        let response = groq.chat(&[msg]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text().as_deref(), Some("hi there"));
        assert!(response.tool_calls().is_none());
        assert_eq!(response.usage().map(|u| u.total_tokens), Some(5));
    }

    #[tokio::test]
    async fn chat_parses_tool_calls() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":null,
                    "tool_calls":[{"id":"call_1","type":"function",
                    "function":{"name":"tavily_search_results_json","arguments":"{\"query\":\"rust\"}"}}]}}]}"#,
            )
            .create_async()
            .await;

        let groq = client(&server, None);
        let msg = ChatMessage::user().content("search rust").build();
        let response = groq.chat(&[msg]).await.unwrap();

        assert!(response.text().is_none());
        let calls = response.tool_calls().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "tavily_search_results_json");
    }

    #[tokio::test]
    async fn tool_results_are_sent_as_tool_messages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "messages": [
                    {"role": "user", "content": "q"},
                    {"role": "assistant", "tool_calls": [{"id": "c1", "type": "function",
                        "function": {"name": "search", "arguments": "{}"}}]},
                    {"role": "tool", "tool_call_id": "c1", "content": "result"}
                ]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"done"}}]}"#)
            .create_async()
            .await;

        let call = |args: &str| ToolCall {
            id: "c1".into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: "search".into(),
                arguments: args.into(),
            },
        };
        let history = vec![
            ChatMessage::user().content("q").build(),
            ChatMessage::assistant().tool_use(vec![call("{}")]).build(),
            ChatMessage::user().tool_result(vec![call("result")]).build(),
        ];

        let groq = client(&server, None);
        let response = groq.chat(&history).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text().as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn per_call_tools_are_offered_with_auto_choice() {
        let mut server = mockito::Server::new_async().await;
        let with_tools = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "tool_choice": "auto",
                "tools": [{"type": "function", "function": {"name": "search"}}]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let groq = client(&server, None);
        let tools = vec![crate::builder::FunctionBuilder::new("search")
            .description("Search the web")
            .build()];
        let msg = ChatMessage::user().content("q").build();
        groq.chat_with_tools(std::slice::from_ref(&msg), Some(&tools))
            .await
            .unwrap();
        with_tools.assert_async().await;

        assert!(groq.tools().is_none());
    }

    #[test]
    fn requests_without_tools_omit_tool_choice() {
        let body = GroqChatRequest {
            model: "m",
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
            tools: None,
            tool_choice: None,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("tool_choice").is_none());
        assert!(json.get("tools").is_none());
    }

    #[tokio::test]
    async fn error_status_carries_provider_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body(r#"{"error":{"message":"Service unavailable","type":"server_error"}}"#)
            .create_async()
            .await;

        let groq = client(&server, None);
        let msg = ChatMessage::user().content("hello").build();
        let err = groq.chat(&[msg]).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("Service unavailable"));
    }

    #[tokio::test]
    async fn verify_model_maps_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/models/llama3-8b-8192")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
            .create_async()
            .await;

        let groq = client(&server, None);
        let err = groq.verify_model().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn malformed_body_is_a_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let groq = client(&server, None);
        let msg = ChatMessage::user().content("hello").build();
        let err = groq.chat(&[msg]).await.unwrap_err();
        assert!(matches!(err, LLMError::ResponseFormatError { .. }));
    }
}
