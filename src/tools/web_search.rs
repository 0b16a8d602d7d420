use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    definition::{TextTool, ToolDescriptor},
    error::ToolError,
};

pub const TAVILY_TOOL_NAME: &str = "tavily_search_results_json";
const TAVILY_DESCRIPTION: &str = "A search engine optimized for comprehensive, accurate, and trusted results. \
    Useful for when you need to answer questions about current events. \
    Input should be a search query.";
const DEFAULT_BASE_URL: &str = "https://api.tavily.com/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub max_results: usize,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: 2,
            base_url: None,
            timeout_seconds: 20,
        }
    }
}

/// Tavily web search returning a JSON list of `{url, content}` hits.
pub struct TavilySearch {
    client: Client,
    api_key: String,
    base_url: String,
    settings: SearchSettings,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Deserialize, Serialize)]
struct SearchHit {
    url: String,
    content: String,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>, settings: SearchSettings) -> Result<Self, ToolError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ToolError::Unavailable(
                "Tavily API key is required for web search".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| ToolError::Unavailable(e.to_string()))?;

        let mut base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            api_key,
            base_url,
            settings,
        })
    }
}

#[async_trait]
impl TextTool for TavilySearch {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(TAVILY_TOOL_NAME, TAVILY_DESCRIPTION)
    }

    async fn call(&self, query: &str) -> Result<String, ToolError> {
        let body = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.settings.max_results,
        };
        let resp = self
            .client
            .post(format!("{}search", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;

        let status = resp.status();
        log::debug!("Tavily HTTP status: {status}");
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ToolError::Execution(format!("search returned {status}: {text}")));
        }

        let parsed: SearchResponse = resp
            .json()
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;
        let hits: Vec<SearchHit> = parsed
            .results
            .into_iter()
            .take(self.settings.max_results)
            .collect();
        serde_json::to_string(&hits).map_err(|e| ToolError::Execution(e.to_string()))
    }
}
