use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    embedding::{EmbeddingProvider, OpenAIEmbeddings},
    observer::{self, SharedObserver},
    provision::Credentials,
    retrieval::{HttpFetcher, RetrievalSettings, SiteRetrievalTool, TiktokenCounter},
};

use super::{
    definition::TextTool,
    error::ToolError,
    registry::ToolRegistry,
    web_search::{SearchSettings, TavilySearch},
};

/// Builds the tool registry for the tool-augmented graph.
#[async_trait]
pub trait ToolLoader: Send + Sync {
    async fn load(&self, credentials: &Credentials) -> Result<ToolRegistry, ToolError>;
}

/// Web search followed by site retrieval, in that order.
pub struct StandardToolLoader {
    search: SearchSettings,
    retrieval: RetrievalSettings,
    observer: SharedObserver,
}

impl StandardToolLoader {
    pub fn new(search: SearchSettings, retrieval: RetrievalSettings) -> Self {
        Self {
            search,
            retrieval,
            observer: observer::noop(),
        }
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }
}

#[async_trait]
impl ToolLoader for StandardToolLoader {
    async fn load(&self, credentials: &Credentials) -> Result<ToolRegistry, ToolError> {
        let search_key = credentials.search_key().ok_or_else(|| {
            ToolError::Unavailable("Tavily API key is required for web search".to_string())
        })?;
        let search = TavilySearch::new(search_key, self.search.clone())?;

        let fetcher = HttpFetcher::new().map_err(|e| ToolError::Unavailable(e.to_string()))?;
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(
            OpenAIEmbeddings::new(
                credentials.embedding_key().unwrap_or_default(),
                Some(self.retrieval.embedding_model.clone()),
                self.retrieval.embedding_base_url.clone(),
                Some(self.retrieval.live_timeout_seconds),
            )
            .map_err(|e| ToolError::Unavailable(e.to_string()))?,
        );

        let site = SiteRetrievalTool::build(
            self.retrieval.clone(),
            Arc::new(fetcher),
            embedder,
            Arc::new(TiktokenCounter::cl100k().map_err(ToolError::Unavailable)?),
        )
        .await;
        if !site.is_ready() {
            log::warn!(
                "{} will answer with a fixed message: no content indexed",
                self.retrieval.tool_name
            );
        }

        let tools: Vec<Arc<dyn TextTool>> = vec![Arc::new(search), Arc::new(site)];
        Ok(ToolRegistry::new(tools).with_observer(self.observer.clone()))
    }
}
