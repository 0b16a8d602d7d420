use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    embedding::EmbeddingProvider,
    tools::{TextTool, ToolDescriptor, ToolError},
};

use super::{
    extract,
    fetch::PageFetcher,
    settings::RetrievalSettings,
    splitter::{TextSplitter, TokenCounter},
    store::{Document, VectorStore},
};

/// Answers questions about one organisation from its scraped web pages.
///
/// Construction is expensive (every page is fetched, chunked and embedded);
/// build once and share. When nothing could be indexed the tool still
/// answers, with a fixed apology.
pub struct SiteRetrievalTool {
    settings: RetrievalSettings,
    fetcher: Arc<dyn PageFetcher>,
    store: Option<VectorStore>,
}

impl SiteRetrievalTool {
    pub async fn build(
        settings: RetrievalSettings,
        fetcher: Arc<dyn PageFetcher>,
        embedder: Arc<dyn EmbeddingProvider>,
        counter: Arc<dyn TokenCounter>,
    ) -> Self {
        let mut tool = Self {
            settings,
            fetcher,
            store: None,
        };

        let documents = tool.load_documents().await;
        log::debug!(
            "{}: loaded {} documents",
            tool.settings.tool_name,
            documents.len()
        );
        if documents.is_empty() {
            log::warn!("No content could be loaded for {}", tool.settings.entity);
            return tool;
        }

        let splitter = TextSplitter::new(
            tool.settings.chunk_size,
            tool.settings.chunk_overlap,
            counter,
        );
        let chunks: Vec<Document> = documents
            .iter()
            .flat_map(|doc| {
                splitter
                    .split_text(&doc.content)
                    .into_iter()
                    .map(|content| Document {
                        content,
                        source: doc.source.clone(),
                    })
            })
            .collect();
        log::debug!("{}: {} chunks after splitting", tool.settings.tool_name, chunks.len());

        match VectorStore::from_documents(chunks, embedder).await {
            Ok(store) => tool.store = Some(store),
            Err(e) => log::warn!("Failed to index {} content: {e}", tool.settings.entity),
        }
        tool
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    pub fn settings(&self) -> &RetrievalSettings {
        &self.settings
    }

    pub async fn run(&self, query: &str) -> String {
        let entity = &self.settings.entity;
        let Some(store) = &self.store else {
            return format!("Sorry, I couldn't load information about {entity} at the moment.");
        };

        let activity = if self.wants_recent_activity(query) {
            self.recent_activity().await
        } else {
            None
        };

        let docs = match store.similarity_search(query, self.settings.top_k).await {
            Ok(docs) => docs,
            Err(e) => return format!("Error searching {entity} information: {e}"),
        };

        let answer = if docs.is_empty() {
            format!("No relevant information found about {entity} for your query.")
        } else {
            let combined = docs
                .iter()
                .map(|d| d.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("Based on {entity} official information:\n\n{combined}")
        };

        match activity {
            Some(activity) => format!("{activity}\n\n{answer}"),
            None => answer,
        }
    }

    fn wants_recent_activity(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.settings
            .recent_keywords
            .iter()
            .any(|keyword| query.contains(&keyword.to_lowercase()))
    }

    /// Live profile signals, or the fallback block when none are recovered.
    async fn recent_activity(&self) -> Option<String> {
        let url = self.settings.profile_url.as_deref()?;
        let timeout = Duration::from_secs(self.settings.live_timeout_seconds);

        let signals = match self.fetcher.fetch(url, timeout).await {
            Ok(page) if page.is_success() => {
                extract::activity_signals(&page.body, &self.settings.post_selectors)
            }
            Ok(page) => {
                log::debug!("profile refetch returned status {}", page.status);
                Vec::new()
            }
            Err(e) => {
                log::debug!("profile refetch failed: {e}");
                Vec::new()
            }
        };

        if signals.is_empty() {
            return Some(self.settings.fallback_text.clone());
        }
        let lines: Vec<String> = signals.iter().map(|s| format!("- {s}")).collect();
        Some(format!(
            "Recent activity from the {} profile ({url}):\n{}",
            self.settings.entity,
            lines.join("\n")
        ))
    }

    async fn load_documents(&self) -> Vec<Document> {
        let mut documents = Vec::new();
        for url in &self.settings.urls {
            if let Some(doc) = self.load_page(url).await {
                documents.push(doc);
            }
        }
        if let Some(url) = &self.settings.profile_url {
            if let Some(doc) = self.load_profile(url).await {
                documents.push(doc);
            }
        }
        documents
    }

    async fn load_page(&self, url: &str) -> Option<Document> {
        let timeout = Duration::from_secs(self.settings.load_timeout_seconds);
        log::debug!("Loading content from {url}");

        let page = match self.fetcher.fetch(url, timeout).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Error extracting text from {url}: {e}");
                match self.fetcher.fetch(url, timeout).await {
                    Ok(page) => return self.loader_document(url, &page.body),
                    Err(e) => {
                        log::warn!("Page loader failed for {url}: {e}");
                        return None;
                    }
                }
            }
        };

        if page.is_success() {
            let text = extract::clean_text(&page.body);
            if text.chars().count() >= self.settings.min_content_chars {
                return Some(Document {
                    content: text,
                    source: url.to_string(),
                });
            }
        }
        log::debug!("Falling back to page loader for {url}");
        self.loader_document(url, &page.body)
    }

    fn loader_document(&self, url: &str, body: &str) -> Option<Document> {
        let text = extract::raw_text(body);
        (!text.is_empty()).then(|| Document {
            content: text,
            source: url.to_string(),
        })
    }

    async fn load_profile(&self, url: &str) -> Option<Document> {
        let timeout = Duration::from_secs(self.settings.load_timeout_seconds);
        let page = match self.fetcher.fetch(url, timeout).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Profile {url} unreachable: {e}");
                return None;
            }
        };

        let text = if page.is_success() {
            extract::select_text(&page.body, &self.settings.profile_selectors)
        } else {
            String::new()
        };

        let content = if text.chars().count() >= self.settings.min_content_chars {
            text
        } else {
            log::debug!("Using fallback profile text for {url}");
            self.settings.fallback_text.clone()
        };
        Some(Document {
            content,
            source: url.to_string(),
        })
    }
}

#[async_trait]
impl TextTool for SiteRetrievalTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(&self.settings.tool_name, &self.settings.tool_description)
    }

    async fn call(&self, query: &str) -> Result<String, ToolError> {
        Ok(self.run(query).await)
    }
}
