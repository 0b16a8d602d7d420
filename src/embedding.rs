//! Text embedding providers used by the retrieval index.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::LLMError;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_BATCH_SIZE: usize = 64;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError>;
}

/// OpenAI embeddings endpoint client.
#[derive(Debug, Clone)]
pub struct OpenAIEmbeddings {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    batch_size: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAIEmbeddings {
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
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
            client,
            api_key: api_key.into(),
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>, LLMError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: batch,
        };
        let resp = self
            .client
            .post(format!("{}embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        log::debug!("Embeddings HTTP status: {}", resp.status());
        let resp = resp.error_for_status()?;

        let mut parsed: EmbeddingResponse = resp.json().await?;
        if parsed.data.len() != batch.len() {
            return Err(LLMError::ProviderError(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                parsed.data.len()
            )));
        }
        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddings {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        if self.api_key.is_empty() {
            return Err(LLMError::AuthError("Missing OpenAI API key".to_string()));
        }

        let mut out = Vec::with_capacity(input.len());
        for batch in input.chunks(self.batch_size) {
            out.extend(self.embed_batch(batch).await?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeds_in_batches_and_orders_by_index() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_body(
                r#"{"data":[{"index":1,"embedding":[0.0,1.0]},{"index":0,"embedding":[1.0,0.0]}]}"#,
            )
            .expect(2)
            .create_async()
            .await;

        let embeddings = OpenAIEmbeddings::new("sk-test", None, Some(server.url()), Some(5))
            .unwrap()
            .with_batch_size(2);
        let input = ["a", "b", "c", "d"].map(String::from).to_vec();
        let vectors = embeddings.embed(input).await.unwrap();

        mock.assert_async().await;
        assert_eq!(vectors.len(), 4);
        assert_eq!(vectors[0], vec![1.0, 0.0]);
        assert_eq!(vectors[1], vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn missing_key_is_rejected_without_request() {
        let embeddings = OpenAIEmbeddings::new("", None, None, None).unwrap();
        let err = embeddings.embed(vec!["x".into()]).await.unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }
}
