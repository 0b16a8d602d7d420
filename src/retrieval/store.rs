use std::sync::Arc;

use crate::{embedding::EmbeddingProvider, error::LLMError};

/// A chunk of page text and the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub source: String,
}

/// In-memory cosine-similarity index.
pub struct VectorStore {
    embedder: Arc<dyn EmbeddingProvider>,
    entries: Vec<(Document, Vec<f32>)>,
}

impl VectorStore {
    pub async fn from_documents(
        documents: Vec<Document>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, LLMError> {
        let texts = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = embedder.embed(texts).await?;
        if vectors.len() != documents.len() {
            return Err(LLMError::ProviderError(format!(
                "embedded {} of {} documents",
                vectors.len(),
                documents.len()
            )));
        }
        Ok(Self {
            embedder,
            entries: documents.into_iter().zip(vectors).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `k` documents closest to `query`, best first.
    pub async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>, LLMError> {
        let query_vec = self
            .embedder
            .embed(vec![query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::ProviderError("no embedding returned for query".into()))?;

        let mut scored: Vec<(f32, &Document)> = self
            .entries
            .iter()
            .map(|(doc, vec)| (cosine(&query_vec, vec), doc))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEmbedder;

    fn doc(content: &str) -> Document {
        Document {
            content: content.to_string(),
            source: "https://example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn nearest_documents_come_first() {
        let store = VectorStore::from_documents(
            vec![doc("zzzz yyyy"), doc("aaaa bbbb"), doc("aaab")],
            Arc::new(FakeEmbedder::default()),
        )
        .await
        .unwrap();

        let hits = store.similarity_search("aaaa", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content, "aaab");
        assert_eq!(hits[1].content, "aaaa bbbb");
    }

    #[test]
    fn cosine_handles_degenerate_vectors() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine(&[1.0], &[1.0, 0.0]), 0.0);
        assert!((cosine(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }
}
