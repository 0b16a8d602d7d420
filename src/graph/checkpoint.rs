use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{error::GraphError, state::ConversationState};

/// Persists conversation state per thread id between runs.
#[async_trait]
pub trait Checkpointer: Send + Sync {
    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, GraphError>;

    async fn save(&self, thread_id: &str, state: &ConversationState) -> Result<(), GraphError>;

    async fn clear(&self, thread_id: &str) -> Result<(), GraphError>;
}

#[derive(Debug, Default)]
pub struct InMemoryCheckpointer {
    threads: RwLock<HashMap<String, ConversationState>>,
}

impl InMemoryCheckpointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn thread_count(&self) -> usize {
        self.threads.read().await.len()
    }
}

#[async_trait]
impl Checkpointer for InMemoryCheckpointer {
    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, GraphError> {
        Ok(self.threads.read().await.get(thread_id).cloned())
    }

    async fn save(&self, thread_id: &str, state: &ConversationState) -> Result<(), GraphError> {
        self.threads
            .write()
            .await
            .insert(thread_id.to_string(), state.clone());
        Ok(())
    }

    async fn clear(&self, thread_id: &str) -> Result<(), GraphError> {
        self.threads.write().await.remove(thread_id);
        Ok(())
    }
}
