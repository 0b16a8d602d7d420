use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    builder::{LLMBackend, LLMBuilder},
    chat::ModelHandle,
    error::LLMError,
};

/// Constructs a model handle for a key and model id.
///
/// Implementations should reach the provider during `create` so that
/// authentication and availability failures surface here rather than on the
/// first chat call.
#[async_trait]
pub trait ModelFactory: Send + Sync {
    async fn create(&self, api_key: &str, model_id: &str) -> Result<ModelHandle, LLMError>;
}

/// Client settings applied to every Groq handle.
#[derive(Debug, Clone, Default)]
pub struct GroqSettings {
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct GroqFactory {
    settings: GroqSettings,
}

impl GroqFactory {
    pub fn new(settings: GroqSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ModelFactory for GroqFactory {
    async fn create(&self, api_key: &str, model_id: &str) -> Result<ModelHandle, LLMError> {
        let mut builder = LLMBuilder::new()
            .backend(LLMBackend::Groq)
            .api_key(api_key)
            .model(model_id);

        let settings = &self.settings;
        if let Some(url) = &settings.base_url {
            builder = builder.base_url(url.clone());
        }
        if let Some(temperature) = settings.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = settings.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(system) = &settings.system_prompt {
            builder = builder.system(system.clone());
        }
        if let Some(timeout) = settings.timeout_seconds {
            builder = builder.timeout_seconds(timeout);
        }

        let groq = builder.build_groq()?;
        groq.verify_model().await?;
        Ok(Arc::new(groq))
    }
}
