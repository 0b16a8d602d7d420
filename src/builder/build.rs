use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::{
    backends::groq::Groq,
    chat::ModelHandle,
    error::LLMError,
};

use super::{backend::LLMBackend, llm_builder::LLMBuilder, state::BuilderState};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

impl LLMBuilder {
    /// Builds a shareable model handle for the configured backend.
    pub fn build(self) -> Result<ModelHandle, LLMError> {
        let groq = self.build_groq()?;
        Ok(Arc::new(groq))
    }

    /// Builds the concrete Groq client, for callers that need its extra
    /// endpoints such as model verification.
    pub fn build_groq(self) -> Result<Groq, LLMError> {
        let mut state = self.state;
        log_builder_state(&state);
        let backend = state
            .backend
            .take()
            .ok_or_else(|| LLMError::InvalidRequest("No backend specified".to_string()))?;

        match backend {
            LLMBackend::Groq => {
                let api_key = require_api_key(&mut state, "Groq")?;
                let timeout = timeout_or_default(&state);
                Groq::new(
                    api_key,
                    state.base_url.take(),
                    state.model.take(),
                    state.max_tokens,
                    state.temperature,
                    timeout,
                    state.system.take(),
                )
            }
        }
    }
}

fn log_builder_state(state: &BuilderState) {
    log::debug!(
        "Building LLM provider. backend={:?} model={:?} temp={:?} timeout={:?}",
        state.backend,
        state.model,
        state.temperature,
        state.timeout_seconds,
    );
}

fn require_api_key(state: &mut BuilderState, provider: &str) -> Result<String, LLMError> {
    let Some(key) = state.api_key.take() else {
        return Err(LLMError::AuthError(format!(
            "No API key provided for {provider}"
        )));
    };
    let key = key.expose_secret().trim().to_string();
    if key.is_empty() {
        return Err(LLMError::AuthError(format!(
            "Empty API key provided for {provider}"
        )));
    }
    Ok(key)
}

fn timeout_or_default(state: &BuilderState) -> Option<u64> {
    Some(state.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
}
