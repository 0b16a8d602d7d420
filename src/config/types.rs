use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    provision::{GroqSettings, ProvisionConfig},
    retrieval::RetrievalSettings,
    tools::SearchSettings,
};

const DEFAULT_PAGE_TITLE: &str = "LangGraph: Build Stateful Agentic AI graph";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub provision: ProvisionSettings,
    pub search: SearchSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Replaces empty option lists with the built-in ones.
    pub(super) fn normalized(mut self) -> Self {
        let defaults = UiConfig::default();
        if self.ui.llm_options.is_empty() {
            self.ui.llm_options = defaults.llm_options;
        }
        if self.ui.usecase_options.is_empty() {
            self.ui.usecase_options = defaults.usecase_options;
        }
        if self.ui.groq_model_options.is_empty() {
            self.ui.groq_model_options = defaults.groq_model_options;
        }
        self
    }
}

/// Labels and choices offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub page_title: String,
    pub llm_options: Vec<String>,
    pub usecase_options: Vec<String>,
    pub groq_model_options: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            llm_options: vec!["Groq".to_string()],
            usecase_options: vec!["Basic Chatbot".to_string(), "Chatbot With Web".to_string()],
            groq_model_options: vec![
                "llama3-8b-8192".to_string(),
                "llama3-70b-8192".to_string(),
                "gemma2-9b-it".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisionSettings {
    pub max_attempts: usize,
    pub retry_delay_seconds: u64,
    pub timeout_seconds: u64,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_seconds: 5,
            timeout_seconds: 30,
            base_url: None,
            temperature: None,
            max_tokens: None,
            system_prompt: None,
        }
    }
}

impl ProvisionSettings {
    pub fn retry_config(&self) -> ProvisionConfig {
        ProvisionConfig::new(
            self.max_attempts,
            Duration::from_secs(self.retry_delay_seconds),
        )
    }

    pub fn groq_settings(&self) -> GroqSettings {
        GroqSettings {
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            system_prompt: self.system_prompt.clone(),
            timeout_seconds: Some(self.timeout_seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
