use secrecy::{ExposeSecret, SecretString};

pub const LLM_KEY_ENV: &str = "GROQ_API_KEY";
pub const SEARCH_KEY_ENV: &str = "TAVILY_API_KEY";
pub const EMBEDDING_KEY_ENV: &str = "OPENAI_API_KEY";

/// API keys used for one request.
#[derive(Clone, Default)]
pub struct Credentials {
    pub llm_api_key: Option<SecretString>,
    pub search_api_key: Option<SecretString>,
    pub embedding_api_key: Option<SecretString>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &self.llm_api_key.is_some())
            .field("search_api_key", &self.search_api_key.is_some())
            .field("embedding_api_key", &self.embedding_api_key.is_some())
            .finish()
    }
}

impl Credentials {
    /// Resolves keys from explicit values, falling back to the process environment.
    pub fn resolve(llm: Option<String>, search: Option<String>) -> Self {
        Self::resolve_with(llm, search, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(llm: Option<String>, search: Option<String>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, var: &str| {
            non_empty(explicit)
                .or_else(|| non_empty(env(var)))
                .map(SecretString::new)
        };
        Self {
            llm_api_key: pick(llm, LLM_KEY_ENV),
            search_api_key: pick(search, SEARCH_KEY_ENV),
            embedding_api_key: pick(None, EMBEDDING_KEY_ENV),
        }
    }

    pub fn llm_key(&self) -> Option<&str> {
        self.llm_api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    pub fn search_key(&self) -> Option<&str> {
        self.search_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
    }

    pub fn embedding_key(&self) -> Option<&str> {
        self.embedding_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
