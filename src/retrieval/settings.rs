use serde::{Deserialize, Serialize};

/// What the site-retrieval tool indexes and how it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub entity: String,
    pub tool_name: String,
    pub tool_description: String,
    pub urls: Vec<String>,
    pub profile_url: Option<String>,
    pub profile_selectors: Vec<String>,
    pub post_selectors: Vec<String>,
    pub fallback_text: String,
    pub recent_keywords: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub min_content_chars: usize,
    pub load_timeout_seconds: u64,
    pub live_timeout_seconds: u64,
    pub embedding_model: String,
    pub embedding_base_url: Option<String>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        let profile_url = "https://www.linkedin.com/company/himalaya-enterprises/";
        Self {
            entity: "Himalaya Enterprises".to_string(),
            tool_name: "himalaya_enterprises_search".to_string(),
            tool_description: "Search for information about Himalaya Enterprises from their official website. \
                Use this tool when users ask about Himalaya Enterprises, their services, products, \
                projects, location, contact information, or any company-specific details."
                .to_string(),
            urls: vec![
                "https://www.himalayaentp.com/index.php/about/".to_string(),
                "https://www.himalayaentp.com/index.php/product-2/".to_string(),
                "https://www.himalayaentp.com/index.php/contact/".to_string(),
                "https://www.himalayaentp.com/index.php/projects/".to_string(),
            ],
            profile_url: Some(profile_url.to_string()),
            profile_selectors: vec![
                "meta[property='og:description']".to_string(),
                "meta[name='description']".to_string(),
                "h1".to_string(),
                ".org-top-card-summary__tagline".to_string(),
                ".org-about-us-organization-description__text".to_string(),
                "section.about-us p".to_string(),
            ],
            post_selectors: vec![
                ".feed-shared-update-v2__description".to_string(),
                "article".to_string(),
            ],
            fallback_text: format!(
                "Himalaya Enterprises LinkedIn profile: {profile_url}\n\
                 Himalaya Enterprises is an industrial solutions company supplying instruments, \
                 equipment and project services. Its LinkedIn page shares company news, project \
                 updates and product announcements. Live posts could not be retrieved automatically; \
                 visit the profile directly for the latest posts and updates."
            ),
            recent_keywords: vec![
                "latest post".to_string(),
                "recent post".to_string(),
                "latest update".to_string(),
                "recent update".to_string(),
                "recent activity".to_string(),
                "new post".to_string(),
            ],
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 3,
            min_content_chars: 100,
            load_timeout_seconds: 10,
            live_timeout_seconds: 20,
            embedding_model: crate::embedding::DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_base_url: None,
        }
    }
}
