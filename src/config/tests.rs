use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use super::*;

fn paths_in(dir: &Path) -> ConfigPaths {
    ConfigPaths {
        config_file: dir.join("config.toml"),
        config_dir: dir.to_path_buf(),
        data_dir: dir.join("data"),
        logs_dir: dir.join("data").join("logs"),
    }
}

fn load_with(contents: &str) -> (TempDir, LoadedConfig) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), contents).unwrap();
    let loaded = load_from(paths_in(dir.path()));
    (dir, loaded)
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_from(paths_in(dir.path()));

    assert!(!loaded.config_exists);
    assert!(loaded.issue.is_none());
    assert_eq!(loaded.config, AppConfig::default());
    assert_eq!(
        loaded.config.ui.page_title,
        "LangGraph: Build Stateful Agentic AI graph"
    );
    assert_eq!(loaded.config.ui.llm_options, vec!["Groq"]);
    assert_eq!(
        loaded.config.ui.groq_model_options,
        vec!["llama3-8b-8192", "llama3-70b-8192", "gemma2-9b-it"]
    );
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let (_dir, loaded) = load_with(
        r#"
[ui]
page_title = "Support desk"

[provision]
max_attempts = 5
temperature = 0.2

[search]
max_results = 4
"#,
    );

    let config = loaded.config;
    assert!(loaded.config_exists);
    assert_eq!(config.ui.page_title, "Support desk");
    assert_eq!(config.ui.usecase_options, vec!["Basic Chatbot", "Chatbot With Web"]);
    assert_eq!(config.provision.max_attempts, 5);
    assert_eq!(config.provision.retry_delay_seconds, 5);
    assert_eq!(config.provision.temperature, Some(0.2));
    assert_eq!(config.search.max_results, 4);
    assert_eq!(config.search.timeout_seconds, 20);
    assert_eq!(config.retrieval.top_k, 3);
}

#[test]
fn empty_option_lists_fall_back_to_defaults() {
    let (_dir, loaded) = load_with(
        r#"
[ui]
llm_options = []
groq_model_options = []
usecase_options = ["Basic Chatbot"]
"#,
    );

    assert_eq!(loaded.config.ui.llm_options, vec!["Groq"]);
    assert_eq!(loaded.config.ui.groq_model_options.len(), 3);
    assert_eq!(loaded.config.ui.usecase_options, vec!["Basic Chatbot"]);
}

#[test]
fn malformed_file_is_reported_and_ignored() {
    let (_dir, loaded) = load_with("[ui\npage_title = ");

    assert!(loaded.config_exists);
    assert!(matches!(loaded.issue, Some(ConfigError::Toml(_))));
    assert_eq!(loaded.config, AppConfig::default());
}

#[test]
fn unreadable_path_is_reported_and_ignored() {
    let dir = TempDir::new().unwrap();
    let mut paths = paths_in(dir.path());
    // A directory cannot be read as a file.
    paths.config_file = dir.path().to_path_buf();

    let loaded = load_from(paths);

    assert!(matches!(loaded.issue, Some(ConfigError::Io(_))));
    assert_eq!(loaded.config, AppConfig::default());
}

#[test]
fn provision_settings_convert_to_runtime_types() {
    let settings = ProvisionSettings {
        max_attempts: 4,
        retry_delay_seconds: 2,
        timeout_seconds: 12,
        base_url: Some("http://localhost:9000/".into()),
        temperature: Some(0.5),
        max_tokens: Some(256),
        system_prompt: Some("Be brief.".into()),
    };

    let retry = settings.retry_config();
    assert_eq!(retry.max_attempts, 4);
    assert_eq!(retry.retry_delay, Duration::from_secs(2));

    let groq = settings.groq_settings();
    assert_eq!(groq.timeout_seconds, Some(12));
    assert_eq!(groq.base_url.as_deref(), Some("http://localhost:9000/"));
    assert_eq!(groq.system_prompt.as_deref(), Some("Be brief."));
}

#[test]
fn override_path_sets_config_file_and_dir() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("custom.toml");

    let paths = ConfigPaths::resolve(Some(file.clone())).unwrap();

    assert_eq!(paths.config_file, file);
    assert_eq!(paths.config_dir, dir.path());
    assert!(paths.default_log_file().ends_with("logs/agentic-chat.log"));
}
