use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::testing::{FakeEmbedder, FakeFetcher, WordCounter};
use crate::tools::TextTool;

const ABOUT: &str = "https://acme.test/about";
const PROFILE: &str = "https://social.test/company/acme";

fn settings() -> RetrievalSettings {
    RetrievalSettings {
        entity: "Acme".to_string(),
        tool_name: "acme_search".to_string(),
        tool_description: "Search Acme".to_string(),
        urls: vec![ABOUT.to_string()],
        profile_url: Some(PROFILE.to_string()),
        profile_selectors: vec!["meta[property='og:description']".to_string()],
        post_selectors: vec!["article".to_string()],
        fallback_text: "Acme profile fallback".to_string(),
        chunk_size: 40,
        chunk_overlap: 5,
        ..RetrievalSettings::default()
    }
}

fn about_page() -> String {
    let body = "Acme builds industrial pressure gauges and flow meters for refineries. \
        The company was founded in 1998 and serves clients across the region with \
        installation and calibration services.";
    format!("<html><body><script>ignored()</script><p>{body}</p></body></html>")
}

async fn build(fetcher: FakeFetcher, embedder: FakeEmbedder) -> (SiteRetrievalTool, Arc<FakeFetcher>) {
    let fetcher = Arc::new(fetcher);
    let tool = SiteRetrievalTool::build(
        settings(),
        fetcher.clone(),
        Arc::new(embedder),
        Arc::new(WordCounter),
    )
    .await;
    (tool, fetcher)
}

#[tokio::test]
async fn all_fetches_failing_yields_fixed_apology() {
    let (tool, _) = build(FakeFetcher::new(), FakeEmbedder::default()).await;

    assert!(!tool.is_ready());
    for query in ["what do they sell?", "latest post", ""] {
        assert_eq!(
            tool.run(query).await,
            "Sorry, I couldn't load information about Acme at the moment."
        );
    }
}

#[tokio::test]
async fn plain_queries_are_answered_from_the_index() {
    let fetcher = FakeFetcher::new().page(ABOUT, 200, &about_page());
    let (tool, fetched) = build(fetcher, FakeEmbedder::default()).await;

    assert!(tool.is_ready());
    let answer = tool.run("pressure gauges").await;
    assert!(answer.starts_with("Based on Acme official information:\n\n"));
    assert!(answer.contains("pressure gauges"));
    assert!(!answer.contains("ignored()"));
    assert!(fetched
        .requests()
        .iter()
        .all(|(_, timeout)| *timeout == Duration::from_secs(10)));
}

#[tokio::test]
async fn latest_post_query_refetches_profile_and_falls_back() {
    let fetcher = FakeFetcher::new().page(ABOUT, 200, &about_page());
    let (tool, fetched) = build(fetcher, FakeEmbedder::default()).await;

    let answer = tool
        .run("What is the latest post by Acme on the network?")
        .await;

    assert!(answer.starts_with("Acme profile fallback\n\nBased on Acme official information:"));
    let live: Vec<_> = fetched
        .requests()
        .into_iter()
        .filter(|(url, timeout)| url == PROFILE && *timeout == Duration::from_secs(20))
        .collect();
    assert_eq!(live.len(), 1);
}

#[tokio::test]
async fn live_activity_signals_are_prepended() {
    let profile = r#"<html><body>
        <article>Commissioned a new calibration lab this week</article>
        <time datetime="2024-06-02">2d</time>
        </body></html>"#;
    let fetcher = FakeFetcher::new()
        .page(ABOUT, 200, &about_page())
        .page(PROFILE, 200, profile);
    let (tool, _) = build(fetcher, FakeEmbedder::default()).await;

    let answer = tool.run("show me the recent activity").await;

    assert!(answer.starts_with(&format!(
        "Recent activity from the Acme profile ({PROFILE}):\n- Posted 2d (2024-06-02)"
    )));
    assert!(answer.contains("- Post: Commissioned a new calibration lab this week"));
    assert!(answer.contains("Based on Acme official information:"));
}

#[tokio::test]
async fn blocked_profile_contributes_fallback_document() {
    let fetcher = FakeFetcher::new().page(PROFILE, 999, "<html>blocked</html>");
    let (tool, _) = build(fetcher, FakeEmbedder::default()).await;

    assert!(tool.is_ready());
    let answer = tool.run("profile").await;
    assert_eq!(
        answer,
        "Based on Acme official information:\n\nAcme profile fallback"
    );
}

#[tokio::test]
async fn short_pages_fall_back_to_loader_text() {
    let html = "<html><body><p>Tiny</p><noscript>enable javascript to view the catalogue</noscript></body></html>";
    let fetcher = FakeFetcher::new().page(ABOUT, 200, html);
    let (tool, _) = build(fetcher, FakeEmbedder::default()).await;

    assert!(tool.is_ready());
    assert!(tool.run("catalogue").await.contains("enable javascript"));
}

#[tokio::test]
async fn embedding_failure_leaves_tool_unavailable() {
    let fetcher = FakeFetcher::new().page(ABOUT, 200, &about_page());
    let (tool, _) = build(fetcher, FakeEmbedder { fail: true }).await;

    assert!(!tool.is_ready());
    assert_eq!(
        tool.call("anything").await.unwrap(),
        "Sorry, I couldn't load information about Acme at the moment."
    );
    assert_eq!(tool.descriptor().name, "acme_search");
}
