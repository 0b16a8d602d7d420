use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];
const SNIPPET_CHARS: usize = 200;

/// Visible text of a page with scripts and styles removed and whitespace collapsed.
pub fn clean_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut pieces = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| SKIPPED_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if !hidden {
            pieces.push(&**text);
        }
    }

    collapse_whitespace(&pieces.join(" "))
}

/// All document text, as a generic page loader would return it.
pub fn raw_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let text: Vec<&str> = document.root_element().text().collect();
    collapse_whitespace(&text.join(" "))
}

/// Text matched by any of `selectors`; `content` attributes (meta tags) win
/// over element text. Invalid selectors are skipped.
pub fn select_text(html: &str, selectors: &[String]) -> String {
    let document = Html::parse_document(html);
    let mut found: Vec<String> = Vec::new();

    for raw in selectors {
        let Ok(selector) = Selector::parse(raw) else {
            log::debug!("skipping invalid selector {raw:?}");
            continue;
        };
        for element in document.select(&selector) {
            let text = element
                .value()
                .attr("content")
                .map(collapse_whitespace)
                .unwrap_or_else(|| element_text(&element));
            if !text.is_empty() && !found.contains(&text) {
                found.push(text);
            }
        }
    }

    found.join("\n")
}

/// Timestamps and post snippets that hint at recent activity on a profile page.
pub fn activity_signals(html: &str, post_selectors: &[String]) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut signals: Vec<String> = Vec::new();

    if let Ok(time) = Selector::parse("time") {
        for element in document.select(&time) {
            let label = element_text(&element);
            let stamp = element.value().attr("datetime").unwrap_or_default();
            let signal = match (label.is_empty(), stamp.is_empty()) {
                (true, true) => continue,
                (false, true) => format!("Posted {label}"),
                (true, false) => format!("Posted {stamp}"),
                (false, false) => format!("Posted {label} ({stamp})"),
            };
            push_unique(&mut signals, signal);
        }
    }

    if let Some(pattern) = relative_time_pattern() {
        let text = clean_text(html);
        for found in pattern.find_iter(&text) {
            push_unique(&mut signals, format!("Activity {}", found.as_str()));
        }
    }

    for raw in post_selectors {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in document.select(&selector) {
            let snippet = truncate(&element_text(&element), SNIPPET_CHARS);
            if !snippet.is_empty() {
                push_unique(&mut signals, format!("Post: {snippet}"));
            }
        }
    }

    signals
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn push_unique(signals: &mut Vec<String>, signal: String) {
    if !signals.contains(&signal) {
        signals.push(signal);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn relative_time_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?i)\b\d+\s*(?:minutes?|hours?|days?|weeks?|months?|years?|mo|[mhdwy])\s+ago\b",
            )
            .ok()
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_drops_scripts_and_collapses_whitespace() {
        let html = r#"<html><head><style>body { color: red }</style>
            <script>var tracking = 1;</script></head>
            <body><h1>Himalaya   Enterprises</h1>
            <p>Industrial
               instruments</p></body></html>"#;

        assert_eq!(clean_text(html), "Himalaya Enterprises Industrial instruments");
    }

    #[test]
    fn select_text_prefers_meta_content() {
        let html = r#"<html><head>
            <meta property="og:description" content="Trusted supplier of  valves">
            </head><body><h1 class="org-name">Himalaya</h1></body></html>"#;
        let selectors = vec![
            "meta[property='og:description']".to_string(),
            "h1.org-name".to_string(),
            "[[invalid".to_string(),
        ];

        assert_eq!(
            select_text(html, &selectors),
            "Trusted supplier of valves\nHimalaya"
        );
    }

    #[test]
    fn activity_signals_find_times_and_relative_stamps() {
        let html = r#"<body>
            <article class="post">New flow meters installed at the plant. 3 days ago</article>
            <time datetime="2024-05-01">May 1</time>
            </body>"#;
        let signals = activity_signals(html, &["article.post".to_string()]);

        assert_eq!(signals[0], "Posted May 1 (2024-05-01)");
        assert!(signals.contains(&"Activity 3 days ago".to_string()));
        assert!(signals
            .iter()
            .any(|s| s.starts_with("Post: New flow meters installed")));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
        assert_eq!(truncate("short", 10), "short");
    }
}
