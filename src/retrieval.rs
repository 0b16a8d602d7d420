//! Retrieval over scraped site content: fetching, extraction, chunking and
//! an in-memory similarity index behind the site-retrieval tool.

#[path = "retrieval/fetch.rs"]
mod fetch;

#[path = "retrieval/extract.rs"]
pub mod extract;

#[path = "retrieval/splitter.rs"]
mod splitter;

#[path = "retrieval/store.rs"]
mod store;

#[path = "retrieval/settings.rs"]
mod settings;

#[path = "retrieval/site_tool.rs"]
mod site_tool;

#[cfg(test)]
#[path = "retrieval/tests.rs"]
mod tests;

pub use fetch::{FetchError, FetchedPage, HttpFetcher, PageFetcher, BROWSER_USER_AGENT};
pub use settings::RetrievalSettings;
pub use site_tool::SiteRetrievalTool;
pub use splitter::{TextSplitter, TiktokenCounter, TokenCounter};
pub use store::{Document, VectorStore};
