use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod eval;
pub mod matcher;
pub mod page;
pub mod query;
pub mod select;
pub mod snippet;
pub mod strategy;

pub use eval::{evaluate, EvaluationRecord};
pub use matcher::TermMatch;
pub use page::PageTextBundle;
pub use query::Query;
pub use snippet::{Snippet, ELLIPSIS, SNIPPET_WORD_CAP};
pub use strategy::{Strategy, StrategyRunner};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("extract failed: {0}")]
    Extract(String),
    #[error("summarize failed: {0}")]
    Summarize(String),
    #[error("distance undefined: {0}")]
    Distance(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One entry from reference retrieval: a result URL plus the snippet the
/// search engine showed for it. Entries without a snippet are dropped
/// before they reach the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceHit {
    pub url: String,
    pub snippet: String,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ReferenceHit>>;
}

/// Fetch + parse a page into a [`PageTextBundle`]. Implementations own
/// their timeout/retry policy; callers treat any error as "this URL has
/// no extractable text" and degrade, never abort.
#[async_trait::async_trait]
pub trait PageProvider: Send + Sync {
    async fn page(&self, url: &str) -> Result<PageTextBundle>;
}

/// Extractive summarization: ordered sentences, at most `max_sentences`.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, max_sentences: usize) -> Result<Vec<String>>;
}

/// Synonym lookup for a single lowercase term. Unknown terms yield an
/// empty set (not an error).
pub trait SynonymProvider: Send + Sync {
    fn synonyms(&self, term: &str) -> BTreeSet<String>;
}

/// Semantic dissimilarity between two token sequences (lower = closer).
///
/// Implementations may be undefined for some inputs (e.g. every token
/// out of vocabulary); they report that via `Error::Distance` and the
/// evaluation harness records the pair as not computable.
pub trait DistanceMetric: Send + Sync {
    fn distance(&self, a: &[String], b: &[String]) -> Result<f64>;
}
