use serde::{Deserialize, Serialize};

/// Word budget for a generated snippet, excluding the ellipsis marker.
pub const SNIPPET_WORD_CAP: usize = 20;

/// Trailing marker appended to every snippet.
pub const ELLIPSIS: &str = "...";

/// Join `parts` with single spaces, keep the first [`SNIPPET_WORD_CAP`]
/// whitespace-separated words, and append the ellipsis marker.
///
/// With no candidate text at all the result degenerates to the bare
/// marker; callers treat that as "no snippet" rather than an error.
pub fn truncate_snippet<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let words: Vec<&str> = joined.split_whitespace().take(SNIPPET_WORD_CAP).collect();
    if words.is_empty() {
        return ELLIPSIS.to_string();
    }
    format!("{} {}", words.join(" "), ELLIPSIS)
}

/// Final output of one strategy for one URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    pub url: String,
    /// Snippet text including the ellipsis marker.
    pub text: String,
    /// Per-URL degradation note (e.g. a fetch failure that forced the
    /// degenerate snippet). The run itself never aborts on these.
    pub warning: Option<String>,
}

impl Snippet {
    pub fn degenerate(url: &str, warning: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            text: ELLIPSIS.to_string(),
            warning,
        }
    }

    /// True when no candidate text existed for this URL.
    pub fn is_degenerate(&self) -> bool {
        self.text == ELLIPSIS
    }

    /// Word count excluding the ellipsis marker.
    pub fn word_count(&self) -> usize {
        self.text
            .split_whitespace()
            .filter(|w| *w != ELLIPSIS)
            .count()
    }
}
