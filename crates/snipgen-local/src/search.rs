use serde::Deserialize;
use snipgen_core::{Error, ReferenceHit, Result, SearchProvider};
use std::time::Duration;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Reference snippets arrive with engine markup artifacts: replace each
/// non-ASCII run with a single space, drop embedded newlines, and
/// collapse the resulting whitespace runs before the snippet is used
/// for comparison or display.
pub fn clean_reference_snippet(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_non_ascii = false;
    for ch in s.chars() {
        if ch == '\n' || ch == '\r' {
            continue;
        }
        if ch.is_ascii() {
            out.push(ch);
            in_non_ascii = false;
        } else if !in_non_ascii {
            out.push(' ');
            in_non_ascii = true;
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn searxng_endpoints_from_env() -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    // Comma/whitespace-separated list for simple load spreading.
    if let Ok(v) = std::env::var("SNIPGEN_SEARXNG_ENDPOINTS") {
        for raw in v.split(|c: char| c == ',' || c.is_whitespace()) {
            let s = raw.trim();
            if s.is_empty() {
                continue;
            }
            let s = s.to_string();
            if !out.contains(&s) {
                out.push(s);
            }
        }
    }

    // Single endpoint form.
    if let Ok(v) = std::env::var("SNIPGEN_SEARXNG_ENDPOINT") {
        let s = v.trim().to_string();
        if !s.is_empty() && !out.contains(&s) {
            out.push(s);
        }
    }

    out
}

/// Reference retrieval via a SearXNG instance's JSON API.
#[derive(Debug, Clone)]
pub struct SearxngSearchProvider {
    client: reqwest::Client,
    endpoints: Vec<String>,
}

impl SearxngSearchProvider {
    pub fn new(client: reqwest::Client, endpoints: Vec<String>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(Error::NotConfigured(
                "missing SNIPGEN_SEARXNG_ENDPOINT (or SNIPGEN_SEARXNG_ENDPOINTS)".to_string(),
            ));
        }
        Ok(Self { client, endpoints })
    }

    pub fn from_env(client: reqwest::Client) -> Result<Self> {
        Self::new(client, searxng_endpoints_from_env())
    }

    fn endpoint_search_for(base_endpoint: &str) -> String {
        // Accept either a base URL or a full /search endpoint.
        let mut base = base_endpoint.trim().trim_end_matches('/').to_string();
        if !base.ends_with("/search") {
            base.push_str("/search");
        }
        base
    }

    fn stable_hash64(query: &str) -> u64 {
        // FNV-1a; stable across runs, unlike HashMap's RandomState.
        let mut h: u64 = 1469598103934665603;
        for b in query.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(1099511628211);
        }
        h
    }

    fn pick_endpoint_index(&self, query: &str) -> usize {
        if self.endpoints.is_empty() {
            return 0;
        }
        (Self::stable_hash64(query) as usize) % self.endpoints.len()
    }
}

#[derive(Debug, Deserialize)]
struct SearxngSearchResponse {
    results: Option<Vec<SearxngResult>>,
}

#[derive(Debug, Deserialize)]
struct SearxngResult {
    url: Option<String>,
    // SearXNG uses `content` for snippets in JSON format.
    content: Option<String>,
}

#[async_trait::async_trait]
impl SearchProvider for SearxngSearchProvider {
    fn name(&self) -> &'static str {
        "searxng"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ReferenceHit>> {
        let idx = self.pick_endpoint_index(query);
        let base_endpoint = self.endpoints.get(idx).map(|s| s.as_str()).unwrap_or("");
        let endpoint = Self::endpoint_search_for(base_endpoint);

        let resp = self
            .client
            .get(endpoint)
            .query(&[("q", query), ("format", "json")])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Search(format!("searxng search HTTP {status}")));
        }

        let parsed: SearxngSearchResponse = resp
            .json()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        // Keep only entries that actually have a snippet; stop at
        // max_results of those, preserving engine rank order.
        let mut out = Vec::new();
        for r in parsed.results.unwrap_or_default() {
            if out.len() >= max_results {
                break;
            }
            let Some(url) = r.url else { continue };
            let snippet = r.content.as_deref().map(clean_reference_snippet);
            match snippet {
                Some(s) if !s.is_empty() => out.push(ReferenceHit { url, snippet: s }),
                _ => {}
            }
        }
        Ok(out)
    }
}
