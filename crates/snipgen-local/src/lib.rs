use futures_util::StreamExt;
use snipgen_core::{Error, PageProvider, PageTextBundle, Result};
use std::time::Duration;

pub mod extract;
pub mod search;
pub mod sentences;
pub mod summarize;
pub mod thesaurus;
pub mod wordvec;

/// HTTP page fetcher with the safety defaults a snippet run needs:
/// bounded connect/total timeouts, a redirect cap, a hard body-size cap,
/// and a single retry on transient failures.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_bytes: usize,
}

/// A fetched page body, decoded lossily to text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: String,
    pub truncated: bool,
}

impl PageFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("snipgen/0.1")
            .redirect(reqwest::redirect::Policy::limited(10))
            // Avoid "hang forever" on DNS/TLS/body stalls; the per-run
            // timeout below still bounds the whole request.
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            timeout,
            max_bytes,
        })
    }

    /// Fetch `url`, retrying once on transient errors (connect/timeout).
    /// The retry is silent; only a second failure surfaces to the caller.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        url::Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        match self.fetch_once(url).await {
            Ok(page) => Ok(page),
            Err(first) if Self::is_transient(&first) => self.fetch_once(url).await,
            Err(e) => Err(e),
        }
    }

    fn is_transient(err: &Error) -> bool {
        match err {
            Error::Fetch(msg) => {
                msg.contains("timed out") || msg.contains("connect") || msg.contains("503")
            }
            _ => false,
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<FetchedPage> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {status} for {url}")));
        }

        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let mut bytes: Vec<u8> = Vec::new();
        let mut truncated = false;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Fetch(e.to_string()))?;
            let remaining = self.max_bytes.saturating_sub(bytes.len());
            if chunk.len() >= remaining {
                bytes.extend_from_slice(&chunk[..remaining]);
                truncated = true;
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            final_url,
            content_type,
            body: String::from_utf8_lossy(&bytes).to_string(),
            truncated,
        })
    }
}

/// [`PageProvider`] over [`PageFetcher`] + HTML extraction.
#[derive(Debug, Clone)]
pub struct LocalPageProvider {
    fetcher: PageFetcher,
}

impl LocalPageProvider {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl PageProvider for LocalPageProvider {
    async fn page(&self, url: &str) -> Result<PageTextBundle> {
        let page = self.fetcher.fetch(url).await?;
        if let Some(ct) = page.content_type.as_deref() {
            // Non-HTML payloads (PDFs, images) have no meta/paragraph
            // structure; treat them as pages with no extractable text.
            if !ct.contains("html") && !ct.contains("text/plain") {
                return Err(Error::Extract(format!("unsupported content type: {ct}")));
            }
        }
        Ok(extract::page_bundle(&page.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_rejects_invalid_urls_without_touching_the_network() {
        let fetcher = PageFetcher::new(Duration::from_secs(1), 1024).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn transient_errors_are_the_retryable_ones() {
        assert!(PageFetcher::is_transient(&Error::Fetch(
            "operation timed out".to_string()
        )));
        assert!(PageFetcher::is_transient(&Error::Fetch(
            "HTTP 503 Service Unavailable for https://a.example".to_string()
        )));
        assert!(!PageFetcher::is_transient(&Error::Fetch(
            "HTTP 404 Not Found for https://a.example".to_string()
        )));
        assert!(!PageFetcher::is_transient(&Error::InvalidUrl(
            "nope".to_string()
        )));
    }
}
