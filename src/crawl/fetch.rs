// src/crawl/fetch.rs
// =============================================================================
// Fetching a single page over HTTP.
//
// The crawler doesn't talk to reqwest directly. It goes through the Fetcher
// trait so that:
// - the real scanner uses HttpFetcher (reqwest, timeout, user agent)
// - tests can plug in an in-memory website and run without a network
//
// Every failure (timeout, connection error, non-2xx status) comes back as a
// FetchError, and the crawler treats them all the same way: log and move on.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::sync::Arc;

use crate::config::ScanConfig;
use crate::error::{FetchError, Result};

/// Something that can turn a URL into a page body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the response body, or why it failed.
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

// Lets callers keep a handle on a fetcher they hand to the crawler
#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// What happened when the crawler tried one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Page fetched, here is its markup
    Fetched { url: String, body: String },
    /// Page could not be fetched
    Failed { url: String, reason: FetchError },
}

impl FetchOutcome {
    /// Runs the fetcher and wraps the result with the URL it concerns.
    pub async fn resolve<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Self {
        match fetcher.fetch(url).await {
            Ok(body) => FetchOutcome::Fetched {
                url: url.to_string(),
                body,
            },
            Err(reason) => FetchOutcome::Failed {
                url: url.to_string(),
                reason,
            },
        }
    }
}

/// Fetches pages with a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> ScanConfig {
        let mut config = ScanConfig::new("http://localhost");
        config.timeout_secs = 2;
        config
    }

    #[tokio::test]
    async fn test_http_fetcher_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hello</html>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&test_config()).unwrap();
        let body = fetcher.fetch(&format!("{}/", server.uri())).await.unwrap();
        assert_eq!(body, "<html>hello</html>");
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&test_config()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Status(404));
    }

    #[tokio::test]
    async fn test_http_fetcher_times_out_on_slow_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>late</html>")
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut config = test_config();
        config.timeout_secs = 1;
        let fetcher = HttpFetcher::new(&config).unwrap();
        let err = fetcher
            .fetch(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_outcome_wraps_failure_with_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&test_config()).unwrap();
        let url = format!("{}/broken", server.uri());
        let outcome = FetchOutcome::resolve(&fetcher, &url).await;
        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                url: url.clone(),
                reason: FetchError::Status(500)
            }
        );
    }
}
