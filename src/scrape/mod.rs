//! Chart scraping: one GET to the chart page, JSON-LD decode, record mapping.
//!
//! The scraper performs a single request per run. There is no pagination,
//! retry, or rate limiting; a failed fetch is reported to the pipeline as a
//! typed [`ScrapeError`].

mod error;
mod jsonld;

pub use error::ScrapeError;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::record::MovieRecord;
use crate::user_agent::BROWSER_USER_AGENT;

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout (30 seconds; chart pages are small).
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Scrapes the configured chart page for top-listed movies.
///
/// The client is built once per scraper and reused; create the scraper once
/// and call [`fetch`](Self::fetch) per run.
#[derive(Debug, Clone)]
pub struct ChartScraper {
    client: Client,
    url: String,
    count: usize,
}

impl ChartScraper {
    /// Creates a scraper for `url` returning at most `count` records.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new(url: impl Into<String>, count: usize) -> Self {
        Self::with_timeouts(url, count, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a scraper with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(
        url: impl Into<String>,
        count: usize,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            url: url.into(),
            count,
        }
    }

    /// The chart URL this scraper fetches.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the chart page and returns up to `count` records in source order.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the request fails, the server answers with
    /// a non-success status, or the page's JSON-LD block is absent or
    /// malformed.
    #[must_use = "scrape result contains the records for the rest of the pipeline"]
    #[instrument(skip(self), fields(url = %self.url, count = self.count))]
    pub async fn fetch(&self) -> Result<Vec<MovieRecord>, ScrapeError> {
        debug!("fetching chart page");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::timeout(&self.url)
            } else {
                ScrapeError::network(&self.url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::http_status(&self.url, status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::timeout(&self.url)
            } else {
                ScrapeError::network(&self.url, e)
            }
        })?;

        let records = jsonld::parse_chart(&body, &self.url, self.count)?;
        info!(records = records.len(), "scraped chart page");
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE_PAGE: &str = r#"<html><head>
<script type="application/ld+json">
{"@context":"https://schema.org","@type":"ItemList","itemListElement":[
 {"item":{"name":"First","url":"https://example.com/title/1/","datePublished":"1972-03-24","aggregateRating":{"ratingValue":9.2}}},
 {"item":{"name":"Second","url":"https://example.com/title/2/"}}
]}
</script></head><body></body></html>"#;

    #[tokio::test]
    async fn test_fetch_success_maps_records() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/chart/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE_PAGE))
            .mount(&mock_server)
            .await;

        let scraper = ChartScraper::new(format!("{}/chart/", mock_server.uri()), 5);
        let records = scraper.fetch().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "First");
        assert_eq!(records[0].year, "1972-03-24");
        assert_eq!(records[0].rating, "9.2");
        assert_eq!(records[1].rating, "");
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        use wiremock::{Match, Request};

        /// Matches requests whose User-Agent looks like a browser.
        struct BrowserUaMatcher;

        impl Match for BrowserUaMatcher {
            fn matches(&self, request: &Request) -> bool {
                request
                    .headers
                    .get("User-Agent")
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|ua| ua.starts_with("Mozilla/5.0"))
            }
        }

        let mock_server = MockServer::start().await;

        // 200 only for browser-identified requests; everything else 403.
        Mock::given(method("GET"))
            .and(path("/chart/"))
            .and(BrowserUaMatcher)
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE_PAGE))
            .with_priority(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/chart/"))
            .respond_with(ResponseTemplate::new(403))
            .with_priority(u8::MAX)
            .mount(&mock_server)
            .await;

        let scraper = ChartScraper::new(format!("{}/chart/", mock_server.uri()), 5);
        let result = scraper.fetch().await;
        assert!(result.is_ok(), "Expected Ok, got: {result:?}");
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/chart/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let scraper = ChartScraper::new(format!("{}/chart/", mock_server.uri()), 5);
        let result = scraper.fetch().await;

        match result {
            Err(ScrapeError::HttpStatus { status, .. }) => assert_eq!(status, 503),
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_without_jsonld_block() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/chart/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body>plain page</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let scraper = ChartScraper::new(format!("{}/chart/", mock_server.uri()), 5);
        let result = scraper.fetch().await;
        assert!(matches!(result, Err(ScrapeError::MissingJsonLd { .. })));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Port 1 on loopback has nothing listening.
        let scraper = ChartScraper::new("http://127.0.0.1:1/chart/", 5);
        let result = scraper.fetch().await;
        assert!(matches!(result, Err(ScrapeError::Network { .. })));
    }
}
