//! Error types for the chart scraping stage.

use thiserror::Error;

/// Errors that can occur while fetching and decoding a chart page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed to load.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before the page was received.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The page contains no `application/ld+json` script block.
    #[error("no JSON-LD block found at {url}")]
    MissingJsonLd {
        /// The page that was searched.
        url: String,
    },

    /// The JSON-LD block is not valid JSON, or an entry does not match the
    /// expected item shape.
    #[error("invalid JSON-LD at {url}: {source}")]
    Json {
        /// The page the block came from.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The decoded JSON does not have the expected top-level shape.
    #[error("unexpected JSON-LD shape at {url}: {detail}")]
    Shape {
        /// The page the block came from.
        url: String,
        /// What was wrong with the shape.
        detail: String,
    },
}

impl ScrapeError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a missing JSON-LD error.
    pub fn missing_jsonld(url: impl Into<String>) -> Self {
        Self::MissingJsonLd { url: url.into() }
    }

    /// Creates a JSON decode error.
    pub fn json(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            url: url.into(),
            source,
        }
    }

    /// Creates a shape error.
    pub fn shape(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Shape {
            url: url.into(),
            detail: detail.into(),
        }
    }
}
