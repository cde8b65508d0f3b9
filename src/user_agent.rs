//! Shared User-Agent string for outbound scrape requests.

/// Browser-like User-Agent sent with chart page requests.
///
/// Chart sites answer unidentified clients with 403, so the scraper
/// identifies as a mainstream browser.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
