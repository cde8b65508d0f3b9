//! The record shape shared by every pipeline stage.

use serde::Serialize;

/// One scraped chart entry.
///
/// Field order matters: the CSV column order (`title,year,rating,link`)
/// follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    /// Movie title, verbatim from the chart's JSON-LD `name` field.
    pub title: String,
    /// Publication date string (`datePublished`), empty when absent.
    pub year: String,
    /// Aggregate rating rendered as text, empty when absent.
    pub rating: String,
    /// Canonical movie URL, verbatim (no normalization).
    pub link: String,
}
