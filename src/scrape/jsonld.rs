//! JSON-LD `ItemList` decoding for chart pages.
//!
//! Chart pages embed a Schema.org `ItemList` in a
//! `<script type="application/ld+json">` block for search-engine consumption.
//! This module locates that block and maps its first `count` entries to
//! [`MovieRecord`]s.

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use super::error::ScrapeError;
use crate::record::MovieRecord;

/// One element of `itemListElement`.
#[derive(Debug, Deserialize)]
struct ListEntry {
    item: ChartItem,
}

/// The nested movie object inside a list entry.
#[derive(Debug, Deserialize)]
struct ChartItem {
    name: String,
    url: String,
    #[serde(rename = "datePublished", default)]
    date_published: Option<String>,
    #[serde(rename = "aggregateRating", default)]
    aggregate_rating: Option<AggregateRating>,
}

#[derive(Debug, Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue", default)]
    rating_value: Option<Value>,
}

impl ListEntry {
    fn into_record(self) -> MovieRecord {
        let ChartItem {
            name,
            url,
            date_published,
            aggregate_rating,
        } = self.item;
        MovieRecord {
            title: name,
            year: date_published.unwrap_or_default(),
            rating: aggregate_rating
                .and_then(|r| r.rating_value)
                .map(rating_text)
                .unwrap_or_default(),
            link: url,
        }
    }
}

/// Extracts up to `count` records from a chart page's JSON-LD block.
///
/// The `itemListElement` array is truncated to `count` entries before any
/// per-entry decoding, so a malformed entry past the cutoff cannot fail the
/// scrape.
pub(super) fn parse_chart(
    html: &str,
    url: &str,
    count: usize,
) -> Result<Vec<MovieRecord>, ScrapeError> {
    let block = find_jsonld_block(html).ok_or_else(|| ScrapeError::missing_jsonld(url))?;

    let data: Value = serde_json::from_str(&block).map_err(|e| ScrapeError::json(url, e))?;

    let elements = data
        .get("itemListElement")
        .and_then(Value::as_array)
        .ok_or_else(|| ScrapeError::shape(url, "`itemListElement` is missing or not an array"))?;

    let mut records = Vec::with_capacity(elements.len().min(count));
    for element in elements.iter().take(count) {
        let entry: ListEntry =
            serde_json::from_value(element.clone()).map_err(|e| ScrapeError::json(url, e))?;
        records.push(entry.into_record());
    }
    Ok(records)
}

/// Returns the inner text of the first non-empty `application/ld+json`
/// script block, if any.
fn find_jsonld_block(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    document
        .select(&selector)
        .map(|element| element.inner_html().trim().to_string())
        .find(|text| !text.is_empty())
}

/// Renders a JSON-LD `ratingValue` (number or string) as plain text.
fn rating_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
