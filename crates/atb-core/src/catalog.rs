//! Anime catalog port and the records it returns.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One anime entry, normalized from whatever the catalog API returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub score: f64,
    pub synopsis: String,
    /// `None` when the catalog does not know the episode count yet.
    pub episode_count: Option<u32>,
    pub status: String,
    pub genres: Vec<String>,
    pub image_url: Option<String>,
}

/// Outcome of a ranked-list query, ready for rendering.
///
/// When `succeeded` is false, `heading` carries the localized error or
/// not-found message and `items` is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ListResult {
    pub heading: String,
    pub items: Vec<CatalogRecord>,
    pub succeeded: bool,
}

impl ListResult {
    pub fn ok(heading: impl Into<String>, items: Vec<CatalogRecord>) -> Self {
        Self {
            heading: heading.into(),
            items,
            succeeded: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            heading: message.into(),
            items: Vec::new(),
            succeeded: false,
        }
    }
}

/// Which ranked list to fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TopFilter {
    All,
    ByPopularity,
    CurrentSeason,
    CurrentYear,
}

impl TopFilter {
    /// Operation tag used for analytics and diagnostics.
    pub fn operation(self) -> &'static str {
        match self {
            TopFilter::All => "top",
            TopFilter::ByPopularity => "top_popular",
            TopFilter::CurrentSeason => "top_season",
            TopFilter::CurrentYear => "top_year",
        }
    }
}

/// Anime broadcast season.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a calendar month (1-12). December belongs to winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a catalog request produced no usable data.
///
/// Empty results are not an error: they come back as `Ok(vec![])`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Unreachable host, timeout or non-success status.
    #[error("fetch failed: {0}")]
    Transport(String),

    /// The body did not parse into the expected record shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Port for the remote anime catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Records matching `query`, best match first.
    async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogRecord>>;

    async fn random(&self) -> CatalogResult<CatalogRecord>;

    /// Ranked records, highest-ranked first.
    async fn top_list(&self, filter: TopFilter, limit: usize)
        -> CatalogResult<Vec<CatalogRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(5), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Fall);
        assert_eq!(Season::from_month(11), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn season_names_match_api_path_segments() {
        assert_eq!(Season::from_month(1).to_string(), "winter");
        assert_eq!(Season::from_month(5).to_string(), "spring");
        assert_eq!(Season::from_month(8).to_string(), "summer");
        assert_eq!(Season::from_month(11).to_string(), "fall");
    }

    #[test]
    fn failed_list_carries_message_and_no_items() {
        let r = ListResult::failed("nope");
        assert!(!r.succeeded);
        assert!(r.items.is_empty());
        assert_eq!(r.heading, "nope");
    }
}
