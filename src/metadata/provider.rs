//! Trait definition and types for metadata providers.
//!
//! This module defines the [`MetadataProvider`] trait that the metadata
//! backend (TMDB) implements, along with the shared data types returned by
//! provider queries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use cinescope_common::{CatalogList, MediaKind, ReleaseType, Result, TitleId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Release data
// ---------------------------------------------------------------------------

/// One dated release milestone for a title in one region/format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEvent {
    /// Release type code (theatrical, digital, physical, ...).
    pub release_type: ReleaseType,
    /// When the release happens or happened.
    pub release_date: DateTime<Utc>,
    /// ISO-3166-1 region the event belongs to.
    pub region: String,
}

impl ReleaseEvent {
    pub fn new(release_type: ReleaseType, release_date: DateTime<Utc>, region: &str) -> Self {
        Self {
            release_type,
            release_date,
            region: region.to_string(),
        }
    }
}

/// Subscription (flatrate) providers offering a title in one region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamingAvailability {
    /// ISO-3166-1 region code.
    pub region: String,
    /// Provider names, in the provider's display order.
    pub providers: Vec<String>,
}

impl StreamingAvailability {
    /// `true` when at least one subscription service carries the title.
    pub fn is_streaming(&self) -> bool {
        !self.providers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Title metadata
// ---------------------------------------------------------------------------

/// Full metadata for a movie or TV series, as shown on a details view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleDetails {
    pub id: TitleId,
    pub kind: MediaKind,
    /// Localised title (movie `title` or series `name`).
    pub title: String,
    /// Original-language title, if known.
    pub original_title: Option<String>,
    pub overview: Option<String>,
    /// Genre labels (e.g. "Action", "Drama").
    pub genres: Vec<String>,
    /// Primary release date (movie) or first air date (series).
    pub release_date: Option<NaiveDate>,
    /// Community rating, 0.0 - 10.0.
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    /// Runtime (movie) or typical episode runtime (series) in minutes.
    pub runtime_minutes: Option<u32>,
    /// Provider image path fragment, e.g. `/abc.jpg`.
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Compact entry of a catalog or similar-titles list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSummary {
    pub id: TitleId,
    pub kind: MediaKind,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// One page of a paginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlePage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<TitleSummary>,
}

/// Parse a provider date string (`YYYY-MM-DD`).
///
/// The provider sends an empty string for unknown dates.
pub fn parse_release_date(date: Option<&str>) -> Option<NaiveDate> {
    date.map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait implemented by metadata backends.
///
/// All operations are read-only. Providers are shared behind an `Arc`
/// across request handlers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has been configured with credentials.
    fn is_available(&self) -> bool;

    /// Every release event of a title, across all regions, flattened.
    async fn release_events(&self, kind: MediaKind, id: TitleId) -> Result<Vec<ReleaseEvent>>;

    /// Subscription availability for `region`.
    ///
    /// A region the provider has no data for yields an empty provider list.
    async fn watch_availability(
        &self,
        kind: MediaKind,
        id: TitleId,
        region: &str,
    ) -> Result<StreamingAvailability>;

    /// Fetch full metadata for a title.
    async fn title_details(&self, kind: MediaKind, id: TitleId) -> Result<TitleDetails>;

    /// Fetch one page of a movie catalog list.
    async fn catalog(&self, list: CatalogList, page: u32) -> Result<TitlePage>;

    /// Fetch one page of titles similar to `id`.
    async fn similar(&self, kind: MediaKind, id: TitleId, page: u32) -> Result<TitlePage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_parsing() {
        assert_eq!(
            parse_release_date(Some("2023-04-15")),
            NaiveDate::from_ymd_opt(2023, 4, 15)
        );
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(Some("2023")), None);
        assert_eq!(parse_release_date(None), None);
    }

    #[test]
    fn streaming_availability_flag() {
        let empty = StreamingAvailability {
            region: "US".into(),
            providers: Vec::new(),
        };
        assert!(!empty.is_streaming());

        let some = StreamingAvailability {
            region: "US".into(),
            providers: vec!["Netflix".into()],
        };
        assert!(some.is_streaming());
    }
}
