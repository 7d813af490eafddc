//! TMDB (The Movie Database) metadata provider.
//!
//! Implements [`MetadataProvider`] by querying the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`].
//! - Optional retry on HTTP 429 with `Retry-After` header support.
//! - Configurable request timeout.
//! - Transport and decoding failures mapped onto the common error taxonomy.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinescope_common::{CatalogList, Error, MediaKind, ReleaseType, Result, TitleId};
use governor::{Quota, RateLimiter};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::metadata::provider::{
    parse_release_date, MetadataProvider, ReleaseEvent, StreamingAvailability, TitleDetails,
    TitlePage, TitleSummary,
};

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbReleaseDatesResponse {
    results: Vec<TmdbRegionReleases>,
}

#[derive(Debug, Deserialize)]
struct TmdbRegionReleases {
    iso_3166_1: String,
    #[serde(default)]
    release_dates: Vec<TmdbReleaseDate>,
}

#[derive(Debug, Deserialize)]
struct TmdbReleaseDate {
    #[serde(rename = "type")]
    release_type: ReleaseType,
    release_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TmdbWatchProvidersResponse {
    results: HashMap<String, TmdbRegionProviders>,
}

#[derive(Debug, Deserialize)]
struct TmdbRegionProviders {
    #[serde(default)]
    flatrate: Vec<TmdbWatchProvider>,
}

#[derive(Debug, Deserialize)]
struct TmdbWatchProvider {
    provider_name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbTitleDetail {
    id: u64,
    #[serde(alias = "name")]
    title: Option<String>,
    #[serde(alias = "original_name")]
    original_title: Option<String>,
    overview: Option<String>,
    #[serde(alias = "first_air_date")]
    release_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    runtime: Option<u32>,
    episode_run_time: Option<Vec<u32>>,
    genres: Option<Vec<TmdbGenre>>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbPageResponse {
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
    results: Vec<TmdbListItem>,
}

#[derive(Debug, Deserialize)]
struct TmdbListItem {
    id: u64,
    #[serde(alias = "name")]
    title: Option<String>,
    overview: Option<String>,
    #[serde(alias = "first_air_date")]
    release_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

type DirectRateLimiter = governor::RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// TMDB metadata provider.
///
/// Wraps the TMDB v3 REST API with built-in rate limiting and bounded
/// 429 back-off.
///
/// # Examples
///
/// ```no_run
/// use cinescope::config::TmdbConfig;
/// use cinescope::metadata::providers::TmdbProvider;
///
/// let settings = TmdbConfig {
///     api_key: "your-api-key".into(),
///     ..TmdbConfig::default()
/// };
/// let provider = TmdbProvider::new(&settings).unwrap();
/// ```
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    max_retries: u32,
    rate_limiter: DirectRateLimiter,
}

impl TmdbProvider {
    /// Create a new TMDB provider from its configuration section.
    pub fn new(settings: &TmdbConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}")))?;

        let per_second = NonZeroU32::new(settings.requests_per_second)
            .ok_or_else(|| Error::invalid_input("requests_per_second must be at least 1"))?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            language: settings.language.clone(),
            max_retries: settings.max_retries,
            rate_limiter,
        })
    }

    /// Execute a GET request with rate limiting and 429-retry logic.
    async fn get(&self, path: &str, extra_params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let mut params: Vec<(&str, &str)> =
            vec![("api_key", self.api_key.as_str()), ("language", self.language.as_str())];
        params.extend_from_slice(extra_params);

        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;

            let resp = self
                .client
                .get(&url)
                .query(&params)
                .send()
                .await
                .map_err(|e| transport_error(path, e))?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS && retries < self.max_retries {
                retries += 1;
                let wait = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!(
                    path,
                    retry = retries,
                    wait_secs = wait,
                    "TMDB returned 429, backing off"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            if !resp.status().is_success() {
                return Err(Error::Status {
                    status: resp.status().as_u16(),
                    path: path.to_string(),
                });
            }

            return Ok(resp);
        }
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        debug!(path, "TMDB request");
        let body = self
            .get(path, extra_params)
            .await?
            .bytes()
            .await
            .map_err(|e| transport_error(path, e))?;

        serde_json::from_slice(&body).map_err(|e| Error::malformed(format!("{path}: {e}")))
    }
}

/// Map a transport failure onto the error taxonomy.
///
/// The URL is stripped from the message since it carries the API key.
fn transport_error(path: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout(path.to_string())
    } else {
        Error::network(format!("{path}: {}", err.without_url()))
    }
}

fn flatten_release_dates(resp: TmdbReleaseDatesResponse) -> Vec<ReleaseEvent> {
    resp.results
        .into_iter()
        .flat_map(|region| {
            let code = region.iso_3166_1;
            region
                .release_dates
                .into_iter()
                .map(move |rd| ReleaseEvent::new(rd.release_type, rd.release_date, &code))
        })
        .collect()
}

fn to_summary(kind: MediaKind, item: TmdbListItem) -> TitleSummary {
    TitleSummary {
        id: TitleId::new(item.id),
        kind,
        title: item.title.unwrap_or_default(),
        overview: item.overview,
        release_date: parse_release_date(item.release_date.as_deref()),
        vote_average: item.vote_average,
        vote_count: item.vote_count,
        poster_path: item.poster_path,
        backdrop_path: item.backdrop_path,
    }
}

fn to_page(kind: MediaKind, resp: TmdbPageResponse) -> TitlePage {
    TitlePage {
        page: resp.page,
        total_pages: resp.total_pages,
        total_results: resp.total_results,
        results: resp
            .results
            .into_iter()
            .map(|item| to_summary(kind, item))
            .collect(),
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn release_events(&self, kind: MediaKind, id: TitleId) -> Result<Vec<ReleaseEvent>> {
        let path = format!("/{kind}/{id}/release_dates");
        let resp: TmdbReleaseDatesResponse = self.get_json(&path, &[]).await?;
        Ok(flatten_release_dates(resp))
    }

    async fn watch_availability(
        &self,
        kind: MediaKind,
        id: TitleId,
        region: &str,
    ) -> Result<StreamingAvailability> {
        let path = format!("/{kind}/{id}/watch/providers");
        let mut resp: TmdbWatchProvidersResponse = self.get_json(&path, &[]).await?;

        let providers = resp
            .results
            .remove(region)
            .map(|r| r.flatrate.into_iter().map(|p| p.provider_name).collect())
            .unwrap_or_default();

        Ok(StreamingAvailability {
            region: region.to_string(),
            providers,
        })
    }

    async fn title_details(&self, kind: MediaKind, id: TitleId) -> Result<TitleDetails> {
        let path = format!("/{kind}/{id}");
        let detail: TmdbTitleDetail = self.get_json(&path, &[]).await?;

        let runtime = detail.runtime.or_else(|| {
            detail
                .episode_run_time
                .as_ref()
                .and_then(|v| v.first().copied())
        });

        Ok(TitleDetails {
            id: TitleId::new(detail.id),
            kind,
            title: detail.title.unwrap_or_default(),
            original_title: detail.original_title,
            overview: detail.overview,
            genres: detail
                .genres
                .unwrap_or_default()
                .into_iter()
                .map(|g| g.name)
                .collect(),
            release_date: parse_release_date(detail.release_date.as_deref()),
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            runtime_minutes: runtime,
            poster_path: detail.poster_path,
            backdrop_path: detail.backdrop_path,
        })
    }

    async fn catalog(&self, list: CatalogList, page: u32) -> Result<TitlePage> {
        let page = page.to_string();
        let resp: TmdbPageResponse = self.get_json(list.path(), &[("page", page.as_str())]).await?;
        Ok(to_page(MediaKind::Movie, resp))
    }

    async fn similar(&self, kind: MediaKind, id: TitleId, page: u32) -> Result<TitlePage> {
        let path = format!("/{kind}/{id}/similar");
        let page = page.to_string();
        let resp: TmdbPageResponse = self.get_json(&path, &[("page", page.as_str())]).await?;
        Ok(to_page(kind, resp))
    }
}
