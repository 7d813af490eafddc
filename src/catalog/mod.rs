//! Catalog grids and the title details view.
//!
//! [`CatalogService`] combines provider data with image URLs, quality
//! badges and player links into the shapes the web UI renders. Grids use
//! the cheap [`ReleaseDateStrategy`]; the details view uses the precise
//! [`ReleaseEventStrategy`] for the session's region.

use std::sync::Arc;

use chrono::NaiveDate;
use cinescope_common::{
    CatalogList, Error, MediaKind, QualityBadge, QualityLabel, Result, TitleId,
};
use serde::Serialize;

use crate::config::Config;
use crate::images::ImageUrls;
use crate::metadata::{MetadataProvider, TitleDetails, TitlePage, TitleSummary};
use crate::players::{EpisodeRef, PlayerCatalog, PlayerLink};
use crate::quality::{
    Clock, QualityStrategy, ReleaseDateStrategy, ReleaseEventStrategy, SystemClock, TitleRef,
};
use crate::session::Session;

/// Highest page number the provider serves.
pub const MAX_PAGE: u32 = 500;

/// One tile of a grid.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: TitleId,
    pub kind: MediaKind,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub quality: QualityBadge,
}

/// One page of a grid.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub entries: Vec<CatalogEntry>,
}

/// Everything the details view shows.
#[derive(Debug, Clone, Serialize)]
pub struct TitleView {
    pub id: TitleId,
    pub kind: MediaKind,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub runtime_minutes: Option<u32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub quality: QualityBadge,
    pub players: Vec<PlayerLink>,
}

/// Assembles grids and details views.
#[derive(Clone)]
pub struct CatalogService {
    provider: Arc<dyn MetadataProvider>,
    images: ImageUrls,
    players: PlayerCatalog,
    grid_size: usize,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(provider: Arc<dyn MetadataProvider>, config: &Config) -> Self {
        Self {
            provider,
            images: ImageUrls::from_config(config),
            players: PlayerCatalog::new(config.players.clone()),
            grid_size: config.catalog.grid_size,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for every classification.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    pub fn players(&self) -> &PlayerCatalog {
        &self.players
    }

    /// Grid strategy: release date only.
    pub fn grid_strategy(&self) -> ReleaseDateStrategy {
        ReleaseDateStrategy::with_clock(self.clock.clone())
    }

    /// Details strategy for the session's home region.
    pub fn details_strategy(&self, session: &Session) -> ReleaseEventStrategy {
        ReleaseEventStrategy::new(self.provider.clone(), &session.region)
            .with_clock(self.clock.clone())
    }

    /// One page of a catalog list.
    pub async fn catalog(&self, list: CatalogList, page: u32) -> Result<CatalogPage> {
        check_page(page)?;
        let page = self.provider.catalog(list, page).await?;
        tracing::debug!(list = %list, page = page.page, "Fetched catalog page");
        Ok(self.to_grid(page))
    }

    /// One page of titles similar to `id`.
    pub async fn similar(&self, kind: MediaKind, id: TitleId, page: u32) -> Result<CatalogPage> {
        check_page(page)?;
        let page = self.provider.similar(kind, id, page).await?;
        Ok(self.to_grid(page))
    }

    /// Precise quality label of one title. Never fails.
    pub async fn quality(&self, session: &Session, kind: MediaKind, id: TitleId) -> QualityLabel {
        self.details_strategy(session)
            .classify(&TitleRef::new(id, kind))
            .await
    }

    /// Details view: metadata and quality are fetched concurrently.
    pub async fn details(
        &self,
        session: &Session,
        kind: MediaKind,
        id: TitleId,
        episode: EpisodeRef,
    ) -> Result<TitleView> {
        let (details, label) = tokio::join!(
            self.provider.title_details(kind, id),
            self.quality(session, kind, id),
        );
        let details = details?;
        let players = self.players.links(kind, id, episode);
        Ok(self.to_view(details, label, players))
    }

    fn to_grid(&self, page: TitlePage) -> CatalogPage {
        let grid = self.grid_strategy();
        let entries = page
            .results
            .into_iter()
            .take(self.grid_size)
            .map(|summary| {
                let label = grid.label(&TitleRef::from(&summary));
                self.to_entry(summary, label)
            })
            .collect();

        CatalogPage {
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
            entries,
        }
    }

    fn to_entry(&self, summary: TitleSummary, label: QualityLabel) -> CatalogEntry {
        CatalogEntry {
            poster_url: self.images.poster(summary.poster_path.as_deref()),
            backdrop_url: self.images.backdrop(summary.backdrop_path.as_deref()),
            id: summary.id,
            kind: summary.kind,
            title: summary.title,
            overview: summary.overview,
            release_date: summary.release_date,
            vote_average: summary.vote_average,
            quality: label.into(),
        }
    }

    fn to_view(
        &self,
        details: TitleDetails,
        label: QualityLabel,
        players: Vec<PlayerLink>,
    ) -> TitleView {
        TitleView {
            poster_url: self.images.poster(details.poster_path.as_deref()),
            backdrop_url: self.images.backdrop(details.backdrop_path.as_deref()),
            id: details.id,
            kind: details.kind,
            title: details.title,
            original_title: details.original_title,
            overview: details.overview,
            genres: details.genres,
            release_date: details.release_date,
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            runtime_minutes: details.runtime_minutes,
            quality: label.into(),
            players,
        }
    }
}

fn check_page(page: u32) -> Result<()> {
    if page == 0 || page > MAX_PAGE {
        return Err(Error::invalid_input(format!(
            "page must be between 1 and {MAX_PAGE}, got {page}"
        )));
    }
    Ok(())
}
