//! Title details, quality badge, similar titles and player links.

use crate::catalog::{CatalogPage, TitleView};
use crate::players::{EpisodeRef, PlayerLink};
use crate::server::routes_catalog::PageQuery;
use crate::server::{ApiError, AppContext};
use crate::session::Session;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use cinescope_common::{MediaKind, QualityBadge, TitleId};
use serde::{Deserialize, Serialize};

pub fn title_routes() -> Router<AppContext> {
    Router::new()
        .route("/titles/:kind/:id", get(get_details))
        .route("/titles/:kind/:id/quality", get(get_quality))
        .route("/titles/:kind/:id/similar", get(get_similar))
        .route("/titles/:kind/:id/players", get(get_players))
        .route("/titles/:kind/:id/players/:name", get(get_player))
}

fn parse_title(kind: &str, id: &str) -> Result<(MediaKind, TitleId), ApiError> {
    Ok((kind.parse()?, id.parse()?))
}

#[derive(Debug, Default, Deserialize)]
struct EpisodeQuery {
    season: Option<u32>,
    episode: Option<u32>,
}

impl From<EpisodeQuery> for EpisodeRef {
    fn from(q: EpisodeQuery) -> Self {
        let default = EpisodeRef::default();
        EpisodeRef {
            season: q.season.unwrap_or(default.season),
            episode: q.episode.unwrap_or(default.episode),
        }
    }
}

async fn get_details(
    State(ctx): State<AppContext>,
    Extension(session): Extension<Session>,
    Path((kind, id)): Path<(String, String)>,
    Query(episode): Query<EpisodeQuery>,
) -> Result<Json<TitleView>, ApiError> {
    let (kind, id) = parse_title(&kind, &id)?;
    let view = ctx
        .catalog
        .details(&session, kind, id, episode.into())
        .await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
struct QualityQuery {
    /// UI slot the badge is rendered into; a newer request for the same
    /// slot supersedes this one.
    slot: Option<String>,
}

#[derive(Debug, Serialize)]
struct QualityResponse {
    id: TitleId,
    kind: MediaKind,
    region: String,
    #[serde(flatten)]
    quality: QualityBadge,
}

async fn get_quality(
    State(ctx): State<AppContext>,
    Extension(session): Extension<Session>,
    Path((kind, id)): Path<(String, String)>,
    Query(params): Query<QualityQuery>,
) -> Result<Json<QualityResponse>, ApiError> {
    let (kind, id) = parse_title(&kind, &id)?;

    let lookup = ctx.catalog.quality(&session, kind, id);
    let label = match params.slot.as_deref().filter(|s| !s.is_empty()) {
        Some(slot) => {
            let key = format!("{}:{}", session.user.as_deref().unwrap_or("anonymous"), slot);
            ctx.slots.run(&key, lookup).await?
        }
        None => lookup.await,
    };

    Ok(Json(QualityResponse {
        id,
        kind,
        region: session.region,
        quality: label.into(),
    }))
}

async fn get_similar(
    State(ctx): State<AppContext>,
    Path((kind, id)): Path<(String, String)>,
    Query(params): Query<PageQuery>,
) -> Result<Json<CatalogPage>, ApiError> {
    let (kind, id) = parse_title(&kind, &id)?;
    let page = ctx.catalog.similar(kind, id, params.page()).await?;
    Ok(Json(page))
}

async fn get_players(
    State(ctx): State<AppContext>,
    Path((kind, id)): Path<(String, String)>,
    Query(episode): Query<EpisodeQuery>,
) -> Result<Json<Vec<PlayerLink>>, ApiError> {
    let (kind, id) = parse_title(&kind, &id)?;
    Ok(Json(ctx.catalog.players().links(kind, id, episode.into())))
}

async fn get_player(
    State(ctx): State<AppContext>,
    Path((kind, id, name)): Path<(String, String, String)>,
    Query(episode): Query<EpisodeQuery>,
) -> Result<Json<PlayerLink>, ApiError> {
    let (kind, id) = parse_title(&kind, &id)?;
    let link = ctx.catalog.players().link(&name, kind, id, episode.into())?;
    Ok(Json(link))
}
