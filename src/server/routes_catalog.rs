use crate::catalog::CatalogPage;
use crate::server::{ApiError, AppContext};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use cinescope_common::{CatalogList, Error};
use serde::Deserialize;

pub fn catalog_routes() -> Router<AppContext> {
    Router::new()
        .route("/catalog", get(list_catalogs))
        .route("/catalog/:list", get(get_catalog))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

async fn list_catalogs() -> Json<Vec<String>> {
    Json(CatalogList::ALL.iter().map(|l| l.to_string()).collect())
}

async fn get_catalog(
    State(ctx): State<AppContext>,
    Path(list): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<Json<CatalogPage>, ApiError> {
    let list: CatalogList = list
        .parse()
        .map_err(|_| Error::not_found(format!("catalog '{list}'")))?;
    let page = ctx.catalog.catalog(list, params.page()).await?;
    Ok(Json(page))
}
