use crate::server::AppContext;
use crate::session::Session;
use axum::{extract::State, response::IntoResponse, routing::get, Extension, Json, Router};

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health))
        .route("/session", get(session))
        .route("/players", get(list_players))
}

async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "grid_size": ctx.config.catalog.grid_size,
    }))
}

async fn session(Extension(session): Extension<Session>) -> impl IntoResponse {
    Json(serde_json::json!({
        "user": session.user,
        "region": session.region,
        "signed_in": session.is_signed_in(),
    }))
}

async fn list_players(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.catalog.players().names())
}
