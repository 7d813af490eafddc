use crate::catalog::CatalogService;
use crate::config::Config;
use crate::metadata::MetadataProvider;
use crate::session::SessionProvider;
use crate::slots::RequestSlots;
use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod error;
pub mod routes_api;
pub mod routes_catalog;
pub mod routes_titles;

pub use error::ApiError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Grid and details assembly
    pub catalog: CatalogService,
    /// Builds the per-request session
    pub sessions: SessionProvider,
    /// Last-request-wins tracking for slot-tagged lookups
    pub slots: RequestSlots,
}

impl AppContext {
    pub fn new(config: Config, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            catalog: CatalogService::new(provider, &config),
            sessions: SessionProvider::new(&config.tmdb.region),
            slots: RequestSlots::new(),
            config: Arc::new(config),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(crate::session::USER_HEADER),
            HeaderName::from_static(crate::session::REGION_HEADER),
        ]);

    let api = routes_api::api_routes()
        .merge(routes_catalog::catalog_routes())
        .merge(routes_titles::title_routes())
        .layer(middleware::from_fn_with_state(ctx.clone(), session_layer));

    let mut app = Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Serve static files if directory is provided
    // Uses SPA fallback: serves index.html for any route that doesn't match a file
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .fallback(ServeFile::new(index_path)),
            );
        }
    }

    app
}

/// Attach the request's [`Session`](crate::session::Session) as an extension.
async fn session_layer(State(ctx): State<AppContext>, mut request: Request, next: Next) -> Response {
    let session = ctx.sessions.from_headers(request.headers());
    request.extensions_mut().insert(session);
    next.run(request).await
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config, provider: Arc<dyn MetadataProvider>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    if !provider.is_available() {
        tracing::warn!(
            provider = provider.name(),
            "Metadata provider has no credentials; lookups will fail"
        );
    }

    let static_dir = config.server.static_dir.clone();
    let ctx = AppContext::new(config, provider);
    let app = create_router(ctx, static_dir);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
