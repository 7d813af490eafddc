mod cli;

use cinescope::{
    catalog::{CatalogPage, CatalogService},
    config::{self, Config},
    metadata::{MetadataProvider, TmdbProvider},
    players::{EpisodeRef, PlayerCatalog},
    quality::TitleRef,
    server,
    session::SessionProvider,
};
use cinescope_common::{CatalogList, MediaKind, QualityBadge, TitleId};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cinescope=trace,cinescope_common=debug,tower_http=debug".to_string()
        } else {
            "cinescope=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config::load_config_or_default(config_path)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(config))
        }
        Commands::Catalog { list, page, json } => {
            let list: CatalogList = list.parse()?;
            block_on(show_catalog(config_path, list, page, json))
        }
        Commands::Details { kind, id, json } => {
            let (kind, id) = parse_title(&kind, &id)?;
            block_on(show_details(config_path, kind, id, json))
        }
        Commands::Quality { kind, id, grid } => {
            let (kind, id) = parse_title(&kind, &id)?;
            block_on(show_quality(config_path, kind, id, grid))
        }
        Commands::Players {
            kind,
            id,
            season,
            episode,
        } => {
            let (kind, id) = parse_title(&kind, &id)?;
            show_players(config_path, kind, id, EpisodeRef { season, episode })
        }
        Commands::Validate {
            config: validate_path,
        } => {
            let path = validate_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("cinescope {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn block_on<F: std::future::Future<Output = Result<()>>>(fut: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(fut)
}

fn parse_title(kind: &str, id: &str) -> Result<(MediaKind, TitleId)> {
    Ok((kind.parse()?, id.parse()?))
}

fn build_provider(config: &Config) -> Result<Arc<dyn MetadataProvider>> {
    let provider = TmdbProvider::new(&config.tmdb).context("Failed to create TMDB client")?;
    Ok(Arc::new(provider))
}

/// Provider and catalog service for one-shot commands, which need credentials.
fn build_service(config_path: Option<&Path>) -> Result<(Config, CatalogService)> {
    let config = config::load_config_or_default(config_path)?;
    let provider = build_provider(&config)?;
    if !provider.is_available() {
        anyhow::bail!(
            "No TMDB API key configured; set tmdb.api_key or {}",
            config::API_KEY_ENV
        );
    }
    let service = CatalogService::new(provider, &config);
    Ok((config, service))
}

async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting cinescope server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let provider = build_provider(&config)?;
    server::start_server(config, provider).await
}

async fn show_catalog(
    config_path: Option<&Path>,
    list: CatalogList,
    page: u32,
    json: bool,
) -> Result<()> {
    let (_, service) = build_service(config_path)?;
    let grid = service.catalog(list, page).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print_grid(list, &grid);
    }

    Ok(())
}

fn print_grid(list: CatalogList, grid: &CatalogPage) {
    println!(
        "{} - page {}/{} ({} titles)",
        list, grid.page, grid.total_pages, grid.total_results
    );
    for entry in &grid.entries {
        let year = entry
            .release_date
            .map(|d| d.format("%Y").to_string())
            .unwrap_or_else(|| "----".to_string());
        println!(
            "  {:>8}  {}  {:<18} {}",
            entry.id.get(),
            year,
            entry.quality.text,
            entry.title
        );
    }
}

async fn show_details(
    config_path: Option<&Path>,
    kind: MediaKind,
    id: TitleId,
    json: bool,
) -> Result<()> {
    let (config, service) = build_service(config_path)?;
    let session = SessionProvider::new(&config.tmdb.region).anonymous();
    let view = service
        .details(&session, kind, id, EpisodeRef::default())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} ({})", view.title, view.kind);
    if let Some(ref original) = view.original_title {
        if original != &view.title {
            println!("Original title: {}", original);
        }
    }
    if let Some(date) = view.release_date {
        println!("Released: {}", date);
    }
    if !view.genres.is_empty() {
        println!("Genres: {}", view.genres.join(", "));
    }
    if let Some(minutes) = view.runtime_minutes {
        println!("Runtime: {} min", minutes);
    }
    if let Some(avg) = view.vote_average {
        println!("Rating: {:.1} ({} votes)", avg, view.vote_count.unwrap_or(0));
    }
    println!("Quality: {}", view.quality.text);
    if let Some(ref overview) = view.overview {
        println!("\n{}", overview);
    }
    if !view.players.is_empty() {
        println!("\nPlayers:");
        for link in &view.players {
            println!("  {}: {}", link.name, link.url);
        }
    }

    Ok(())
}

async fn show_quality(
    config_path: Option<&Path>,
    kind: MediaKind,
    id: TitleId,
    grid: bool,
) -> Result<()> {
    let (config, service) = build_service(config_path)?;

    let label = if grid {
        let details = service.provider().title_details(kind, id).await?;
        service.grid_strategy().label(&TitleRef::from(&details))
    } else {
        let session = SessionProvider::new(&config.tmdb.region).anonymous();
        service.quality(&session, kind, id).await
    };

    let badge = QualityBadge::from(label);
    println!("{} ({})", badge.text, badge.color);
    Ok(())
}

fn show_players(
    config_path: Option<&Path>,
    kind: MediaKind,
    id: TitleId,
    episode: EpisodeRef,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let links = PlayerCatalog::new(config.players).links(kind, id, episode);

    if links.is_empty() {
        println!("No players configured for {}", kind);
        return Ok(());
    }

    for link in links {
        println!("{}: {}", link.name, link.url);
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  TMDB base URL: {}", config.tmdb.base_url);
            println!(
                "  TMDB API key: {}",
                if config.tmdb.api_key.is_empty() {
                    "not set"
                } else {
                    "set"
                }
            );
            println!("  Region: {}", config.tmdb.region);
            println!("  Grid size: {}", config.catalog.grid_size);
            println!("  Players: {}", config.players.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Grid size: {}", config.catalog.grid_size);
        }
    }

    Ok(())
}
