mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable holding the metadata provider credential
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    normalize(&mut config);
    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./cinescope.toml",
        "./config.toml",
        "~/.config/cinescope/config.toml",
        "/etc/cinescope/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    normalize(&mut config);
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Canonical forms for values that are compared verbatim later.
fn normalize(config: &mut Config) {
    config.tmdb.region = config.tmdb.region.trim().to_ascii_uppercase();
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.tmdb.api_key = key.trim().to_string();
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.tmdb.requests_per_second == 0 {
        anyhow::bail!("tmdb.requests_per_second must be at least 1");
    }

    if config.tmdb.request_timeout_secs == 0 {
        anyhow::bail!("tmdb.request_timeout_secs must be at least 1");
    }

    let region = &config.tmdb.region;
    if region.len() != 2 || !region.bytes().all(|b| b.is_ascii_uppercase()) {
        anyhow::bail!(
            "tmdb.region must be a two-letter country code, got '{}'",
            region
        );
    }

    if config.tmdb.api_key.is_empty() {
        tracing::warn!(
            "No TMDB API key configured; set tmdb.api_key or {}",
            API_KEY_ENV
        );
    }

    if !(1..=20).contains(&config.catalog.grid_size) {
        anyhow::bail!(
            "catalog.grid_size must be between 1 and 20, got {}",
            config.catalog.grid_size
        );
    }

    if let Some(ref proxy) = config.images.proxy {
        if !proxy.contains("{url}") {
            anyhow::bail!("images.proxy must contain a {{url}} placeholder");
        }
    }

    let mut names = HashSet::new();
    for player in &config.players {
        if player.name.trim().is_empty() {
            anyhow::bail!("Player name cannot be empty");
        }
        if !names.insert(player.name.to_lowercase()) {
            anyhow::bail!("Duplicate player name: '{}'", player.name);
        }
        if !player.movie_url.contains("{id}") {
            anyhow::bail!("Player '{}' movie_url has no {{id}} placeholder", player.name);
        }
        if let Some(ref tv_url) = player.tv_url {
            if !tv_url.contains("{id}") {
                anyhow::bail!("Player '{}' tv_url has no {{id}} placeholder", player.name);
            }
        }
    }

    Ok(())
}
