use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding a built web UI, served with SPA fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// API key sent as the `api_key` query parameter (overridden by `TMDB_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Home region whose subscription providers decide streaming availability
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Retries on HTTP 429 (0 = fail immediately)
    #[serde(default)]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_TMDB_BASE_URL.to_string()
}
fn default_image_base_url() -> String {
    DEFAULT_TMDB_IMAGE_BASE_URL.to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_region() -> String {
    "US".to_string()
}
fn default_requests_per_second() -> u32 {
    10
}
fn default_request_timeout() -> u64 {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            region: default_region(),
            requests_per_second: default_requests_per_second(),
            request_timeout_secs: default_request_timeout(),
            max_retries: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Number of entries shown per grid page
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    #[serde(default = "default_poster_size")]
    pub poster_size: String,

    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: String,
}

fn default_grid_size() -> usize {
    18
}
fn default_poster_size() -> String {
    "w500".to_string()
}
fn default_backdrop_size() -> String {
    "original".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            poster_size: default_poster_size(),
            backdrop_size: default_backdrop_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// Image proxy URL template; `{url}` is replaced with the encoded image URL
    #[serde(default)]
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,

    /// Movie embed template, e.g. `https://player.example/movie/{id}`
    pub movie_url: String,

    /// TV embed template with `{id}`, `{season}` and `{episode}`
    #[serde(default)]
    pub tv_url: Option<String>,
}
