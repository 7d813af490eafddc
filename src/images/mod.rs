//! Poster and backdrop URL construction.
//!
//! The provider hands out image path fragments (`/abc.jpg`). This module
//! turns them into absolute URLs at a configured size and, when an image
//! proxy is configured, routes them through it. Image bytes are never
//! fetched here.

use crate::config::Config;

/// Builds image URLs for catalog and details responses.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base: String,
    poster_size: String,
    backdrop_size: String,
    proxy: Option<String>,
}

impl ImageUrls {
    pub fn new(base: &str, poster_size: &str, backdrop_size: &str, proxy: Option<String>) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            poster_size: poster_size.to_string(),
            backdrop_size: backdrop_size.to_string(),
            proxy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.tmdb.image_base_url,
            &config.catalog.poster_size,
            &config.catalog.backdrop_size,
            config.images.proxy.clone(),
        )
    }

    /// Poster URL for a path fragment, if any.
    pub fn poster(&self, path: Option<&str>) -> Option<String> {
        path.map(|p| self.sized(&self.poster_size, p))
    }

    /// Backdrop URL for a path fragment, if any.
    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        path.map(|p| self.sized(&self.backdrop_size, p))
    }

    /// URL of `path` at `size`, proxied when a proxy is configured.
    pub fn sized(&self, size: &str, path: &str) -> String {
        let separator = if path.starts_with('/') { "" } else { "/" };
        let direct = format!("{}/{size}{separator}{path}", self.base);
        match self.proxy {
            Some(ref template) => template.replace("{url}", &urlencoded(&direct)),
            None => direct,
        }
    }
}

/// Percent-encoding for a URL embedded as a query parameter value.
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";
