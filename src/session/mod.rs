//! Per-request session context.
//!
//! A [`Session`] is built once at the HTTP boundary by the
//! [`SessionProvider`] and then passed explicitly to whatever needs it.
//! It is immutable for the lifetime of the request; there is no global
//! "current user".

use axum::http::HeaderMap;
use serde::Serialize;

/// Header carrying the display name of the signed-in user, if any.
pub const USER_HEADER: &str = "x-cinescope-user";

/// Header overriding the home region for streaming availability.
pub const REGION_HEADER: &str = "x-cinescope-region";

/// Immutable request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Display name of the user, `None` for anonymous visitors.
    pub user: Option<String>,
    /// ISO-3166-1 region whose subscription services are consulted.
    pub region: String,
}

impl Session {
    pub fn anonymous(region: &str) -> Self {
        Self {
            user: None,
            region: region.trim().to_ascii_uppercase(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Builds sessions from request headers.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    default_region: String,
}

impl SessionProvider {
    pub fn new(default_region: &str) -> Self {
        Self {
            default_region: default_region.trim().to_ascii_uppercase(),
        }
    }

    /// Session for callers outside HTTP, such as the CLI.
    pub fn anonymous(&self) -> Session {
        Session::anonymous(&self.default_region)
    }

    /// Session for a request. Unusable header values are ignored.
    pub fn from_headers(&self, headers: &HeaderMap) -> Session {
        let user = header_str(headers, USER_HEADER)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let region = header_str(headers, REGION_HEADER)
            .filter(|r| is_region_code(r))
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| self.default_region.clone());

        Session { user, region }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}

fn is_region_code(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic())
}
