//! Typed identifier for titles known to the metadata provider.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Numeric identifier of a movie or TV series at the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleId(u64);

impl TitleId {
    /// Wrap a raw provider id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw provider id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TitleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<TitleId> for u64 {
    fn from(id: TitleId) -> Self {
        id.0
    }
}

impl FromStr for TitleId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::Error::invalid_input(format!("invalid title id: {s:?}")))
    }
}

impl std::fmt::Display for TitleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
