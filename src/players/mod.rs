//! Embed player links.
//!
//! Players are configured by the operator as URL templates. The service
//! only fills the templates in; it does not check whether a player works
//! or carries the title. Choosing a player is up to the user and there is
//! no fallback between players.

use cinescope_common::{Error, MediaKind, Result, TitleId};
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;

/// Season/episode selection for series embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub season: u32,
    pub episode: u32,
}

impl Default for EpisodeRef {
    fn default() -> Self {
        Self {
            season: 1,
            episode: 1,
        }
    }
}

/// A filled-in embed URL for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLink {
    pub name: String,
    pub url: String,
}

/// The configured players, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: Vec<PlayerConfig>,
}

impl PlayerCatalog {
    pub fn new(players: Vec<PlayerConfig>) -> Self {
        Self { players }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Configured player names.
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Links for every player that supports `kind`.
    pub fn links(&self, kind: MediaKind, id: TitleId, episode: EpisodeRef) -> Vec<PlayerLink> {
        self.players
            .iter()
            .filter_map(|p| render(p, kind, id, episode))
            .collect()
    }

    /// Link for one player, looked up by name (case-insensitive).
    pub fn link(
        &self,
        name: &str,
        kind: MediaKind,
        id: TitleId,
        episode: EpisodeRef,
    ) -> Result<PlayerLink> {
        let player = self
            .players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::not_found(format!("player '{name}'")))?;

        render(player, kind, id, episode)
            .ok_or_else(|| Error::not_found(format!("player '{name}' has no {kind} template")))
    }
}

fn render(
    player: &PlayerConfig,
    kind: MediaKind,
    id: TitleId,
    episode: EpisodeRef,
) -> Option<PlayerLink> {
    let template = match kind {
        MediaKind::Movie => player.movie_url.as_str(),
        MediaKind::Tv => player.tv_url.as_deref()?,
    };

    let url = template
        .replace("{id}", &id.to_string())
        .replace("{season}", &episode.season.to_string())
        .replace("{episode}", &episode.episode.to_string());

    Some(PlayerLink {
        name: player.name.clone(),
        url,
    })
}
