//! Core type definitions for titles, releases, catalogs, and quality badges.
//!
//! Enums serialize in snake_case so they can be used directly in JSON
//! responses and URL path segments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Whether a title is a movie or a TV series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// A TV series.
    Tv,
}

impl MediaKind {
    /// Path segment used by the metadata provider (`/movie/...`, `/tv/...`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "tv" | "series" | "show" => Ok(Self::Tv),
            other => Err(Error::invalid_input(format!("unknown media kind: {other}"))),
        }
    }
}

/// Release milestone type, as coded by the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    /// 1
    Premiere,
    /// 2
    TheatricalLimited,
    /// 3
    Theatrical,
    /// 4
    Digital,
    /// 5
    Physical,
    /// 6
    Tv,
    /// Any code the provider adds later.
    Other(u8),
}

impl ReleaseType {
    /// Numeric provider code.
    pub fn code(self) -> u8 {
        match self {
            Self::Premiere => 1,
            Self::TheatricalLimited => 2,
            Self::Theatrical => 3,
            Self::Digital => 4,
            Self::Physical => 5,
            Self::Tv => 6,
            Self::Other(code) => code,
        }
    }

    /// Codes counted as a home/digital release by the quality classifier (4 and 6).
    pub fn is_digital(self) -> bool {
        matches!(self, Self::Digital | Self::Tv)
    }

    /// Wide theatrical release (code 3).
    pub fn is_theatrical(self) -> bool {
        matches!(self, Self::Theatrical)
    }
}

impl From<u8> for ReleaseType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Premiere,
            2 => Self::TheatricalLimited,
            3 => Self::Theatrical,
            4 => Self::Digital,
            5 => Self::Physical,
            6 => Self::Tv,
            other => Self::Other(other),
        }
    }
}

impl Serialize for ReleaseType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ReleaseType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from)
    }
}

/// Catalog lists served as grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogList {
    /// Currently popular movies.
    Popular,
    /// Movies currently in theaters.
    NowPlaying,
    /// Movies releasing soon.
    Upcoming,
}

impl CatalogList {
    /// All lists, in display order.
    pub const ALL: [CatalogList; 3] = [Self::Popular, Self::NowPlaying, Self::Upcoming];

    /// Provider path for this list.
    pub fn path(self) -> &'static str {
        match self {
            Self::Popular => "/movie/popular",
            Self::NowPlaying => "/movie/now_playing",
            Self::Upcoming => "/movie/upcoming",
        }
    }
}

impl fmt::Display for CatalogList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::NowPlaying => write!(f, "now_playing"),
            Self::Upcoming => write!(f, "upcoming"),
        }
    }
}

impl FromStr for CatalogList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "popular" => Ok(Self::Popular),
            "now_playing" => Ok(Self::NowPlaying),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(Error::invalid_input(format!("unknown catalog list: {other}"))),
        }
    }
}

/// Heuristic availability/freshness label shown as a badge.
///
/// This is not a measure of actual video resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    /// Available on a subscription streaming service.
    StreamingHd,
    /// Digitally released, or out of theaters for at least a year.
    Hd,
    /// In theaters for less than a year with no digital release.
    CamQuality,
    /// Only future releases are known.
    NotReleasedYet,
    /// Not enough information, or the lookup failed.
    UnknownQuality,
}

impl QualityLabel {
    /// User-facing badge text.
    pub fn text(self) -> &'static str {
        match self {
            Self::StreamingHd => "Streaming (HD)",
            Self::Hd => "HD",
            Self::CamQuality => "Cam Quality",
            Self::NotReleasedYet => "Not Released Yet",
            Self::UnknownQuality => "Unknown Quality",
        }
    }

    /// Badge colour. This table is fixed.
    pub fn color(self) -> BadgeColor {
        match self {
            Self::StreamingHd => BadgeColor::Green,
            Self::Hd => BadgeColor::Blue,
            Self::CamQuality => BadgeColor::Red,
            Self::NotReleasedYet => BadgeColor::Yellow,
            Self::UnknownQuality => BadgeColor::Gray,
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Badge colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Blue,
    Red,
    Yellow,
    Gray,
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Blue => write!(f, "blue"),
            Self::Red => write!(f, "red"),
            Self::Yellow => write!(f, "yellow"),
            Self::Gray => write!(f, "gray"),
        }
    }
}

/// A quality label together with its rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityBadge {
    pub label: QualityLabel,
    pub text: &'static str,
    pub color: BadgeColor,
}

impl From<QualityLabel> for QualityBadge {
    fn from(label: QualityLabel) -> Self {
        Self {
            label,
            text: label.text(),
            color: label.color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_color_table() {
        assert_eq!(QualityLabel::StreamingHd.color(), BadgeColor::Green);
        assert_eq!(QualityLabel::Hd.color(), BadgeColor::Blue);
        assert_eq!(QualityLabel::CamQuality.color(), BadgeColor::Red);
        assert_eq!(QualityLabel::NotReleasedYet.color(), BadgeColor::Yellow);
        assert_eq!(QualityLabel::UnknownQuality.color(), BadgeColor::Gray);
    }

    #[test]
    fn test_quality_label_serialization() {
        let json = serde_json::to_string(&QualityLabel::NotReleasedYet).unwrap();
        assert_eq!(json, "\"not_released_yet\"");

        let badge = QualityBadge::from(QualityLabel::StreamingHd);
        let value = serde_json::to_value(badge).unwrap();
        assert_eq!(value["label"], "streaming_hd");
        assert_eq!(value["color"], "green");
        assert_eq!(value["text"], "Streaming (HD)");
    }

    #[test]
    fn test_release_type_codes() {
        assert_eq!(ReleaseType::from(3), ReleaseType::Theatrical);
        assert!(ReleaseType::from(4).is_digital());
        assert!(ReleaseType::from(6).is_digital());
        assert!(!ReleaseType::from(5).is_digital());
        assert_eq!(ReleaseType::from(9), ReleaseType::Other(9));
        assert_eq!(ReleaseType::Other(9).code(), 9);

        let parsed: ReleaseType = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, ReleaseType::Digital);
    }

    #[test]
    fn test_media_kind_parse() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert!("music".parse::<MediaKind>().is_err());
        assert_eq!(MediaKind::Tv.to_string(), "tv");
    }

    #[test]
    fn test_catalog_list_parse() {
        assert_eq!(
            "now-playing".parse::<CatalogList>().unwrap(),
            CatalogList::NowPlaying
        );
        assert_eq!(
            "now_playing".parse::<CatalogList>().unwrap(),
            CatalogList::NowPlaying
        );
        assert_eq!(CatalogList::Upcoming.path(), "/movie/upcoming");
        assert!("top_rated".parse::<CatalogList>().is_err());
    }
}
