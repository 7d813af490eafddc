//! Metadata provider system for fetching title data from an external service.
//!
//! This module defines a generic [`MetadataProvider`] trait and supporting
//! types, plus the TMDB implementation used in production.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and shared data types.
//! - [`providers`] -- Concrete provider implementations (TMDB).

pub mod provider;
pub mod providers;

pub use provider::{
    parse_release_date, MetadataProvider, ReleaseEvent, StreamingAvailability, TitleDetails,
    TitlePage, TitleSummary,
};
pub use providers::TmdbProvider;
