//! Cinescope - movie and TV catalog with release quality badges
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod images;
pub mod metadata;
pub mod players;
pub mod quality;
pub mod server;
pub mod session;
pub mod slots;
