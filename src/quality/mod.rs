//! Release quality classification.
//!
//! A [`QualityStrategy`] maps a title to a [`QualityLabel`]. Two strategies
//! exist and trade accuracy against request volume differently:
//!
//! - [`ReleaseEventStrategy`] looks up the title's release events and
//!   subscription availability (two provider calls per title). Used on the
//!   details view.
//! - [`ReleaseDateStrategy`] only compares the primary release date with the
//!   current time (no provider calls). Used for catalog grids.
//!
//! Neither strategy ever fails: lookups that go wrong produce
//! [`QualityLabel::UnknownQuality`].

mod release_date;
mod release_events;

pub use release_date::{classify_release_date, ReleaseDateStrategy};
pub use release_events::{classify_release_events, ReleaseEventStrategy};

use async_trait::async_trait;
use chrono::{DateTime, Months, NaiveDate, Utc};
use cinescope_common::{MediaKind, QualityLabel, TitleId};

use crate::metadata::{TitleDetails, TitleSummary};

/// The parts of a title a strategy may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRef {
    pub id: TitleId,
    pub kind: MediaKind,
    /// Primary release date (first air date for series).
    pub release_date: Option<NaiveDate>,
}

impl TitleRef {
    pub fn new(id: TitleId, kind: MediaKind) -> Self {
        Self {
            id,
            kind,
            release_date: None,
        }
    }

    pub fn with_release_date(mut self, release_date: Option<NaiveDate>) -> Self {
        self.release_date = release_date;
        self
    }
}

impl From<&TitleSummary> for TitleRef {
    fn from(summary: &TitleSummary) -> Self {
        Self::new(summary.id, summary.kind).with_release_date(summary.release_date)
    }
}

impl From<&TitleDetails> for TitleRef {
    fn from(details: &TitleDetails) -> Self {
        Self::new(details.id, details.kind).with_release_date(details.release_date)
    }
}

/// Capability shared by both classification strategies.
#[async_trait]
pub trait QualityStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Label `title`. Never fails.
    async fn classify(&self, title: &TitleRef) -> QualityLabel;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whether at least one calendar year has passed between `released` and `now`.
///
/// Exactly one year counts as passed.
pub(crate) fn year_elapsed(released: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    released
        .checked_add_months(Months::new(12))
        .is_some_and(|anniversary| anniversary <= now)
}
