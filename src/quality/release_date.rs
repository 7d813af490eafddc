//! Grid heuristic: classify from the primary release date alone.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use cinescope_common::QualityLabel;

use super::{year_elapsed, Clock, QualityStrategy, SystemClock, TitleRef};

/// Label a title using only its release date.
///
/// A date is taken as midnight UTC of that day, so a title released today
/// counts as released.
pub fn classify_release_date(release_date: Option<NaiveDate>, now: DateTime<Utc>) -> QualityLabel {
    let Some(date) = release_date else {
        return QualityLabel::UnknownQuality;
    };
    let released = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));

    if released > now {
        QualityLabel::NotReleasedYet
    } else if year_elapsed(released, now) {
        QualityLabel::Hd
    } else {
        QualityLabel::CamQuality
    }
}

/// Cheap strategy for catalog grids: no provider calls.
#[derive(Clone)]
pub struct ReleaseDateStrategy {
    clock: Arc<dyn Clock>,
}

impl ReleaseDateStrategy {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Synchronous form of [`QualityStrategy::classify`].
    pub fn label(&self, title: &TitleRef) -> QualityLabel {
        classify_release_date(title.release_date, self.clock.now())
    }
}

impl Default for ReleaseDateStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QualityStrategy for ReleaseDateStrategy {
    fn name(&self) -> &'static str {
        "release_date"
    }

    async fn classify(&self, title: &TitleRef) -> QualityLabel {
        self.label(title)
    }
}
