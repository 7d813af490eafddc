//! Details heuristic: classify from release events and subscription availability.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinescope_common::{MediaKind, QualityLabel, Result};
use tracing::{debug, warn};

use super::{year_elapsed, Clock, QualityStrategy, SystemClock, TitleRef};
use crate::metadata::{MetadataProvider, ReleaseEvent, StreamingAvailability};

/// Label a title from its flattened release events and home-region availability.
///
/// Returns `None` when a movie counts as "in theaters" but no theatrical
/// event can be picked; callers report that as
/// [`QualityLabel::UnknownQuality`].
pub fn classify_release_events(
    kind: MediaKind,
    events: &[ReleaseEvent],
    availability: &StreamingAvailability,
    now: DateTime<Utc>,
) -> Option<QualityLabel> {
    let is_digital_release = events
        .iter()
        .any(|e| e.release_type.is_digital() && e.release_date <= now);
    let is_in_theaters = kind == MediaKind::Movie
        && events
            .iter()
            .any(|e| e.release_type.is_theatrical() && e.release_date <= now);
    let has_future_release = events.iter().any(|e| e.release_date > now);

    if availability.is_streaming() {
        return Some(QualityLabel::StreamingHd);
    }

    if is_digital_release {
        return Some(QualityLabel::Hd);
    }

    if is_in_theaters {
        // First theatrical event in flattened order, not necessarily the one
        // that made `is_in_theaters` true.
        let theatrical = events.iter().find(|e| e.release_type.is_theatrical())?;
        return Some(if year_elapsed(theatrical.release_date, now) {
            QualityLabel::Hd
        } else {
            QualityLabel::CamQuality
        });
    }

    if has_future_release {
        return Some(QualityLabel::NotReleasedYet);
    }

    Some(QualityLabel::UnknownQuality)
}

/// Precise strategy for the details view: two provider lookups per title.
#[derive(Clone)]
pub struct ReleaseEventStrategy {
    provider: Arc<dyn MetadataProvider>,
    clock: Arc<dyn Clock>,
    region: String,
}

impl ReleaseEventStrategy {
    /// Classify against the subscription providers of `region`.
    pub fn new(provider: Arc<dyn MetadataProvider>, region: &str) -> Self {
        Self {
            provider,
            clock: Arc::new(SystemClock),
            region: region.to_string(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fetch both inputs concurrently and classify.
    ///
    /// Provider errors are returned as-is; [`QualityStrategy::classify`]
    /// collapses them.
    pub async fn evaluate(&self, title: &TitleRef) -> Result<Option<QualityLabel>> {
        let (events, availability) = tokio::try_join!(
            self.provider.release_events(title.kind, title.id),
            self.provider
                .watch_availability(title.kind, title.id, &self.region),
        )?;

        debug!(
            title_id = %title.id,
            kind = %title.kind,
            events = events.len(),
            providers = availability.providers.len(),
            "classifying from release events"
        );

        Ok(classify_release_events(
            title.kind,
            &events,
            &availability,
            self.clock.now(),
        ))
    }
}

#[async_trait]
impl QualityStrategy for ReleaseEventStrategy {
    fn name(&self) -> &'static str {
        "release_events"
    }

    async fn classify(&self, title: &TitleRef) -> QualityLabel {
        match self.evaluate(title).await {
            Ok(Some(label)) => label,
            Ok(None) => {
                warn!(
                    title_id = %title.id,
                    kind = %title.kind,
                    "title counted as in theaters but no theatrical release event was found"
                );
                QualityLabel::UnknownQuality
            }
            Err(e) => {
                warn!(
                    title_id = %title.id,
                    kind = %title.kind,
                    failure = ?e.kind(),
                    error = %e,
                    "quality lookup failed"
                );
                QualityLabel::UnknownQuality
            }
        }
    }
}
