//! Last-request-wins tracking for superseded lookups.
//!
//! A client labels its requests with a slot key (for example one per UI
//! widget). Every request issued for a slot receives a monotonically
//! increasing sequence number. Issuing a new ticket cancels the previous
//! ticket for that slot, and a result is only delivered when its ticket is
//! still the newest one. Ordering is decided by sequence number, never by
//! which response happens to arrive last.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cinescope_common::{Error, Result};
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct SlotEntry {
    seq: u64,
    token: CancellationToken,
}

/// A claim on a slot, valid until a newer ticket is issued for it.
#[derive(Debug, Clone)]
pub struct SlotTicket {
    slot: String,
    seq: u64,
    token: CancellationToken,
}

impl SlotTicket {
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// `true` once a newer ticket has been issued for the same slot.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Releases its ticket when dropped, including when the request is abandoned.
struct SlotGuard<'a> {
    slots: &'a RequestSlots,
    ticket: SlotTicket,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.slots.finish(&self.ticket);
    }
}

/// Thread-safe registry of in-flight slot tickets.
#[derive(Clone, Default)]
pub struct RequestSlots {
    slots: Arc<DashMap<String, SlotEntry>>,
    next_seq: Arc<AtomicU64>,
}

impl RequestSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `slot`, cancelling the previous one.
    pub fn issue(&self, slot: &str) -> SlotTicket {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();

        let previous = self.slots.insert(
            slot.to_string(),
            SlotEntry {
                seq,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
            tracing::debug!(
                slot,
                superseded = previous.seq,
                seq,
                "Superseded in-flight request"
            );
        }

        SlotTicket {
            slot: slot.to_string(),
            seq,
            token,
        }
    }

    /// Whether `ticket` is still the newest ticket for its slot.
    pub fn is_current(&self, ticket: &SlotTicket) -> bool {
        self.slots
            .get(&ticket.slot)
            .is_some_and(|entry| entry.seq == ticket.seq)
    }

    /// Release `ticket`. Only the newest ticket clears its slot.
    pub fn finish(&self, ticket: &SlotTicket) {
        self.slots
            .remove_if(&ticket.slot, |_, entry| entry.seq == ticket.seq);
    }

    /// Run `fut` under a fresh ticket for `slot`.
    ///
    /// Returns [`Error::Superseded`] when a newer request for the same slot
    /// is issued before `fut` completes, or when the result is no longer
    /// current by the time it is ready.
    pub async fn run<F, T>(&self, slot: &str, fut: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        let guard = SlotGuard {
            slots: self,
            ticket: self.issue(slot),
        };
        let ticket = &guard.ticket;

        let outcome = tokio::select! {
            biased;
            _ = ticket.token.cancelled() => None,
            value = fut => Some(value),
        };

        match outcome {
            Some(value) if self.is_current(ticket) => Ok(value),
            _ => Err(Error::Superseded),
        }
    }

    /// Number of slots with a request in flight.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[test]
    fn sequence_numbers_increase() {
        let slots = RequestSlots::new();
        let a = slots.issue("badge");
        let b = slots.issue("other");
        let c = slots.issue("badge");
        assert!(a.seq() < b.seq());
        assert!(b.seq() < c.seq());
    }

    #[test]
    fn newer_ticket_supersedes_older() {
        let slots = RequestSlots::new();
        let first = slots.issue("badge");
        assert!(slots.is_current(&first));

        let second = slots.issue("badge");
        assert!(first.is_cancelled());
        assert!(!slots.is_current(&first));
        assert!(slots.is_current(&second));
        assert!(!second.is_cancelled());
    }

    #[test]
    fn slots_are_independent() {
        let slots = RequestSlots::new();
        let a = slots.issue("left");
        let b = slots.issue("right");
        assert!(slots.is_current(&a));
        assert!(slots.is_current(&b));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn stale_finish_keeps_newer_ticket() {
        let slots = RequestSlots::new();
        let first = slots.issue("badge");
        let second = slots.issue("badge");

        slots.finish(&first);
        assert!(slots.is_current(&second));

        slots.finish(&second);
        assert!(slots.is_empty());
        // A late result for the first ticket is still stale.
        assert!(!slots.is_current(&first));
    }

    #[tokio::test]
    async fn run_delivers_current_result() {
        let slots = RequestSlots::new();
        let value = slots.run("badge", async { 42 }).await.unwrap();
        assert_eq!(value, 42);
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn run_discards_superseded_result() {
        let slots = RequestSlots::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let slow = {
            let slots = slots.clone();
            tokio::spawn(async move {
                slots
                    .run("badge", async move {
                        let _ = release_rx.await;
                        "stale"
                    })
                    .await
            })
        };

        // Let the first request register its ticket.
        while slots.is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let fresh = slots.run("badge", async { "fresh" }).await.unwrap();
        let _ = release_tx.send(());

        assert_eq!(fresh, "fresh");
        let stale = slow.await.unwrap();
        assert!(matches!(stale, Err(Error::Superseded)));
    }

    #[tokio::test]
    async fn abandoned_runs_release_their_slots() {
        let slots = RequestSlots::new();

        for i in 0..100 {
            let key = format!("user-{i}:badge");
            let abandoned = tokio::time::timeout(
                Duration::from_millis(1),
                slots.run(&key, std::future::pending::<()>()),
            )
            .await;
            assert!(abandoned.is_err());
        }

        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn superseded_run_leaves_newer_ticket() {
        let slots = RequestSlots::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let slow = {
            let slots = slots.clone();
            tokio::spawn(async move { slots.run("badge", release_rx).await })
        };
        while slots.is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let newer = slots.issue("badge");
        assert!(matches!(slow.await.unwrap(), Err(Error::Superseded)));
        assert!(slots.is_current(&newer));
        assert_eq!(slots.len(), 1);
        drop(release_tx);
    }
}
