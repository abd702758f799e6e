//! Observer registry and broadcast fan-out.
//!
//! [`BroadcastHub`] keeps one bounded queue per registered observer and
//! pushes every update with a non-blocking send. A slow or stalled observer
//! fills its own queue and starts dropping updates; delivery to every other
//! observer and the mutation path itself are unaffected. There is no retry
//! and no acknowledgment; the only ordering guarantee is the single
//! mutation order feeding the hub.
//!
//! The hub implements [`UpdatePublisher`], which is how the core crate's
//! mutation gateway reaches it without depending on this crate.

use std::collections::HashMap;
use std::sync::RwLock;

use livepoll_core::UpdatePublisher;
use livepoll_types::{ObserverId, TallyUpdate};
use tokio::sync::mpsc;
use tracing::debug;

/// Maximum number of undelivered updates queued per observer.
///
/// When an observer's queue is full, further updates are dropped for that
/// observer only until its connection task drains the queue or disconnects.
pub const OBSERVER_QUEUE_CAPACITY: usize = 64;

/// Receiver half handed to the connection task of a registered observer.
pub type UpdateReceiver = mpsc::Receiver<TallyUpdate>;

type UpdateSender = mpsc::Sender<TallyUpdate>;

/// Registry of connected observers with per-observer delivery queues.
#[derive(Debug, Default)]
pub struct BroadcastHub {
    /// Delivery queues keyed by observer identity.
    observers: RwLock<HashMap<ObserverId, UpdateSender>>,
}

impl BroadcastHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer and hand back its delivery queue.
    ///
    /// The catch-up update is queued before the observer becomes visible to
    /// broadcasts, so the first message an observer receives is always the
    /// state at registration time, even if no mutation ever follows.
    pub fn register(&self, catch_up: TallyUpdate) -> (ObserverId, UpdateReceiver) {
        let id = ObserverId::new();
        let (tx, rx) = mpsc::channel(OBSERVER_QUEUE_CAPACITY);

        // The queue is fresh and the receiver alive: this send cannot fail.
        let _ = tx.try_send(catch_up);

        if let Ok(mut observers) = self.observers.write() {
            observers.insert(id, tx);
        }

        debug!(observer = %id, "observer registered");
        (id, rx)
    }

    /// Remove an observer from the registry. Idempotent.
    pub fn unregister(&self, id: ObserverId) {
        if let Ok(mut observers) = self.observers.write() {
            if observers.remove(&id).is_some() {
                debug!(observer = %id, "observer unregistered");
            }
        }
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.read().map(|o| o.len()).unwrap_or(0)
    }

    /// Fan an update out to every registered observer.
    ///
    /// Best-effort: a full or closed queue counts as a drop for that
    /// observer and is never retried.
    pub fn broadcast(&self, update: &TallyUpdate) -> PublishOutcome {
        let mut outcome = PublishOutcome::default();

        let Ok(observers) = self.observers.read() else {
            return outcome;
        };

        for sender in observers.values() {
            match sender.try_send(update.clone()) {
                Ok(()) => outcome.delivered = outcome.delivered.saturating_add(1),
                Err(_) => outcome.dropped = outcome.dropped.saturating_add(1),
            }
        }

        outcome
    }
}

impl UpdatePublisher for BroadcastHub {
    fn publish(&self, update: &TallyUpdate) {
        let outcome = self.broadcast(update);
        debug!(
            delivered = outcome.delivered,
            dropped = outcome.dropped,
            "update broadcast"
        );
    }
}

/// Result of fanning one update out to the registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Observers whose queue accepted the update.
    pub delivered: usize,

    /// Observers whose queue was full or closed.
    pub dropped: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use livepoll_core::ranking::rank;
    use livepoll_types::{OptionId, Tally};

    use super::*;

    fn make_update(counts: &[(&str, u64)]) -> TallyUpdate {
        let options: Vec<OptionId> = counts.iter().map(|(id, _)| OptionId::from(*id)).collect();
        let mut votes = Tally::new(&options);
        for (id, count) in counts {
            for _ in 0..*count {
                votes.increment(&OptionId::from(*id)).unwrap();
            }
        }
        let ranking = rank(&votes);
        TallyUpdate { votes, ranking }
    }

    #[tokio::test]
    async fn register_delivers_the_catch_up_first() {
        let hub = BroadcastHub::new();
        let catch_up = make_update(&[("option1", 2), ("option2", 0)]);

        let (_id, mut rx) = hub.register(catch_up.clone());

        let first = rx.recv().await.unwrap();
        assert_eq!(first, catch_up);
        assert_eq!(hub.observer_count(), 1);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_observer() {
        let hub = BroadcastHub::new();
        let catch_up = make_update(&[("option1", 0)]);
        let (_a, mut rx_a) = hub.register(catch_up.clone());
        let (_b, mut rx_b) = hub.register(catch_up);

        let update = make_update(&[("option1", 1)]);
        let outcome = hub.broadcast(&update);

        assert_eq!(outcome.delivered, 2);
        assert_eq!(outcome.dropped, 0);

        // Skip the catch-up, then both see the broadcast.
        let _ = rx_a.recv().await.unwrap();
        let _ = rx_b.recv().await.unwrap();
        assert_eq!(rx_a.recv().await.unwrap(), update);
        assert_eq!(rx_b.recv().await.unwrap(), update);
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let hub = BroadcastHub::new();
        let (id, _rx) = hub.register(make_update(&[("option1", 0)]));
        assert_eq!(hub.observer_count(), 1);

        hub.unregister(id);
        hub.unregister(id);
        assert_eq!(hub.observer_count(), 0);

        let outcome = hub.broadcast(&make_update(&[("option1", 1)]));
        assert_eq!(outcome, PublishOutcome::default());
    }

    #[tokio::test]
    async fn full_queue_drops_without_blocking_others() {
        let hub = BroadcastHub::new();
        let update = make_update(&[("option1", 0)]);

        // Never drained: the catch-up plus the broadcasts below fill this
        // observer's queue to capacity.
        let (_stalled, _rx_stalled) = hub.register(update.clone());
        for _ in 0..OBSERVER_QUEUE_CAPACITY.saturating_sub(1) {
            let _ = hub.broadcast(&update);
        }

        let (_live, mut rx_live) = hub.register(update.clone());
        let outcome = hub.broadcast(&update);

        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.dropped, 1);

        // The live observer still receives everything addressed to it.
        let _ = rx_live.recv().await.unwrap();
        assert_eq!(rx_live.recv().await.unwrap(), update);
    }

    #[tokio::test]
    async fn closed_receiver_counts_as_dropped() {
        let hub = BroadcastHub::new();
        let (_id, rx) = hub.register(make_update(&[("option1", 0)]));
        drop(rx);

        let outcome = hub.broadcast(&make_update(&[("option1", 1)]));
        assert_eq!(outcome.delivered, 0);
        assert_eq!(outcome.dropped, 1);
    }
}
