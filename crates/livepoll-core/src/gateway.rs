//! Mutation entry points and the broadcast seam.
//!
//! [`MutationGateway`] is the single mutation authority: every increment and
//! reset from either transport surface passes through its mutex, so all
//! mutations execute under one total order and no observer can see a
//! partially-applied change. After each successful mutation the gateway
//! derives the ranking from the fresh snapshot and publishes exactly one
//! [`TallyUpdate`] through the [`UpdatePublisher`] seam.
//!
//! The mutex covers only the store mutation itself. Ranking runs on the
//! extracted snapshot and publishing is non-blocking, so broadcast latency
//! never delays the next mutation.

use std::sync::Arc;

use livepoll_types::{OptionId, TallyUpdate};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::TallyError;
use crate::ranking::rank;
use crate::store::TallyStore;

/// Capability to push a freshly computed update to all current observers.
///
/// Implemented by the server's broadcast hub; the gateway never learns
/// anything about transports or connections. Implementations must not
/// block: delivery is best-effort and a failure for one observer must stay
/// isolated to that observer.
pub trait UpdatePublisher: Send + Sync {
    /// Fan the update out to every registered observer.
    fn publish(&self, update: &TallyUpdate);
}

/// The single mutation authority for the tally.
pub struct MutationGateway {
    /// Canonical state; the mutex is the serialization point for mutations.
    store: Mutex<TallyStore>,

    /// Broadcast seam, invoked once per successful mutation.
    publisher: Arc<dyn UpdatePublisher>,
}

impl MutationGateway {
    /// Create a gateway owning the given store and publishing through the
    /// given seam.
    pub fn new(store: TallyStore, publisher: Arc<dyn UpdatePublisher>) -> Self {
        Self {
            store: Mutex::new(store),
            publisher,
        }
    }

    /// Apply one vote.
    ///
    /// Validates the option against the configured set, increments, and
    /// broadcasts the result. An invalid option fails with
    /// [`TallyError::InvalidOption`]: no state change, no broadcast.
    pub async fn vote(&self, option: &OptionId) -> Result<TallyUpdate, TallyError> {
        let votes = {
            let mut store = self.store.lock().await;
            store.increment(option)?
        };

        let ranking = rank(&votes);
        let update = TallyUpdate { votes, ranking };
        self.publisher.publish(&update);

        debug!(option = %option, "vote applied");
        Ok(update)
    }

    /// Zero every counter as one atomic step and broadcast the cleared
    /// state.
    pub async fn reset(&self) -> TallyUpdate {
        let votes = {
            let mut store = self.store.lock().await;
            store.reset()
        };

        let ranking = rank(&votes);
        let update = TallyUpdate { votes, ranking };
        self.publisher.publish(&update);

        debug!("tally reset");
        update
    }

    /// Current tally and ranking without mutating or broadcasting.
    ///
    /// Used by the read endpoints and for the catch-up snapshot sent to a
    /// newly connected observer.
    pub async fn current(&self) -> TallyUpdate {
        let votes = self.store.lock().await.snapshot();
        let ranking = rank(&votes);
        TallyUpdate { votes, ranking }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use livepoll_types::Tally;
    use tokio::task::JoinSet;

    use super::*;

    fn option_set() -> Vec<OptionId> {
        ["option1", "option2", "option3", "option4"]
            .into_iter()
            .map(OptionId::from)
            .collect()
    }

    /// Publisher that records every update it is handed.
    #[derive(Debug, Default)]
    struct RecordingPublisher {
        published: std::sync::Mutex<Vec<TallyUpdate>>,
    }

    impl RecordingPublisher {
        fn published(&self) -> Vec<TallyUpdate> {
            self.published.lock().unwrap().clone()
        }
    }

    impl UpdatePublisher for RecordingPublisher {
        fn publish(&self, update: &TallyUpdate) {
            self.published.lock().unwrap().push(update.clone());
        }
    }

    fn make_gateway() -> (MutationGateway, Arc<RecordingPublisher>) {
        let publisher = Arc::new(RecordingPublisher::default());
        let seam: Arc<dyn UpdatePublisher> = publisher.clone();
        let gateway = MutationGateway::new(TallyStore::new(&option_set()), seam);
        (gateway, publisher)
    }

    #[tokio::test]
    async fn vote_publishes_exactly_one_update() {
        let (gateway, publisher) = make_gateway();
        let option = OptionId::from("option2");

        let update = gateway.vote(&option).await.unwrap();

        assert_eq!(update.votes.count(&option), Some(1));
        assert_eq!(update.ranking.first().unwrap().option_id, option);

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published.first().unwrap(), &update);
    }

    #[tokio::test]
    async fn invalid_vote_changes_nothing_and_publishes_nothing() {
        let (gateway, publisher) = make_gateway();

        let err = gateway.vote(&OptionId::from("option9")).await.unwrap_err();
        assert_eq!(err, TallyError::InvalidOption(OptionId::from("option9")));

        assert!(publisher.published().is_empty());
        assert_eq!(gateway.current().await.votes, Tally::new(&option_set()));
    }

    #[tokio::test]
    async fn reset_publishes_the_cleared_state() {
        let (gateway, publisher) = make_gateway();
        gateway.vote(&OptionId::from("option1")).await.unwrap();

        let update = gateway.reset().await;

        assert_eq!(update.votes.total(), 0);
        assert_eq!(update.ranking.first().unwrap().rank, 1);
        assert_eq!(publisher.published().len(), 2);
    }

    #[tokio::test]
    async fn current_does_not_publish() {
        let (gateway, publisher) = make_gateway();

        let first = gateway.current().await;
        let second = gateway.current().await;

        assert_eq!(first, second);
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn sequence_of_votes_matches_per_option_counts() {
        let (gateway, _publisher) = make_gateway();
        let b = OptionId::from("option2");
        let a = OptionId::from("option1");

        for _ in 0..3 {
            gateway.vote(&b).await.unwrap();
        }
        gateway.vote(&a).await.unwrap();

        let current = gateway.current().await;
        assert_eq!(current.votes.count(&a), Some(1));
        assert_eq!(current.votes.count(&b), Some(3));
        assert_eq!(current.votes.total(), 4);

        let order: Vec<String> = current
            .ranking
            .iter()
            .map(|e| e.option_id.to_string())
            .collect();
        assert_eq!(order, vec!["option2", "option1", "option3", "option4"]);
    }

    #[tokio::test]
    async fn concurrent_votes_lose_no_updates() {
        const VOTERS: u64 = 64;

        let (gateway, publisher) = make_gateway();
        let gateway = Arc::new(gateway);
        let option = OptionId::from("option3");

        let mut tasks = JoinSet::new();
        for _ in 0..VOTERS {
            let gateway = Arc::clone(&gateway);
            let option = option.clone();
            tasks.spawn(async move { gateway.vote(&option).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let current = gateway.current().await;
        assert_eq!(current.votes.count(&option), Some(VOTERS));
        assert_eq!(publisher.published().len(), usize::try_from(VOTERS).unwrap());
    }
}
