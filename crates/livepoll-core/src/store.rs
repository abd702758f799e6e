//! Canonical tally state.
//!
//! [`TallyStore`] owns the single source-of-truth [`Tally`]. It is a plain
//! single-owner value and does no locking itself; serialization of mutations
//! is the job of the [`MutationGateway`](crate::gateway::MutationGateway),
//! which holds the store behind its mutex. Validation precedes every state
//! change, so the tally always reflects a fully-applied sequence of
//! mutations.

use livepoll_types::{OptionId, Tally};

use crate::error::TallyError;

/// Owner of the canonical counters.
#[derive(Debug, Clone)]
pub struct TallyStore {
    tally: Tally,
}

impl TallyStore {
    /// Create a store with every configured option at count zero.
    pub fn new(options: &[OptionId]) -> Self {
        Self {
            tally: Tally::new(options),
        }
    }

    /// Add one vote to an option and return the updated tally.
    ///
    /// Fails with [`TallyError::InvalidOption`] and leaves the tally
    /// untouched when the option is outside the configured set.
    pub fn increment(&mut self, option: &OptionId) -> Result<Tally, TallyError> {
        if self.tally.increment(option).is_none() {
            return Err(TallyError::InvalidOption(option.clone()));
        }
        Ok(self.tally.clone())
    }

    /// Zero every counter as one step and return the cleared tally.
    pub fn reset(&mut self) -> Tally {
        self.tally.reset();
        self.tally.clone()
    }

    /// Read-only copy of the current tally, safe for concurrent reads.
    pub fn snapshot(&self) -> Tally {
        self.tally.clone()
    }
}
