//! Derived ranking rows and the broadcast payload.
//!
//! Rankings are never stored. They are recomputed from a [`Tally`] snapshot
//! after every successful mutation and travel together with the tally in a
//! [`TallyUpdate`], so an observer can never see a tally and a ranking from
//! two different mutations.

use serde::{Deserialize, Serialize};

use crate::ids::OptionId;
use crate::tally::Tally;

/// One row of the derived ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position in the ranking, gap-free. Options tied on count get
    /// distinct consecutive ranks in declared option order.
    pub rank: u32,

    /// The option this row refers to.
    #[serde(rename = "optionId")]
    pub option_id: OptionId,

    /// The option's count at the time the ranking was computed.
    pub count: u64,
}

/// Payload pushed to observers after every successful mutation, and sent
/// once as the catch-up snapshot when an observer connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyUpdate {
    /// Full tally after the mutation.
    pub votes: Tally,

    /// Full ordered ranking derived from `votes`.
    pub ranking: Vec<RankingEntry>,
}
