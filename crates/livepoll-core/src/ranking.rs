//! Deterministic ranking derivation.
//!
//! Recomputed from a full snapshot on every mutation rather than maintained
//! incrementally: the option set is small and fixed, so the sort is cheap
//! and the code stays simple.

use livepoll_types::{RankingEntry, Tally};

/// Derive the ordered ranking from a tally snapshot.
///
/// Pure function: no shared state, no side effects, safe to call from any
/// number of concurrent readers. Options are sorted by count descending;
/// the sort is stable, so options tied on count keep their declared order
/// and identical tallies always produce identical output.
pub fn rank(tally: &Tally) -> Vec<RankingEntry> {
    let mut ordered: Vec<_> = tally
        .iter()
        .map(|(option, count)| (option.clone(), count))
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    ordered
        .into_iter()
        .enumerate()
        .map(|(position, (option_id, count))| RankingEntry {
            rank: u32::try_from(position).unwrap_or(u32::MAX).saturating_add(1),
            option_id,
            count,
        })
        .collect()
}
