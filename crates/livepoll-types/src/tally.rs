//! The canonical counter mapping.
//!
//! A [`Tally`] always contains every configured option, carries the option
//! declaration order so that ranking tie-breaks are derivable from a
//! snapshot alone, and serializes as a plain JSON object
//! (`{"option1": 3, ...}`) in declared order.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ids::OptionId;

/// Mapping from option identifier to vote count.
///
/// Counts are monotonically non-decreasing except for [`Tally::reset`],
/// which zeroes every option as one step. The option set is fixed at
/// construction: [`Tally::increment`] refuses identifiers outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    /// Options in declaration order, fixed at construction.
    order: Vec<OptionId>,
    /// Current count per option.
    counts: BTreeMap<OptionId, u64>,
}

impl Tally {
    /// Create a tally with every given option present at count zero.
    pub fn new(options: &[OptionId]) -> Self {
        let order: Vec<OptionId> = options.to_vec();
        let counts = order.iter().map(|id| (id.clone(), 0)).collect();
        Self { order, counts }
    }

    /// Whether the option belongs to the configured set.
    pub fn contains(&self, option: &OptionId) -> bool {
        self.counts.contains_key(option)
    }

    /// Current count for an option, or `None` if it is not configured.
    pub fn count(&self, option: &OptionId) -> Option<u64> {
        self.counts.get(option).copied()
    }

    /// Number of configured options.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the configured option set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(option, count)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&OptionId, u64)> {
        self.order
            .iter()
            .map(|id| (id, self.counts.get(id).copied().unwrap_or(0)))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0_u64, |sum, count| sum.saturating_add(*count))
    }

    /// Add one to an option's count.
    ///
    /// Returns the new count, or `None` without any state change when the
    /// option is outside the configured set.
    pub fn increment(&mut self, option: &OptionId) -> Option<u64> {
        let count = self.counts.get_mut(option)?;
        *count = count.saturating_add(1);
        Some(*count)
    }

    /// Set every option's count back to zero.
    pub fn reset(&mut self) {
        for count in self.counts.values_mut() {
            *count = 0;
        }
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (option, count) in self.iter() {
            map.serialize_entry(option, &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn option_set() -> Vec<OptionId> {
        ["option1", "option2", "option3", "option4"]
            .into_iter()
            .map(OptionId::from)
            .collect()
    }

    #[test]
    fn new_tally_has_every_option_at_zero() {
        let tally = Tally::new(&option_set());
        assert_eq!(tally.len(), 4);
        for (_, count) in tally.iter() {
            assert_eq!(count, 0);
        }
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn increment_bumps_only_the_target() {
        let mut tally = Tally::new(&option_set());
        let option = OptionId::from("option2");

        assert_eq!(tally.increment(&option), Some(1));
        assert_eq!(tally.increment(&option), Some(2));

        assert_eq!(tally.count(&option), Some(2));
        assert_eq!(tally.count(&OptionId::from("option1")), Some(0));
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn increment_unknown_option_is_rejected_without_change() {
        let mut tally = Tally::new(&option_set());
        let before = tally.clone();

        assert_eq!(tally.increment(&OptionId::from("option9")), None);
        assert_eq!(tally, before);
    }

    #[test]
    fn reset_zeroes_all_counts() {
        let mut tally = Tally::new(&option_set());
        let _ = tally.increment(&OptionId::from("option1"));
        let _ = tally.increment(&OptionId::from("option3"));

        tally.reset();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally, Tally::new(&option_set()));
    }

    #[test]
    fn iter_preserves_declared_order() {
        let options: Vec<OptionId> = ["delta", "alpha", "charlie"]
            .into_iter()
            .map(OptionId::from)
            .collect();
        let tally = Tally::new(&options);

        let seen: Vec<&OptionId> = tally.iter().map(|(id, _)| id).collect();
        let expected: Vec<&OptionId> = options.iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn serializes_as_plain_object_in_declared_order() {
        let options: Vec<OptionId> = ["delta", "alpha"].into_iter().map(OptionId::from).collect();
        let mut tally = Tally::new(&options);
        let _ = tally.increment(&OptionId::from("alpha"));

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"delta":0,"alpha":1}"#);
    }
}
