//! Identifier types for options and observers.
//!
//! [`OptionId`] is a string key drawn from the closed option set configured
//! at startup; it is what clients put on the wire when they vote.
//! [`ObserverId`] identifies one push-channel connection for its lifetime
//! and uses UUID v7 (time-ordered) like the rest of the workspace.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a votable option.
///
/// Drawn from the fixed set configured at process start (for the reference
/// deployment: `option1` through `option4`). The set is immutable at
/// runtime; membership is checked by the tally store, not here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Create an option identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for OptionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a connected push-channel observer.
///
/// Assigned when the connection registers and never reused: a reconnecting
/// client is a brand-new observer with a fresh identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub Uuid);

impl ObserverId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ObserverId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ObserverId> for Uuid {
    fn from(id: ObserverId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn option_id_serializes_as_bare_string() {
        let id = OptionId::from("option2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"option2\"");

        let restored: OptionId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn option_id_display_matches_key() {
        let id = OptionId::from("option1");
        assert_eq!(id.to_string(), "option1");
        assert_eq!(id.as_str(), "option1");
    }

    #[test]
    fn observer_ids_are_unique() {
        let a = ObserverId::new();
        let b = ObserverId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn observer_id_display_matches_uuid() {
        let id = ObserverId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
