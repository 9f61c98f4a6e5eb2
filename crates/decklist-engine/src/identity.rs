use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable lookup key for a card name.
///
/// Lowercased, with multi-faced names (`"Fire // Ice"`) reduced to the first
/// face. Collection counts, metadata lookups, grouping, and the buylist all
/// key on this one normalization; joining on anything else breaks the
/// cross-component joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardIdentity(String);

impl CardIdentity {
    /// Normalizes a display name into its identity.
    ///
    /// Total and lossy: never fails, empty input yields the empty identity.
    /// The original casing and back face are only recoverable from the
    /// source line or fetched metadata.
    pub fn normalize(display_name: &str) -> Self {
        let lowered = display_name.to_lowercase();
        match lowered.split_once("//") {
            Some((front_face, _)) => Self(front_face.trim().to_string()),
            None => Self(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_display_names() {
        assert_eq!(CardIdentity::normalize("Lightning Bolt").as_str(), "lightning bolt");
    }

    #[test]
    fn keeps_only_the_first_face() {
        assert_eq!(CardIdentity::normalize("Fire // Ice").as_str(), "fire");
        assert_eq!(CardIdentity::normalize("Wear // Tear // Extra").as_str(), "wear");
    }

    #[test]
    fn empty_input_yields_empty_identity() {
        assert!(CardIdentity::normalize("").is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["Fire // Ice", "Lightning Bolt", "", "ATRAXA, Praetors' Voice"] {
            let once = CardIdentity::normalize(name);
            let twice = CardIdentity::normalize(once.as_str());
            assert_eq!(once, twice);
        }
    }
}
