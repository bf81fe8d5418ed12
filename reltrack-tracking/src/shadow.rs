//! Per-document store of relation fingerprints captured at the last
//! load or persist.

use reltrack_types::Fingerprint;
use std::collections::BTreeMap;

/// Whether a shadow holds captured data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShadowState {
    /// Never captured, or the last capture was skipped.
    #[default]
    Unbuilt,
    Captured,
}

/// Per-document snapshot of tracked relations, keyed by relation name.
///
/// Each capture replaces the whole map. A skipped capture clears it, so a
/// later diff has nothing to compare and reports no changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowStore {
    state: ShadowState,
    entries: BTreeMap<String, Fingerprint>,
}

impl ShadowStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ShadowState {
        self.state
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.state == ShadowState::Captured
    }

    /// Replaces the snapshot wholesale.
    pub fn replace(&mut self, entries: BTreeMap<String, Fingerprint>) {
        self.entries = entries;
        self.state = ShadowState::Captured;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.state = ShadowState::Unbuilt;
    }

    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&Fingerprint> {
        self.entries.get(relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fingerprint)> {
        self.entries.iter().map(|(name, fp)| (name.as_str(), fp))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
