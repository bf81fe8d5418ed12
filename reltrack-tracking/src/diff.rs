//! Shadow capture and relation diffs.
//!
//! [`RelationsDirtyTracking`] is implemented for every [`TrackedDocument`]. A
//! host calls [`on_lifecycle`](RelationsDirtyTracking::on_lifecycle) after a
//! document is loaded or persisted; the remaining methods compare the
//! captured shadow against the document's current relations.

use crate::context::TrackingContext;
use crate::extract::tracked_relation_attributes;
use crate::host::TrackedDocument;
use reltrack_types::Fingerprint;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Relation name → `(shadow, current)` for every relation that differs.
pub type RelationChanges = BTreeMap<String, (Fingerprint, Fingerprint)>;

/// Own-field and relation changes merged under one key space.
pub type ChangeSet = BTreeMap<String, Change>;

/// One entry of a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    Field { before: Value, after: Value },
    Relation { before: Fingerprint, after: Fingerprint },
}

/// Document lifecycle points at which the shadow is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Freshly loaded from the store or newly constructed.
    Loaded,
    /// Successfully saved.
    Persisted,
}

/// Relation dirty tracking, available on every [`TrackedDocument`].
///
/// Read-only documents and a disabled [`TrackingContext`] both short-circuit:
/// capture clears the shadow and every query reports no change.
pub trait RelationsDirtyTracking: TrackedDocument {
    /// Refreshes the shadow for a lifecycle event.
    fn on_lifecycle(&mut self, event: LifecycleEvent, ctx: &TrackingContext) -> Result<(), Self::Error> {
        debug!(document_type = %self.document_type().name(), ?event, "Refreshing relations shadow");
        self.store_relations_shadow(ctx)
    }

    /// Captures every tracked relation into the shadow, replacing what was
    /// there. Relations whose attribute was left out of a partial load are
    /// skipped.
    fn store_relations_shadow(&mut self, ctx: &TrackingContext) -> Result<(), Self::Error> {
        if self.is_readonly() || !ctx.enabled() {
            debug!(
                document_type = %self.document_type().name(),
                readonly = self.is_readonly(),
                enabled = ctx.enabled(),
                "Skipping relations shadow capture"
            );
            self.relations_shadow_mut().clear();
            return Ok(());
        }

        let mut entries = BTreeMap::new();
        for relation in self.document_type().tracked_relations() {
            if self.is_attribute_missing(relation) {
                continue;
            }
            entries.insert(relation.clone(), tracked_relation_attributes(self, relation)?);
        }
        debug!(
            document_type = %self.document_type().name(),
            relations = entries.len(),
            "Captured relations shadow"
        );
        self.relations_shadow_mut().replace(entries);
        Ok(())
    }

    /// Fingerprint of `relation`'s current state.
    fn tracked_relation_attributes(&self, relation: &str) -> Result<Fingerprint, Self::Error> {
        tracked_relation_attributes(self, relation)
    }

    /// Every shadowed relation whose current fingerprint differs.
    fn relation_changes(&self, ctx: &TrackingContext) -> Result<RelationChanges, Self::Error> {
        let mut changes = RelationChanges::new();
        if self.is_readonly() || !ctx.enabled() {
            return Ok(changes);
        }
        for (relation, shadow) in self.relations_shadow().iter() {
            let current = tracked_relation_attributes(self, relation)?;
            if &current != shadow {
                changes.insert(relation.to_string(), (shadow.clone(), current));
            }
        }
        if !changes.is_empty() {
            debug!(
                document_type = %self.document_type().name(),
                changed = ?changes.keys().collect::<Vec<_>>(),
                "Relation changes detected"
            );
        }
        Ok(changes)
    }

    fn relations_changed(&self, ctx: &TrackingContext) -> Result<bool, Self::Error> {
        Ok(!self.relation_changes(ctx)?.is_empty())
    }

    /// Own fields or relations changed.
    fn changed_with_relations(&self, ctx: &TrackingContext) -> Result<bool, Self::Error> {
        Ok(self.changed() || self.relations_changed(ctx)?)
    }

    /// Own-field changes merged with relation changes; a relation entry wins
    /// over a field entry with the same name.
    fn changes_with_relations(&self, ctx: &TrackingContext) -> Result<ChangeSet, Self::Error> {
        let mut merged: ChangeSet = self
            .changes()
            .into_iter()
            .map(|(name, (before, after))| (name, Change::Field { before, after }))
            .collect();
        for (name, (before, after)) in self.relation_changes(ctx)? {
            merged.insert(name, Change::Relation { before, after });
        }
        Ok(merged)
    }
}

impl<T: TrackedDocument + ?Sized> RelationsDirtyTracking for T {}
