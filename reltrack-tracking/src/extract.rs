//! Fingerprint extraction, one rule per relation kind.

use crate::host::{HostFailure, TrackedDocument};
use reltrack_model::{RelationDescriptor, RelationKind};
use reltrack_types::Fingerprint;
use serde_json::Value;
use tracing::debug;

/// Fingerprint of `relation`'s current state on `doc`.
///
/// A relation the type does not declare, or declares with an untracked
/// association, yields [`Fingerprint::Absent`].
pub fn tracked_relation_attributes<D>(doc: &D, relation: &str) -> Result<Fingerprint, D::Error>
where
    D: TrackedDocument + ?Sized,
{
    let Some(descriptor) = doc.document_type().relation(relation) else {
        return Ok(Fingerprint::Absent);
    };
    let Some(kind) = descriptor.kind() else {
        return Ok(Fingerprint::Absent);
    };
    fingerprint(doc, descriptor, kind)
}

fn fingerprint<D>(doc: &D, descriptor: &RelationDescriptor, kind: RelationKind) -> Result<Fingerprint, D::Error>
where
    D: TrackedDocument + ?Sized,
{
    let fingerprint = match kind {
        RelationKind::EmbeddedOne => match doc.related(descriptor)?.one() {
            Some(child) => Fingerprint::embedded(&child.attributes()),
            None => Fingerprint::Absent,
        },
        RelationKind::EmbeddedMany => {
            let children = doc.related(descriptor)?.records();
            let attributes: Vec<_> = children.iter().map(|child| child.attributes()).collect();
            Fingerprint::embedded_list(attributes.iter().map(|a| &**a))
        }
        RelationKind::ReferencedOne => match doc.related(descriptor)?.one() {
            Some(record) => Fingerprint::key(
                descriptor.key.as_str(),
                record.read(&descriptor.key).unwrap_or(Value::Null),
            ),
            None => Fingerprint::Absent,
        },
        RelationKind::ReferencedMany => {
            let records = doc.related(descriptor)?.records();
            Fingerprint::keys(&descriptor.key, records.iter().map(|r| r.id().to_value()))
        }
        RelationKind::ReferencedManyToMany => {
            let records = doc.related(descriptor)?.records();
            Fingerprint::keys(&descriptor.primary_key, records.iter().map(|r| r.id().to_value()))
        }
        RelationKind::ReferencedOwning => owning(doc, descriptor)?,
    };
    Ok(fingerprint)
}

/// Foreign key on the owning side. A key that is unset or was never loaded is
/// treated as no relation rather than an error.
fn owning<D>(doc: &D, descriptor: &RelationDescriptor) -> Result<Fingerprint, D::Error>
where
    D: TrackedDocument + ?Sized,
{
    match doc.read_attribute(&descriptor.foreign_key) {
        Ok(Some(value)) if !value.is_null() => {
            Ok(Fingerprint::key(descriptor.foreign_key.as_str(), value))
        }
        Ok(_) => Ok(Fingerprint::Absent),
        Err(err) if err.is_missing_attribute() => {
            debug!(
                relation = %descriptor.name,
                foreign_key = %descriptor.foreign_key,
                "Foreign key not loaded, treating relation as absent"
            );
            Ok(Fingerprint::Absent)
        }
        Err(err) => Err(err),
    }
}
