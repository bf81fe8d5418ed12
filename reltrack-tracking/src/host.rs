//! Boundary to the persistence layer that owns documents.

use crate::shadow::ShadowStore;
use reltrack_model::{DocumentType, RelationDescriptor};
use reltrack_types::{Attributes, DocumentId, ID_FIELD};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Lets the extractor recognise a read of an attribute that is not loaded.
///
/// Every other host failure propagates to the caller untouched.
pub trait HostFailure {
    fn is_missing_attribute(&self) -> bool;
}

/// A document reached through a relation.
pub trait RelatedRecord {
    fn id(&self) -> DocumentId;

    /// Full attribute map, as stored. Documents embedded inside this record
    /// appear as nested values, so hosts that keep them apart return an
    /// owned, folded map.
    fn attributes(&self) -> Cow<'_, Attributes>;

    /// Reads one field. `_id` falls back to [`id`](Self::id) when the
    /// attribute map does not carry it.
    fn read(&self, field: &str) -> Option<Value> {
        match self.attributes().get(field) {
            Some(value) => Some(value.clone()),
            None if field == ID_FIELD => Some(self.id().to_value()),
            None => None,
        }
    }
}

/// Current value of a relation as the host sees it.
pub enum Related<'a> {
    None,
    One(&'a dyn RelatedRecord),
    Many(Vec<&'a dyn RelatedRecord>),
}

impl<'a> Related<'a> {
    /// The single related record of a to-one relation.
    ///
    /// A `Many` value has no single record and yields `None`.
    #[must_use]
    pub fn one(&self) -> Option<&'a dyn RelatedRecord> {
        match self {
            Self::One(record) => Some(*record),
            Self::None | Self::Many(_) => None,
        }
    }

    /// All related records, in relation order.
    #[must_use]
    pub fn records(self) -> Vec<&'a dyn RelatedRecord> {
        match self {
            Self::None => Vec::new(),
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}

/// What the tracker needs from a document.
///
/// Implementors store a [`ShadowStore`] alongside the document and call
/// [`RelationsDirtyTracking::on_lifecycle`](crate::RelationsDirtyTracking::on_lifecycle)
/// after loading/constructing and after persisting it.
pub trait TrackedDocument {
    type Error: std::error::Error + HostFailure;

    fn document_type(&self) -> &DocumentType;

    fn is_readonly(&self) -> bool;

    /// Whether the attribute backing `name` was left out of a partial load.
    fn is_attribute_missing(&self, _name: &str) -> bool {
        false
    }

    /// Current value of `relation`. May hit the data store if the host loads
    /// relations lazily.
    fn related(&self, relation: &RelationDescriptor) -> Result<Related<'_>, Self::Error>;

    /// Reads one of the document's own attributes. `Ok(None)` means unset.
    fn read_attribute(&self, name: &str) -> Result<Option<Value>, Self::Error>;

    /// Whether any own field changed since the last persist.
    fn changed(&self) -> bool;

    /// Own-field changes since the last persist, as `(before, after)`.
    fn changes(&self) -> BTreeMap<String, (Value, Value)>;

    fn relations_shadow(&self) -> &ShadowStore;

    fn relations_shadow_mut(&mut self) -> &mut ShadowStore;
}
