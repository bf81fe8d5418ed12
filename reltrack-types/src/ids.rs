//! Document identifiers.
//!
//! Every document carries its id twice: as a typed [`DocumentId`] and as the
//! `_id` string in its attribute map. Referenced relations fingerprint the
//! string form, so two ids compare equal in a diff exactly when their
//! [`DocumentId::to_value`] outputs do.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of a top-level, embedded or referenced document.
///
/// Assigned once when the document is built and never changed by a save, so
/// membership of a to-many relation is stable across persists. UUID v7 keeps
/// collections ordered by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Id for a freshly built document.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an id issued elsewhere, e.g. by the host's data store.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses the `_id` string form back into an id.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// The `_id` string stored in attribute maps and written into
    /// referenced-relation fingerprints.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<DocumentId> for Value {
    fn from(id: DocumentId) -> Self {
        id.to_value()
    }
}
