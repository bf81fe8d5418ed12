//! Error types for the in-memory store.

use reltrack_model::ModelError;
use reltrack_tracking::HostFailure;
use reltrack_types::DocumentId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The attribute was excluded by a projected load.
    #[error("missing attribute: {0}")]
    MissingAttribute(String),

    /// The document type declares no relation with this name.
    #[error("{document_type} has no relation named {relation}")]
    UnknownRelation {
        document_type: String,
        relation: String,
    },

    /// A to-one operation on a to-many relation, or the reverse.
    #[error("relation {relation} is not {expected}")]
    RelationShape {
        relation: String,
        expected: &'static str,
    },

    /// No stored document with this id.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// Read-only documents cannot be saved.
    #[error("document {0} is read-only")]
    Readonly(DocumentId),

    /// Type lookup failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl HostFailure for StoreError {
    fn is_missing_attribute(&self) -> bool {
        matches!(self, Self::MissingAttribute(_))
    }
}
