//! Core type definitions for relation dirty tracking.
//!
//! This crate defines the plain value types every other crate agrees on:
//! - Document identifiers (UUID v7)
//! - Attribute maps, the loose JSON shape documents are stored in
//! - Relation fingerprints, the comparable snapshot of a relation's state
//!
//! Nothing here knows about relation kinds or tracking policy; those live in
//! `reltrack-model`.

mod fingerprint;
mod ids;

pub use fingerprint::{Attributes, Fingerprint, ID_FIELD, LAST_MODIFIED_FIELD};
pub use ids::DocumentId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document id string that is not a UUID.
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
