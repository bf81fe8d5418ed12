//! Relation declarations and tracking policy.
//!
//! Defines what a document type looks like to the relation tracker:
//! - [`RelationDescriptor`] — a declared relation and its key accessors
//! - [`RelationKind`] — the six relation shapes that can be tracked, with
//!   [`classify`] mapping a descriptor to one of them (or to nothing)
//! - [`TrackingPolicy`] — accumulated `only`/`except` filters per type
//! - [`DocumentType`] — schema + policy + the cached tracked relation names
//! - [`TypeRegistry`] — where types are declared, derived and configured
//! - [`TrackingConfig`] — TOML configuration applied onto a registry
//!
//! The persistence layer that owns actual documents lives elsewhere; this crate
//! only carries the immutable per-type declarations.

mod config;
mod error;
mod policy;
mod registry;
mod relation;
mod schema;

pub use config::TrackingConfig;
pub use error::{ModelError, ModelResult};
pub use policy::{TrackingOptions, TrackingPolicy, VERSIONS_RELATION};
pub use registry::TypeRegistry;
pub use relation::{Association, RelationDescriptor, RelationKind, classify};
pub use schema::{DocumentSchema, DocumentType};
