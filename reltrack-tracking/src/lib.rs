//! Dirty tracking for document relations.
//!
//! Ordinary dirty tracking only sees a document's own fields. This crate
//! snapshots ("shadows") each tracked relation at load and save time and later
//! diffs the shadow against the relation's current state, so additions,
//! removals, replacements and edits inside embedded children show up as
//! changes.
//!
//! # Pieces
//!
//! - [`TrackedDocument`] — the boundary a persistence layer implements
//! - [`tracked_relation_attributes`] — per-kind fingerprint extraction
//! - [`ShadowStore`] — the per-document snapshot
//! - [`RelationsDirtyTracking`] — capture, diff and the derived predicates,
//!   available on every `TrackedDocument`
//! - [`TrackingContext`] — per-execution-context switch that suspends tracking
//!
//! # Example
//!
//! ```ignore
//! let ctx = TrackingContext::new();
//! doc.on_lifecycle(LifecycleEvent::Loaded, &ctx)?;
//! // ... mutate relations ...
//! for (relation, (before, after)) in doc.relation_changes(&ctx)? {
//!     println!("{relation}: {before:?} -> {after:?}");
//! }
//! ```

mod context;
mod diff;
mod extract;
mod host;
mod shadow;

pub use context::{DisabledScope, TrackingContext};
pub use diff::{Change, ChangeSet, LifecycleEvent, RelationChanges, RelationsDirtyTracking};
pub use extract::tracked_relation_attributes;
pub use host::{HostFailure, Related, RelatedRecord, TrackedDocument};
pub use shadow::{ShadowState, ShadowStore};
