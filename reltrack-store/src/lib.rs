//! In-memory document store with relation dirty tracking.
//!
//! A small persistence layer that implements
//! [`TrackedDocument`](reltrack_tracking::TrackedDocument) and fires the
//! lifecycle hooks the tracker relies on:
//! - [`Collection::build`] and [`Collection::find`] refresh the shadow after a
//!   document is constructed or loaded
//! - [`Collection::save`] refreshes it after a successful persist
//! - [`Collection::find_only`] performs a projected load; the result is
//!   read-only and never tracked
//!
//! It backs the behavioural tests of the tracker and doubles as a reference
//! for wiring the tracker into a real persistence layer.

mod collection;
mod document;
mod error;

pub use collection::Collection;
pub use document::Document;
pub use error::{StoreError, StoreResult};
