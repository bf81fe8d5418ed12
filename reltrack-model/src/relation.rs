//! Relation declarations and their classification.
//!
//! Hosts describe relations in their own association vocabulary
//! ([`Association`]); [`classify`] maps each onto one of the six shapes the
//! tracker knows how to fingerprint, or `None` when it has no rule for it.

use reltrack_types::ID_FIELD;
use serde::{Deserialize, Serialize};

/// The association type a relation was declared with in the host layer.
///
/// This is the host's vocabulary and is intentionally wider than what can be
/// tracked; [`classify`] narrows it to a [`RelationKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    EmbedsOne,
    EmbedsMany,
    /// Inverse side of an embedding (child pointing at its parent).
    EmbeddedIn,
    HasOne,
    HasMany,
    HasAndBelongsToMany,
    BelongsTo,
    /// Host-specific association type with no tracking rule.
    Custom(String),
}

/// Relation shapes the tracker knows how to fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    EmbeddedOne,
    EmbeddedMany,
    ReferencedOne,
    ReferencedMany,
    ReferencedManyToMany,
    /// Inverse "belongs to" side, which stores the foreign key.
    ReferencedOwning,
}

impl RelationKind {
    /// Whether related documents are stored inline in the parent.
    #[must_use]
    pub const fn is_embedded(self) -> bool {
        matches!(self, Self::EmbeddedOne | Self::EmbeddedMany)
    }

    /// Whether the fingerprint is a list rather than a single map.
    #[must_use]
    pub const fn is_to_many(self) -> bool {
        matches!(
            self,
            Self::EmbeddedMany | Self::ReferencedMany | Self::ReferencedManyToMany
        )
    }
}

/// Maps a declared relation to the shape used for tracking.
///
/// Returns `None` for association types the tracker has no rule for; those
/// relations are never tracked.
#[must_use]
pub fn classify(descriptor: &RelationDescriptor) -> Option<RelationKind> {
    match descriptor.association {
        Association::EmbedsOne => Some(RelationKind::EmbeddedOne),
        Association::EmbedsMany => Some(RelationKind::EmbeddedMany),
        Association::HasOne => Some(RelationKind::ReferencedOne),
        Association::HasMany => Some(RelationKind::ReferencedMany),
        Association::HasAndBelongsToMany => Some(RelationKind::ReferencedManyToMany),
        Association::BelongsTo => Some(RelationKind::ReferencedOwning),
        Association::EmbeddedIn | Association::Custom(_) => None,
    }
}

/// A relation declared on a document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub name: String,
    pub association: Association,
    /// Field read from a related document for has-one/has-many fingerprints.
    pub key: String,
    /// Attribute on the owner holding the referenced id (belongs-to).
    pub foreign_key: String,
    /// Key name used for many-to-many fingerprints.
    pub primary_key: String,
}

impl RelationDescriptor {
    /// A descriptor with the default key accessors for `association`.
    pub fn new(name: &str, association: Association) -> Self {
        Self {
            name: name.into(),
            association,
            key: ID_FIELD.into(),
            foreign_key: format!("{name}_id"),
            primary_key: ID_FIELD.into(),
        }
    }

    pub fn embeds_one(name: &str) -> Self {
        Self::new(name, Association::EmbedsOne)
    }

    pub fn embeds_many(name: &str) -> Self {
        Self::new(name, Association::EmbedsMany)
    }

    pub fn embedded_in(name: &str) -> Self {
        Self::new(name, Association::EmbeddedIn)
    }

    pub fn has_one(name: &str) -> Self {
        Self::new(name, Association::HasOne)
    }

    pub fn has_many(name: &str) -> Self {
        Self::new(name, Association::HasMany)
    }

    pub fn has_and_belongs_to_many(name: &str) -> Self {
        Self::new(name, Association::HasAndBelongsToMany)
    }

    pub fn belongs_to(name: &str) -> Self {
        Self::new(name, Association::BelongsTo)
    }

    /// Shorthand for a host-specific association the tracker does not know.
    pub fn custom(name: &str, association: &str) -> Self {
        Self::new(name, Association::Custom(association.into()))
    }

    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: &str) -> Self {
        self.foreign_key = foreign_key.into();
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self, primary_key: &str) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Classified kind of this relation, `None` if untracked.
    #[must_use]
    pub fn kind(&self) -> Option<RelationKind> {
        classify(self)
    }
}
