//! Per-type relation declarations and tracking configuration.

use crate::policy::{TrackingOptions, TrackingPolicy};
use crate::relation::RelationDescriptor;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Declared relations of a document type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSchema {
    pub document_type: String,
    pub relations: Vec<RelationDescriptor>,
}

impl DocumentSchema {
    pub fn new(document_type: &str) -> Self {
        Self {
            document_type: document_type.into(),
            relations: Vec::new(),
        }
    }

    /// Adds a relation, replacing any earlier one with the same name.
    #[must_use]
    pub fn with_relation(mut self, relation: RelationDescriptor) -> Self {
        self.insert(relation);
        self
    }

    pub fn insert(&mut self, relation: RelationDescriptor) {
        match self.relations.iter_mut().find(|r| r.name == relation.name) {
            Some(existing) => *existing = relation,
            None => self.relations.push(relation),
        }
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.name == name)
    }
}

/// A registered document type: its schema, its tracking policy and the
/// lazily computed set of tracked relation names.
#[derive(Debug, Clone, Default)]
pub struct DocumentType {
    schema: DocumentSchema,
    policy: TrackingPolicy,
    tracked: OnceLock<Vec<String>>,
}

impl DocumentType {
    pub fn new(schema: DocumentSchema) -> Self {
        Self {
            schema,
            policy: TrackingPolicy::default(),
            tracked: OnceLock::new(),
        }
    }

    /// A child type carrying a copy of this type's relations and policy.
    /// Relations declared on `child` override inherited ones by name.
    #[must_use]
    pub fn derive(&self, child: DocumentSchema) -> Self {
        let mut schema = DocumentSchema {
            document_type: child.document_type,
            relations: self.schema.relations.clone(),
        };
        for relation in child.relations {
            schema.insert(relation);
        }
        Self {
            schema,
            policy: self.policy.clone(),
            tracked: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.schema.document_type
    }

    #[must_use]
    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    #[must_use]
    pub fn policy(&self) -> &TrackingPolicy {
        &self.policy
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.schema.relation(name)
    }

    /// Unions `options` into this type's policy.
    pub fn track_relations(&mut self, options: &TrackingOptions) {
        self.policy.register(options);
        self.tracked = OnceLock::new();
        debug!(
            document_type = %self.name(),
            only = ?self.policy.only(),
            except = ?self.policy.except(),
            "Tracking options registered"
        );
    }

    /// True when the policy admits `relation` and its declared association
    /// has a tracking rule.
    #[must_use]
    pub fn is_tracked(&self, relation: &str) -> bool {
        self.policy.permits(relation)
            && self
                .schema
                .relation(relation)
                .and_then(RelationDescriptor::kind)
                .is_some()
    }

    /// Every declared relation for which [`is_tracked`](Self::is_tracked)
    /// holds, in declaration order. Computed once.
    #[must_use]
    pub fn tracked_relations(&self) -> &[String] {
        self.tracked.get_or_init(|| {
            self.schema
                .relations
                .iter()
                .filter(|r| self.is_tracked(&r.name))
                .map(|r| r.name.clone())
                .collect()
        })
    }
}
