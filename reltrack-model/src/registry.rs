//! Registry of declared document types, keyed by type name.
//!
//! Types are handed out as `Arc`s. Reconfiguring a type that already has
//! outstanding handles copies it, so those handles keep the declaration they
//! were created with.

use crate::error::{ModelError, ModelResult};
use crate::policy::TrackingOptions;
use crate::schema::{DocumentSchema, DocumentType};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of declared document types.
///
/// Documents hold an `Arc` to their type. Reconfiguring a type after documents
/// were created copies it, so existing documents keep the declaration they were
/// built with.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<DocumentType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new type.
    pub fn register(&mut self, schema: DocumentSchema) -> ModelResult<Arc<DocumentType>> {
        let name = schema.document_type.clone();
        if self.types.contains_key(&name) {
            return Err(ModelError::DuplicateType(name));
        }
        let ty = Arc::new(DocumentType::new(schema));
        debug!(document_type = %name, relations = ty.schema().relations.len(), "Document type registered");
        self.types.insert(name, Arc::clone(&ty));
        Ok(ty)
    }

    /// Declares `child` as a subtype of `parent`, copying the parent's
    /// relations and tracking policy.
    pub fn derive(&mut self, parent: &str, child: DocumentSchema) -> ModelResult<Arc<DocumentType>> {
        let parent_ty = self.require(parent)?;
        let name = child.document_type.clone();
        if self.types.contains_key(&name) {
            return Err(ModelError::DuplicateType(name));
        }
        let ty = Arc::new(parent_ty.derive(child));
        debug!(document_type = %name, parent = %parent, "Document type derived");
        self.types.insert(name, Arc::clone(&ty));
        Ok(ty)
    }

    /// Unions `options` into the named type's tracking policy.
    pub fn track_relations(
        &mut self,
        document_type: &str,
        options: &TrackingOptions,
    ) -> ModelResult<Arc<DocumentType>> {
        let ty = self
            .types
            .get_mut(document_type)
            .ok_or_else(|| ModelError::UnknownType(document_type.to_string()))?;
        Arc::make_mut(ty).track_relations(options);
        Ok(Arc::clone(ty))
    }

    #[must_use]
    pub fn get(&self, document_type: &str) -> Option<Arc<DocumentType>> {
        self.types.get(document_type).cloned()
    }

    pub fn require(&self, document_type: &str) -> ModelResult<Arc<DocumentType>> {
        self.get(document_type)
            .ok_or_else(|| ModelError::UnknownType(document_type.to_string()))
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
