//! Storage for documents of a single type.

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use reltrack_model::{DocumentType, TypeRegistry};
use reltrack_tracking::{LifecycleEvent, RelationsDirtyTracking, TrackedDocument, TrackingContext};
use reltrack_types::{DocumentId, LAST_MODIFIED_FIELD};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Stored documents of one type.
#[derive(Debug)]
pub struct Collection {
    ty: Arc<DocumentType>,
    documents: HashMap<DocumentId, Document>,
}

impl Collection {
    pub fn new(ty: Arc<DocumentType>) -> Self {
        Self {
            ty,
            documents: HashMap::new(),
        }
    }

    /// Collection for a type declared in `registry`.
    pub fn for_type(registry: &TypeRegistry, document_type: &str) -> StoreResult<Self> {
        Ok(Self::new(registry.require(document_type)?))
    }

    #[must_use]
    pub fn document_type(&self) -> &Arc<DocumentType> {
        &self.ty
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Constructs an unsaved document and captures its relations.
    pub fn build(&self, ctx: &TrackingContext) -> StoreResult<Document> {
        let mut doc = Document::new(Arc::clone(&self.ty));
        doc.on_lifecycle(LifecycleEvent::Loaded, ctx)?;
        Ok(doc)
    }

    /// Builds and saves a document.
    pub fn create(&mut self, ctx: &TrackingContext) -> StoreResult<Document> {
        let mut doc = self.build(ctx)?;
        self.save(&mut doc, ctx)?;
        Ok(doc)
    }

    /// Persists `doc`, stamps `updated_at`, then re-captures its relations.
    pub fn save(&mut self, doc: &mut Document, ctx: &TrackingContext) -> StoreResult<()> {
        if doc.is_readonly() {
            return Err(StoreError::Readonly(doc.id()));
        }
        doc.set(LAST_MODIFIED_FIELD, Value::from(now_millis()));
        doc.mark_persisted();
        self.documents.insert(doc.id(), doc.clone());
        debug!(document_type = %self.ty.name(), id = %doc.id(), "Document saved");
        doc.on_lifecycle(LifecycleEvent::Persisted, ctx)
    }

    /// Loads a stored document.
    pub fn find(&self, id: DocumentId, ctx: &TrackingContext) -> StoreResult<Document> {
        let mut doc = self.stored(id)?;
        doc.on_lifecycle(LifecycleEvent::Loaded, ctx)?;
        Ok(doc)
    }

    /// Loads a stored document restricted to `fields` (plus `_id`). The result
    /// is read-only.
    pub fn find_only(
        &self,
        id: DocumentId,
        fields: &[&str],
        ctx: &TrackingContext,
    ) -> StoreResult<Document> {
        let mut doc = self.stored(id)?;
        doc.project(fields);
        doc.on_lifecycle(LifecycleEvent::Loaded, ctx)?;
        Ok(doc)
    }

    fn stored(&self, id: DocumentId) -> StoreResult<Document> {
        self.documents
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
