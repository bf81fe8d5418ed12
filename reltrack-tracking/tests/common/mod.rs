//! Shared test helpers: a minimal hand-driven host document.

#![allow(dead_code)]

use reltrack_model::{DocumentSchema, DocumentType, RelationDescriptor, VERSIONS_RELATION};
use reltrack_tracking::{HostFailure, Related, RelatedRecord, ShadowStore, TrackedDocument};
use reltrack_types::{Attributes, DocumentId, ID_FIELD};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, thiserror::Error)]
pub enum FakeError {
    #[error("missing attribute: {0}")]
    MissingAttribute(String),
    #[error("store offline")]
    Offline,
}

impl HostFailure for FakeError {
    fn is_missing_attribute(&self) -> bool {
        matches!(self, Self::MissingAttribute(_))
    }
}

#[derive(Debug, Clone)]
pub struct Record {
    pub id: DocumentId,
    pub attributes: Attributes,
}

impl Record {
    pub fn new(extra: Value) -> Self {
        let id = DocumentId::new();
        let mut attributes = Attributes::new();
        attributes.insert(ID_FIELD.into(), id.to_value());
        if let Value::Object(map) = extra {
            attributes.extend(map);
        }
        Self { id, attributes }
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.attributes.insert(field.into(), value);
    }
}

impl RelatedRecord for Record {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn attributes(&self) -> Cow<'_, Attributes> {
        Cow::Borrowed(&self.attributes)
    }
}

#[derive(Debug)]
pub enum Slot {
    One(Option<Record>),
    Many(Vec<Record>),
}

#[derive(Debug)]
pub struct FakeDocument {
    pub ty: Arc<DocumentType>,
    pub readonly: bool,
    pub offline: bool,
    pub relations: HashMap<String, Slot>,
    pub attributes: Attributes,
    pub missing: HashSet<String>,
    pub dirty: BTreeMap<String, (Value, Value)>,
    pub shadow: ShadowStore,
}

impl FakeDocument {
    pub fn new(ty: Arc<DocumentType>) -> Self {
        Self {
            ty,
            readonly: false,
            offline: false,
            relations: HashMap::new(),
            attributes: Attributes::new(),
            missing: HashSet::new(),
            dirty: BTreeMap::new(),
            shadow: ShadowStore::new(),
        }
    }

    pub fn set_one(&mut self, relation: &str, record: Option<Record>) {
        self.relations.insert(relation.into(), Slot::One(record));
    }

    pub fn one_mut(&mut self, relation: &str) -> &mut Record {
        match self.relations.get_mut(relation) {
            Some(Slot::One(Some(record))) => record,
            other => panic!("no to-one record on {relation}: {other:?}"),
        }
    }

    pub fn push(&mut self, relation: &str, record: Record) {
        match self
            .relations
            .entry(relation.into())
            .or_insert_with(|| Slot::Many(Vec::new()))
        {
            Slot::Many(records) => records.push(record),
            Slot::One(_) => panic!("{relation} is to-one"),
        }
    }

    pub fn remove(&mut self, relation: &str, id: DocumentId) {
        if let Some(Slot::Many(records)) = self.relations.get_mut(relation) {
            records.retain(|r| r.id != id);
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: Value) {
        let before = self.attributes.get(name).cloned().unwrap_or(Value::Null);
        self.attributes.insert(name.into(), value.clone());
        self.dirty.insert(name.into(), (before, value));
    }
}

impl TrackedDocument for FakeDocument {
    type Error = FakeError;

    fn document_type(&self) -> &DocumentType {
        &self.ty
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn is_attribute_missing(&self, name: &str) -> bool {
        self.missing.contains(name)
    }

    fn related(&self, relation: &RelationDescriptor) -> Result<Related<'_>, FakeError> {
        if self.offline {
            return Err(FakeError::Offline);
        }
        Ok(match self.relations.get(&relation.name) {
            None | Some(Slot::One(None)) => Related::None,
            Some(Slot::One(Some(record))) => Related::One(record),
            Some(Slot::Many(records)) => Related::Many(
                records.iter().map(|r| r as &dyn RelatedRecord).collect(),
            ),
        })
    }

    fn read_attribute(&self, name: &str) -> Result<Option<Value>, FakeError> {
        if self.offline {
            return Err(FakeError::Offline);
        }
        if self.missing.contains(name) {
            return Err(FakeError::MissingAttribute(name.into()));
        }
        Ok(self.attributes.get(name).cloned())
    }

    fn changed(&self) -> bool {
        !self.dirty.is_empty()
    }

    fn changes(&self) -> BTreeMap<String, (Value, Value)> {
        self.dirty.clone()
    }

    fn relations_shadow(&self) -> &ShadowStore {
        &self.shadow
    }

    fn relations_shadow_mut(&mut self) -> &mut ShadowStore {
        &mut self.shadow
    }
}

/// A type declaring one relation of every shape plus two untracked ones.
pub fn test_document_type() -> Arc<DocumentType> {
    Arc::new(DocumentType::new(
        DocumentSchema::new("test_document")
            .with_relation(RelationDescriptor::embeds_one("one_document"))
            .with_relation(RelationDescriptor::embeds_many("many_documents"))
            .with_relation(RelationDescriptor::has_one("one_related"))
            .with_relation(RelationDescriptor::has_many("many_related"))
            .with_relation(RelationDescriptor::has_and_belongs_to_many("many_to_many_related"))
            .with_relation(RelationDescriptor::belongs_to("test_document"))
            .with_relation(RelationDescriptor::has_many(VERSIONS_RELATION))
            .with_relation(RelationDescriptor::embedded_in("container")),
    ))
}

pub fn embedded(title: &str) -> Record {
    Record::new(json!({"title": title, "updated_at": 1}))
}
