//! Documents held by the in-memory store.
//!
//! A [`Document`] keeps its own attributes, a snapshot of them as last
//! persisted, and the current contents of each relation. Embedded children
//! are folded into the attribute map a parent fingerprints, recursively.

use crate::error::{StoreError, StoreResult};
use reltrack_model::{Association, DocumentType, RelationDescriptor};
use reltrack_tracking::{Related, RelatedRecord, ShadowStore, TrackedDocument};
use reltrack_types::{Attributes, DocumentId, ID_FIELD};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Current contents of one relation.
#[derive(Debug, Clone)]
enum Slot {
    One(Option<Box<Document>>),
    Many(Vec<Document>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    One,
    Many,
}

fn shape(descriptor: &RelationDescriptor) -> Option<Shape> {
    match descriptor.association {
        Association::EmbedsOne
        | Association::EmbeddedIn
        | Association::HasOne
        | Association::BelongsTo => Some(Shape::One),
        Association::EmbedsMany | Association::HasMany | Association::HasAndBelongsToMany => {
            Some(Shape::Many)
        }
        Association::Custom(_) => None,
    }
}

/// A document held by a [`Collection`](crate::Collection), or embedded in /
/// referenced from another document.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    ty: Arc<DocumentType>,
    attributes: Attributes,
    persisted: Attributes,
    relations: BTreeMap<String, Slot>,
    /// Fields included by a projected load; `None` means fully loaded.
    projection: Option<BTreeSet<String>>,
    readonly: bool,
    new_record: bool,
    shadow: ShadowStore,
}

impl Document {
    /// A new, unsaved document. No lifecycle hook runs; use
    /// [`Collection::build`](crate::Collection::build) for a tracked one.
    pub fn new(ty: Arc<DocumentType>) -> Self {
        let id = DocumentId::new();
        let mut attributes = Attributes::new();
        attributes.insert(ID_FIELD.into(), id.to_value());
        Self {
            id,
            ty,
            persisted: attributes.clone(),
            attributes,
            relations: BTreeMap::new(),
            projection: None,
            readonly: false,
            new_record: true,
            shadow: ShadowStore::new(),
        }
    }

    /// Builder-style attribute assignment for fixtures and embedded children.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.attributes.insert(field.into(), value.into());
    }

    /// Assigns a to-one relation. Assigning a belongs-to relation also writes
    /// the foreign key.
    pub fn set_one(&mut self, relation: &str, target: Option<Document>) -> StoreResult<()> {
        let descriptor = self.descriptor(relation, Shape::One)?.clone();
        if descriptor.association == Association::BelongsTo {
            let key = target.as_ref().map_or(Value::Null, |t| t.id.to_value());
            self.attributes.insert(descriptor.foreign_key.clone(), key);
        }
        self.relations
            .insert(descriptor.name, Slot::One(target.map(Box::new)));
        Ok(())
    }

    /// The document in a to-one relation.
    #[must_use]
    pub fn one(&self, relation: &str) -> Option<&Document> {
        match self.relations.get(relation) {
            Some(Slot::One(target)) => target.as_deref(),
            _ => None,
        }
    }

    pub fn one_mut(&mut self, relation: &str) -> Option<&mut Document> {
        match self.relations.get_mut(relation) {
            Some(Slot::One(target)) => target.as_deref_mut(),
            _ => None,
        }
    }

    /// Replaces the contents of a to-many relation.
    pub fn set_many(&mut self, relation: &str, targets: Vec<Document>) -> StoreResult<()> {
        let name = self.descriptor(relation, Shape::Many)?.name.clone();
        self.relations.insert(name, Slot::Many(targets));
        Ok(())
    }

    /// Appends to a to-many relation.
    pub fn push(&mut self, relation: &str, target: Document) -> StoreResult<()> {
        let name = self.descriptor(relation, Shape::Many)?.name.clone();
        match self
            .relations
            .entry(name)
            .or_insert_with(|| Slot::Many(Vec::new()))
        {
            Slot::Many(targets) => targets.push(target),
            slot @ Slot::One(_) => *slot = Slot::Many(vec![target]),
        }
        Ok(())
    }

    /// Removes a document from a to-many relation, returning it if present.
    pub fn remove(&mut self, relation: &str, id: DocumentId) -> StoreResult<Option<Document>> {
        self.descriptor(relation, Shape::Many)?;
        let Some(Slot::Many(targets)) = self.relations.get_mut(relation) else {
            return Ok(None);
        };
        Ok(targets
            .iter()
            .position(|t| t.id == id)
            .map(|index| targets.remove(index)))
    }

    #[must_use]
    pub fn many(&self, relation: &str) -> &[Document] {
        match self.relations.get(relation) {
            Some(Slot::Many(targets)) => targets,
            _ => &[],
        }
    }

    pub fn many_mut(&mut self, relation: &str) -> &mut [Document] {
        match self.relations.get_mut(relation) {
            Some(Slot::Many(targets)) => targets,
            _ => &mut [],
        }
    }

    fn descriptor(&self, relation: &str, expected: Shape) -> StoreResult<&RelationDescriptor> {
        let descriptor = self
            .ty
            .relation(relation)
            .ok_or_else(|| StoreError::UnknownRelation {
                document_type: self.ty.name().to_string(),
                relation: relation.to_string(),
            })?;
        if shape(descriptor) != Some(expected) {
            return Err(StoreError::RelationShape {
                relation: relation.to_string(),
                expected: match expected {
                    Shape::One => "to-one",
                    Shape::Many => "to-many",
                },
            });
        }
        Ok(descriptor)
    }

    /// Embedded relations currently holding a slot, with the slot's value.
    fn embedded_slots(&self) -> impl Iterator<Item = (&String, Value)> {
        self.relations.iter().filter_map(|(name, slot)| {
            let embedded = self.ty.relation(name).is_some_and(|d| {
                matches!(d.association, Association::EmbedsOne | Association::EmbedsMany)
            });
            embedded.then(|| (name, slot_value(slot)))
        })
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = self.attributes.clone();
        self.new_record = false;
    }

    /// Restricts the document to `fields` and marks it read-only.
    pub(crate) fn project(&mut self, fields: &[&str]) {
        let mut keep: BTreeSet<String> = fields.iter().map(|f| (*f).to_string()).collect();
        keep.insert(ID_FIELD.to_string());
        self.attributes.retain(|name, _| keep.contains(name));
        self.persisted = self.attributes.clone();
        self.projection = Some(keep);
        self.readonly = true;
    }
}

fn slot_value(slot: &Slot) -> Value {
    match slot {
        Slot::One(None) => Value::Null,
        Slot::One(Some(target)) => Value::Object(target.attributes().into_owned()),
        Slot::Many(targets) => targets
            .iter()
            .map(|t| Value::Object(t.attributes().into_owned()))
            .collect(),
    }
}

impl RelatedRecord for Document {
    fn id(&self) -> DocumentId {
        self.id
    }

    /// Own attributes with embedded children folded in under their relation
    /// names, recursively.
    fn attributes(&self) -> Cow<'_, Attributes> {
        let mut embedded = self.embedded_slots().peekable();
        if embedded.peek().is_none() {
            return Cow::Borrowed(&self.attributes);
        }
        let mut attributes = self.attributes.clone();
        attributes.extend(embedded.map(|(name, value)| (name.clone(), value)));
        Cow::Owned(attributes)
    }
}

impl TrackedDocument for Document {
    type Error = StoreError;

    fn document_type(&self) -> &DocumentType {
        &self.ty
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn is_attribute_missing(&self, name: &str) -> bool {
        self.projection
            .as_ref()
            .is_some_and(|fields| !fields.contains(name))
    }

    fn related(&self, relation: &RelationDescriptor) -> StoreResult<Related<'_>> {
        Ok(match self.relations.get(&relation.name) {
            None | Some(Slot::One(None)) => Related::None,
            Some(Slot::One(Some(target))) => Related::One(&**target),
            Some(Slot::Many(targets)) => {
                Related::Many(targets.iter().map(|t| t as &dyn RelatedRecord).collect())
            }
        })
    }

    fn read_attribute(&self, name: &str) -> StoreResult<Option<Value>> {
        if self.is_attribute_missing(name) {
            return Err(StoreError::MissingAttribute(name.to_string()));
        }
        Ok(self.attributes.get(name).cloned())
    }

    fn changed(&self) -> bool {
        self.attributes != self.persisted
    }

    fn changes(&self) -> BTreeMap<String, (Value, Value)> {
        let names: BTreeSet<&String> = self
            .attributes
            .keys()
            .chain(self.persisted.keys())
            .collect();
        names
            .into_iter()
            .filter_map(|name| {
                let before = self.persisted.get(name).cloned().unwrap_or(Value::Null);
                let after = self.attributes.get(name).cloned().unwrap_or(Value::Null);
                (before != after).then(|| (name.clone(), (before, after)))
            })
            .collect()
    }

    fn relations_shadow(&self) -> &ShadowStore {
        &self.shadow
    }

    fn relations_shadow_mut(&mut self) -> &mut ShadowStore {
        &mut self.shadow
    }
}
