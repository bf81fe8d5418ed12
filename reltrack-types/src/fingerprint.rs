//! Relation fingerprints.
//!
//! A fingerprint is the canonical, comparable value derived from a relation's
//! current state. Its JSON shape mirrors what the relation looks like to a
//! caller: `null` when nothing is related, an object for to-one relations and
//! an array of objects for to-many relations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document's loose attribute storage.
pub type Attributes = serde_json::Map<String, Value>;

/// Attribute holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Attribute stripped from embedded fingerprints. Touching it alone must not
/// register as a relation change.
pub const LAST_MODIFIED_FIELD: &str = "updated_at";

/// Comparable snapshot of a single relation.
///
/// Equality is structural: maps compare by key/value, lists compare in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fingerprint {
    /// Nothing related, or the relation could not be resolved.
    #[default]
    Absent,
    /// Attribute map of an embedded document, or a single `{key: value}` entry.
    Map(Attributes),
    /// One map per related document, in relation order.
    List(Vec<Attributes>),
}

impl Fingerprint {
    /// A single-entry `{field: value}` map.
    pub fn key(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Map(key_entry(field, value))
    }

    /// A list of single-entry `{field: value}` maps.
    pub fn keys<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(values.into_iter().map(|v| key_entry(field, v)).collect())
    }

    /// Embedded attribute map with the last-modified field dropped.
    #[must_use]
    pub fn embedded(attributes: &Attributes) -> Self {
        Self::Map(without_timestamp(attributes))
    }

    /// Embedded attribute maps with the last-modified field dropped from each.
    pub fn embedded_list<'a, I>(children: I) -> Self
    where
        I: IntoIterator<Item = &'a Attributes>,
    {
        Self::List(children.into_iter().map(without_timestamp).collect())
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the map payload, if this is a to-one fingerprint.
    #[must_use]
    pub fn as_map(&self) -> Option<&Attributes> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the list payload, if this is a to-many fingerprint.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Attributes]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Plain JSON rendering (`null`, object or array).
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Map(map) => Value::Object(map.clone()),
            Self::List(list) => Value::Array(list.iter().cloned().map(Value::Object).collect()),
        }
    }
}

impl From<Option<Attributes>> for Fingerprint {
    fn from(map: Option<Attributes>) -> Self {
        map.map_or(Self::Absent, Self::Map)
    }
}

fn key_entry(field: impl Into<String>, value: impl Into<Value>) -> Attributes {
    let mut map = Attributes::new();
    map.insert(field.into(), value.into());
    map
}

fn without_timestamp(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .filter(|(key, _)| key.as_str() != LAST_MODIFIED_FIELD)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
