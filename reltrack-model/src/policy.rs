//! Inclusion/exclusion filters for tracked relations.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Relation holding audit history. Excluded from tracking on every type.
pub const VERSIONS_RELATION: &str = "versions";

/// Relation names passed to a single registration call.
///
/// Both lists accept either a single string or a list when deserialized, so
/// `only = "comments"` and `only = ["comments"]` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOptions {
    #[serde(default, deserialize_with = "one_or_many")]
    pub only: BTreeSet<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub except: BTreeSet<String>,
}

impl TrackingOptions {
    /// Options tracking only the given relations.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().and_only(names)
    }

    /// Options excluding the given relations.
    pub fn except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().and_except(names)
    }

    #[must_use]
    pub fn and_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn and_except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Accumulated tracking filters for one document type.
///
/// Registration only ever adds names. `except` starts out holding
/// [`VERSIONS_RELATION`] and nothing can remove it; a deserialized policy is
/// registered onto the default one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TrackingOptions")]
pub struct TrackingPolicy {
    only: BTreeSet<String>,
    except: BTreeSet<String>,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        Self {
            only: BTreeSet::new(),
            except: BTreeSet::from([VERSIONS_RELATION.to_string()]),
        }
    }
}

impl From<TrackingOptions> for TrackingPolicy {
    fn from(options: TrackingOptions) -> Self {
        let mut policy = Self::default();
        policy.register(&options);
        policy
    }
}

impl TrackingPolicy {
    /// Unions `options` into the accumulated sets.
    pub fn register(&mut self, options: &TrackingOptions) {
        self.only.extend(options.only.iter().cloned());
        self.except.extend(options.except.iter().cloned());
    }

    /// Name-level filter: a non-empty `only` list decides alone, otherwise
    /// `except` is consulted.
    #[must_use]
    pub fn permits(&self, relation: &str) -> bool {
        if self.only.is_empty() {
            !self.except.contains(relation)
        } else {
            self.only.contains(relation)
        }
    }

    #[must_use]
    pub fn only(&self) -> &BTreeSet<String> {
        &self.only
    }

    #[must_use]
    pub fn except(&self) -> &BTreeSet<String> {
        &self.except
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => BTreeSet::from([name]),
        OneOrMany::Many(names) => names.into_iter().collect(),
    })
}
