//! Attribute sets and the blending algebra over them.
//!
//! A state's payload is a sparse overlay: attributes it does not name are left
//! alone by that state. Blending between two sets is expressed with two pure,
//! total functions, [`scale`] and [`merge`], composed as
//! `merge(scale(from, 1 - t), scale(to, t))`.

use super::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mapping from attribute name to value.
///
/// Backed by an ordered map so that iteration (and therefore the order in
/// which a delegate sees attributes) is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeSet {
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Collapse every value to one component per basis.
    ///
    /// See [`AttributeValue::collapse`].
    pub fn collapse(&self) -> Self {
        Self {
            values: self
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.collapse()))
                .collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Multiply every component of every attribute in `set` by `factor`.
pub fn scale(set: &AttributeSet, factor: f64) -> AttributeSet {
    AttributeSet {
        values: set
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.scale(factor)))
            .collect(),
    }
}

/// Combine two sets, keeping `a`'s components ahead of `b`'s.
///
/// Attributes present in both sets get `a`'s components followed by `b`'s;
/// attributes present in only one set are carried through unmodified.
pub fn merge(a: &AttributeSet, b: &AttributeSet) -> AttributeSet {
    let mut values = a.values.clone();
    for (name, value) in &b.values {
        match values.get_mut(name) {
            Some(existing) => existing.extend_from(value),
            None => {
                values.insert(name.clone(), value.clone());
            }
        }
    }
    AttributeSet { values }
}
