//! The keyed property collection owned by a builder.
//!
//! Outside this crate a `PropertySet` is read-only: factories and builder
//! validators receive `&PropertySet`, and every mutation goes through
//! [`Builder`](crate::Builder) so insertion stays tied to validation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::de::DeserializeOwned;

use propforge_types::{PropertyAccessError, PropertyValue};

use super::Property;

/// Properties keyed by name. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: HashMap<String, Property>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &PropertyValue> + '_ {
        self.entries.values().map(|p| p.value())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> + '_ {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// The value stored under `key`, if present.
    pub fn value(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key).map(|p| p.value())
    }

    /// The value stored under `key`, or `Missing` if absent.
    pub fn require(&self, key: &str) -> Result<&PropertyValue, PropertyAccessError> {
        self.value(key)
            .ok_or_else(|| PropertyAccessError::Missing(key.to_string()))
    }

    /// Deserialize the value under `key` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, PropertyAccessError> {
        let value = self.require(key)?;
        serde_json::from_value(value.clone()).map_err(|source| PropertyAccessError::Type {
            key: key.to_string(),
            source,
        })
    }

    /// Deserialize the value under `key` into `T`, treating absence as `None`.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PropertyAccessError> {
        match self.value(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| PropertyAccessError::Type {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Flatten to plain key -> value pairs. The result is an independent copy.
    pub fn to_value_map(&self) -> HashMap<String, PropertyValue> {
        self.entries
            .iter()
            .map(|(k, p)| (k.clone(), p.value().clone()))
            .collect()
    }

    /// Flatten into a JSON object.
    pub fn to_json(&self) -> PropertyValue {
        PropertyValue::Object(
            self.entries
                .iter()
                .map(|(k, p)| (k.clone(), p.value().clone()))
                .collect(),
        )
    }

    /// Deserialize the whole set, viewed as a JSON object, into `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    pub(crate) fn entry(&mut self, key: String) -> Entry<'_, String, Property> {
        self.entries.entry(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.entries.get_mut(key)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Property> {
        self.entries.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a String, &'a Property);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
