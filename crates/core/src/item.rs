// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Content-addressed items
//!
//! An item is an immutable map of field names to values. Its identity is the
//! SHA-256 of its canonical JSON form: keys sorted, no insignificant
//! whitespace, non-ASCII left unescaped.

use crate::hash::ItemHash;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A field value: a single atom or, for cardinality `n`, an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    One(String),
    Many(Vec<String>),
}

impl Value {
    /// The atomic values held, in order
    pub fn atoms(&self) -> &[String] {
        match self {
            Value::One(value) => std::slice::from_ref(value),
            Value::Many(values) => values,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::One(value) => Some(value),
            Value::Many(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::One(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::One(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::Many(values)
    }
}

/// An immutable blob of field values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: BTreeMap<String, Value>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Single-valued field as a string slice
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Fields in canonical (sorted) order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical JSON serialization
    pub fn canonical_json(&self) -> String {
        // A map of strings and string lists always serializes
        serde_json::to_string(&self.fields).unwrap_or_default()
    }

    /// Parse an item from a JSON object of strings and string arrays
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Content address of this item
    pub fn hash(&self) -> ItemHash {
        ItemHash::of(self.canonical_json().as_bytes())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_json())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Item {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut item = Item::new();
        for (field, value) in iter {
            item.insert(field, value);
        }
        item
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
