// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed, dynamically keyed attribute storage attached to nodes.
//!
//! Attributes carry optional per-node data such as layout constraints
//! (`"min-width"`, `"position"`, `"left"`, ...). Reads with a default never
//! fail: a missing key or a value of the wrong type yields the default.

use alloc::string::String;
use alloc::vec::Vec;

/// A single attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Str(String::from(v))
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Conversion out of an [`AttributeValue`].
///
/// Integers convert to floats; no other coercions are performed.
pub trait FromAttribute: Sized {
    /// Convert, or return `None` on a type mismatch.
    fn from_attribute(value: &AttributeValue) -> Option<Self>;
}

impl FromAttribute for bool {
    fn from_attribute(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromAttribute for i64 {
    fn from_attribute(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromAttribute for f64 {
    fn from_attribute(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromAttribute for String {
    fn from_attribute(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Insertion-ordered attribute bag.
///
/// Nodes usually carry a handful of attributes, so a flat vector beats a map.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw access to a value.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Typed read; `None` if missing or mistyped.
    pub fn get_as<T: FromAttribute>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(T::from_attribute)
    }

    /// Typed read with a fallback for missing or mistyped values.
    pub fn get_or<T: FromAttribute>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    /// Insert or replace; returns the previous value.
    pub fn set(&mut self, key: &str, value: AttributeValue) -> Option<AttributeValue> {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            return Some(core::mem::replace(slot, value));
        }
        self.entries.push((String::from(key), value));
        None
    }

    /// Remove a key; returns the removed value.
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads_fall_back_on_mismatch() {
        let mut attrs = Attributes::default();
        attrs.set("position", "absolute".into());
        attrs.set("left", 12_i64.into());

        assert_eq!(attrs.get_or("left", 0.0_f64), 12.0);
        assert_eq!(attrs.get_or("position", 5.0_f64), 5.0);
        assert_eq!(
            attrs.get_or("position", String::from("static")),
            "absolute"
        );
        assert!(!attrs.get_or("missing", false));
    }

    #[test]
    fn set_replaces_and_remove_returns_old() {
        let mut attrs = Attributes::default();
        assert_eq!(attrs.set("a", 1_i64.into()), None);
        assert_eq!(attrs.set("a", 2_i64.into()), Some(AttributeValue::Int(1)));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.remove("a"), Some(AttributeValue::Int(2)));
        assert!(attrs.is_empty());
        assert_eq!(attrs.remove("a"), None);
    }
}
