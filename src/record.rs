//! Validated record output.
//!
//! This module provides [`ValidatedRecord`], the normalized output of a
//! successful validation, and [`FieldValue`], which distinguishes a present
//! value (including a present `null`) from an absent optional field.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The resolved value of a single field in a validated record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The field was present in the input (possibly as `null`), or a
    /// default supplied its value.
    Present(Value),
    /// The field was absent and optional with no default. Distinct from a
    /// present `null`.
    Absent,
}

impl FieldValue {
    /// Returns the contained value, or None for the absent sentinel.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Present(value) => Some(value),
            FieldValue::Absent => None,
        }
    }

    /// Returns true for the absent sentinel.
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// A normalized record produced by a successful validation.
///
/// Every field of the originating shape appears exactly once, in declaration
/// order, bound either to a coerced value, a default, or the absent
/// sentinel. Values are guaranteed to satisfy the shape's constraints.
///
/// # Example
///
/// ```rust
/// use conform::{FieldSpec, ShapeSpec};
/// use serde_json::json;
///
/// let shape = ShapeSpec::builder("Employee")
///     .field("id", FieldSpec::integer())
///     .field("salary", FieldSpec::float().optional())
///     .build()
///     .unwrap();
///
/// let record = shape.validate(&json!({"id": 1})).into_result().unwrap();
/// assert_eq!(record.get("id"), Some(&json!(1)));
/// assert!(record.is_absent("salary"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedRecord {
    values: IndexMap<String, FieldValue>,
}

impl ValidatedRecord {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value bound to `name`, or None if the field is absent or
    /// not part of the record.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(FieldValue::as_value)
    }

    /// Returns true if `name` resolved to the absent sentinel.
    pub fn is_absent(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FieldValue::Absent))
    }

    /// Returns true if the record carries a binding for `name`, present or
    /// absent.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of field bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no bindings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over bindings in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Renders the record as a JSON object, with absent fields as `null`.
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        for (name, value) in self.values {
            map.insert(
                name,
                match value {
                    FieldValue::Present(v) => v,
                    FieldValue::Absent => Value::Null,
                },
            );
        }
        Value::Object(map)
    }
}
