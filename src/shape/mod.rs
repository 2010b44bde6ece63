//! Shape declarations.
//!
//! A shape is a named, ordered set of field declarations describing a
//! record's expected structure. Shapes are declared once at startup via
//! [`ShapeSpec::builder`], are immutable thereafter, and are shared by
//! reference (`Arc`) across validation calls, nested fields, and the
//! registry.
//!
//! # Example
//!
//! ```rust
//! use conform::{FieldSpec, ShapeSpec};
//! use serde_json::json;
//!
//! let employee = ShapeSpec::builder("Employee")
//!     .field("id", FieldSpec::integer())
//!     .field("name", FieldSpec::string())
//!     .field("department", FieldSpec::string())
//!     .field("salary", FieldSpec::float().optional())
//!     .field("is_active", FieldSpec::boolean().optional().default(true))
//!     .build()
//!     .unwrap();
//!
//! let result = employee.validate(&json!({
//!     "id": 1, "name": "John", "department": "IT"
//! }));
//! assert!(result.is_success());
//! ```

mod field;

pub use field::{Constraint, FieldSpec, FieldType};

pub(crate) use field::AbsentResolution;

use std::fmt;

use indexmap::IndexMap;

/// Errors raised while declaring a shape.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// The same field name was declared twice within one shape.
    #[error("shape '{shape}' declares field '{field}' more than once")]
    DuplicateField {
        /// Name of the shape being built.
        shape: String,
        /// The repeated field name.
        field: String,
    },
}

/// A named, ordered set of field declarations.
///
/// Field order is declaration order; validation walks fields in that order
/// and violations are reported in it. See the [module docs](self) for a
/// declaration example, [`ShapeSpec::validate`] for the runtime entry point,
/// and [`ShapeSpec::describe`] for introspection.
pub struct ShapeSpec {
    name: String,
    fields: IndexMap<String, FieldSpec>,
    coerce_numeric_strings: bool,
}

impl ShapeSpec {
    /// Starts declaring a shape with the given name.
    pub fn builder(name: impl Into<String>) -> ShapeBuilder {
        ShapeBuilder {
            name: name.into(),
            fields: IndexMap::new(),
            coerce_numeric_strings: false,
            duplicate: None,
        }
    }

    /// The shape's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the shape declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Iterates over field declarations in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Whether numeric-looking strings coerce to integer/float fields.
    ///
    /// Off by default; see [`ShapeBuilder::coerce_numeric_strings`].
    pub fn coerces_numeric_strings(&self) -> bool {
        self.coerce_numeric_strings
    }
}

// Field specs may hold default factories, which have no Debug form; report
// the shape's name and field names instead.
impl fmt::Debug for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeSpec")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ShapeSpec`].
pub struct ShapeBuilder {
    name: String,
    fields: IndexMap<String, FieldSpec>,
    coerce_numeric_strings: bool,
    duplicate: Option<String>,
}

impl ShapeBuilder {
    /// Declares a field. Fields validate in declaration order.
    ///
    /// Declaring the same name twice makes [`ShapeBuilder::build`] fail with
    /// [`ShapeError::DuplicateField`].
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let name = name.into();
        if self.fields.contains_key(&name) {
            self.duplicate.get_or_insert(name);
        } else {
            self.fields.insert(name, spec);
        }
        self
    }

    /// Permits numeric-looking string input for integer and float fields.
    ///
    /// With this policy on, `"02108"` coerces to integer `2108` and `"1.5"`
    /// to float `1.5`. The default is strict: a string supplied to a numeric
    /// field is a type mismatch.
    pub fn coerce_numeric_strings(mut self, enabled: bool) -> Self {
        self.coerce_numeric_strings = enabled;
        self
    }

    /// Finishes the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DuplicateField`] if a field name was declared
    /// more than once.
    pub fn build(self) -> Result<ShapeSpec, ShapeError> {
        if let Some(field) = self.duplicate {
            return Err(ShapeError::DuplicateField {
                shape: self.name,
                field,
            });
        }
        Ok(ShapeSpec {
            name: self.name,
            fields: self.fields,
            coerce_numeric_strings: self.coerce_numeric_strings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_declares_fields_in_order() {
        let shape = ShapeSpec::builder("Classroom")
            .field("room_number", FieldSpec::string())
            .field("students", FieldSpec::sequence(FieldType::String))
            .field("capacity", FieldSpec::integer())
            .build()
            .unwrap();

        assert_eq!(shape.name(), "Classroom");
        assert_eq!(shape.len(), 3);
        let names: Vec<_> = shape.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["room_number", "students", "capacity"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = ShapeSpec::builder("User")
            .field("name", FieldSpec::string())
            .field("name", FieldSpec::integer())
            .build()
            .unwrap_err();

        match err {
            ShapeError::DuplicateField { shape, field } => {
                assert_eq!(shape, "User");
                assert_eq!(field, "name");
            }
        }
    }

    #[test]
    fn test_field_lookup() {
        let shape = ShapeSpec::builder("Item")
            .field("name", FieldSpec::string().min_length(2))
            .build()
            .unwrap();

        assert!(shape.field("name").is_some());
        assert!(shape.field("missing").is_none());
    }

    #[test]
    fn test_numeric_string_policy_defaults_off() {
        let strict = ShapeSpec::builder("A").build().unwrap();
        assert!(!strict.coerces_numeric_strings());

        let lenient = ShapeSpec::builder("B").coerce_numeric_strings(true).build().unwrap();
        assert!(lenient.coerces_numeric_strings());
    }

    #[test]
    fn test_debug_reports_name_and_fields() {
        let shape = ShapeSpec::builder("Item")
            .field("name", FieldSpec::string())
            .field("price", FieldSpec::float())
            .build()
            .unwrap();

        let debug = format!("{:?}", shape);
        assert!(debug.contains("Item"));
        assert!(debug.contains("name"));
        assert!(debug.contains("price"));
    }

    #[test]
    fn test_empty_shape() {
        let shape = ShapeSpec::builder("Empty").build().unwrap();
        assert!(shape.is_empty());
        assert_eq!(shape.len(), 0);
    }
}
