//! Schema introspection.
//!
//! [`ShapeSpec::describe`] renders a shape as a structured schema document
//! in JSON Schema flavor, suitable for documentation generators and API
//! schema exporters. Introspection never validates anything.

use serde_json::{json, Map, Value};

use crate::shape::{Constraint, FieldSpec, FieldType, ShapeSpec};

impl ShapeSpec {
    /// Renders this shape as a structured schema document.
    ///
    /// The document enumerates every field's declared type, constraints,
    /// static default, and required/optional status. Nested shapes embed
    /// their own documents; sequence fields describe their element type
    /// under `items`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{FieldSpec, ShapeSpec};
    /// use serde_json::json;
    ///
    /// let user = ShapeSpec::builder("User")
    ///     .field("username", FieldSpec::string())
    ///     .field("age", FieldSpec::integer().default(18))
    ///     .build()
    ///     .unwrap();
    ///
    /// let doc = user.describe();
    /// assert_eq!(doc["title"], json!("User"));
    /// assert_eq!(doc["required"], json!(["username"]));
    /// assert_eq!(doc["properties"]["age"]["default"], json!(18));
    /// ```
    pub fn describe(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, field) in self.fields() {
            properties.insert(name.to_string(), describe_field(field));
            if field.is_required() {
                required.push(Value::String(name.to_string()));
            }
        }

        json!({
            "title": self.name(),
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Describes one field: its type document plus constraints and default.
fn describe_field(field: &FieldSpec) -> Value {
    let mut doc = describe_type(field.field_type());

    if let Value::Object(ref mut map) = doc {
        for constraint in field.constraints() {
            let (key, bound) = describe_constraint(constraint);
            map.insert(key.to_string(), bound);
        }
        if let Some(default) = field.default_value() {
            map.insert("default".to_string(), default.clone());
        }
        if field.is_optional() {
            map.insert("optional".to_string(), Value::Bool(true));
        }
    }

    doc
}

/// The base type document for a declared type.
fn describe_type(ty: &FieldType) -> Value {
    match ty {
        FieldType::String => json!({"type": "string"}),
        FieldType::Integer => json!({"type": "integer"}),
        FieldType::Float => json!({"type": "number"}),
        FieldType::Boolean => json!({"type": "boolean"}),
        FieldType::Shape(shape) => shape.describe(),
        FieldType::Sequence(element) => json!({
            "type": "array",
            "items": describe_type(element),
        }),
    }
}

/// JSON Schema keyword and bound value for one constraint.
fn describe_constraint(constraint: &Constraint) -> (&'static str, Value) {
    match constraint {
        Constraint::MinLength(min) => ("minLength", json!(min)),
        Constraint::MaxLength(max) => ("maxLength", json!(max)),
        Constraint::GreaterThan(bound) => ("exclusiveMinimum", json!(bound)),
        Constraint::GreaterThanOrEqual(bound) => ("minimum", json!(bound)),
        Constraint::LessThanOrEqual(bound) => ("maximum", json!(bound)),
    }
}
