//! Field declarations.
//!
//! This module provides [`FieldSpec`] for declaring a single field of a
//! shape: its declared type, optionality, default source, and constraints.

use std::fmt::{self, Display};
use std::sync::Arc;

use serde_json::Value;

use super::ShapeSpec;

/// The declared type of a field.
#[derive(Clone)]
pub enum FieldType {
    /// A UTF-8 string.
    String,
    /// A signed 64-bit integer.
    Integer,
    /// A 64-bit float. Integer input widens losslessly.
    Float,
    /// A boolean. No numeric or string coercion is applied.
    Boolean,
    /// A nested record validated against another shape.
    Shape(Arc<ShapeSpec>),
    /// An ordered sequence of a declared element type.
    Sequence(Box<FieldType>),
}

impl FieldType {
    /// Short name used in violation messages and introspection documents.
    pub fn name(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Shape(shape) => format!("shape '{}'", shape.name()),
            FieldType::Sequence(elem) => format!("sequence<{}>", elem.name()),
        }
    }

    /// Returns true for integer and float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A declarative bound attached to a field, checked after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Minimum string length in characters (Unicode scalar values).
    MinLength(usize),
    /// Maximum string length in characters.
    MaxLength(usize),
    /// Numeric value must be strictly greater than the bound.
    GreaterThan(f64),
    /// Numeric value must be greater than or equal to the bound.
    GreaterThanOrEqual(f64),
    /// Numeric value must be less than or equal to the bound.
    LessThanOrEqual(f64),
}

/// Where a missing field's value comes from.
///
/// The enum makes "at most one of default / default-factory" structural:
/// a field can only ever hold one source.
#[derive(Clone, Default)]
pub(crate) enum DefaultSource {
    /// No fallback; absence is either tolerated (optional) or a violation.
    #[default]
    None,
    /// A static value, used as-is when the field is absent.
    Value(Value),
    /// A producer invoked once per missing occurrence. Its output is trusted
    /// and not re-validated.
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

/// How an absent field resolves during validation.
pub(crate) enum AbsentResolution {
    /// Bind the produced or declared default value.
    Value(Value),
    /// Bind the explicit absent sentinel.
    Absent,
    /// Required field with no fallback: a violation.
    Missing,
}

/// Declaration of a single field within a shape.
///
/// A `FieldSpec` is built with a factory constructor for its declared type
/// and chained builder methods for optionality, defaults, and constraints.
///
/// # Example
///
/// ```rust
/// use conform::FieldSpec;
///
/// let name = FieldSpec::string().min_length(2).max_length(50);
/// let price = FieldSpec::float().greater_than(0.0).less_than_or_equal(1000.0);
/// let quantity = FieldSpec::integer().greater_than_or_equal(0.0);
/// let email = FieldSpec::string().default_factory(|| "user@example.com".into());
/// ```
#[derive(Clone)]
pub struct FieldSpec {
    ty: FieldType,
    optional: bool,
    default: DefaultSource,
    constraints: Vec<Constraint>,
}

impl FieldSpec {
    fn new(ty: FieldType) -> Self {
        Self {
            ty,
            optional: false,
            default: DefaultSource::None,
            constraints: Vec::new(),
        }
    }

    /// Declares a string-typed field.
    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    /// Declares an integer-typed field.
    pub fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    /// Declares a float-typed field.
    pub fn float() -> Self {
        Self::new(FieldType::Float)
    }

    /// Declares a boolean-typed field.
    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    /// Declares a field validated against a nested shape.
    pub fn shape(shape: impl Into<Arc<ShapeSpec>>) -> Self {
        Self::new(FieldType::Shape(shape.into()))
    }

    /// Declares an ordered-sequence field with the given element type.
    pub fn sequence(element: FieldType) -> Self {
        Self::new(FieldType::Sequence(Box::new(element)))
    }

    /// Marks the field as optional: absence (without a default) binds the
    /// absent sentinel instead of producing a violation, and a present
    /// `null` is accepted.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets a static default, used as-is when the field is absent.
    ///
    /// Replaces any previously set default source. A field with a default is
    /// never reported missing.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultSource::Value(value.into());
        self
    }

    /// Sets a default factory, invoked once per missing occurrence.
    ///
    /// The factory output is trusted and not re-validated. Replaces any
    /// previously set default source.
    pub fn default_factory(mut self, factory: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = DefaultSource::Factory(Arc::new(factory));
        self
    }

    /// Requires at least `min` characters (string fields).
    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.push(Constraint::MinLength(min));
        self
    }

    /// Requires at most `max` characters (string fields).
    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.push(Constraint::MaxLength(max));
        self
    }

    /// Requires the value to be strictly greater than `bound` (numeric fields).
    pub fn greater_than(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::GreaterThan(bound));
        self
    }

    /// Requires the value to be at least `bound` (numeric fields).
    pub fn greater_than_or_equal(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::GreaterThanOrEqual(bound));
        self
    }

    /// Requires the value to be at most `bound` (numeric fields).
    pub fn less_than_or_equal(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::LessThanOrEqual(bound));
        self
    }

    /// The declared type of this field.
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// Whether absence without a default is tolerated.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether absence is a violation: no default source and not optional.
    pub fn is_required(&self) -> bool {
        !self.optional && matches!(self.default, DefaultSource::None)
    }

    /// Whether a static default value is declared.
    pub fn has_default(&self) -> bool {
        matches!(self.default, DefaultSource::Value(_))
    }

    /// Whether a default factory is declared.
    pub fn has_default_factory(&self) -> bool {
        matches!(self.default, DefaultSource::Factory(_))
    }

    /// The static default value, if declared.
    pub fn default_value(&self) -> Option<&Value> {
        match &self.default {
            DefaultSource::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The declared constraints, in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Resolves this field when it is absent from the input.
    pub(crate) fn resolve_absent(&self) -> AbsentResolution {
        match &self.default {
            DefaultSource::Value(value) => AbsentResolution::Value(value.clone()),
            DefaultSource::Factory(factory) => AbsentResolution::Value(factory()),
            DefaultSource::None if self.optional => AbsentResolution::Absent,
            DefaultSource::None => AbsentResolution::Missing,
        }
    }
}
