//! Coercion rules for scalar field types.
//!
//! Coercion converts an input value's runtime representation to the declared
//! type without loss of information. The rules are an enumerated table keyed
//! by (source runtime type, declared type); anything not listed is a type
//! mismatch. Widening (integer input for a float field) is always permitted;
//! narrowing is permitted only when lossless (a float with zero fractional
//! part for an integer field). Numeric-looking strings participate only when
//! the shape opts in.

use serde_json::{Number, Value};

use crate::shape::FieldType;

/// The runtime type of an input value, as seen by the coercion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuntimeType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl RuntimeType {
    /// Classifies a JSON value. Numbers split into integer and float so the
    /// table can distinguish lossless from lossy conversions.
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Null => RuntimeType::Null,
            Value::Bool(_) => RuntimeType::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => RuntimeType::Integer,
            Value::Number(_) => RuntimeType::Float,
            Value::String(_) => RuntimeType::String,
            Value::Array(_) => RuntimeType::Sequence,
            Value::Object(_) => RuntimeType::Mapping,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            RuntimeType::Null => "null",
            RuntimeType::Boolean => "boolean",
            RuntimeType::Integer => "integer",
            RuntimeType::Float => "float",
            RuntimeType::String => "string",
            RuntimeType::Sequence => "sequence",
            RuntimeType::Mapping => "mapping",
        }
    }
}

/// Why a value could not be coerced to its declared type.
#[derive(Debug)]
pub(crate) struct CoerceFailure {
    pub message: String,
    pub expected: String,
    pub got: String,
}

impl CoerceFailure {
    fn mismatch(declared: &FieldType, value: &Value) -> Self {
        let got = RuntimeType::of(value);
        Self {
            message: format!("expected {}, got {}", declared.name(), got.name()),
            expected: declared.name(),
            got: got.name().to_string(),
        }
    }
}

/// Applies the coercion table for scalar declared types.
///
/// Sequence and nested-shape fields are structural and handled by the
/// validation engine; calling this with one of those declared types is a
/// table miss and reports a mismatch.
pub(crate) fn coerce_scalar(
    value: &Value,
    declared: &FieldType,
    numeric_strings: bool,
) -> Result<Value, CoerceFailure> {
    match (RuntimeType::of(value), declared) {
        (RuntimeType::String, FieldType::String) => Ok(value.clone()),

        (RuntimeType::Integer, FieldType::Integer) => coerce_integer(value, declared),
        (RuntimeType::Float, FieldType::Integer) => lossless_float_to_integer(value, declared),
        (RuntimeType::String, FieldType::Integer) if numeric_strings => {
            parse_integer_string(value, declared)
        }

        (RuntimeType::Integer, FieldType::Float) => widen_to_float(value, declared),
        (RuntimeType::Float, FieldType::Float) => Ok(value.clone()),
        (RuntimeType::String, FieldType::Float) if numeric_strings => {
            parse_float_string(value, declared)
        }

        (RuntimeType::Boolean, FieldType::Boolean) => Ok(value.clone()),

        _ => Err(CoerceFailure::mismatch(declared, value)),
    }
}

/// Integer input for an integer field. u64 values beyond i64 range are
/// rejected rather than wrapped.
fn coerce_integer(value: &Value, declared: &FieldType) -> Result<Value, CoerceFailure> {
    let num = match value {
        Value::Number(n) => n,
        _ => return Err(CoerceFailure::mismatch(declared, value)),
    };
    if let Some(i) = num.as_i64() {
        return Ok(Value::Number(i.into()));
    }
    Err(CoerceFailure {
        message: "integer value out of range".to_string(),
        expected: "integer in i64 range".to_string(),
        got: num.to_string(),
    })
}

/// Float input for an integer field: permitted only when the conversion is
/// lossless. `2.0` becomes `2`; `1.5` is a mismatch, never truncated.
fn lossless_float_to_integer(value: &Value, declared: &FieldType) -> Result<Value, CoerceFailure> {
    let f = value.as_f64().unwrap_or(f64::NAN);
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        return Ok(Value::Number((f as i64).into()));
    }
    Err(CoerceFailure {
        message: format!("expected integer, got fractional value {}", f),
        expected: declared.name(),
        got: value.to_string(),
    })
}

/// Integer input for a float field: numeric widening is always permitted.
fn widen_to_float(value: &Value, declared: &FieldType) -> Result<Value, CoerceFailure> {
    let f = value.as_f64().ok_or_else(|| CoerceFailure::mismatch(declared, value))?;
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| CoerceFailure::mismatch(declared, value))
}

/// Policy-gated string input for an integer field. Leading zeros are
/// tolerated by integer parsing: `"02108"` coerces to `2108`.
fn parse_integer_string(value: &Value, declared: &FieldType) -> Result<Value, CoerceFailure> {
    let s = value.as_str().unwrap_or_default();
    s.parse::<i64>()
        .map(|i| Value::Number(i.into()))
        .map_err(|_| CoerceFailure {
            message: format!("string '{}' is not a valid integer", s),
            expected: declared.name(),
            got: format!("'{}'", s),
        })
}

/// Policy-gated string input for a float field. Non-finite parses (NaN,
/// infinity) are rejected since they have no JSON number representation.
fn parse_float_string(value: &Value, declared: &FieldType) -> Result<Value, CoerceFailure> {
    let s = value.as_str().unwrap_or_default();
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| CoerceFailure {
            message: format!("string '{}' is not a valid float", s),
            expected: declared.name(),
            got: format!("'{}'", s),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_runtime_type_classification() {
        assert_eq!(RuntimeType::of(&json!(null)), RuntimeType::Null);
        assert_eq!(RuntimeType::of(&json!(true)), RuntimeType::Boolean);
        assert_eq!(RuntimeType::of(&json!(3)), RuntimeType::Integer);
        assert_eq!(RuntimeType::of(&json!(3.5)), RuntimeType::Float);
        assert_eq!(RuntimeType::of(&json!("x")), RuntimeType::String);
        assert_eq!(RuntimeType::of(&json!([1])), RuntimeType::Sequence);
        assert_eq!(RuntimeType::of(&json!({})), RuntimeType::Mapping);
    }

    #[test]
    fn test_identity_rules() {
        assert_eq!(
            coerce_scalar(&json!("hi"), &FieldType::String, false).unwrap(),
            json!("hi")
        );
        assert_eq!(
            coerce_scalar(&json!(7), &FieldType::Integer, false).unwrap(),
            json!(7)
        );
        assert_eq!(
            coerce_scalar(&json!(true), &FieldType::Boolean, false).unwrap(),
            json!(true)
        );
    }

    #[test]
    fn test_integer_widens_to_float() {
        let coerced = coerce_scalar(&json!(10), &FieldType::Float, false).unwrap();
        assert_eq!(coerced, json!(10.0));
        assert!(coerced.is_f64());
    }

    #[test]
    fn test_lossless_float_to_integer() {
        assert_eq!(
            coerce_scalar(&json!(2.0), &FieldType::Integer, false).unwrap(),
            json!(2)
        );
    }

    #[test]
    fn test_fractional_float_to_integer_rejected() {
        let err = coerce_scalar(&json!(1.5), &FieldType::Integer, false).unwrap_err();
        assert!(err.message.contains("fractional"));
    }

    #[test]
    fn test_numeric_string_requires_policy() {
        assert!(coerce_scalar(&json!("02108"), &FieldType::Integer, false).is_err());
        assert_eq!(
            coerce_scalar(&json!("02108"), &FieldType::Integer, true).unwrap(),
            json!(2108)
        );
        assert_eq!(
            coerce_scalar(&json!("1.5"), &FieldType::Float, true).unwrap(),
            json!(1.5)
        );
    }

    #[test]
    fn test_non_numeric_string_rejected_under_policy() {
        let err = coerce_scalar(&json!("abc"), &FieldType::Integer, true).unwrap_err();
        assert!(err.message.contains("abc"));
        assert!(coerce_scalar(&json!("abc"), &FieldType::Float, true).is_err());
    }

    #[test]
    fn test_boolean_accepts_only_boolean() {
        assert!(coerce_scalar(&json!(1), &FieldType::Boolean, false).is_err());
        assert!(coerce_scalar(&json!("true"), &FieldType::Boolean, false).is_err());
    }

    #[test]
    fn test_string_accepts_only_string() {
        let err = coerce_scalar(&json!(12), &FieldType::String, false).unwrap_err();
        assert_eq!(err.expected, "string");
        assert_eq!(err.got, "integer");
    }

    #[test]
    fn test_u64_overflow_rejected() {
        let err = coerce_scalar(&json!(u64::MAX), &FieldType::Integer, false).unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_null_never_coerces() {
        assert!(coerce_scalar(&json!(null), &FieldType::String, false).is_err());
        assert!(coerce_scalar(&json!(null), &FieldType::Integer, true).is_err());
    }
}
