//! The validation engine.
//!
//! Validation is a pure, single-pass function of (shape, input): every field
//! is resolved, coerced, and constraint-checked in declaration order, and
//! every violation found anywhere in the pass — including inside nested
//! shapes and sequence elements — is aggregated into one flat collection.
//! No violation aborts evaluation of sibling fields.

use serde_json::Value;
use stillwater::Validation;

use crate::coerce::{coerce_scalar, RuntimeType};
use crate::error::{Bound, Violation, ViolationKind, Violations};
use crate::path::FieldPath;
use crate::record::{FieldValue, ValidatedRecord};
use crate::shape::{AbsentResolution, Constraint, FieldSpec, FieldType, ShapeSpec};
use crate::ValidationResult;

impl ShapeSpec {
    /// Validates an input mapping against this shape.
    ///
    /// On success, returns a [`ValidatedRecord`] with one binding per
    /// declared field: the coerced input value, a default, or the absent
    /// sentinel. On failure, returns the full set of violations found during
    /// the pass. Unknown input keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform::{FieldSpec, ShapeSpec};
    /// use serde_json::json;
    ///
    /// let item = ShapeSpec::builder("Item")
    ///     .field("name", FieldSpec::string().min_length(2).max_length(50))
    ///     .field("price", FieldSpec::float().greater_than(0.0).less_than_or_equal(1000.0))
    ///     .field("quantity", FieldSpec::integer().greater_than_or_equal(0.0))
    ///     .build()
    ///     .unwrap();
    ///
    /// let record = item
    ///     .validate(&json!({"name": "Book", "price": 10, "quantity": 10}))
    ///     .into_result()
    ///     .unwrap();
    ///
    /// // integer input widened to the declared float type
    /// assert_eq!(record.get("price"), Some(&json!(10.0)));
    /// ```
    pub fn validate(&self, input: &Value) -> ValidationResult<ValidatedRecord> {
        self.validate_at(input, &FieldPath::root())
    }

    /// Validates with an explicit path prefix; nested shapes recurse here.
    pub(crate) fn validate_at(
        &self,
        input: &Value,
        path: &FieldPath,
    ) -> ValidationResult<ValidatedRecord> {
        let obj = match input.as_object() {
            Some(o) => o,
            None => {
                return Validation::Failure(Violations::single(
                    Violation::new(
                        path.clone(),
                        ViolationKind::TypeMismatch,
                        format!("expected mapping for shape '{}'", self.name()),
                    )
                    .with_expected("mapping")
                    .with_got(RuntimeType::of(input).name()),
                ));
            }
        };

        let mut violations = Vec::new();
        let mut record = ValidatedRecord::new();

        for (name, field) in self.fields() {
            let field_path = path.push_field(name);

            match obj.get(name) {
                None => match field.resolve_absent() {
                    AbsentResolution::Value(value) => {
                        record.insert(name, FieldValue::Present(value));
                    }
                    AbsentResolution::Absent => record.insert(name, FieldValue::Absent),
                    AbsentResolution::Missing => violations.push(
                        Violation::new(
                            field_path,
                            ViolationKind::MissingRequiredField,
                            format!("required field '{}' is missing", name),
                        )
                        .with_expected(field.field_type().name()),
                    ),
                },
                Some(value) => match self.resolve_present(field, value, &field_path) {
                    Ok(resolved) => record.insert(name, resolved),
                    // field omitted from the record; siblings keep going
                    Err(errs) => violations.extend(errs),
                },
            }
        }

        if violations.is_empty() {
            Validation::Success(record)
        } else {
            Validation::Failure(Violations::from_vec(violations))
        }
    }

    /// Coerces and constraint-checks a present input value.
    fn resolve_present(
        &self,
        field: &FieldSpec,
        value: &Value,
        path: &FieldPath,
    ) -> Result<FieldValue, Vec<Violation>> {
        // A present null is only meaningful for optional fields; it binds
        // as-is and skips coercion and constraints.
        if value.is_null() {
            if field.is_optional() {
                return Ok(FieldValue::Present(Value::Null));
            }
            return Err(vec![Violation::new(
                path.clone(),
                ViolationKind::TypeMismatch,
                format!("expected {}, got null", field.field_type().name()),
            )
            .with_expected(field.field_type().name())
            .with_got("null")]);
        }

        match field.field_type() {
            FieldType::Shape(shape) => match shape.validate_at(value, path) {
                Validation::Success(nested) => Ok(FieldValue::Present(nested.into_value())),
                Validation::Failure(errs) => {
                    Err(errs.into_vec().into_iter().map(Violation::into_nested).collect())
                }
            },
            FieldType::Sequence(element) => self.resolve_sequence(element, value, path),
            scalar => {
                let coerced = coerce_scalar(value, scalar, self.coerces_numeric_strings())
                    .map_err(|failure| {
                        vec![Violation::new(
                            path.clone(),
                            ViolationKind::TypeMismatch,
                            failure.message,
                        )
                        .with_expected(failure.expected)
                        .with_got(failure.got)]
                    })?;

                let violations: Vec<Violation> = field
                    .constraints()
                    .iter()
                    .filter_map(|constraint| check_constraint(constraint, &coerced, path))
                    .collect();

                if violations.is_empty() {
                    Ok(FieldValue::Present(coerced))
                } else {
                    Err(violations)
                }
            }
        }
    }

    /// Validates every element of a sequence field independently. Any
    /// sequence-like input is accepted; each element failure is re-surfaced
    /// with an index-qualified path and does not suppress its siblings.
    fn resolve_sequence(
        &self,
        element: &FieldType,
        value: &Value,
        path: &FieldPath,
    ) -> Result<FieldValue, Vec<Violation>> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                return Err(vec![Violation::new(
                    path.clone(),
                    ViolationKind::TypeMismatch,
                    format!("expected sequence<{}>", element.name()),
                )
                .with_expected(format!("sequence<{}>", element.name()))
                .with_got(RuntimeType::of(value).name())]);
            }
        };

        let mut violations = Vec::new();
        let mut coerced = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.resolve_element(element, item, &path.push_index(index)) {
                Ok(value) => coerced.push(value),
                Err(errs) => {
                    violations.extend(errs.into_iter().map(Violation::into_element));
                }
            }
        }

        if violations.is_empty() {
            Ok(FieldValue::Present(Value::Array(coerced)))
        } else {
            Err(violations)
        }
    }

    /// Coerces one sequence element to the declared element type.
    fn resolve_element(
        &self,
        element: &FieldType,
        item: &Value,
        path: &FieldPath,
    ) -> Result<Value, Vec<Violation>> {
        match element {
            FieldType::Shape(shape) => match shape.validate_at(item, path) {
                Validation::Success(nested) => Ok(nested.into_value()),
                Validation::Failure(errs) => {
                    Err(errs.into_vec().into_iter().map(Violation::into_nested).collect())
                }
            },
            FieldType::Sequence(inner) => {
                self.resolve_sequence(inner, item, path).map(|resolved| match resolved {
                    FieldValue::Present(value) => value,
                    // resolve_sequence only binds present values
                    FieldValue::Absent => Value::Null,
                })
            }
            scalar => coerce_scalar(item, scalar, self.coerces_numeric_strings())
                .map_err(|failure| {
                    vec![Violation::new(
                        path.clone(),
                        ViolationKind::TypeMismatch,
                        failure.message,
                    )
                    .with_expected(failure.expected)
                    .with_got(failure.got)]
                }),
        }
    }
}

/// Checks a single constraint against a coerced value.
///
/// Length bounds apply to strings, numeric bounds to numbers; a constraint
/// declared against a value of another type is inert rather than a runtime
/// violation, since coercion already fixed the value's type.
fn check_constraint(constraint: &Constraint, value: &Value, path: &FieldPath) -> Option<Violation> {
    match constraint {
        Constraint::MinLength(min) => {
            let len = value.as_str()?.chars().count();
            if len < *min {
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::ConstraintViolation(Bound::MinLength),
                        format!("length must be at least {}, got {}", min, len),
                    )
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        Constraint::MaxLength(max) => {
            let len = value.as_str()?.chars().count();
            if len > *max {
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::ConstraintViolation(Bound::MaxLength),
                        format!("length must be at most {}, got {}", max, len),
                    )
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        Constraint::GreaterThan(bound) => {
            let n = value.as_f64()?;
            if n <= *bound {
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::ConstraintViolation(Bound::GreaterThan),
                        format!("must be greater than {}, got {}", bound, n),
                    )
                    .with_expected(format!("> {}", bound))
                    .with_got(n.to_string()),
                )
            } else {
                None
            }
        }
        Constraint::GreaterThanOrEqual(bound) => {
            let n = value.as_f64()?;
            if n < *bound {
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::ConstraintViolation(Bound::GreaterThanOrEqual),
                        format!("must be at least {}, got {}", bound, n),
                    )
                    .with_expected(format!(">= {}", bound))
                    .with_got(n.to_string()),
                )
            } else {
                None
            }
        }
        Constraint::LessThanOrEqual(bound) => {
            let n = value.as_f64()?;
            if n > *bound {
                Some(
                    Violation::new(
                        path.clone(),
                        ViolationKind::ConstraintViolation(Bound::LessThanOrEqual),
                        format!("must be at most {}, got {}", bound, n),
                    )
                    .with_expected(format!("<= {}", bound))
                    .with_got(n.to_string()),
                )
            } else {
                None
            }
        }
    }
}
