//! Validation violation types.
//!
//! This module provides [`Violation`] for single validation failures and
//! [`Violations`] for accumulating every failure found in one pass.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// The specific bound a constraint violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Minimum string length (in characters).
    MinLength,
    /// Maximum string length (in characters).
    MaxLength,
    /// Exclusive numeric lower bound.
    GreaterThan,
    /// Inclusive numeric lower bound.
    GreaterThanOrEqual,
    /// Inclusive numeric upper bound.
    LessThanOrEqual,
}

impl Bound {
    /// Machine-readable code for this bound.
    pub fn code(&self) -> &'static str {
        match self {
            Bound::MinLength => "min_length",
            Bound::MaxLength => "max_length",
            Bound::GreaterThan => "greater_than",
            Bound::GreaterThanOrEqual => "greater_than_or_equal",
            Bound::LessThanOrEqual => "less_than_or_equal",
        }
    }
}

/// Classification of a single validation failure.
///
/// Failures inside nested shapes and sequence elements are re-surfaced at the
/// parent level with their kind wrapped in [`ViolationKind::NestedValidationFailure`]
/// or [`ViolationKind::SequenceElementFailure`]. Use [`ViolationKind::leaf`]
/// to classify a violation regardless of how deeply it was re-surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A required field with no default was absent from the input.
    MissingRequiredField,
    /// The input value's runtime type cannot be coerced to the declared type.
    TypeMismatch,
    /// A coerced value failed a declared constraint; carries the bound violated.
    ConstraintViolation(Bound),
    /// A violation re-surfaced from a nested shape field.
    NestedValidationFailure(Box<ViolationKind>),
    /// A violation re-surfaced from an element of a sequence field.
    SequenceElementFailure(Box<ViolationKind>),
}

impl ViolationKind {
    /// Unwraps nested/sequence wrapping to the innermost kind.
    ///
    /// A type mismatch inside `students[1]` is reported as a sequence-element
    /// failure, but its leaf is still [`ViolationKind::TypeMismatch`].
    pub fn leaf(&self) -> &ViolationKind {
        match self {
            ViolationKind::NestedValidationFailure(child) => child.leaf(),
            ViolationKind::SequenceElementFailure(child) => child.leaf(),
            other => other,
        }
    }

    /// Machine-readable code for the leaf kind.
    pub fn code(&self) -> &'static str {
        match self.leaf() {
            ViolationKind::MissingRequiredField => "missing_required_field",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::ConstraintViolation(bound) => bound.code(),
            // leaf() never returns a wrapper
            ViolationKind::NestedValidationFailure(_)
            | ViolationKind::SequenceElementFailure(_) => unreachable!(),
        }
    }

    /// Returns true if the leaf kind is [`ViolationKind::TypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.leaf(), ViolationKind::TypeMismatch)
    }

    /// Returns true if the leaf kind is [`ViolationKind::MissingRequiredField`].
    pub fn is_missing_required(&self) -> bool {
        matches!(self.leaf(), ViolationKind::MissingRequiredField)
    }

    /// Returns the violated bound if the leaf kind is a constraint violation.
    pub fn violated_bound(&self) -> Option<Bound> {
        match self.leaf() {
            ViolationKind::ConstraintViolation(bound) => Some(*bound),
            _ => None,
        }
    }
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::NestedValidationFailure(child) => write!(f, "nested.{}", child),
            ViolationKind::SequenceElementFailure(child) => write!(f, "element.{}", child),
            other => write!(f, "{}", other.code()),
        }
    }
}

/// A single validation failure with full context.
///
/// `Violation` captures everything relevant about one failed rule:
/// - **path**: where in the record the failure occurred (dotted/indexed)
/// - **kind**: the classification, including nested/element wrapping
/// - **message**: human-readable description
/// - **got**: the offending value or its runtime type (optional)
/// - **expected**: what the shape declared instead (optional)
///
/// # Example
///
/// ```rust
/// use conform::{FieldPath, Violation, ViolationKind};
///
/// let violation = Violation::new(
///     FieldPath::from_field("quantity"),
///     ViolationKind::TypeMismatch,
///     "expected integer",
/// )
/// .with_got("string")
/// .with_expected("integer");
///
/// assert!(violation.kind.is_type_mismatch());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Path to the value that failed validation.
    pub path: FieldPath,
    /// Classification of the failure.
    pub kind: ViolationKind,
    /// Human-readable message.
    pub message: String,
    /// The offending value, formatted as a string.
    pub got: Option<String>,
    /// What the shape declared instead.
    pub expected: Option<String>,
}

impl Violation {
    /// Creates a new violation with the given path, kind and message.
    pub fn new(path: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            got: None,
            expected: None,
        }
    }

    /// Sets the offending value and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the expectation and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Re-surfaces this violation as a nested-shape failure.
    pub(crate) fn into_nested(mut self) -> Self {
        self.kind = ViolationKind::NestedValidationFailure(Box::new(self.kind));
        self
    }

    /// Re-surfaces this violation as a sequence-element failure.
    pub(crate) fn into_element(mut self) -> Self {
        self.kind = ViolationKind::SequenceElementFailure(Box::new(self.kind));
        self
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for Violation {}

/// A non-empty collection of validation violations.
///
/// `Violations` wraps a `NonEmptyVec<Violation>` so a failed validation is
/// guaranteed to carry at least one violation. This is what makes
/// `Validation<T, Violations>` well-formed: a failure always has evidence.
///
/// # Combining
///
/// `Violations` implements `Semigroup`, so failures from independent fields
/// combine into one flat collection:
///
/// ```rust
/// use conform::{FieldPath, Violation, ViolationKind, Violations};
/// use stillwater::prelude::*;
///
/// let a = Violations::single(Violation::new(
///     FieldPath::from_field("name"),
///     ViolationKind::MissingRequiredField,
///     "required field 'name' is missing",
/// ));
/// let b = Violations::single(Violation::new(
///     FieldPath::from_field("age"),
///     ViolationKind::TypeMismatch,
///     "expected integer",
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    /// Creates a `Violations` containing a single violation.
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Creates a `Violations` from a `Vec<Violation>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty. Callers aggregate into a plain
    /// `Vec` and only construct `Violations` after observing it is non-empty.
    pub fn from_vec(violations: Vec<Violation>) -> Self {
        Self(NonEmptyVec::from_vec(violations).expect("Violations requires at least one violation"))
    }

    /// Returns the number of violations in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Returns the first violation.
    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Returns all violations at the given path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&Violation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Returns all violations whose leaf kind matches `kind`.
    pub fn of_kind(&self, kind: &ViolationKind) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.kind.leaf() == kind).collect()
    }

    /// Converts this collection into a `Vec<Violation>`.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = Box<dyn Iterator<Item = &'a Violation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// Violations crosses thread boundaries when shapes are validated
// concurrently; keep the auto traits pinned down.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violation>();
    assert_sync::<Violation>();
    assert_send::<Violations>();
    assert_sync::<Violations>();
};
