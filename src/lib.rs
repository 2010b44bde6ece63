//! # Conform
//!
//! A runtime schema validation and coercion engine that reports every
//! violation found in a single pass, rather than short-circuiting on the
//! first failure.
//!
//! ## Overview
//!
//! A [`ShapeSpec`] declares a record's expected structure: field names,
//! declared types, constraints, optionality, and defaults. Validating an
//! untyped input mapping against a shape coerces compatible values (integer
//! input widens to a float field, never the lossy reverse), applies
//! defaults and default factories, recurses into nested shapes and
//! sequences, and accumulates all violations through stillwater's
//! `Validation` type.
//!
//! ## Core Types
//!
//! - [`ShapeSpec`] / [`FieldSpec`]: declaration API for record shapes
//! - [`ValidatedRecord`]: normalized output, with an explicit absent
//!   sentinel distinct from a present null
//! - [`FieldPath`]: dotted/indexed paths to values (e.g. `students[1]`,
//!   `address.zip_code`)
//! - [`Violation`] / [`Violations`]: one path-qualified failure, and the
//!   non-empty collection of every failure from one pass
//! - [`ShapeRegistry`]: thread-safe store of named shapes
//!
//! ## Example
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
//! let record = employee
//!     .validate(&json!({"id": 1, "name": "John", "department": "IT"}))
//!     .into_result()
//!     .unwrap();
//!
//! assert_eq!(record.get("is_active"), Some(&json!(true)));
//! assert!(record.is_absent("salary"));
//! ```

pub mod error;
pub mod path;
pub mod record;
pub mod registry;
pub mod shape;

mod coerce;
mod describe;
mod validate;

pub use error::{Bound, Violation, ViolationKind, Violations};
pub use path::{FieldPath, PathSegment};
pub use record::{FieldValue, ValidatedRecord};
pub use registry::{RegistryError, ShapeRegistry};
pub use shape::{Constraint, FieldSpec, FieldType, ShapeBuilder, ShapeError, ShapeSpec};

/// Type alias for validation results carrying accumulated violations.
pub type ValidationResult<T> = stillwater::Validation<T, Violations>;
