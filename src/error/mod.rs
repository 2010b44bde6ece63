//! Violation types for validation failures.

mod violation;

pub use violation::{Bound, Violation, ViolationKind, Violations};
