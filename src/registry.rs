//! Shape registry for named shape storage.
//!
//! This module provides [`ShapeRegistry`], a thread-safe store of shapes
//! declared at startup and shared by reference across all validation calls.

use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::record::ValidatedRecord;
use crate::shape::ShapeSpec;
use crate::ValidationResult;

/// A thread-safe registry of named shapes.
///
/// Shapes are registered once, under their declared names, and retrieved as
/// `Arc<ShapeSpec>` for shared read-only use. Registration is serialized
/// behind a write lock; validation only reads.
///
/// # Example
///
/// ```rust
/// use conform::{FieldSpec, ShapeRegistry, ShapeSpec};
/// use serde_json::json;
///
/// let registry = ShapeRegistry::new();
/// registry
///     .register(
///         ShapeSpec::builder("User")
///             .field("username", FieldSpec::string())
///             .field("age", FieldSpec::integer().default(18))
///             .build()
///             .unwrap(),
///     )
///     .unwrap();
///
/// let result = registry.validate("User", &json!({"username": "alice"})).unwrap();
/// assert!(result.is_success());
/// ```
pub struct ShapeRegistry {
    shapes: Arc<RwLock<HashMap<String, Arc<ShapeSpec>>>>,
}

impl ShapeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            shapes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a shape under its declared name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a shape with the same
    /// name is already registered.
    pub fn register(&self, shape: impl Into<Arc<ShapeSpec>>) -> Result<(), RegistryError> {
        let shape = shape.into();
        let mut shapes = self.shapes.write();

        if shapes.contains_key(shape.name()) {
            return Err(RegistryError::DuplicateName(shape.name().to_string()));
        }

        shapes.insert(shape.name().to_string(), shape);
        Ok(())
    }

    /// Retrieves a shape by name.
    pub fn get(&self, name: &str) -> Option<Arc<ShapeSpec>> {
        self.shapes.read().get(name).cloned()
    }

    /// Validates an input mapping against a named shape.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ShapeNotFound`] if no shape with the given
    /// name is registered. Validation failures are carried inside the
    /// returned `Validation`, not as a registry error.
    pub fn validate(
        &self,
        name: &str,
        input: &Value,
    ) -> Result<ValidationResult<ValidatedRecord>, RegistryError> {
        let shape = self
            .get(name)
            .ok_or_else(|| RegistryError::ShapeNotFound(name.to_string()))?;

        Ok(shape.validate(input))
    }

    /// Describes every registered shape under a `$defs` key.
    pub fn describe_all(&self) -> Value {
        let shapes = self.shapes.read();
        let mut defs = serde_json::Map::new();

        for (name, shape) in shapes.iter() {
            defs.insert(name.clone(), shape.describe());
        }

        json!({ "$defs": defs })
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ShapeRegistry {
    fn clone(&self) -> Self {
        Self {
            shapes: Arc::clone(&self.shapes),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a shape with a name that already exists.
    #[error("shape '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate against a shape name that doesn't exist.
    #[error("shape '{0}' not found")]
    ShapeNotFound(String),
}
