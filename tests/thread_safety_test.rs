//! Tests for concurrent validation against shared, immutable shapes.

use conform::{FieldSpec, FieldType, ShapeRegistry, ShapeSpec};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn classroom() -> ShapeSpec {
    ShapeSpec::builder("Classroom")
        .field("room_number", FieldSpec::string())
        .field("students", FieldSpec::sequence(FieldType::String))
        .field("capacity", FieldSpec::integer())
        .build()
        .unwrap()
}

#[test]
fn test_shape_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShapeSpec>();
    assert_send_sync::<ShapeRegistry>();
}

#[test]
fn test_concurrent_validation_against_shared_shape() {
    let shape = Arc::new(classroom());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shape = Arc::clone(&shape);
            thread::spawn(move || {
                let input = json!({
                    "room_number": format!("A{}", i),
                    "students": ["Alice", "Bob"],
                    "capacity": 30
                });
                let record = shape.validate(&input).into_result().unwrap();
                assert_eq!(record.get("room_number"), Some(&json!(format!("A{}", i))));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let shape = Arc::new(classroom());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shape = Arc::clone(&shape);
            thread::spawn(move || {
                let errors = shape
                    .validate(&json!({
                        "room_number": "A1",
                        "students": ["Krish", i],
                        "capacity": 30
                    }))
                    .into_result()
                    .unwrap_err();
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.first().path.to_string(), "students[1]");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = ShapeRegistry::new();
    registry.register(classroom()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                let result = registry
                    .validate(
                        "Classroom",
                        &json!({"room_number": "B2", "students": [], "capacity": 10}),
                    )
                    .unwrap();
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_factory_defaults_work_across_threads() {
    let shape = Arc::new(
        ShapeSpec::builder("User")
            .field("username", FieldSpec::string())
            .field("email", FieldSpec::string().default_factory(|| json!("user@example.com")))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shape = Arc::clone(&shape);
            thread::spawn(move || {
                let record = shape
                    .validate(&json!({"username": format!("user{}", i)}))
                    .into_result()
                    .unwrap();
                assert_eq!(record.get("email"), Some(&json!("user@example.com")));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
