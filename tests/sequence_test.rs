//! Integration tests for ordered-sequence fields.

use conform::{FieldSpec, FieldType, ShapeSpec, ViolationKind};
use serde_json::json;

fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

fn unwrap_failure<T: std::fmt::Debug, E>(v: stillwater::Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

fn classroom() -> ShapeSpec {
    // shape Classroom{room_number:str, students:sequence<str>, capacity:int}
    ShapeSpec::builder("Classroom")
        .field("room_number", FieldSpec::string())
        .field("students", FieldSpec::sequence(FieldType::String))
        .field("capacity", FieldSpec::integer())
        .build()
        .unwrap()
}

#[test]
fn test_valid_sequence() {
    let record = unwrap_success(classroom().validate(&json!({
        "room_number": "A101",
        "students": ["Alice", "Bob", "Charlie"],
        "capacity": 30
    })));

    assert_eq!(record.get("students"), Some(&json!(["Alice", "Bob", "Charlie"])));
}

#[test]
fn test_one_bad_element_yields_one_indexed_violation() {
    let errors = unwrap_failure(classroom().validate(&json!({
        "room_number": "A1",
        "students": ["Krish", 123],
        "capacity": 30
    })));

    // exactly one violation, at students[1], classified as a type mismatch
    assert_eq!(errors.len(), 1);
    let violation = errors.first();
    assert_eq!(violation.path.to_string(), "students[1]");
    assert!(violation.kind.is_type_mismatch());
    assert!(matches!(
        violation.kind,
        ViolationKind::SequenceElementFailure(_)
    ));
}

#[test]
fn test_valid_elements_do_not_suppress_invalid_ones() {
    let errors = unwrap_failure(classroom().validate(&json!({
        "room_number": "A1",
        "students": [1, "Bob", 3, "Dana", 5],
        "capacity": 30
    })));

    assert_eq!(errors.len(), 3);
    let paths: Vec<_> = errors.iter().map(|v| v.path.to_string()).collect();
    assert_eq!(paths, vec!["students[0]", "students[2]", "students[4]"]);
}

#[test]
fn test_empty_sequence_is_valid() {
    let record = unwrap_success(classroom().validate(&json!({
        "room_number": "A1", "students": [], "capacity": 0
    })));

    assert_eq!(record.get("students"), Some(&json!([])));
}

#[test]
fn test_non_sequence_input_is_mismatch() {
    let errors = unwrap_failure(classroom().validate(&json!({
        "room_number": "A1", "students": "Krish", "capacity": 30
    })));

    assert_eq!(errors.len(), 1);
    let violation = errors.first();
    assert_eq!(violation.path.to_string(), "students");
    assert_eq!(violation.expected, Some("sequence<string>".to_string()));
}

#[test]
fn test_elements_are_coerced_independently() {
    let shape = ShapeSpec::builder("Readings")
        .field("values", FieldSpec::sequence(FieldType::Float))
        .build()
        .unwrap();

    let record = unwrap_success(shape.validate(&json!({"values": [1, 2.5, 3]})));
    assert_eq!(record.get("values"), Some(&json!([1.0, 2.5, 3.0])));
}

#[test]
fn test_sequence_of_nested_shapes() {
    let employee = ShapeSpec::builder("Employee")
        .field("name", FieldSpec::string())
        .field("age", FieldSpec::integer())
        .build()
        .unwrap();
    let team = ShapeSpec::builder("Team")
        .field("members", FieldSpec::sequence(FieldType::Shape(employee.into())))
        .build()
        .unwrap();

    let record = unwrap_success(team.validate(&json!({
        "members": [
            {"name": "Alice", "age": 30},
            {"name": "Bob", "age": 25}
        ]
    })));
    assert_eq!(
        record.get("members"),
        Some(&json!([
            {"name": "Alice", "age": 30},
            {"name": "Bob", "age": 25}
        ]))
    );

    let errors = unwrap_failure(team.validate(&json!({
        "members": [
            {"name": "Alice", "age": 30},
            {"name": "Bob"}
        ]
    })));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "members[1].age");
    assert!(errors.first().kind.is_missing_required());
}

#[test]
fn test_sequence_of_sequences() {
    let shape = ShapeSpec::builder("Grid")
        .field(
            "rows",
            FieldSpec::sequence(FieldType::Sequence(Box::new(FieldType::Integer))),
        )
        .build()
        .unwrap();

    let record = unwrap_success(shape.validate(&json!({"rows": [[1, 2], [3]]})));
    assert_eq!(record.get("rows"), Some(&json!([[1, 2], [3]])));

    let errors = unwrap_failure(shape.validate(&json!({"rows": [[1], ["x", 2]]})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "rows[1][0]");
}

#[test]
fn test_sequence_failures_accumulate_with_sibling_failures() {
    let errors = unwrap_failure(classroom().validate(&json!({
        "students": ["Krish", 123],
        "capacity": "thirty"
    })));

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.of_kind(&ViolationKind::MissingRequiredField).len(), 1);
    assert_eq!(errors.of_kind(&ViolationKind::TypeMismatch).len(), 2);
}
