//! End-to-end record scenarios: construction, reads, mutation and equality
//! for the `Person`, `Pet` and `Point` classes.

use pretty_assertions::assert_eq;
use records_core::{
    FieldConstraint, Kind, Record, RecordClass, RecordError, RecordInput, SchemaRegistry, Value,
};
use std::sync::Once;

const FIRST_NAME: &str = "Mario";
const LAST_NAME: &str = "Rossi";
const AGE: i64 = 38;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("records_core=debug")
            .try_init();
    });
}

fn person_class() -> RecordClass {
    RecordClass::builder("Person")
        .field("first_name", FieldConstraint::of_kinds([Kind::String], false).unwrap())
        .field("last_name", FieldConstraint::of_kinds([Kind::String], false).unwrap())
        .field("age", FieldConstraint::of_kinds([Kind::Int], false).unwrap())
        .build()
        .unwrap()
}

fn pet_class(person: &RecordClass) -> RecordClass {
    RecordClass::builder("Pet")
        .field("name", FieldConstraint::of_kinds([Kind::String], false).unwrap())
        .field(
            "owner",
            FieldConstraint::of_kinds([Kind::Record(person.clone())], true).unwrap(),
        )
        .build()
        .unwrap()
}

fn point_class() -> RecordClass {
    RecordClass::builder("Point")
        .field("x", FieldConstraint::of_kinds([Kind::Int, Kind::Float], false).unwrap())
        .field("y", FieldConstraint::of_kinds([Kind::Int, Kind::Float], false).unwrap())
        .build()
        .unwrap()
}

fn mario(person: &RecordClass) -> Record {
    Record::construct(
        person,
        RecordInput::new()
            .entry("first_name", FIRST_NAME)
            .entry("last_name", LAST_NAME)
            .entry("age", AGE),
    )
    .unwrap()
}

#[test]
fn test_person_signature() {
    init_tracing();
    let person = person_class();

    let err = Record::construct(
        &person,
        RecordInput::from_mapping([
            ("first_name", Value::from(FIRST_NAME)),
            ("last_name", Value::from(LAST_NAME)),
            ("age", Value::from(AGE)),
        ])
        .entry("first_name", FIRST_NAME)
        .entry("last_name", LAST_NAME)
        .entry("age", AGE),
    )
    .unwrap_err();
    assert_eq!(err, RecordError::ConflictingInput);
    assert_eq!(
        err.to_string(),
        "Must specify input mapping or entries, both are not allowed"
    );

    let err = Record::from_entries(
        &person,
        [("first_name", FIRST_NAME), ("last_name", LAST_NAME)],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "On Person: Missing attribute `age`.");

    let err = Record::from_entries(
        &person,
        [
            ("first_name", Value::from(FIRST_NAME)),
            ("last_name", Value::from(AGE)),
            ("age", Value::from(AGE)),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Person: Invalid attribute `last_name`, got 38 which is a int64 (expected string)."
    );
    assert_eq!(err.field(), Some("last_name"));

    let mut sut = mario(&person);
    assert_eq!(sut["first_name"], Value::from(FIRST_NAME));
    assert_eq!(sut["last_name"], Value::from(LAST_NAME));
    assert_eq!(sut["age"], Value::from(AGE));

    let attributes = sut.attributes();
    assert_eq!(attributes.len(), 3);
    for name in ["first_name", "last_name", "age"] {
        assert_eq!(attributes.get(name), person.own_field(name));
    }

    let err = sut.set("age", AGE as f64).unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Person: Invalid attribute `age`, got 38.0 which is a float64 (expected int64)."
    );
    assert_eq!(sut["age"], Value::from(AGE));
}

#[test]
fn test_person_equality() {
    let person = person_class();
    let sut1 = mario(&person);
    let sut2 = mario(&person);
    let sut3 = Record::from_entries(
        &person,
        [
            ("first_name", Value::from(LAST_NAME)),
            ("last_name", Value::from(FIRST_NAME)),
            ("age", Value::from(AGE)),
        ],
    )
    .unwrap();

    assert_eq!(sut1, sut1);
    assert_eq!(sut1, sut2);
    assert_eq!(sut2, sut1);
    assert_ne!(sut1, sut3);
    assert_ne!(sut2, sut3);
}

#[test]
fn test_equality_discriminates_classes() {
    let person = person_class();
    let employee = RecordClass::builder("Employee")
        .extends(&person)
        .build()
        .unwrap();
    let twin = person_class();

    let base = mario(&person);
    let derived = mario(&employee);
    let other = mario(&twin);

    assert_eq!(base.iter().collect::<Vec<_>>(), derived.iter().collect::<Vec<_>>());
    assert_ne!(base, derived);
    assert_ne!(derived, base);
    assert_ne!(base, other);
}

#[test]
fn test_pet_signature() {
    init_tracing();
    let person = person_class();
    let pet = pet_class(&person);
    let owner = mario(&person);

    let err = Record::construct(
        &pet,
        RecordInput::from_mapping([
            ("name", Value::from("Garfield")),
            ("owner", Value::from(owner.clone())),
        ])
        .entry("name", "Garfield")
        .entry("owner", owner.clone()),
    )
    .unwrap_err();
    assert_eq!(err, RecordError::ConflictingInput);

    let err = Record::construct(&pet, RecordInput::new()).unwrap_err();
    assert_eq!(err.to_string(), "On Pet: Missing attribute `name`.");

    let err = Record::from_entries(
        &pet,
        [("name", Value::from("Garfield")), ("owner", Value::from(FIRST_NAME))],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Pet: Invalid attribute `owner`, got Mario which is a string (expected Person | null)."
    );

    let sut = Record::from_entries(&pet, [("name", "Garfield")]).unwrap();
    assert_eq!(sut["name"], Value::from("Garfield"));
    assert_eq!(sut["owner"], Value::Null);

    let mut sut = Record::from_entries(
        &pet,
        [("name", Value::from("Garfield")), ("owner", Value::from(owner.clone()))],
    )
    .unwrap();
    assert_eq!(sut["owner"], Value::Record(owner.clone()));
    assert_eq!(sut["owner"].as_record(), Some(&owner));

    sut.set("owner", Value::Null).unwrap();
    assert_eq!(sut["owner"], Value::Null);

    let err = sut.set("owner", FIRST_NAME).unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Pet: Invalid attribute `owner`, got Mario which is a string (expected Person | null)."
    );
    assert_eq!(sut["owner"], Value::Null);
}

#[test]
fn test_nested_record_requires_exact_class() {
    let person = person_class();
    let employee = RecordClass::builder("Employee")
        .extends(&person)
        .build()
        .unwrap();
    let pet = pet_class(&person);

    let err = Record::from_entries(
        &pet,
        [
            ("name", Value::from("Garfield")),
            ("owner", Value::from(mario(&employee))),
        ],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RecordError::InvalidAttribute { ref field, ref actual, .. }
            if field == "owner" && actual == "Employee"
    ));
}

#[test]
fn test_point_signature() {
    let point = point_class();

    let err = Record::construct(
        &point,
        RecordInput::from_mapping([("x", 0), ("y", 0)])
            .entry("x", 0)
            .entry("y", 0),
    )
    .unwrap_err();
    assert_eq!(err, RecordError::ConflictingInput);

    let err = Record::from_entries(&point, [("x", 0)]).unwrap_err();
    assert_eq!(err, RecordError::missing("Point", "y"));

    let err = Record::from_entries(&point, [("x", Value::from("0")), ("y", Value::from(0))])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Point: Invalid attribute `x`, got 0 which is a string (expected int64 | float64)."
    );

    let mut sut = Record::from_entries(&point, [("x", 0), ("y", 0)]).unwrap();
    assert_eq!(sut["x"], Value::Int(0));
    assert_eq!(sut["y"], Value::Int(0));

    let err = sut.set("y", "0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Point: Invalid attribute `y`, got 0 which is a string (expected int64 | float64)."
    );

    let mut sut = Record::from_map(&point, [("x", 1.2), ("y", 3.5)]).unwrap();
    assert_eq!(sut["x"], Value::Float(1.2));
    assert_eq!(sut["y"], Value::Float(3.5));

    let err = sut.set("x", "3.5").unwrap_err();
    assert_eq!(
        err.to_string(),
        "On Point: Invalid attribute `x`, got 3.5 which is a string (expected int64 | float64)."
    );
    assert_eq!(sut["x"], Value::Float(1.2));
}

#[test]
fn test_point_difference_is_caller_level() {
    let point = point_class();
    let a = Record::from_map(&point, [("x", 1), ("y", 1)]).unwrap();
    let b = Record::from_map(&point, [("x", 2), ("y", 2)]).unwrap();

    let dx = b["x"].as_int().unwrap() - a["x"].as_int().unwrap();
    assert_eq!(dx, 1);

    let err = Record::from_map(&point, [("x", 3)]).unwrap_err();
    assert_eq!(err.field(), Some("y"));
    assert!(matches!(err, RecordError::MissingAttribute { .. }));
}

#[test]
fn test_conflict_is_reported_before_field_checks() {
    let point = point_class();
    // Both sources are invalid on their own, the conflict still wins
    let err = Record::construct(
        &point,
        RecordInput::from_mapping([("x", "a")]).entry("y", "b"),
    )
    .unwrap_err();
    assert_eq!(err, RecordError::ConflictingInput);
}

#[test]
fn test_inherited_schema_is_enforced() {
    let point = point_class();
    let point3d = RecordClass::builder("Point3D")
        .extends(&point)
        .field("z", FieldConstraint::of_kinds([Kind::Int, Kind::Float], false).unwrap())
        .build()
        .unwrap();

    let err = Record::from_map(&point3d, [("x", 1), ("y", 2)]).unwrap_err();
    assert_eq!(err, RecordError::missing("Point3D", "z"));

    let mut sut = Record::from_map(&point3d, [("x", 1), ("y", 2), ("z", 3)]).unwrap();
    assert!(sut.set("x", "left").is_err());
    assert_eq!(
        sut.attributes().field_names().collect::<Vec<_>>(),
        vec!["x", "y", "z"]
    );
}

#[test]
fn test_construction_populates_global_registry() {
    let point = point_class();
    assert!(!SchemaRegistry::global().contains(&point));

    let a = Record::from_map(&point, [("x", 1), ("y", 1)]).unwrap();
    assert!(SchemaRegistry::global().contains(&point));

    let b = Record::from_map(&point, [("x", 1), ("y", 1)]).unwrap();
    assert!(std::ptr::eq(a.attributes(), b.attributes()));
}
