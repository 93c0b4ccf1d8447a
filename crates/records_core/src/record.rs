//! Records: validated instances of a record class.

use crate::{RecordClass, RecordError, Result, Schema, ValidationContext, Value};
use indexmap::IndexMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Input data for constructing a [`Record`].
///
/// Carries either a mapping or a list of named entries. Supplying a
/// non-empty mapping together with any entry is a caller error reported as
/// [`RecordError::ConflictingInput`], even when both sources agree.
///
/// # Example
///
/// ```rust
/// use records_core::RecordInput;
///
/// let input = RecordInput::new().entry("x", 1).entry("y", 2.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordInput {
    mapping: IndexMap<String, Value>,
    entries: IndexMap<String, Value>,
}

impl RecordInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input from a mapping.
    pub fn from_mapping<K, V>(mapping: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::new().mapping(mapping)
    }

    /// Sets the mapping source.
    pub fn mapping<K, V>(mut self, mapping: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.mapping = mapping
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Adds a named entry.
    pub fn entry(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Adds several named entries.
    pub fn entries<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Resolves the single source of values.
    pub fn into_values(self) -> Result<IndexMap<String, Value>> {
        match (self.mapping.is_empty(), self.entries.is_empty()) {
            (false, false) => Err(RecordError::ConflictingInput),
            (false, true) => Ok(self.mapping),
            (true, _) => Ok(self.entries),
        }
    }
}

/// A validated instance of a [`RecordClass`].
///
/// Every field of the class schema holds a value satisfying its constraint,
/// from construction on and after every [`set`](Record::set). Values stored
/// under names outside the schema are auxiliary: they are not validated and
/// are ignored by equality.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldConstraint, Kind, Record, RecordClass, RecordInput, Value};
///
/// let coordinate = FieldConstraint::of_kinds([Kind::Int, Kind::Float], false).unwrap();
/// let point = RecordClass::builder("Point")
///     .field("x", coordinate.clone())
///     .field("y", coordinate)
///     .build()
///     .unwrap();
///
/// let mut p = Record::construct(&point, RecordInput::new().entry("x", 1).entry("y", 2)).unwrap();
/// assert_eq!(p["x"], Value::Int(1));
///
/// assert!(p.set("y", "up").is_err());
/// assert_eq!(p["y"], Value::Int(2));
/// ```
#[derive(Clone)]
pub struct Record {
    class: RecordClass,
    schema: Arc<Schema>,
    values: IndexMap<String, Value>,
}

impl Record {
    /// Constructs a record of `class` from `input`.
    pub fn construct(class: &RecordClass, input: RecordInput) -> Result<Self> {
        Self::construct_with(class, input, &ValidationContext::default())
    }

    /// Constructs a record, honouring the `strict` flag of `context`.
    ///
    /// In strict mode values supplied under names outside the schema fail
    /// with [`RecordError::UnknownAttribute`].
    pub fn construct_with(
        class: &RecordClass,
        input: RecordInput,
        context: &ValidationContext,
    ) -> Result<Self> {
        let mut values = input.into_values()?;
        let schema = class.schema();

        if context.strict {
            if let Some(field) = values.keys().find(|name| !schema.contains(name)) {
                return Err(Self::reject(RecordError::unknown(class.name(), field.as_str())));
            }
        }

        for (field, constraint) in schema.iter() {
            constraint
                .check(class.name(), field, values.get(field))
                .map_err(Self::reject)?;
            if !values.contains_key(field) {
                values.insert(field.to_string(), Value::Null);
            }
        }

        Ok(Self {
            class: class.clone(),
            schema,
            values,
        })
    }

    /// Constructs a record from a mapping.
    pub fn from_map<K, V>(
        class: &RecordClass,
        mapping: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::construct(class, RecordInput::from_mapping(mapping))
    }

    /// Constructs a record from named entries.
    pub fn from_entries<K, V>(
        class: &RecordClass,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::construct(class, RecordInput::new().entries(entries))
    }

    fn reject(err: RecordError) -> RecordError {
        tracing::debug!(error = %err, "record rejected");
        err
    }

    /// Returns the class of this record.
    pub fn class(&self) -> &RecordClass {
        &self.class
    }

    /// Returns the resolved schema of the class.
    pub fn attributes(&self) -> &Schema {
        &self.schema
    }

    /// Returns the value stored under `field`, schema or auxiliary.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Returns true if a value is stored under `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Writes `value` to `field`.
    ///
    /// Schema fields are validated first; on failure the previous value is
    /// kept and [`RecordError::InvalidAttribute`] is returned. Other names are
    /// written without checks.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let field = field.into();
        let value = value.into();

        if let Some(constraint) = self.schema.get(&field) {
            constraint
                .check(self.class.name(), &field, Some(&value))
                .map_err(Self::reject)?;
        }

        self.values.insert(field, value);
        Ok(())
    }

    /// Removes an auxiliary value.
    ///
    /// Schema fields cannot be removed; `None` is returned for them.
    pub fn remove_extra(&mut self, field: &str) -> Option<Value> {
        if self.schema.contains(field) {
            return None;
        }
        self.values.shift_remove(field)
    }

    /// Returns schema fields and their values in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .field_names()
            .filter_map(|name| self.values.get(name).map(|value| (name, value)))
    }

    /// Returns auxiliary values in insertion order.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter(|(name, _)| !self.schema.contains(name))
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// Records are equal when they share the class and every schema field holds
/// the same value. NaN floats compare equal to each other here, so a record
/// is always equal to itself.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.schema.field_names().all(|name| {
                match (self.values.get(name), other.values.get(name)) {
                    (Some(a), Some(b)) => same_value(a, b),
                    (a, b) => a.is_none() && b.is_none(),
                }
            })
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_value(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| same_value(x, y)))
        }
        _ => a == b,
    }
}

impl Index<&str> for Record {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if no value is stored under `field`.
    fn index(&self, field: &str) -> &Value {
        match self.values.get(field) {
            Some(value) => value,
            None => panic!("On {}: no attribute `{}`", self.class.name(), field),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.class.name());
        for (name, value) in &self.values {
            out.field(name, value);
        }
        out.finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.class.name())?;
        for (idx, (name, value)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldConstraint, Kind};
    use pretty_assertions::assert_eq;

    fn person() -> RecordClass {
        let text = FieldConstraint::of_kinds([Kind::String], false).unwrap();
        RecordClass::builder("Person")
            .field("first_name", text.clone())
            .field("last_name", text)
            .field("age", FieldConstraint::of_kinds([Kind::Int], false).unwrap())
            .build()
            .unwrap()
    }

    fn mario(class: &RecordClass) -> Record {
        Record::from_entries(
            class,
            [
                ("first_name", Value::from("Mario")),
                ("last_name", Value::from("Rossi")),
                ("age", Value::from(38)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_input_resolution() {
        let only_entries = RecordInput::new().entry("a", 1).into_values().unwrap();
        assert_eq!(only_entries.len(), 1);

        let only_mapping = RecordInput::from_mapping([("a", 1)]).into_values().unwrap();
        assert_eq!(only_mapping.len(), 1);

        let empty_mapping = RecordInput::from_mapping(Vec::<(String, Value)>::new())
            .entry("a", 1)
            .into_values()
            .unwrap();
        assert_eq!(empty_mapping.len(), 1);

        assert_eq!(
            RecordInput::from_mapping([("a", 1)])
                .entry("a", 1)
                .into_values()
                .unwrap_err(),
            RecordError::ConflictingInput
        );
    }

    #[test]
    fn test_construct_and_read() {
        let class = person();
        let sut = mario(&class);

        assert_eq!(sut["first_name"], Value::from("Mario"));
        assert_eq!(sut.get("age"), Some(&Value::Int(38)));
        assert_eq!(sut.get("missing"), None);
        assert_eq!(sut.class(), &class);
    }

    #[test]
    fn test_mutation_revalidates() {
        let class = person();
        let mut sut = mario(&class);

        let err = sut.set("age", 38.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "On Person: Invalid attribute `age`, got 38.0 which is a float64 (expected int64)."
        );
        assert_eq!(sut["age"], Value::Int(38));

        sut.set("age", 39).unwrap();
        assert_eq!(sut["age"], Value::Int(39));
    }

    #[test]
    fn test_extras_are_unchecked_and_ignored_by_equality() {
        let class = person();
        let mut a = mario(&class);
        let b = mario(&class);

        a.set("nickname", 7).unwrap();
        assert_eq!(a["nickname"], Value::Int(7));
        assert_eq!(a.extras().collect::<Vec<_>>(), vec![("nickname", &Value::Int(7))]);
        assert_eq!(a, b);

        assert_eq!(a.remove_extra("age"), None);
        assert_eq!(a.remove_extra("nickname"), Some(Value::Int(7)));
        assert!(!a.contains("nickname"));
    }

    #[test]
    fn test_strict_construction_rejects_unknown_fields() {
        let class = person();
        let input = RecordInput::new()
            .entry("first_name", "Mario")
            .entry("last_name", "Rossi")
            .entry("age", 38)
            .entry("nickname", "Super");

        let err = Record::construct_with(
            &class,
            input.clone(),
            &ValidationContext::new().with_strict(true),
        )
        .unwrap_err();
        assert_eq!(err, RecordError::unknown("Person", "nickname"));

        let sut = Record::construct(&class, input).unwrap();
        assert_eq!(sut["nickname"], Value::from("Super"));
    }

    #[test]
    fn test_equality_is_reflexive_with_nan() {
        let class = RecordClass::builder("Sample")
            .field("reading", FieldConstraint::of_kinds([Kind::Float], false).unwrap())
            .field("history", FieldConstraint::of_kinds([Kind::List], false).unwrap())
            .build()
            .unwrap();
        let sut = Record::from_entries(
            &class,
            [
                ("reading", Value::Float(f64::NAN)),
                ("history", Value::List(vec![Value::Float(1.0), Value::Float(f64::NAN)])),
            ],
        )
        .unwrap();

        assert_eq!(sut, sut);
        assert_eq!(sut, sut.clone());

        let mut other = sut.clone();
        other.set("reading", 0.0).unwrap();
        assert_ne!(sut, other);
    }

    #[test]
    fn test_display() {
        let class = person();
        assert_eq!(
            mario(&class).to_string(),
            "Person(first_name=Mario, last_name=Rossi, age=38)"
        );
    }

    #[test]
    fn test_iter_follows_schema_order() {
        let class = person();
        let sut = Record::from_entries(
            &class,
            [
                ("age", Value::from(38)),
                ("last_name", Value::from("Rossi")),
                ("first_name", Value::from("Mario")),
            ],
        )
        .unwrap();

        let names: Vec<&str> = sut.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first_name", "last_name", "age"]);
    }

    #[test]
    #[should_panic(expected = "no attribute `height`")]
    fn test_index_missing_field_panics() {
        let class = person();
        let _ = &mario(&class)["height"];
    }
}
