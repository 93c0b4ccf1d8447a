//! Kinds: named type descriptors accepted by field constraints.

use crate::{RecordClass, Value};
use std::fmt;

/// A type descriptor a value can be checked against.
///
/// Builtin kinds match their own [`Value`] variant only, there is no numeric
/// widening. [`Kind::Record`] matches records whose class is exactly the
/// given class; records of a subclass are not accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// The null value
    Null,
    /// Booleans
    Bool,
    /// 64-bit integers
    Int,
    /// 64-bit floats
    Float,
    /// Strings
    String,
    /// Raw bytes
    Bytes,
    /// UTC timestamps
    Timestamp,
    /// Lists of any values
    List,
    /// String-keyed maps of any values
    Map,
    /// Records of exactly this class
    Record(RecordClass),
}

impl Kind {
    /// Returns true if `value` is an instance of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Kind::Null, Value::Null)
            | (Kind::Bool, Value::Bool(_))
            | (Kind::Int, Value::Int(_))
            | (Kind::Float, Value::Float(_))
            | (Kind::String, Value::String(_))
            | (Kind::Bytes, Value::Bytes(_))
            | (Kind::Timestamp, Value::Timestamp(_))
            | (Kind::List, Value::List(_))
            | (Kind::Map, Value::Map(_)) => true,
            (Kind::Record(class), Value::Record(record)) => record.class() == class,
            _ => false,
        }
    }

    /// Returns the display name of this kind.
    ///
    /// Names line up with [`Value::type_name`].
    pub fn name(&self) -> &str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Int => "int64",
            Kind::Float => "float64",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Timestamp => "timestamp",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Record(class) => class.name(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&RecordClass> for Kind {
    fn from(class: &RecordClass) -> Self {
        Kind::Record(class.clone())
    }
}
