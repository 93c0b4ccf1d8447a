//! # Records Core
//!
//! Runtime schema validation for value objects.
//!
//! A [`RecordClass`] declares named fields, each bound to a
//! [`FieldConstraint`]: the disjunction of [`TypePredicate`]s a value may
//! satisfy. Classes may extend other classes; the flat [`Schema`] of a class
//! is extracted once and cached in the [`SchemaRegistry`]. A [`Record`] is
//! validated against that schema when constructed and on every later
//! [`Record::set`].
//!
//! ## Key Concepts
//!
//! - **Kind**: a type descriptor such as `string`, `int64` or a record class
//! - **Type predicate**: one acceptance test, a kind check or an external
//!   [`Combinator`]
//! - **Field constraint**: accepted when any of its predicates accepts
//! - **Schema**: field name to constraint mapping, ancestors included
//!
//! ## Example
//!
//! ```rust
//! use records_core::{FieldConstraint, Kind, Record, RecordClass, RecordError, Value};
//!
//! let person = RecordClass::builder("Person")
//!     .field("name", FieldConstraint::of_kinds([Kind::String], false).unwrap())
//!     .build()
//!     .unwrap();
//! let pet = RecordClass::builder("Pet")
//!     .field("name", FieldConstraint::of_kinds([Kind::String], false).unwrap())
//!     .field("owner", FieldConstraint::builder().record(&person).nullable(true).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let garfield = Record::from_entries(&pet, [("name", "Garfield")]).unwrap();
//! assert_eq!(garfield["owner"], Value::Null);
//!
//! let err = Record::from_entries(&pet, [("name", "Garfield"), ("owner", "Mario")]).unwrap_err();
//! assert!(matches!(err, RecordError::InvalidAttribute { .. }));
//! ```

pub mod class;
pub mod constraint;
pub mod error;
pub mod kind;
pub mod predicate;
pub mod record;
pub mod registry;
pub mod schema;
pub mod validator;
pub mod value;

pub use class::*;
pub use constraint::*;
pub use error::*;
pub use kind::*;
pub use predicate::{
    Combinator, CombinatorPredicate, KindPredicate, Rejection, TypePredicate, from_combinator,
    from_kind, from_record_class,
};
pub use record::*;
pub use registry::*;
pub use schema::*;
pub use validator::*;
pub use value::*;
