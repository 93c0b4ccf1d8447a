//! # Records Validator
//!
//! Validation tooling built on top of `records_core`:
//!
//! - Stock combinators (pattern, range, allowed values, length) usable as
//!   external predicates in field constraints
//! - Batch validation of raw input rows against a record class, collecting
//!   every problem into a `ValidationReport`
//! - Review of class declarations (empty classes, shadowed fields)
//!
//! ## Example
//!
//! ```rust
//! use records_core::{FieldConstraint, Kind, Record, RecordClass};
//! use records_validator::{Pattern, Range};
//!
//! let user = RecordClass::builder("User")
//!     .field(
//!         "email",
//!         FieldConstraint::builder()
//!             .combinator(Kind::String, Pattern::new(r"^[^@]+@[^@]+$").unwrap())
//!             .build()
//!             .unwrap(),
//!     )
//!     .field(
//!         "score",
//!         FieldConstraint::builder()
//!             .combinator(Kind::Float, Range::new(0.0, 1.0).unwrap())
//!             .nullable(true)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert!(Record::from_entries(&user, [("email", "mario@rossi.it")]).is_ok());
//! assert!(Record::from_entries(&user, [("email", "mario")]).is_err());
//! ```

mod combinators;
mod engine;

pub use combinators::*;
pub use engine::*;
