//! Type predicates: the atomic acceptance tests of a field constraint.
//!
//! A predicate either checks that a value is an instance of a [`Kind`] or
//! delegates to an external [`Combinator`]. Predicates never return errors:
//! kind checks are total, and a combinator's [`Rejection`] is reported as
//! "not valid". A combinator that panics is a defect and the panic is left
//! to propagate.

use crate::{Kind, RecordClass, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The documented failure signal of a [`Combinator`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Rejection {
    message: String,
}

impl Rejection {
    /// Creates a new rejection with a human readable reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the rejection reason.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An externally supplied validation function.
///
/// `check` returns `Ok(())` when the value is acceptable and
/// `Err(Rejection)` when it is not. Combinators must be free of side effects.
pub trait Combinator: Send + Sync {
    /// Checks a value.
    fn check(&self, value: &Value) -> Result<(), Rejection>;
}

impl<F> Combinator for F
where
    F: Fn(&Value) -> Result<(), Rejection> + Send + Sync,
{
    fn check(&self, value: &Value) -> Result<(), Rejection> {
        self(value)
    }
}

/// One atomic acceptance test.
pub trait TypePredicate: fmt::Debug + Send + Sync {
    /// Returns true if the predicate accepts `value`.
    fn is_valid(&self, value: &Value) -> bool;

    /// Returns the kind this predicate stands for in diagnostics.
    fn kind(&self) -> &Kind;
}

/// Accepts values that are instances of a [`Kind`].
#[derive(Debug, Clone, PartialEq)]
pub struct KindPredicate {
    kind: Kind,
}

impl KindPredicate {
    /// Creates a predicate for `kind`.
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }
}

impl TypePredicate for KindPredicate {
    fn is_valid(&self, value: &Value) -> bool {
        self.kind.matches(value)
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }
}

/// Accepts values for which a [`Combinator`] does not reject.
///
/// The nominal kind is only used to compose messages; the combinator alone
/// decides validity and the two need not agree.
#[derive(Clone)]
pub struct CombinatorPredicate {
    nominal: Kind,
    combinator: Arc<dyn Combinator>,
}

impl CombinatorPredicate {
    /// Creates a predicate from a combinator and the kind it stands for.
    pub fn new(nominal: Kind, combinator: impl Combinator + 'static) -> Self {
        Self {
            nominal,
            combinator: Arc::new(combinator),
        }
    }
}

impl fmt::Debug for CombinatorPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinatorPredicate")
            .field("nominal", &self.nominal)
            .finish_non_exhaustive()
    }
}

impl TypePredicate for CombinatorPredicate {
    fn is_valid(&self, value: &Value) -> bool {
        match self.combinator.check(value) {
            Ok(()) => true,
            Err(rejection) => {
                tracing::trace!(kind = %self.nominal, %rejection, "combinator rejected value");
                false
            }
        }
    }

    fn kind(&self) -> &Kind {
        &self.nominal
    }
}

/// Builds a predicate for a builtin kind.
pub fn from_kind(kind: Kind) -> Arc<dyn TypePredicate> {
    Arc::new(KindPredicate::new(kind))
}

/// Builds a predicate accepting records of exactly `class`.
pub fn from_record_class(class: &RecordClass) -> Arc<dyn TypePredicate> {
    Arc::new(KindPredicate::new(Kind::Record(class.clone())))
}

/// Builds a predicate from an external combinator.
pub fn from_combinator(
    nominal: Kind,
    combinator: impl Combinator + 'static,
) -> Arc<dyn TypePredicate> {
    Arc::new(CombinatorPredicate::new(nominal, combinator))
}
