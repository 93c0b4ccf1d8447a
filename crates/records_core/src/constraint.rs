//! Field constraints: the disjunction of acceptable shapes for one field.

use crate::predicate::{self, Combinator, TypePredicate};
use crate::{DeclarationError, Kind, RecordClass, RecordError, Value};
use std::fmt;
use std::sync::Arc;

/// An ordered, non-empty set of [`TypePredicate`]s.
///
/// A value is valid when any predicate accepts it. Clones share the same
/// predicate list, and two constraints are equal only when they come from the
/// same declaration.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldConstraint, Kind, Value};
///
/// let name = FieldConstraint::of_kinds([Kind::String], true).unwrap();
/// assert!(name.is_valid(&Value::from("x")));
/// assert!(name.is_valid(&Value::Null));
/// assert!(!name.is_valid(&Value::Int(42)));
/// ```
#[derive(Clone)]
pub struct FieldConstraint {
    predicates: Arc<[Arc<dyn TypePredicate>]>,
}

impl FieldConstraint {
    /// Creates a constraint from predicates.
    ///
    /// Fails with [`DeclarationError::EmptyConstraint`] when `predicates` is
    /// empty.
    pub fn new(
        predicates: impl IntoIterator<Item = Arc<dyn TypePredicate>>,
    ) -> Result<Self, DeclarationError> {
        let predicates: Vec<_> = predicates.into_iter().collect();
        if predicates.is_empty() {
            return Err(DeclarationError::EmptyConstraint);
        }
        Ok(Self {
            predicates: predicates.into(),
        })
    }

    /// Creates a constraint accepting any of `kinds`, and null when
    /// `nullable` is set.
    pub fn of_kinds(
        kinds: impl IntoIterator<Item = Kind>,
        nullable: bool,
    ) -> Result<Self, DeclarationError> {
        kinds
            .into_iter()
            .fold(Self::builder(), FieldConstraintBuilder::kind)
            .nullable(nullable)
            .build()
    }

    /// Starts a builder.
    pub fn builder() -> FieldConstraintBuilder {
        FieldConstraintBuilder::default()
    }

    /// Returns true if any predicate accepts `value`.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.predicates.iter().any(|p| p.is_valid(value))
    }

    /// Returns true if null is accepted.
    pub fn accepts_null(&self) -> bool {
        self.is_valid(&Value::Null)
    }

    /// Checks the value supplied for `field` of `record`.
    ///
    /// An absent value is accepted when the constraint accepts null and is
    /// otherwise [`RecordError::MissingAttribute`]. A present value failing
    /// every predicate is [`RecordError::InvalidAttribute`].
    pub fn check(&self, record: &str, field: &str, value: Option<&Value>) -> crate::Result<()> {
        match value {
            None if self.accepts_null() => Ok(()),
            None => Err(RecordError::missing(record, field)),
            Some(value) if self.is_valid(value) => Ok(()),
            Some(value) => Err(RecordError::invalid(record, field, value, self.describe())),
        }
    }

    /// Returns the accepted kinds in declaration order.
    pub fn kinds(&self) -> Vec<&Kind> {
        self.predicates.iter().map(|p| p.kind()).collect()
    }

    /// Returns the accepted kinds joined for messages, e.g. `int64 | null`.
    pub fn describe(&self) -> String {
        self.kinds()
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl PartialEq for FieldConstraint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicates, &other.predicates)
    }
}

impl fmt::Debug for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldConstraint")
            .field(&self.describe())
            .finish()
    }
}

/// Builder for a [`FieldConstraint`].
///
/// # Example
///
/// ```rust
/// use records_core::{FieldConstraint, Kind};
///
/// let coordinate = FieldConstraint::builder()
///     .kind(Kind::Int)
///     .kind(Kind::Float)
///     .build()
///     .unwrap();
/// assert_eq!(coordinate.describe(), "int64 | float64");
/// ```
#[derive(Default)]
pub struct FieldConstraintBuilder {
    predicates: Vec<Arc<dyn TypePredicate>>,
    nullable: bool,
    null_kind: bool,
}

impl FieldConstraintBuilder {
    /// Accepts instances of a builtin kind.
    pub fn kind(mut self, kind: Kind) -> Self {
        if kind == Kind::Null {
            self.null_kind = true;
            return self;
        }
        self.predicates.push(predicate::from_kind(kind));
        self
    }

    /// Accepts records of exactly `class`.
    pub fn record(mut self, class: &RecordClass) -> Self {
        self.predicates.push(predicate::from_record_class(class));
        self
    }

    /// Accepts values the combinator does not reject.
    pub fn combinator(mut self, nominal: Kind, combinator: impl Combinator + 'static) -> Self {
        self.predicates
            .push(predicate::from_combinator(nominal, combinator));
        self
    }

    /// Adds an already built predicate.
    pub fn predicate(mut self, predicate: Arc<dyn TypePredicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Sets whether null is accepted.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builds the constraint.
    ///
    /// Null is appended last when the builder is nullable. Fails when no
    /// predicate was added or when `Kind::Null` was passed as a kind.
    pub fn build(mut self) -> Result<FieldConstraint, DeclarationError> {
        if self.null_kind {
            return Err(DeclarationError::NullKind);
        }
        if self.predicates.is_empty() {
            return Err(DeclarationError::EmptyConstraint);
        }
        if self.nullable {
            self.predicates.push(predicate::from_kind(Kind::Null));
        }
        FieldConstraint::new(self.predicates)
    }
}
