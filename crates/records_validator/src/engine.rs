//! Batch validation engine.
//!
//! [`RecordValidator`] checks raw input rows against a record class without
//! constructing records, collecting every problem into a
//! [`ValidationReport`] instead of stopping at the first one.

use records_core::{
    RecordClass, RecordError, Schema, ValidationContext, ValidationReport, ValidationStats, Value,
};
use std::collections::HashMap;
use std::time::Instant;

/// A single row of input values.
pub type Row = HashMap<String, Value>;

/// Validates input rows against record classes.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldConstraint, Kind, RecordClass, ValidationContext, Value};
/// use records_validator::{RecordValidator, Row};
///
/// let point = RecordClass::builder("Point")
///     .field("x", FieldConstraint::of_kinds([Kind::Int], false).unwrap())
///     .field("y", FieldConstraint::of_kinds([Kind::Int], false).unwrap())
///     .build()
///     .unwrap();
///
/// let mut row = Row::new();
/// row.insert("x".to_string(), Value::Int(1));
///
/// let report = RecordValidator::new().validate_rows(&point, &[row], &ValidationContext::new());
/// assert!(!report.passed);
/// assert_eq!(report.errors, vec!["row 0: On Point: Missing attribute `y`."]);
/// ```
#[derive(Debug, Default)]
pub struct RecordValidator;

impl RecordValidator {
    /// Creates a new record validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates `rows` against `class`.
    ///
    /// Only the first `sample_size` rows are checked when the context sets
    /// one. Unknown fields are errors in strict mode and warnings otherwise.
    pub fn validate_rows(
        &self,
        class: &RecordClass,
        rows: &[Row],
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        let schema = class.schema();
        let rows = match context.sample_size {
            Some(size) => &rows[..size.min(rows.len())],
            None => rows,
        };

        let mut report = ValidationReport::success();
        let mut stats = ValidationStats::default();

        for (row_idx, row) in rows.iter().enumerate() {
            stats.records_validated += 1;
            let (errors, warnings) = self.validate_row(&schema, row, context, &mut stats);

            report
                .warnings
                .extend(warnings.iter().map(|w| format!("row {}: {}", row_idx, w)));
            for err in errors {
                report.add_error(format!("row {}: {}", row_idx, err));
                if context.fail_fast {
                    break;
                }
            }
            if context.fail_fast && !report.passed {
                break;
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        report.stats = stats;

        tracing::debug!(
            class = %class.name(),
            rows = report.stats.records_validated,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated rows"
        );
        report
    }

    /// Validates a single row, returning its errors and warnings.
    fn validate_row(
        &self,
        schema: &Schema,
        row: &Row,
        context: &ValidationContext,
        stats: &mut ValidationStats,
    ) -> (Vec<RecordError>, Vec<RecordError>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // HashMap order is unstable, report unknown fields sorted
        let mut unknown: Vec<&String> = row.keys().filter(|k| !schema.contains(k)).collect();
        unknown.sort();
        for field in unknown {
            let err = RecordError::unknown(schema.record(), field.as_str());
            if context.strict {
                errors.push(err);
            } else {
                warnings.push(err);
            }
        }

        for (field, constraint) in schema.iter() {
            stats.fields_checked += 1;
            match constraint.check(schema.record(), field, row.get(field)) {
                Ok(()) => stats.constraints_evaluated += 1,
                Err(err @ RecordError::MissingAttribute { .. }) => errors.push(err),
                Err(err) => {
                    stats.constraints_evaluated += 1;
                    errors.push(err);
                }
            }
        }

        (errors, warnings)
    }

    /// Reviews a class declaration without any data.
    ///
    /// Reports a class with no fields and fields that shadow an ancestor's
    /// declaration as warnings.
    pub fn validate_definition(&self, class: &RecordClass) -> ValidationReport {
        let start = Instant::now();
        let schema = class.schema();
        let mut report = ValidationReport::success();

        if schema.is_empty() {
            report.add_warning(format!("{} declares no fields", class.name()));
        }

        // Nearest ancestors first, the class itself is last in the walk
        let mut ancestors = class.linearize();
        ancestors.pop();
        ancestors.reverse();

        for field in class.own_fields().keys() {
            for ancestor in &ancestors {
                if ancestor.own_field(field).is_some() {
                    report.add_warning(format!(
                        "On {}: Field `{}` shadows the declaration of {}",
                        class.name(),
                        field,
                        ancestor.name()
                    ));
                }
            }
        }

        report.stats.fields_checked = schema.len();
        report.stats.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}
