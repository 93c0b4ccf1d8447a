//! Validation options and reports.
//!
//! [`ValidationContext`] carries the options honoured by strict record
//! construction and by batch validation. [`ValidationReport`] collects the
//! outcome of a batch validation run.

use serde::Serialize;

/// Options for validation operations.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    /// Reject fields that the schema does not declare
    pub strict: bool,

    /// Stop at the first error instead of collecting all of them
    pub fail_fast: bool,

    /// Maximum number of input rows to validate
    pub sample_size: Option<usize>,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict validation mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets fail-fast mode.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the number of rows to validate.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }
}

/// Report of validation results.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// List of errors encountered
    pub errors: Vec<String>,

    /// List of warnings
    pub warnings: Vec<String>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    /// Number of records validated
    pub records_validated: usize,

    /// Number of fields checked
    pub fields_checked: usize,

    /// Number of constraints evaluated
    pub constraints_evaluated: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a new successful validation report.
    pub fn success() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.passed = false;
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let context = ValidationContext::new()
            .with_strict(true)
            .with_fail_fast(true)
            .with_sample_size(10);

        assert!(context.strict);
        assert!(context.fail_fast);
        assert_eq!(context.sample_size, Some(10));
    }

    #[test]
    fn test_report_errors_fail_the_report() {
        let mut report = ValidationReport::success();
        assert!(report.passed);

        report.add_warning("unknown field");
        assert!(report.passed);

        report.add_error("missing field");
        assert!(!report.passed);
        assert_eq!(report.errors.len(), 1);
    }
}
