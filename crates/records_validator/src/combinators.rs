//! Stock combinators.
//!
//! Ready-made [`Combinator`]s for use as external predicates in a field
//! constraint:
//! - [`Pattern`]: string value must match a regex
//! - [`Range`]: numeric value must be within inclusive bounds
//! - [`AllowedValues`]: value must be one of a predefined set
//! - [`Length`]: string, bytes or list length must be within bounds
//!
//! Each combinator rejects values of a shape it does not apply to; null is
//! handled by the constraint's nullable flag, not here.

use records_core::{Combinator, DeclarationError, Rejection, Value};
use regex::Regex;

/// String value must match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`.
    ///
    /// An invalid pattern is a declaration error.
    pub fn new(pattern: &str) -> Result<Self, DeclarationError> {
        let regex = Regex::new(pattern).map_err(|e| DeclarationError::InvalidPattern {
            pattern: pattern.to_string(),
            error: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Combinator for Pattern {
    fn check(&self, value: &Value) -> Result<(), Rejection> {
        let s = value.as_str().ok_or_else(|| {
            Rejection::new(format!(
                "Pattern constraint requires string type, found {}",
                value.type_name()
            ))
        })?;

        if !self.regex.is_match(s) {
            return Err(Rejection::new(format!(
                "Value '{}' does not match pattern '{}'",
                s,
                self.regex.as_str()
            )));
        }
        Ok(())
    }
}

/// Numeric value must lie within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Creates a range check with inclusive bounds.
    ///
    /// NaN bounds or `min > max` are a declaration error.
    pub fn new(min: f64, max: f64) -> Result<Self, DeclarationError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(DeclarationError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }
}

impl Combinator for Range {
    fn check(&self, value: &Value) -> Result<(), Rejection> {
        let n = value.as_float().ok_or_else(|| {
            Rejection::new(format!(
                "Range constraint requires numeric type, found {}",
                value.type_name()
            ))
        })?;

        // NaN is never contained
        if !(self.min..=self.max).contains(&n) {
            return Err(Rejection::new(format!(
                "Value {} out of range [{}, {}]",
                n, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Value must be one of a predefined set.
///
/// Strings, integers, floats and booleans are compared by their rendered
/// form, so `"1"` in the allowed set accepts both the string and the integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    values: Vec<String>,
}

impl AllowedValues {
    /// Creates the check from the allowed values.
    pub fn new(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Combinator for AllowedValues {
    fn check(&self, value: &Value) -> Result<(), Rejection> {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                return Err(Rejection::new(format!(
                    "AllowedValues constraint not applicable to type {}",
                    value.type_name()
                )));
            }
        };

        if !self.values.contains(&rendered) {
            return Err(Rejection::new(format!(
                "Value '{}' not in allowed values: [{}]",
                rendered,
                self.values.join(", ")
            )));
        }
        Ok(())
    }
}

/// Length of a string, byte string or list must lie within bounds.
///
/// String length counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: Option<usize>,
}

impl Length {
    /// Creates a length check; `max` of `None` means unbounded.
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Requires at least one element or character.
    pub fn non_empty() -> Self {
        Self::new(1, None)
    }
}

impl Combinator for Length {
    fn check(&self, value: &Value) -> Result<(), Rejection> {
        let len = match value {
            Value::String(s) => s.chars().count(),
            Value::Bytes(bytes) => bytes.len(),
            Value::List(items) => items.len(),
            _ => {
                return Err(Rejection::new(format!(
                    "Length constraint not applicable to type {}",
                    value.type_name()
                )));
            }
        };

        let too_long = self.max.is_some_and(|max| len > max);
        if len < self.min || too_long {
            let max = self.max.map_or_else(|| "..".to_string(), |m| m.to_string());
            return Err(Rejection::new(format!(
                "Length {} outside [{}, {}]",
                len, self.min, max
            )));
        }
        Ok(())
    }
}
