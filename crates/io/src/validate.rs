//! Accumulated validation utilities.
//!
//! [`ValidationCollector`] gathers every problem found in a configuration or
//! output table into a single [`IoError::Validation`].

use std::collections::BTreeSet;

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` if nothing was recorded, otherwise one error joining all
    /// messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Checks that every `(kind, name, len)` column has `expected` rows.
pub(crate) fn validate_column_lengths<'a>(
    expected: usize,
    columns: impl IntoIterator<Item = (&'a str, &'a str, usize)>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (kind, name, len) in columns {
        if len != expected {
            c.push(format!("{kind} '{name}' has {len} rows, expected {expected}"));
        }
    }
    c
}

/// Checks that column names are non-empty and unique.
pub(crate) fn validate_column_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut seen = BTreeSet::new();
    for name in names {
        if name.trim().is_empty() {
            c.push("column name must not be empty");
        } else if !seen.insert(name) {
            c.push(format!("column '{name}' appears more than once"));
        }
    }
    c
}
