//! Field-level validation errors shared by the calculators.
//!
//! Every check runs independently; callers collect all failures into a single
//! [`ValidationError`] so a form can annotate every bad field at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One failing input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Stable field identifier (e.g. `"tax_rate_percent"`).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field failures found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid input: {}", join_messages(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        field: &str,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if `field` failed validation.
    pub fn has_field(
        &self,
        field: &str,
    ) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_error_converts_to_ok() {
        assert_eq!(ValidationError::new().into_result(), Ok(()));
    }

    #[test]
    fn display_joins_every_message() {
        let mut err = ValidationError::new();
        err.push("industry", "Industry is required");
        err.push("tax_rate_percent", "Tax rate must be below 100");

        assert_eq!(
            err.to_string(),
            "invalid input: Industry is required; Tax rate must be below 100"
        );
        assert!(err.has_field("industry"));
        assert!(!err.has_field("skill_level"));
        assert_eq!(err.len(), 2);
    }
}
