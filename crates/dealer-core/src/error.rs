//! # Error Types
//!
//! Domain-specific error types for dealer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dealer-core errors (this file)                                        │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  dealer-db errors (separate crate)                                     │
//! │  ├── DbError          - Connection / query failures                    │
//! │  └── ServiceError     - ValidationError | DbError                      │
//! │                                                                         │
//! │  "Not found" is never an error: lookups return Option, update and      │
//! │  delete return RowOutcome::NotFound.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning raw form text into entity records, before any
/// database work happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field holds something that is not a number.
    #[error("{field} must be a number, got '{value}'")]
    NotNumeric { field: String, value: String },

    /// Invalid format (e.g. a date that is not YYYY-MM-DD).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required { field: field.into() }
    }

    pub fn not_numeric(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::NotNumeric {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotNumeric { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::not_numeric("price", "abc").to_string(),
            "price must be a number, got 'abc'"
        );
        assert_eq!(
            ValidationError::invalid_format("date", "expected YYYY-MM-DD").to_string(),
            "date has invalid format: expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ValidationError::required("email").field(), "email");
        assert_eq!(ValidationError::not_numeric("salary", "x").field(), "salary");
    }
}
