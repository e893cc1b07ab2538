//! # Error Types
//!
//! Domain-specific error types for cobro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cobro-core errors (this file)                                         │
//! │  ├── CoreError        - Domain errors (amounts, drafts, locales)       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cobro-cli errors (app)                                                │
//! │  └── ConfigError      - Configuration loading failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (app edge) → User          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, index, value)
//! 3. Errors are enum variants, never String
//! 4. `compute_totals` never produces an error

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A formatting operation received a non-finite number.
    ///
    /// ## When This Occurs
    /// - `format_currency(f64::NAN, ..)`
    /// - `amount_to_words(f64::INFINITY, ..)`
    /// - An amount too large to be represented in minor units
    #[error("Invalid amount: {value}")]
    InvalidAmount { value: f64 },

    /// A negative quantity or unit price was found while the
    /// [`NegativeAmountPolicy::Reject`](crate::NegativeAmountPolicy) policy is active.
    #[error("Line item {index}: {field} must not be negative (got {value})")]
    NegativeAmount {
        field: String,
        index: usize,
        value: f64,
    },

    /// The draft already holds the maximum number of line items.
    #[error("A document cannot have more than {max} line items")]
    TooManyItems { max: usize },

    /// No line item exists at the requested position.
    #[error("No line item at position {index}")]
    ItemNotFound { index: usize },

    /// No built-in locale exists for the currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidAmount error for the given value.
    pub fn invalid_amount(value: f64) -> Self {
        CoreError::InvalidAmount { value }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when decoded or user-supplied data doesn't meet
/// requirements. They are raised at the boundary, before the arithmetic runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    MustBeFinite { field: String },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, non-numeric quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NegativeAmount {
            field: "quantity".to_string(),
            index: 2,
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Line item 2: quantity must not be negative (got -1)"
        );

        assert_eq!(
            CoreError::invalid_amount(f64::INFINITY).to_string(),
            "Invalid amount: inf"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::invalid_format("quantity", "expected a number");
        assert_eq!(
            err.to_string(),
            "quantity has invalid format: expected a number"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBeFinite {
            field: "unit_price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
