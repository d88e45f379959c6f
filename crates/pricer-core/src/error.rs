//! # Error Types
//!
//! Domain-specific error types for pricer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricer-core errors (this file)                                        │
//! │  ├── PriceError       - Pricing domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → PriceError → host application                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (currency codes, field names)
//! 3. Errors are enum variants, never String
//! 4. No retries anywhere: every failure is a programming/input error and
//!    is surfaced directly to the caller

use thiserror::Error;

use crate::currency::Currency;

// =============================================================================
// Price Error
// =============================================================================

/// Pricing domain errors.
///
/// These errors represent arithmetic faults or invalid monetary inputs.
/// They should be caught by the host and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum PriceError {
    /// A modifier divides by a zero factor.
    ///
    /// ## When This Occurs
    /// - A `divide(0)` operation is replayed during resolution
    ///
    /// Appending the operation never fails; the error surfaces the first
    /// time `exclusive()`, `vat()`, `inclusive()` or `modifications()` is
    /// resolved against the ledger.
    #[error("Division by zero in modifier operation")]
    DivisionByZero,

    /// A monetary operand carries a different currency than the price.
    ///
    /// ## When This Occurs
    /// - A modifier adds/subtracts a `Money` value whose currency differs
    ///   from the currency the price was constructed with
    ///
    /// Surfaced at resolution time, not at append time.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        expected: Currency,
        found: Currency,
    },

    /// A currency code is not recognized.
    ///
    /// ## When This Occurs
    /// - `Price::of` or `Currency::from_code` is given a code outside the
    ///   supported ISO 4217 set
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any monetary computation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid numeric shape (e.g. NaN or infinite rate).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PriceError.
pub type PriceResult<T> = Result<T, PriceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PriceError::CurrencyMismatch {
            expected: Currency::EUR,
            found: Currency::USD,
        };
        assert_eq!(err.to_string(), "Currency mismatch: expected EUR, found USD");

        let err = PriceError::UnknownCurrency("XYZ".to_string());
        assert_eq!(err.to_string(), "Unknown currency code: XYZ");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::MustBeNonNegative {
            field: "vat rate".to_string(),
        };
        assert_eq!(err.to_string(), "vat rate must not be negative");
    }

    #[test]
    fn test_validation_converts_to_price_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let price_err: PriceError = validation_err.into();
        assert!(matches!(price_err, PriceError::Validation(_)));
    }
}
