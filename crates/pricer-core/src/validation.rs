//! # Validation Module
//!
//! Input validation utilities for pricer-core.
//!
//! Validation runs before any monetary computation: a caller error is
//! reported against the offending field, never as a half-applied price.
//!
//! ## Usage
//! ```rust
//! use pricer_core::validation::{validate_quantity, validate_vat_percent};
//!
//! assert!(validate_quantity(3).is_ok());
//! assert!(validate_quantity(0).is_err());
//!
//! assert!(validate_vat_percent(21.0).is_ok());
//! assert!(validate_vat_percent(-1.0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a quantity multiplier.
///
/// ## Rules
/// - Must be strictly positive (a priced line covers at least one unit)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a VAT percentage.
///
/// ## Rules
/// - Must be a finite number
/// - Must not be negative (zero disables the layer without removing it)
pub fn validate_vat_percent(percent: f64) -> ValidationResult<()> {
    if !percent.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "vat rate".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if percent < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "vat rate".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_vat_percent() {
        assert!(validate_vat_percent(0.0).is_ok());
        assert!(validate_vat_percent(8.25).is_ok());
        assert!(validate_vat_percent(21.0).is_ok());

        assert!(matches!(
            validate_vat_percent(-1.0),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            validate_vat_percent(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_vat_percent(f64::INFINITY).is_err());
    }
}
