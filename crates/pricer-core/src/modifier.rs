//! # Modifier Module
//!
//! A modifier is an ordered list of elementary arithmetic operations that is
//! applied as one unit to a running unit amount.
//!
//! ## Replay Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Modifier Replay                                    │
//! │                                                                         │
//! │  base unit amount                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Modifier A: [multiply(2), subtract(200)]  ──► applied in append order  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Modifier B: [add(100)]                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  modified unit amount (quantity scaling happens later, in Price)        │
//! │                                                                         │
//! │  NOTE: a modifier with zero operations is a legal no-op.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors never surface while building a modifier. A division by zero or a
//! foreign-currency operand is only detected when the modifier is replayed
//! against an actual amount.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{PriceError, PriceResult};
use crate::money::{Factor, Money};

// =============================================================================
// Modifier Kind
// =============================================================================

/// Classification tag attached to a modifier.
///
/// The kind never changes how a modifier is applied; it exists so the
/// modification history can be filtered when auditing a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    Tax,
    Discount,
    #[default]
    Custom,
}

// =============================================================================
// Operand
// =============================================================================

/// The value an add/subtract operation works with.
///
/// A plain number is a delta in the price currency's minor units, resolved
/// when the modifier is replayed. A `Money` operand carries its own currency
/// and is checked against the price currency at replay time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// Delta in minor units of the amount being modified.
    Minor(i64),
    /// An explicit monetary value; currency must match at replay time.
    Money(Money),
}

impl Operand {
    /// Resolves the operand against the currency of the running amount.
    fn resolve(&self, currency: Currency) -> PriceResult<Money> {
        match *self {
            Operand::Minor(minor) => Ok(Money::from_minor(minor, currency)),
            Operand::Money(money) => {
                if money.currency() == currency {
                    Ok(money)
                } else {
                    Err(PriceError::CurrencyMismatch {
                        expected: currency,
                        found: money.currency(),
                    })
                }
            }
        }
    }
}

impl From<i64> for Operand {
    #[inline]
    fn from(minor: i64) -> Self {
        Operand::Minor(minor)
    }
}

impl From<i32> for Operand {
    #[inline]
    fn from(minor: i32) -> Self {
        Operand::Minor(minor as i64)
    }
}

impl From<Money> for Operand {
    #[inline]
    fn from(money: Money) -> Self {
        Operand::Money(money)
    }
}

// =============================================================================
// Operation
// =============================================================================

/// One elementary arithmetic step inside a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add(Operand),
    Subtract(Operand),
    Multiply(Factor),
    Divide(Factor),
}

impl Operation {
    /// Applies this operation to the running amount.
    fn apply(&self, current: Money) -> PriceResult<Money> {
        match self {
            Operation::Add(operand) => current.checked_add(operand.resolve(current.currency())?),
            Operation::Subtract(operand) => {
                current.checked_sub(operand.resolve(current.currency())?)
            }
            Operation::Multiply(factor) => Ok(current.multiply(*factor)),
            Operation::Divide(factor) => current.divide(*factor),
        }
    }
}

// =============================================================================
// Modifier
// =============================================================================

/// An ordered, named list of arithmetic operations applied as a unit.
///
/// Built fluently and treated as immutable input once attached to a price.
/// Re-resolution always replays the full operation list, so a total computed
/// earlier can never be changed retroactively.
///
/// ## Example
/// ```rust
/// use pricer_core::{Modifier, ModifierKind, Money};
///
/// let modifier = Modifier::keyed("bulk-deal")
///     .with_kind(ModifierKind::Discount)
///     .multiply(2)
///     .subtract(200);
///
/// let result = modifier.apply_to(Money::eur(500)).unwrap();
/// assert_eq!(result.to_string(), "EUR 8.00"); // (500 × 2) − 200
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Modifier {
    key: Option<String>,
    kind: ModifierKind,
    operations: Vec<Operation>,
}

impl Modifier {
    /// Creates an empty modifier (a legal no-op until operations are added).
    pub fn new() -> Self {
        Modifier::default()
    }

    /// Creates an empty modifier with an identifying key.
    ///
    /// Keys are used for lookup in the modification history and are not
    /// required to be unique.
    pub fn keyed(key: impl Into<String>) -> Self {
        Modifier {
            key: Some(key.into()),
            ..Modifier::default()
        }
    }

    /// Sets the classification tag.
    pub fn with_kind(mut self, kind: ModifierKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends an addition.
    pub fn add(mut self, operand: impl Into<Operand>) -> Self {
        self.operations.push(Operation::Add(operand.into()));
        self
    }

    /// Appends a subtraction.
    pub fn subtract(mut self, operand: impl Into<Operand>) -> Self {
        self.operations.push(Operation::Subtract(operand.into()));
        self
    }

    /// Appends a multiplication.
    pub fn multiply(mut self, factor: impl Into<Factor>) -> Self {
        self.operations.push(Operation::Multiply(factor.into()));
        self
    }

    /// Appends a division.
    ///
    /// A zero factor is accepted here; the error surfaces at replay time.
    pub fn divide(mut self, factor: impl Into<Factor>) -> Self {
        self.operations.push(Operation::Divide(factor.into()));
        self
    }

    /// Returns the identifying key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the classification tag.
    #[inline]
    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    /// Returns the operations in append order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Replays the operations in append order against a base amount.
    ///
    /// ## Errors
    /// - [`PriceError::DivisionByZero`] for a zero divide factor
    /// - [`PriceError::CurrencyMismatch`] for a foreign-currency operand
    pub fn apply_to(&self, base: Money) -> PriceResult<Money> {
        let mut current = base;
        for operation in &self.operations {
            current = operation.apply(current)?;
        }
        Ok(current)
    }
}

/// A bare `Money` value is shorthand for a single addition.
impl From<Money> for Modifier {
    fn from(money: Money) -> Self {
        Modifier::new().add(money)
    }
}

/// A bare minor-unit delta is shorthand for a single addition; negative
/// values subtract by construction.
impl From<i64> for Modifier {
    fn from(minor: i64) -> Self {
        Modifier::new().add(minor)
    }
}

impl From<i32> for Modifier {
    fn from(minor: i32) -> Self {
        Modifier::new().add(minor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;

    #[test]
    fn test_empty_modifier_is_noop() {
        let base = Money::eur(500);
        assert_eq!(Modifier::new().apply_to(base).unwrap(), base);
    }

    #[test]
    fn test_operations_apply_in_append_order() {
        let base = Money::eur(500);

        let multiply_then_subtract = Modifier::new().multiply(2).subtract(200);
        assert_eq!(multiply_then_subtract.apply_to(base).unwrap().minor(), 800);

        let subtract_then_multiply = Modifier::new().subtract(200).multiply(2);
        assert_eq!(subtract_then_multiply.apply_to(base).unwrap().minor(), 600);
    }

    #[test]
    fn test_money_operand() {
        let modifier = Modifier::new().add(Money::eur(150));
        assert_eq!(modifier.apply_to(Money::eur(500)).unwrap().minor(), 650);
    }

    #[test]
    fn test_money_operand_currency_mismatch() {
        let modifier = Modifier::new().add(Money::usd(150));
        let err = modifier.apply_to(Money::eur(500)).unwrap_err();
        assert!(matches!(
            err,
            PriceError::CurrencyMismatch {
                expected: Currency::EUR,
                found: Currency::USD,
            }
        ));
    }

    #[test]
    fn test_divide_by_zero_surfaces_at_replay() {
        // Building the modifier never fails
        let modifier = Modifier::new().divide(0);
        let err = modifier.apply_to(Money::eur(500)).unwrap_err();
        assert!(matches!(err, PriceError::DivisionByZero));
    }

    #[test]
    fn test_fractional_factor() {
        let modifier = Modifier::new().multiply(1.25);
        assert_eq!(modifier.apply_to(Money::eur(500)).unwrap().minor(), 625);
    }

    #[test]
    fn test_shorthand_conversions() {
        assert_eq!(
            Modifier::from(100).apply_to(Money::eur(500)).unwrap().minor(),
            600
        );
        assert_eq!(
            Modifier::from(-100i64)
                .apply_to(Money::eur(500))
                .unwrap()
                .minor(),
            400
        );
        assert_eq!(
            Modifier::from(Money::eur(150))
                .apply_to(Money::eur(500))
                .unwrap()
                .minor(),
            650
        );
    }

    #[test]
    fn test_key_and_kind() {
        let modifier = Modifier::keyed("spring-sale").with_kind(ModifierKind::Discount);
        assert_eq!(modifier.key(), Some("spring-sale"));
        assert_eq!(modifier.kind(), ModifierKind::Discount);
        assert_eq!(Modifier::new().kind(), ModifierKind::Custom);
    }

    #[test]
    fn test_serde_kind_tags() {
        let json = serde_json::to_string(&ModifierKind::Discount).unwrap();
        assert_eq!(json, "\"discount\"");
    }
}
