//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `Factor` type for exact scalar multiplication and division.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many billing systems:                                               │
//! │    10.00 / 3 = 3.33 (×3 = 9.99)  → Lost 0.01!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    1000 cents / 3 = 333 cents (×3 = 999 cents)                         │
//! │    We KNOW we lost 1 cent, and handle it explicitly                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Scalar multiplication and division round exactly once, to the currency's
//! minor unit, rounding halves away from zero. Nothing else in the engine
//! rounds; a modifier chain therefore produces the same result on every
//! replay, on every machine.
//!
//! ## Usage
//! ```rust
//! use pricer_core::{Currency, Factor, Money};
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(1099, Currency::EUR); // 10.99 EUR
//!
//! // Arithmetic operations
//! let doubled = price.multiply(Factor::from_int(2));
//! assert_eq!(doubled.minor(), 2198);
//!
//! let total = price.checked_add(Money::eur(500)).unwrap();
//! assert_eq!(total.to_string(), "EUR 15.99");
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{PriceError, PriceResult};

// =============================================================================
// Rounded Division
// =============================================================================

/// Divides `n` by `d`, rounding halves away from zero.
///
/// All scalar money arithmetic funnels through this single function so the
/// engine has exactly one rounding rule.
const fn div_round(n: i128, d: i128) -> i128 {
    let q = n / d;
    let r = n % d;
    if r.abs() * 2 >= d.abs() {
        if (n < 0) != (d < 0) {
            q - 1
        } else {
            q + 1
        }
    } else {
        q
    }
}

// =============================================================================
// Factor
// =============================================================================

/// A fixed-point scalar for multiplying and dividing monetary values.
///
/// ## Why Fixed Point?
/// Modifier chains must be bit-for-bit reproducible. A factor is stored as an
/// integer at 1/10 000 scale (the same resolution as a basis point), so
/// `multiply(1.25)` means exactly 12 500/10 000 on every replay.
///
/// ## Example
/// ```rust
/// use pricer_core::Factor;
///
/// assert_eq!(Factor::from_int(2).raw(), 20_000);
/// assert_eq!(Factor::from_f64(1.25).raw(), 12_500);
/// assert_eq!(Factor::ONE.raw(), 10_000);
/// assert!(Factor::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Factor(i64);

impl Factor {
    /// Fixed-point scale: raw value 10 000 represents a factor of 1.
    pub const SCALE: i64 = 10_000;

    /// The zero factor.
    pub const ZERO: Factor = Factor(0);

    /// The identity factor.
    pub const ONE: Factor = Factor(Self::SCALE);

    /// Creates a factor from a whole number.
    #[inline]
    pub const fn from_int(n: i64) -> Self {
        Factor(n * Self::SCALE)
    }

    /// Creates a factor from a float, rounded to the fixed-point scale.
    ///
    /// The only place floats enter the engine; the value is snapped to
    /// 1/10 000 resolution immediately and never touched as a float again.
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Factor((x * Self::SCALE as f64).round() as i64)
    }

    /// Creates a factor directly from its raw fixed-point representation.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Factor(raw)
    }

    /// Returns the raw fixed-point representation.
    #[inline]
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Checks if the factor is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Factor {
    #[inline]
    fn from(n: i64) -> Self {
        Factor::from_int(n)
    }
}

impl From<i32> for Factor {
    #[inline]
    fn from(n: i32) -> Self {
        Factor::from_int(n as i64)
    }
}

impl From<f64> for Factor {
    #[inline]
    fn from(x: f64) -> Self {
        Factor::from_f64(x)
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of its currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Currency attached**: Mixing currencies is an error, not a footgun
/// - **Immutable**: Every operation returns a new value
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Price.unit_amount ──► modifier replay ──► modified unit amount         │
/// │                                                 │                       │
/// │                                                 ▼ × quantity            │
/// │                  exclusive ──► VAT ──► inclusive ──► display text       │
/// │                                                                         │
/// │  EVERY monetary value in the engine flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from minor units (cents for EUR/USD).
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::{Currency, Money};
    ///
    /// let price = Money::from_minor(1099, Currency::EUR); // 10.99 EUR
    /// assert_eq!(price.minor(), 1099);
    /// assert_eq!(price.currency(), Currency::EUR);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64, currency: Currency) -> Self {
        Money { minor, currency }
    }

    /// Creates a euro value from cents.
    #[inline]
    pub const fn eur(minor: i64) -> Self {
        Money::from_minor(minor, Currency::EUR)
    }

    /// Creates a US dollar value from cents.
    #[inline]
    pub const fn usd(minor: i64) -> Self {
        Money::from_minor(minor, Currency::USD)
    }

    /// Returns zero money in the given currency.
    #[inline]
    pub const fn zero(currency: Currency) -> Self {
        Money::from_minor(0, currency)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.minor
    }

    /// Returns the currency.
    #[inline]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.minor > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.minor < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money::from_minor(self.minor.abs(), self.currency)
    }

    /// Adds another value of the same currency.
    ///
    /// ## Errors
    /// [`PriceError::CurrencyMismatch`] when the currencies differ.
    pub fn checked_add(&self, other: Money) -> PriceResult<Money> {
        self.require_same_currency(other)?;
        Ok(Money::from_minor(self.minor + other.minor, self.currency))
    }

    /// Subtracts another value of the same currency.
    ///
    /// ## Errors
    /// [`PriceError::CurrencyMismatch`] when the currencies differ.
    pub fn checked_sub(&self, other: Money) -> PriceResult<Money> {
        self.require_same_currency(other)?;
        Ok(Money::from_minor(self.minor - other.minor, self.currency))
    }

    /// Compares two values of the same currency.
    ///
    /// ## Errors
    /// [`PriceError::CurrencyMismatch`] when the currencies differ. An `Ord`
    /// implementation is deliberately absent: ordering amounts of different
    /// currencies is meaningless.
    pub fn checked_cmp(&self, other: Money) -> PriceResult<std::cmp::Ordering> {
        self.require_same_currency(other)?;
        Ok(self.minor.cmp(&other.minor))
    }

    /// Multiplies by a fixed-point factor, rounding to the minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::{Factor, Money};
    ///
    /// let price = Money::eur(500);
    /// assert_eq!(price.multiply(Factor::from_int(2)).minor(), 1000);
    /// assert_eq!(price.multiply(Factor::from_f64(1.25)).minor(), 625);
    /// // 10.99 × 8.25% = 0.906675 → rounds to 0.91
    /// assert_eq!(Money::eur(1099).multiply(Factor::from_f64(0.0825)).minor(), 91);
    /// ```
    pub fn multiply(&self, factor: Factor) -> Money {
        // i128 intermediates prevent overflow on large amounts
        let minor = div_round(
            self.minor as i128 * factor.raw() as i128,
            Factor::SCALE as i128,
        );
        Money::from_minor(minor as i64, self.currency)
    }

    /// Divides by a fixed-point factor, rounding to the minor unit.
    ///
    /// ## Errors
    /// [`PriceError::DivisionByZero`] when the factor is zero.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::{Factor, Money};
    ///
    /// let price = Money::eur(1000);
    /// assert_eq!(price.divide(Factor::from_int(3)).unwrap().minor(), 333);
    /// assert!(price.divide(Factor::ZERO).is_err());
    /// ```
    pub fn divide(&self, factor: Factor) -> PriceResult<Money> {
        if factor.is_zero() {
            return Err(PriceError::DivisionByZero);
        }
        let minor = div_round(
            self.minor as i128 * Factor::SCALE as i128,
            factor.raw() as i128,
        );
        Ok(Money::from_minor(minor as i64, self.currency))
    }

    /// Multiplies by an integer quantity. Exact, no rounding involved.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money::from_minor(self.minor * qty, self.currency)
    }

    fn require_same_currency(&self, other: Money) -> PriceResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(PriceError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            })
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation renders the currency code followed by the amount
/// at the currency's minor-unit exponent, e.g. `EUR 12.00` or `JPY 150`.
///
/// ## Note
/// This is the engine's canonical textual form. Locale-aware rendering
/// (symbols, separators) belongs to the host application's formatters.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exponent = self.currency.exponent();
        if exponent == 0 {
            return write!(f, "{} {}", self.currency.code(), self.minor);
        }
        let scale = 10u64.pow(exponent);
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        write!(
            f,
            "{} {}{}.{:0width$}",
            self.currency.code(),
            sign,
            abs / scale,
            abs % scale,
            width = exponent as usize
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
