//! # Price Module
//!
//! The `Price` aggregate: a base unit amount, a quantity, an optional VAT
//! rate and an ordered ledger of modifiers.
//!
//! ## Resolution Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Price Resolution                                    │
//! │                                                                         │
//! │  unit_amount                                                            │
//! │       │                                                                 │
//! │       ▼  replay ledger entries in insertion order                       │
//! │  modified unit amount ──────────────────────────► unit_exclusive()      │
//! │       │                                                                 │
//! │       ▼  × quantity (scaling happens LAST)                              │
//! │  exclusive() ──► × vat rate ──► vat() ──► exclusive + vat ──► inclusive()│
//! │                                                                         │
//! │  NOTE: nothing is cached. Every accessor recomputes from the ledger,    │
//! │        so results always reflect the current modifier list.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scaling the quantity after the full modifier chain is load-bearing: a
//! `multiply(2)` modifier scales the unit price, then quantity scales again,
//! a multiplicative combination rather than an additive one.
//!
//! ## Mutation Model
//! A `Price` is a mutable builder. Ledger appends and `set_vat` mutate the
//! value in place and return `&mut Self` for chaining; callers must not rely
//! on the pre-call `Price` remaining unmodified, and must serialize access
//! when sharing one instance across threads.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{PriceResult, ValidationError};
use crate::modifier::{Modifier, ModifierKind, Operand};
use crate::money::{Factor, Money};
use crate::validation::{validate_quantity, validate_vat_percent};

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (e.g. Belgian VAT)
///
/// Storing the rate as an integer keeps VAT derivation reproducible; the
/// float accepted by [`Price::set_vat`] is snapped to basis points once and
/// never used again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Creates a VAT rate from a percentage.
    ///
    /// ## Errors
    /// Negative or non-finite percentages are rejected.
    pub fn try_from_percent(percent: f64) -> Result<Self, ValidationError> {
        validate_vat_percent(percent)?;
        Ok(VatRate((percent * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The rate as a multiplication factor (2100 bps → 0.21).
    #[inline]
    fn as_factor(&self) -> Factor {
        // bps and Factor share the 1/10_000 scale
        Factor::from_raw(self.0 as i64)
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// One ledger entry: the key given at append time plus the modifier itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LedgerEntry {
    key: Option<String>,
    modifier: Modifier,
}

/// One line of the modification history reported by [`Price::modifications`].
///
/// `amount` is the net difference the modifier contributed to the running
/// unit amount at its position in the replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub key: Option<String>,
    pub kind: ModifierKind,
    pub amount: Money,
}

// =============================================================================
// Price
// =============================================================================

/// A priced line: base unit amount × quantity, adjusted by an ordered ledger
/// of modifiers, with an optional VAT layer on top.
///
/// ## Invariants
/// - The ledger's insertion order is its replay order
/// - Quantity scaling happens after the full modifier chain
/// - `inclusive() == exclusive() + vat()` holds by construction
///
/// ## Example
/// ```rust
/// use pricer_core::{Modifier, Price};
///
/// let mut price = Price::of("EUR", 500, 2).unwrap();
/// price.add_keyed_modifier("handling", Modifier::new().add(100));
///
/// assert_eq!(price.exclusive().unwrap().to_string(), "EUR 12.00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    unit_amount: Money,
    quantity: i64,
    vat_rate: Option<VatRate>,
    ledger: Vec<LedgerEntry>,
}

impl Price {
    /// Creates a price from a currency code, a unit amount in minor units
    /// and a quantity.
    ///
    /// ## Errors
    /// - [`PriceError::UnknownCurrency`](crate::PriceError::UnknownCurrency)
    ///   for an unrecognized code
    /// - [`PriceError::Validation`](crate::PriceError::Validation) for a
    ///   non-positive quantity
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::Price;
    ///
    /// let price = Price::of("EUR", 500, 2).unwrap();
    /// assert_eq!(price.exclusive().unwrap().to_string(), "EUR 10.00");
    ///
    /// assert!(Price::of("XYZ", 500, 1).is_err());
    /// ```
    pub fn of(code: &str, unit_minor: i64, quantity: i64) -> PriceResult<Self> {
        let currency = Currency::from_code(code)?;
        Price::new(Money::from_minor(unit_minor, currency), quantity)
    }

    /// Creates a price from an existing unit amount and a quantity.
    pub fn new(unit_amount: Money, quantity: i64) -> PriceResult<Self> {
        validate_quantity(quantity)?;
        Ok(Price {
            unit_amount,
            quantity,
            vat_rate: None,
            ledger: Vec::new(),
        })
    }

    /// Creates a euro price from cents.
    pub fn eur(unit_minor: i64, quantity: i64) -> PriceResult<Self> {
        Price::new(Money::eur(unit_minor), quantity)
    }

    /// Creates a US dollar price from cents.
    pub fn usd(unit_minor: i64, quantity: i64) -> PriceResult<Self> {
        Price::new(Money::usd(unit_minor), quantity)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The base unit amount, before any modifier.
    #[inline]
    pub const fn base(&self) -> Money {
        self.unit_amount
    }

    /// The currency every resolved amount is expressed in.
    #[inline]
    pub const fn currency(&self) -> Currency {
        self.unit_amount.currency()
    }

    /// The quantity multiplier.
    #[inline]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// The VAT rate, if one is set.
    #[inline]
    pub const fn vat_rate(&self) -> Option<VatRate> {
        self.vat_rate
    }

    /// The VAT rate as a percentage, if one is set.
    pub fn vat_percent(&self) -> Option<f64> {
        self.vat_rate.map(|rate| rate.percent())
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Replaces the quantity.
    ///
    /// ## Errors
    /// Non-positive quantities are rejected.
    pub fn set_quantity(&mut self, quantity: i64) -> PriceResult<&mut Self> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(self)
    }

    /// Sets or replaces the VAT rate, given as a percentage (10 means 10%).
    ///
    /// ## Errors
    /// Negative or non-finite rates are rejected.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::Price;
    ///
    /// let mut price = Price::of("EUR", 500, 1).unwrap();
    /// price.set_vat(10.0).unwrap();
    ///
    /// assert_eq!(price.vat().unwrap().to_string(), "EUR 0.50");
    /// assert_eq!(price.inclusive().unwrap().to_string(), "EUR 5.50");
    /// ```
    pub fn set_vat(&mut self, percent: f64) -> PriceResult<&mut Self> {
        self.vat_rate = Some(VatRate::try_from_percent(percent)?);
        Ok(self)
    }

    /// Removes the VAT layer.
    pub fn clear_vat(&mut self) -> &mut Self {
        self.vat_rate = None;
        self
    }

    /// Appends a modifier to the ledger.
    ///
    /// Accepts anything convertible into a [`Modifier`]: a built modifier, a
    /// `Money` literal or a signed minor-unit delta (both shorthand for a
    /// single addition). The entry's history key is taken from the modifier
    /// itself.
    pub fn add_modifier(&mut self, modifier: impl Into<Modifier>) -> &mut Self {
        let modifier = modifier.into();
        let key = modifier.key().map(str::to_owned);
        self.push_entry(key, modifier)
    }

    /// Appends a modifier under an explicit history key.
    pub fn add_keyed_modifier(
        &mut self,
        key: impl Into<String>,
        modifier: impl Into<Modifier>,
    ) -> &mut Self {
        self.push_entry(Some(key.into()), modifier.into())
    }

    /// Appends a modifier configured by a closure.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::Price;
    ///
    /// let mut price = Price::of("EUR", 500, 2).unwrap();
    /// price.add_modifier_with("custom", |m| m.add(100));
    ///
    /// assert_eq!(price.exclusive().unwrap().to_string(), "EUR 12.00");
    /// ```
    pub fn add_modifier_with(
        &mut self,
        key: impl Into<String>,
        build: impl FnOnce(Modifier) -> Modifier,
    ) -> &mut Self {
        self.push_entry(Some(key.into()), build(Modifier::new()))
    }

    /// Appends a single-addition modifier tagged as a tax.
    pub fn add_tax(&mut self, delta: impl Into<Operand>) -> &mut Self {
        self.push_entry(
            None,
            Modifier::new().with_kind(ModifierKind::Tax).add(delta),
        )
    }

    /// Appends a single-addition modifier tagged as a discount.
    ///
    /// A discount is expressed by a negative delta, e.g. `add_discount(-100)`.
    pub fn add_discount(&mut self, delta: impl Into<Operand>) -> &mut Self {
        self.push_entry(
            None,
            Modifier::new().with_kind(ModifierKind::Discount).add(delta),
        )
    }

    fn push_entry(&mut self, key: Option<String>, modifier: Modifier) -> &mut Self {
        self.ledger.push(LedgerEntry { key, modifier });
        self
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// The unit amount after the full modifier chain, before quantity scaling.
    pub fn unit_exclusive(&self) -> PriceResult<Money> {
        let mut current = self.unit_amount;
        for entry in &self.ledger {
            current = entry.modifier.apply_to(current)?;
        }
        Ok(current)
    }

    /// The total amount after modifiers and quantity scaling, before VAT.
    ///
    /// Quantity scaling happens last, after the full modifier chain.
    pub fn exclusive(&self) -> PriceResult<Money> {
        Ok(self.unit_exclusive()?.multiply_quantity(self.quantity))
    }

    /// The VAT amount derived from the exclusive total.
    ///
    /// Zero money of the price currency when no rate is set.
    pub fn vat(&self) -> PriceResult<Money> {
        match self.vat_rate {
            Some(rate) => Ok(self.exclusive()?.multiply(rate.as_factor())),
            None => Ok(Money::zero(self.currency())),
        }
    }

    /// The VAT-inclusive total. Defined as `exclusive() + vat()`, so the
    /// identity holds on every call.
    pub fn inclusive(&self) -> PriceResult<Money> {
        let exclusive = self.exclusive()?;
        let vat = self.vat()?;
        exclusive.checked_add(vat)
    }

    /// Replays the ledger and reports each entry's net contribution to the
    /// running unit amount, in insertion order, optionally filtered by kind.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_core::{ModifierKind, Price};
    ///
    /// let mut price = Price::of("EUR", 500, 1).unwrap();
    /// price.add_discount(-100).add_tax(50);
    ///
    /// let history = price.modifications(None).unwrap();
    /// assert_eq!(history.len(), 2);
    /// assert_eq!(history[0].amount.minor(), -100);
    ///
    /// let taxes = price.modifications(Some(ModifierKind::Tax)).unwrap();
    /// assert_eq!(taxes.len(), 1);
    /// assert_eq!(taxes[0].amount.minor(), 50);
    /// ```
    pub fn modifications(&self, filter: Option<ModifierKind>) -> PriceResult<Vec<Modification>> {
        let mut current = self.unit_amount;
        let mut history = Vec::new();
        for entry in &self.ledger {
            let next = entry.modifier.apply_to(current)?;
            if filter.is_none() || filter == Some(entry.modifier.kind()) {
                history.push(Modification {
                    key: entry.key.clone(),
                    kind: entry.modifier.kind(),
                    amount: next.checked_sub(current)?,
                });
            }
            current = next;
        }
        Ok(history)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PriceError;

    #[test]
    fn test_callable_modifier() {
        let mut price = Price::of("EUR", 500, 2).unwrap();
        price.add_modifier_with("custom", |m| m.add(100));

        assert_eq!(price.exclusive().unwrap().to_string(), "EUR 12.00");
    }

    #[test]
    fn test_modifier_instance() {
        let modifier = Modifier::new().multiply(2).subtract(200);

        let mut price = Price::of("EUR", 500, 3).unwrap();
        price.add_keyed_modifier("custom", modifier);

        assert_eq!(price.exclusive().unwrap().to_string(), "EUR 24.00");
    }

    #[test]
    fn test_numeric_and_money_shorthand() {
        let mut price = Price::eur(500, 1).unwrap();
        price.add_modifier(-100);
        assert_eq!(price.exclusive().unwrap().minor(), 400);

        let mut price = Price::eur(500, 1).unwrap();
        price.add_modifier(Money::eur(150));
        assert_eq!(price.exclusive().unwrap().minor(), 650);
    }

    #[test]
    fn test_quantity_scaling_happens_last() {
        // (500 + 100) × 2, not 500 × 2 + 100
        let mut price = Price::of("EUR", 500, 2).unwrap();
        price.add_modifier(100);
        assert_eq!(price.exclusive().unwrap().minor(), 1200);
        assert_eq!(price.unit_exclusive().unwrap().minor(), 600);
    }

    #[test]
    fn test_modifier_order_is_significant() {
        let mut a = Price::eur(500, 1).unwrap();
        a.add_modifier(Modifier::new().multiply(2))
            .add_modifier(Modifier::new().subtract(200));

        let mut b = Price::eur(500, 1).unwrap();
        b.add_modifier(Modifier::new().subtract(200))
            .add_modifier(Modifier::new().multiply(2));

        assert_eq!(a.exclusive().unwrap().minor(), 800);
        assert_eq!(b.exclusive().unwrap().minor(), 600);
    }

    #[test]
    fn test_vat_resolution() {
        let mut price = Price::of("EUR", 500, 1).unwrap();
        price.set_vat(10.0).unwrap();

        assert_eq!(price.exclusive().unwrap().to_string(), "EUR 5.00");
        assert_eq!(price.vat().unwrap().to_string(), "EUR 0.50");
        assert_eq!(price.inclusive().unwrap().to_string(), "EUR 5.50");
    }

    #[test]
    fn test_vat_without_rate_is_zero() {
        let price = Price::eur(500, 2).unwrap();
        assert!(price.vat().unwrap().is_zero());
        assert_eq!(price.vat().unwrap().currency(), Currency::EUR);
        assert_eq!(price.inclusive().unwrap(), price.exclusive().unwrap());
    }

    #[test]
    fn test_inclusive_identity_holds() {
        let mut price = Price::eur(1234, 3).unwrap();
        price
            .add_modifier(Modifier::new().multiply(1.15))
            .add_discount(-45)
            .set_vat(8.25)
            .unwrap();

        let exclusive = price.exclusive().unwrap();
        let vat = price.vat().unwrap();
        let inclusive = price.inclusive().unwrap();
        assert_eq!(inclusive, exclusive.checked_add(vat).unwrap());
    }

    #[test]
    fn test_vat_applies_to_post_modifier_exclusive() {
        let mut price = Price::eur(500, 2).unwrap();
        price.add_modifier(100).set_vat(10.0).unwrap();

        // exclusive (500 + 100) × 2 = 1200, vat 10% of 1200
        assert_eq!(price.exclusive().unwrap().minor(), 1200);
        assert_eq!(price.vat().unwrap().minor(), 120);
        assert_eq!(price.inclusive().unwrap().minor(), 1320);
    }

    #[test]
    fn test_negative_vat_rejected() {
        let mut price = Price::eur(500, 1).unwrap();
        let err = price.set_vat(-1.0).unwrap_err();
        assert!(matches!(err, PriceError::Validation(_)));
        assert!(price.vat_rate().is_none());
    }

    #[test]
    fn test_unknown_currency_rejected_at_construction() {
        let err = Price::of("XYZ", 500, 1).unwrap_err();
        assert!(matches!(err, PriceError::UnknownCurrency(_)));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(Price::of("EUR", 500, 0).is_err());
        assert!(Price::of("EUR", 500, -2).is_err());

        let mut price = Price::eur(500, 1).unwrap();
        assert!(price.set_quantity(0).is_err());
        price.set_quantity(4).unwrap();
        assert_eq!(price.quantity(), 4);
    }

    #[test]
    fn test_resolution_errors_surface_lazily() {
        let mut price = Price::eur(500, 1).unwrap();
        // Appending never fails
        price.add_modifier(Modifier::new().divide(0));

        assert!(matches!(
            price.exclusive().unwrap_err(),
            PriceError::DivisionByZero
        ));

        let mut price = Price::eur(500, 1).unwrap();
        price.add_modifier(Money::usd(100));
        assert!(matches!(
            price.exclusive().unwrap_err(),
            PriceError::CurrencyMismatch { .. }
        ));
    }

    #[test]
    fn test_accessors_reflect_current_ledger() {
        let mut price = Price::eur(500, 1).unwrap();
        assert_eq!(price.exclusive().unwrap().minor(), 500);

        price.add_modifier(100);
        assert_eq!(price.exclusive().unwrap().minor(), 600);

        price.add_modifier(Modifier::new().multiply(2));
        assert_eq!(price.exclusive().unwrap().minor(), 1200);
    }

    #[test]
    fn test_modifications_in_insertion_order() {
        let mut price = Price::eur(500, 1).unwrap();
        price
            .add_keyed_modifier("first", Modifier::new().add(125))
            .add_keyed_modifier("second", Modifier::new().add(100));

        let history = price.modifications(None).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].key.as_deref(), Some("first"));
        assert_eq!(history[0].amount, Money::eur(125));
        assert_eq!(history[1].key.as_deref(), Some("second"));
        assert_eq!(history[1].amount, Money::eur(100));

        assert_eq!(price.exclusive().unwrap().minor(), 725);
    }

    #[test]
    fn test_modifications_filtered_by_kind() {
        let mut price = Price::eur(500, 1).unwrap();
        price
            .add_modifier(Modifier::new().add(100))
            .add_modifier(Modifier::new().multiply(1.25))
            .add_discount(-100);

        let discounts = price.modifications(Some(ModifierKind::Discount)).unwrap();
        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].amount, Money::eur(-100));
        assert_eq!(discounts[0].kind, ModifierKind::Discount);

        assert_eq!(price.exclusive().unwrap().minor(), 650);
    }

    #[test]
    fn test_modification_amount_is_delta_at_replay_position() {
        let mut price = Price::eur(500, 1).unwrap();
        price
            .add_modifier(Modifier::new().multiply(2))
            .add_modifier(Modifier::new().multiply(2));

        let history = price.modifications(None).unwrap();
        // First doubling contributes 500, second doubling contributes 1000
        assert_eq!(history[0].amount.minor(), 500);
        assert_eq!(history[1].amount.minor(), 1000);
    }

    #[test]
    fn test_tax_and_discount_wrappers() {
        let mut price = Price::eur(500, 1).unwrap();
        price.add_tax(50);
        assert_eq!(price.exclusive().unwrap().minor(), 550);

        let mut price = Price::eur(500, 1).unwrap();
        price.add_discount(-50);
        assert_eq!(price.exclusive().unwrap().minor(), 450);
    }

    #[test]
    fn test_base_is_untouched_by_modifiers() {
        let mut price = Price::eur(500, 2).unwrap();
        price.add_modifier(100);
        assert_eq!(price.base(), Money::eur(500));
        assert_eq!(price.currency(), Currency::EUR);
    }

    #[test]
    fn test_vat_rate_accessors() {
        let mut price = Price::eur(500, 1).unwrap();
        assert!(price.vat_percent().is_none());

        price.set_vat(8.25).unwrap();
        assert_eq!(price.vat_rate().unwrap().bps(), 825);
        assert_eq!(price.vat_percent(), Some(8.25));

        price.clear_vat();
        assert!(price.vat_rate().is_none());
    }

    #[test]
    fn test_serde_round() {
        let mut price = Price::eur(500, 2).unwrap();
        price
            .add_keyed_modifier("promo", Modifier::new().multiply(1.25).subtract(50))
            .set_vat(21.0)
            .unwrap();

        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
        assert_eq!(back.exclusive().unwrap(), price.exclusive().unwrap());
    }
}
