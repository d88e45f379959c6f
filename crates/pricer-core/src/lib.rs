//! # pricer-core: Pure Pricing Logic
//!
//! This crate is the **heart** of Pricer. It computes a monetary price as a
//! pipeline of ordered adjustments (modifiers) applied to a unit amount,
//! scaled by quantity, with an optional VAT layer and a pluggable textual
//! rendering stage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricer Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Host Application                               │   │
//! │  │    catalog ──► line pricing ──► invoicing ──► rendering         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ modifier  │  │   price   │  │  format   │  │   │
//! │  │   │   Money   │  │ Modifier  │  │   Price   │  │ Registry  │  │   │
//! │  │   │  Factor   │  │  replay   │  │ VAT math  │  │ renderers │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`currency`] - ISO 4217 currencies and their minor-unit exponents
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`modifier`] - Ordered arithmetic operations applied as one unit
//! - [`price`] - The Price aggregate: ledger replay, quantity scaling, VAT
//! - [`format`] - Pluggable display formatting with a process-wide registry
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every resolution is deterministic - same ledger = same total
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Monetary values are minor units (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pricer_core::{Modifier, Price};
//!
//! // 5.00 EUR a piece, two pieces
//! let mut price = Price::of("EUR", 500, 2)?;
//!
//! // Add 1.00 EUR handling per unit, then 10% VAT on the total
//! price
//!     .add_keyed_modifier("handling", Modifier::new().add(100))
//!     .set_vat(10.0)?;
//!
//! assert_eq!(price.exclusive()?.to_string(), "EUR 12.00");
//! assert_eq!(price.vat()?.to_string(), "EUR 1.20");
//! assert_eq!(price.inclusive()?.to_string(), "EUR 13.20");
//! # Ok::<(), pricer_core::PriceError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod format;
pub mod modifier;
pub mod money;
pub mod price;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pricer_core::Price` instead of
// `use pricer_core::price::Price`

pub use currency::Currency;
pub use error::{PriceError, PriceResult, ValidationError};
pub use format::{CustomFormatter, FormatterArg, FormatterRegistry};
pub use modifier::{Modifier, ModifierKind, Operand, Operation};
pub use money::{Factor, Money};
pub use price::{Modification, Price, VatRate};
