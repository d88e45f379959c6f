//! # Formatting Module
//!
//! Pluggable textual rendering of monetary values.
//!
//! ## Resolution Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Formatter Resolution                                   │
//! │                                                                         │
//! │  format_named("invoice", value)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Registered formatters, in registration order:                          │
//! │    1. matches("invoice")? ── no ──► next                                │
//! │    2. matches("invoice")? ── yes ─► render(value, locale)               │
//! │       │                                                                 │
//! │       ▼ (none matched)                                                  │
//! │  hardcoded default renderer (Money's Display form)                      │
//! │                                                                         │
//! │  format_default() always bypasses the list, so internal callers keep    │
//! │  a stable, override-proof rendering path.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The registry is process-wide mutable configuration. All access goes
//! through an `RwLock`; lookups clone the matching handle out and release
//! the lock before rendering, so a slow formatter never blocks writers.
//!
//! Rendering is display-only. Nothing here feeds back into price arithmetic.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::money::Money;

// =============================================================================
// Formatter Capability
// =============================================================================

/// A named rendering strategy turning a monetary value into display text.
///
/// `matches` decides which contexts the formatter serves; the default
/// implementation is a wildcard that accepts every context.
pub trait CustomFormatter: Send + Sync {
    /// Whether this formatter serves the requested context name.
    fn matches(&self, name: Option<&str>) -> bool {
        let _ = name;
        true
    }

    /// Renders the value as display text.
    fn render(&self, value: &Money, locale: Option<&str>) -> String;
}

/// Rendering closure stored for closure-based formatters.
type RenderFn = Box<dyn Fn(&Money, Option<&str>) -> String + Send + Sync>;

/// A formatter built from a closure, optionally bound to a context name.
struct ClosureFormatter {
    name: Option<String>,
    render: RenderFn,
}

impl CustomFormatter for ClosureFormatter {
    fn matches(&self, name: Option<&str>) -> bool {
        match &self.name {
            None => true,
            Some(own) => name == Some(own.as_str()),
        }
    }

    fn render(&self, value: &Money, locale: Option<&str>) -> String {
        (self.render)(value, locale)
    }
}

// =============================================================================
// Formatter Input
// =============================================================================

/// The accepted shapes of formatter registration input.
///
/// Each variant normalizes to a [`CustomFormatter`] handle once, at
/// registration time. The type system rules out every other shape, so an
/// "unrecognized formatter" condition cannot arise.
pub enum FormatterArg {
    /// An already-built formatter instance.
    Instance(Box<dyn CustomFormatter>),
    /// A rendering closure, optionally bound to a context name.
    Closure {
        name: Option<String>,
        render: RenderFn,
    },
    /// A constructor producing a formatter instance on registration.
    Factory(fn() -> Box<dyn CustomFormatter>),
}

impl FormatterArg {
    /// Wraps a wildcard rendering closure.
    pub fn closure<F>(render: F) -> Self
    where
        F: Fn(&Money, Option<&str>) -> String + Send + Sync + 'static,
    {
        FormatterArg::Closure {
            name: None,
            render: Box::new(render),
        }
    }

    /// Wraps a rendering closure bound to a context name.
    pub fn closure_named<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Money, Option<&str>) -> String + Send + Sync + 'static,
    {
        FormatterArg::Closure {
            name: Some(name.into()),
            render: Box::new(render),
        }
    }
}

impl<T: CustomFormatter + 'static> From<T> for FormatterArg {
    fn from(formatter: T) -> Self {
        FormatterArg::Instance(Box::new(formatter))
    }
}

impl From<Box<dyn CustomFormatter>> for FormatterArg {
    fn from(formatter: Box<dyn CustomFormatter>) -> Self {
        FormatterArg::Instance(formatter)
    }
}

impl From<fn() -> Box<dyn CustomFormatter>> for FormatterArg {
    fn from(factory: fn() -> Box<dyn CustomFormatter>) -> Self {
        FormatterArg::Factory(factory)
    }
}

// =============================================================================
// Default Renderer
// =============================================================================

/// The hardcoded default renderer: the currency-code-prefixed Display form.
///
/// Locale-aware rendering (symbols, separators, digit grouping) is a host
/// concern; the locale argument is forwarded to custom formatters and
/// ignored here.
fn render_default(value: &Money, _locale: Option<&str>) -> String {
    value.to_string()
}

// =============================================================================
// Formatter Registry
// =============================================================================

/// An ordered list of rendering strategies with a hardcoded fallback.
///
/// ## Lifetime
/// Hosts normally use the process-wide [`FormatterRegistry::global`]
/// instance through the free functions in this module. A registry can also
/// be constructed standalone, which keeps tests and embedded uses isolated.
pub struct FormatterRegistry {
    formatters: RwLock<Vec<Arc<dyn CustomFormatter>>>,
}

impl FormatterRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        FormatterRegistry {
            formatters: RwLock::new(Vec::new()),
        }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static FormatterRegistry {
        static GLOBAL: FormatterRegistry = FormatterRegistry::new();
        &GLOBAL
    }

    /// Normalizes the input to a formatter instance, appends it to the
    /// registry and returns the instance.
    pub fn format_using(&self, formatter: impl Into<FormatterArg>) -> Arc<dyn CustomFormatter> {
        let instance: Arc<dyn CustomFormatter> = match formatter.into() {
            FormatterArg::Instance(instance) => Arc::from(instance),
            FormatterArg::Closure { name, render } => Arc::new(ClosureFormatter { name, render }),
            FormatterArg::Factory(factory) => Arc::from(factory()),
        };

        let mut formatters = self
            .formatters
            .write()
            .expect("formatter registry lock poisoned");
        formatters.push(instance.clone());
        debug!(total = formatters.len(), "registered price formatter");

        instance
    }

    /// Renders a value through the first wildcard formatter, falling back to
    /// the default renderer.
    pub fn format(&self, value: &Money, locale: Option<&str>) -> String {
        self.call_assigned(None, value, locale)
    }

    /// Renders a value for a named context, falling back to the default
    /// renderer when no registered formatter matches the name.
    pub fn format_named(&self, name: &str, value: &Money, locale: Option<&str>) -> String {
        self.call_assigned(Some(name), value, locale)
    }

    /// Renders a value with the hardcoded default renderer, bypassing the
    /// registry entirely.
    pub fn format_default(value: &Money, locale: Option<&str>) -> String {
        render_default(value, locale)
    }

    /// Unregisters all formatters.
    pub fn forget_all_formatters(&self) {
        let mut formatters = self
            .formatters
            .write()
            .expect("formatter registry lock poisoned");
        formatters.clear();
        debug!("cleared price formatter registry");
    }

    /// Number of registered formatters.
    pub fn len(&self) -> usize {
        self.formatters
            .read()
            .expect("formatter registry lock poisoned")
            .len()
    }

    /// Checks if no formatter is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First registered formatter accepting the requested name, if any.
    ///
    /// Clones the handle out so the lock is released before rendering.
    fn assigned(&self, name: Option<&str>) -> Option<Arc<dyn CustomFormatter>> {
        let formatters = self
            .formatters
            .read()
            .expect("formatter registry lock poisoned");
        formatters.iter().find(|f| f.matches(name)).cloned()
    }

    fn call_assigned(&self, name: Option<&str>, value: &Money, locale: Option<&str>) -> String {
        match self.assigned(name) {
            Some(formatter) => formatter.render(value, locale),
            None => render_default(value, locale),
        }
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Process-Wide Surface
// =============================================================================

/// Registers a formatter on the process-wide registry.
pub fn format_using(formatter: impl Into<FormatterArg>) -> Arc<dyn CustomFormatter> {
    FormatterRegistry::global().format_using(formatter)
}

/// Renders a value through the process-wide registry.
pub fn format(value: &Money, locale: Option<&str>) -> String {
    FormatterRegistry::global().format(value, locale)
}

/// Renders a value for a named context through the process-wide registry.
pub fn format_named(name: &str, value: &Money, locale: Option<&str>) -> String {
    FormatterRegistry::global().format_named(name, value, locale)
}

/// Renders a value with the hardcoded default renderer.
pub fn format_default(value: &Money, locale: Option<&str>) -> String {
    FormatterRegistry::format_default(value, locale)
}

/// Clears the process-wide registry; the reset hook for test isolation and
/// reconfiguration.
pub fn forget_all_formatters() {
    FormatterRegistry::global().forget_all_formatters()
}

// =============================================================================
// Unit Tests
// =============================================================================
