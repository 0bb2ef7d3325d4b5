//! Locator strategies and the custom strategy table.
//!
//! Built-in strategies are fixed. Custom strategies are registered at
//! runtime, usually during suite setup, into a [`StrategyRegistry`] that is
//! shared between every library instance of a test run.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mobile_keywords::StrategyRegistry;
//!
//! let strategies = Arc::new(StrategyRegistry::new());
//! strategies.register("byLabel", "return findByLabel(arguments[0]);", None);
//!
//! assert!(strategies.lookup("BYLABEL").is_some());
//! assert!(strategies.lookup("id").is_some());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Locator prefixes recognized without registration, in canonical case.
pub const BUILTIN_STRATEGIES: &[&str] = &[
    "IDENTIFIER",
    "ID",
    "NAME",
    "XPATH",
    "CLASS",
    "ACCESSIBILITY_ID",
    "ANDROID",
    "IOS",
    "CSS",
];

// ============================================================================
// CustomStrategy
// ============================================================================

/// A user-registered strategy: a script run against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomStrategy {
    name: String,
    expression: String,
    delimiter: Option<String>,
}

impl CustomStrategy {
    /// Returns the upper-cased strategy name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the script executed for each lookup.
    #[inline]
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the argument delimiter, if any.
    #[inline]
    #[must_use]
    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    /// Splits criteria into positional script arguments.
    ///
    /// Without a delimiter the whole criteria is the only argument.
    #[must_use]
    pub fn arguments<'a>(&self, criteria: &'a str) -> Vec<&'a str> {
        match self.delimiter.as_deref() {
            Some(delimiter) => criteria.split(delimiter).collect(),
            None => vec![criteria],
        }
    }
}

// ============================================================================
// Strategy
// ============================================================================

/// Algorithm selected by a locator's prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Key-attribute XPath search, or raw XPath for `//` criteria.
    Default,
    /// Matches by id, then by name.
    Identifier,
    /// Matches by id.
    Id,
    /// Matches by name.
    Name,
    /// Raw XPath expression.
    XPath,
    /// Matches by platform class name.
    Class,
    /// Matches by accessibility identifier.
    AccessibilityId,
    /// Android UiAutomator expression.
    Android,
    /// iOS UIAutomation expression.
    Ios,
    /// CSS selector.
    Css,
    /// User-registered script.
    Custom(CustomStrategy),
}

impl Strategy {
    /// Looks up a built-in strategy by name, ignoring case.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        let strategy = match name.to_ascii_uppercase().as_str() {
            "IDENTIFIER" => Self::Identifier,
            "ID" => Self::Id,
            "NAME" => Self::Name,
            "XPATH" => Self::XPath,
            "CLASS" => Self::Class,
            "ACCESSIBILITY_ID" => Self::AccessibilityId,
            "ANDROID" => Self::Android,
            "IOS" => Self::Ios,
            "CSS" => Self::Css,
            _ => return None,
        };
        Some(strategy)
    }

    /// Returns the upper-cased strategy name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Default => "DEFAULT",
            Self::Identifier => "IDENTIFIER",
            Self::Id => "ID",
            Self::Name => "NAME",
            Self::XPath => "XPATH",
            Self::Class => "CLASS",
            Self::AccessibilityId => "ACCESSIBILITY_ID",
            Self::Android => "ANDROID",
            Self::Ios => "IOS",
            Self::Css => "CSS",
            Self::Custom(custom) => custom.name(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// StrategyRegistry
// ============================================================================

/// Table of custom strategies.
///
/// Writers take an exclusive lock; lookups share a read lock. Entries stay
/// until [`unregister`](Self::unregister) or [`clear`](Self::clear) is
/// called, normally at suite teardown.
#[derive(Default)]
pub struct StrategyRegistry {
    custom: RwLock<FxHashMap<String, CustomStrategy>>,
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("custom_count", &self.len())
            .finish()
    }
}

impl StrategyRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom strategy, replacing any entry with the same name.
    ///
    /// Names are case-insensitive. An empty delimiter means no delimiter.
    /// A name shadowed by a built-in is stored but never consulted.
    pub fn register(&self, name: &str, expression: &str, delimiter: Option<&str>) {
        let key = name.trim().to_uppercase();

        if Strategy::builtin(&key).is_some() {
            warn!(name = %key, "Custom strategy is shadowed by a built-in strategy");
        }

        let strategy = CustomStrategy {
            name: key.clone(),
            expression: expression.to_string(),
            delimiter: delimiter.filter(|d| !d.is_empty()).map(str::to_string),
        };

        debug!(name = %key, delimiter = ?strategy.delimiter, "Registered custom strategy");
        self.custom.write().insert(key, strategy);
    }

    /// Removes a custom strategy. Returns `true` if it existed.
    pub fn unregister(&self, name: &str) -> bool {
        self.custom.write().remove(&name.trim().to_uppercase()).is_some()
    }

    /// Removes every custom strategy.
    pub fn clear(&self) {
        self.custom.write().clear();
    }

    /// Returns the number of custom strategies.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.custom.read().len()
    }

    /// Returns `true` if no custom strategy is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.custom.read().is_empty()
    }

    /// Returns the custom strategy registered under `name`.
    #[must_use]
    pub fn custom(&self, name: &str) -> Option<CustomStrategy> {
        self.custom.read().get(&name.trim().to_uppercase()).cloned()
    }

    /// Resolves a strategy name: built-ins first, then custom strategies.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Strategy> {
        Strategy::builtin(name).or_else(|| self.custom(name).map(Strategy::Custom))
    }
}

// ============================================================================
// Tests
// ============================================================================
