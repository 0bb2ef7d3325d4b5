//! Locator string parsing.
//!
//! Grammar: `[<strategy>=]<criteria>`, or any string starting with `//`,
//! which is always raw XPath under the default strategy.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::strategy::{Strategy, StrategyRegistry};
use super::tag;

// ============================================================================
// ParsedLocator
// ============================================================================

/// Result of parsing one locator string against an optional element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLocator {
    /// Upper-cased name of the selected strategy, `DEFAULT` without a prefix.
    pub strategy_name: String,
    /// Strategy-specific payload.
    pub criteria: String,
    /// Normalized tag filter, `None` for no filtering.
    pub tag: Option<String>,
    /// Attribute constraints implied by the tag alias.
    pub constraints: BTreeMap<String, String>,
}

// ============================================================================
// Resolution
// ============================================================================

/// Parses a locator and selects its strategy.
///
/// The prefix before the first `=` is looked up against built-in strategies
/// and then against `strategies`. An unknown prefix, an empty side, or a
/// missing `=` makes the whole trimmed string the criteria of
/// [`Strategy::Default`]. Lookup never fails.
///
/// # Example
///
/// ```
/// use mobile_keywords::locator::{Strategy, StrategyRegistry, resolve};
///
/// let strategies = StrategyRegistry::new();
/// let (parsed, strategy) = resolve("id=login", Some("text field"), &strategies);
///
/// assert_eq!(strategy, Strategy::Id);
/// assert_eq!(parsed.criteria, "login");
/// assert_eq!(parsed.tag.as_deref(), Some("input"));
/// assert_eq!(parsed.constraints["type"], "text");
/// ```
#[must_use]
pub fn resolve(
    locator: &str,
    tag: Option<&str>,
    strategies: &StrategyRegistry,
) -> (ParsedLocator, Strategy) {
    let (strategy, criteria) = split_locator(locator, strategies);

    let (tag, constraints) = match tag.map(tag::normalize) {
        Some(normalized) => (Some(normalized.tag), normalized.constraints),
        None => (None, BTreeMap::new()),
    };

    debug!(
        locator,
        strategy = %strategy,
        criteria = %criteria,
        tag = ?tag,
        "Resolved locator"
    );

    let parsed = ParsedLocator {
        strategy_name: strategy.name().to_string(),
        criteria,
        tag,
        constraints,
    };

    (parsed, strategy)
}

/// Separates the strategy prefix from the criteria.
fn split_locator(locator: &str, strategies: &StrategyRegistry) -> (Strategy, String) {
    if locator.starts_with("//") {
        return (Strategy::Default, locator.to_string());
    }

    if let Some((prefix, criteria)) = locator.split_once('=') {
        let (prefix, criteria) = (prefix.trim(), criteria.trim());
        if !prefix.is_empty()
            && !criteria.is_empty()
            && let Some(strategy) = strategies.lookup(prefix)
        {
            return (strategy, criteria.to_string());
        }
    }

    (Strategy::Default, locator.trim().to_string())
}

// ============================================================================
// Tests
// ============================================================================
