//! Locator resolution engine.
//!
//! Turns a human-authored locator string into element queries against a
//! session:
//!
//! 1. [`resolve`] splits the locator into a [`Strategy`] and criteria,
//!    consulting the [`StrategyRegistry`], and normalizes the element type
//!    with [`normalize`].
//! 2. [`Strategy::find_by`] runs the strategy against a
//!    [`Session`](crate::session::Session), building XPath with
//!    [`escape_xpath_value`] where needed.
//!
//! # Locator Grammar
//!
//! | Locator | Strategy | Criteria |
//! |---------|----------|----------|
//! | `id=login` | `Id` | `login` |
//! | `xpath=//div` | `XPath` | `//div` |
//! | `//div[@a='b']` | `Default` (raw XPath) | unchanged |
//! | `myplugin=a,b` | `Custom` if registered | `a,b` |
//! | `login` | `Default` (key attributes) | `login` |

// ============================================================================
// Submodules
// ============================================================================

/// Class-name lookup by index or visible text.
pub mod class_name;

/// XPath literal escaping.
pub mod escape;

/// Locator parsing.
pub mod parser;

/// Strategy execution.
pub mod query;

/// Strategy table.
pub mod strategy;

/// Element-type aliases.
pub mod tag;

// ============================================================================
// Re-exports
// ============================================================================

pub use class_name::find_by_class_name;
pub use escape::escape_xpath_value;
pub use parser::{ParsedLocator, resolve};
pub use query::build_key_attrs_xpath;
pub use strategy::{BUILTIN_STRATEGIES, CustomStrategy, Strategy, StrategyRegistry};
pub use tag::{NormalizedTag, normalize};
