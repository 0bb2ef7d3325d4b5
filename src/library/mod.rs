//! Keyword-facing facade.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Library`] | Sessions, strategies, and element keywords |
//! | [`LibraryBuilder`] | Fluent configuration for [`Library`] |

/// Library builder.
pub mod builder;

/// Library instance.
pub mod core;

pub use self::core::{DEFAULT_TIMEOUT, Library};
pub use builder::LibraryBuilder;
