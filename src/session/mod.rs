//! Application sessions and the multi-session registry.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | One open remote session (owns its driver) |
//! | [`SessionState`] | `Opening`, `Open`, `Closed` |
//! | [`SessionRegistry`] | Indices, aliases, and the current session |

/// Single session record.
pub mod core;

/// Session registry.
pub mod registry;

pub use self::core::{Session, SessionState};
pub use registry::SessionRegistry;
