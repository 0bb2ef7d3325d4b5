//! Remote driver collaborator interface.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RemoteDriver`] | One open remote automation session |
//! | [`DriverFactory`] | Opens remote sessions |
//! | [`By`] | Primitive element query |
//! | [`Capabilities`] | Parsed desired capabilities |
//! | [`Platform`] | Android or iOS |
//! | [`Element`] | Matched element handle |

// ============================================================================
// Submodules
// ============================================================================

/// Desired capabilities parsing and platform detection.
pub mod capabilities;

/// Element handles.
pub mod element;

/// Remote driver and factory traits.
pub mod remote;

/// Primitive element queries.
pub mod selector;

// ============================================================================
// Re-exports
// ============================================================================

pub use capabilities::{Capabilities, Platform};
pub use element::Element;
pub use remote::{DriverFactory, RemoteDriver, ScriptOutput};
pub use selector::By;
