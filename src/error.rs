//! Error types for mobile keywords.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use mobile_keywords::{Library, Result};
//!
//! fn example(library: &Library) -> Result<()> {
//!     let element = library.find_element("id=submit")?;
//!     println!("found {}", element.id());
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::CapabilitiesFormat`] |
//! | Locator | [`Error::UnsupportedPlatform`], [`Error::ElementNotFound`], [`Error::InvalidArgument`] |
//! | Session | [`Error::UnknownSession`], [`Error::NoOpenSession`] |
//! | Collaborator | [`Error::Driver`], [`Error::Json`] |
//!
//! Every error is fatal to the call that produced it. Nothing in this crate
//! retries; polling for an element belongs to the caller.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::driver::Platform;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned for an unrecognized platform, a malformed remote URL,
    /// or an incomplete library builder.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Capability string entry is not `key=value`.
    #[error("Desired capabilities format error: '{entry}' is not key=value")]
    CapabilitiesFormat {
        /// The offending entry, trimmed.
        entry: String,
    },

    // ========================================================================
    // Locator Errors
    // ========================================================================
    /// Platform-specific strategy used against the wrong platform.
    #[error("Strategy '{strategy}' is not supported on platform {platform}")]
    UnsupportedPlatform {
        /// Name of the rejected strategy.
        strategy: String,
        /// Platform of the session the query ran against.
        platform: Platform,
    },

    /// A required lookup matched nothing.
    #[error("Element locator '{locator}' did not match any elements")]
    ElementNotFound {
        /// Locator (or class-name token) that was searched for.
        locator: String,
    },

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// No open session matches the given index or alias.
    #[error("Non-existing index or alias '{token}'")]
    UnknownSession {
        /// Index or alias that failed to resolve.
        token: String,
    },

    /// No application is currently open.
    #[error("No application is open")]
    NoOpenSession,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// Failure reported by the remote driver.
    #[error("Driver error: {message}")]
    Driver {
        /// Description reported by the driver.
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a capabilities format error.
    #[inline]
    pub fn capabilities_format(entry: impl Into<String>) -> Self {
        Self::CapabilitiesFormat {
            entry: entry.into(),
        }
    }

    /// Creates an unsupported platform error.
    #[inline]
    pub fn unsupported_platform(strategy: impl Into<String>, platform: Platform) -> Self {
        Self::UnsupportedPlatform {
            strategy: strategy.into(),
            platform,
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an unknown session error.
    #[inline]
    pub fn unknown_session(token: impl Into<String>) -> Self {
        Self::UnknownSession {
            token: token.into(),
        }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error rejected a session's configuration.
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::CapabilitiesFormat { .. })
    }

    /// Returns `true` if this error came out of locator resolution.
    #[inline]
    #[must_use]
    pub fn is_locator_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform { .. }
                | Self::ElementNotFound { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Returns `true` if this error refers to a missing session.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::UnknownSession { .. } | Self::NoOpenSession)
    }
}

// ============================================================================
// Tests
// ============================================================================
