//! Builder pattern for library configuration.
//!
//! Provides a fluent API for configuring and creating [`Library`] instances.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use mobile_keywords::{Library, StrategyRegistry};
//!
//! let strategies = Arc::new(StrategyRegistry::new());
//! let library = Library::builder()
//!     .driver_factory(my_factory)
//!     .strategies(Arc::clone(&strategies))
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::driver::DriverFactory;
use crate::error::{Error, Result};
use crate::locator::StrategyRegistry;

use super::core::{DEFAULT_TIMEOUT, Library};

// ============================================================================
// LibraryBuilder
// ============================================================================

/// Builder for configuring a [`Library`] instance.
///
/// Use [`Library::builder()`] to create a new builder.
#[derive(Clone, Default)]
pub struct LibraryBuilder {
    /// Opens remote sessions.
    factory: Option<Arc<dyn DriverFactory>>,
    /// Shared custom strategy table.
    strategies: Option<Arc<StrategyRegistry>>,
    /// Timeout handed to wait keywords.
    timeout: Option<Duration>,
}

impl fmt::Debug for LibraryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryBuilder")
            .field("has_factory", &self.factory.is_some())
            .field("strategies", &self.strategies)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// LibraryBuilder Implementation
// ============================================================================

impl LibraryBuilder {
    /// Creates a new builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the factory used to open remote sessions.
    #[inline]
    #[must_use]
    pub fn driver_factory(mut self, factory: impl DriverFactory + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Shares a custom strategy table with other libraries.
    ///
    /// Defaults to a fresh, empty table.
    #[inline]
    #[must_use]
    pub fn strategies(mut self, strategies: Arc<StrategyRegistry>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Sets the timeout exposed to wait keywords.
    ///
    /// Defaults to 5 seconds. Lookups in this crate never wait.
    #[inline]
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no driver factory is set.
    pub fn build(self) -> Result<Library> {
        let factory = self.factory.ok_or_else(|| {
            Error::config(
                "Driver factory is required. Use .driver_factory() to set it.\n\
                 Example: Library::builder().driver_factory(my_factory)",
            )
        })?;

        Ok(Library::new(
            factory,
            self.strategies.unwrap_or_default(),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
