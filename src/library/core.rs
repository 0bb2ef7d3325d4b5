//! Keyword-facing library instance.
//!
//! A [`Library`] ties together the session registry, the driver factory,
//! and the shared strategy table. Keyword adapters call one method per
//! keyword; every element lookup runs against the current session.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::driver::{DriverFactory, Element};
use crate::error::{Error, Result};
use crate::identifiers::SessionId;
use crate::locator::{self, StrategyRegistry};
use crate::session::{Session, SessionRegistry};

use super::builder::LibraryBuilder;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout handed to wait keywords.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Library
// ============================================================================

/// One keyword library instance.
///
/// Each test-run context owns its own `Library`. Custom strategies may be
/// shared between instances through [`LibraryBuilder::strategies`].
pub struct Library {
    /// Opens remote sessions.
    factory: Arc<dyn DriverFactory>,
    /// Custom location strategies.
    strategies: Arc<StrategyRegistry>,
    /// Open sessions.
    sessions: SessionRegistry,
    /// Timeout exposed to wait keywords.
    timeout: Duration,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("sessions", &self.sessions)
            .field("strategies", &self.strategies)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Library - Construction
// ============================================================================

impl Library {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> LibraryBuilder {
        LibraryBuilder::new()
    }

    pub(crate) fn new(
        factory: Arc<dyn DriverFactory>,
        strategies: Arc<StrategyRegistry>,
        timeout: Duration,
    ) -> Self {
        Self {
            factory,
            strategies,
            sessions: SessionRegistry::new(),
            timeout,
        }
    }
}

// ============================================================================
// Library - Applications
// ============================================================================

impl Library {
    /// Opens an application and makes it current.
    ///
    /// `alias` may be empty. `capabilities` is a comma-separated list of
    /// `key=value` entries and must name `platformName`.
    ///
    /// # Errors
    ///
    /// See [`SessionRegistry::open`].
    pub fn open_application(
        &mut self,
        remote_url: &str,
        alias: &str,
        capabilities: &str,
    ) -> Result<SessionId> {
        self.sessions
            .open(self.factory.as_ref(), remote_url, Some(alias), capabilities)
    }

    /// Switches to the application named by index or alias.
    ///
    /// Returns the previous index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if `token` names no open application.
    pub fn switch_application(&mut self, token: &str) -> Result<Option<SessionId>> {
        self.sessions.switch(token)
    }

    /// Closes the current application.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSession`] if nothing is open, or the remote
    /// teardown error.
    pub fn close_application(&mut self) -> Result<()> {
        self.sessions.close(None).map(drop)
    }

    /// Closes the application named by index or alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if `token` names no open
    /// application, or the remote teardown error.
    pub fn close_application_by(&mut self, token: &str) -> Result<()> {
        self.sessions.close(Some(token)).map(drop)
    }

    /// Closes every application and resets indices.
    ///
    /// # Errors
    ///
    /// Returns the first remote teardown error.
    pub fn close_all_applications(&mut self) -> Result<()> {
        self.sessions.close_all()
    }

    /// Returns the current application's session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSession`] if nothing is open.
    #[inline]
    pub fn current(&self) -> Result<&Session> {
        self.sessions.current()
    }

    /// Returns the session registry.
    #[inline]
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

// ============================================================================
// Library - Elements
// ============================================================================

impl Library {
    /// Resolves a locator against the current application.
    ///
    /// `tag` is an element-type alias such as `"button"` or
    /// `"text field"`. With `first_only` at most one element is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::NoOpenSession`] if nothing is open
    /// - [`Error::ElementNotFound`] if `required` and nothing matched
    /// - [`Error::UnsupportedPlatform`] for a platform-specific strategy
    ///   on the other platform
    /// - Any driver error
    pub fn resolve(
        &self,
        locator: &str,
        tag: Option<&str>,
        first_only: bool,
        required: bool,
    ) -> Result<Vec<Element>> {
        let session = self.sessions.current()?;
        let (parsed, strategy) = locator::resolve(locator, tag, &self.strategies);
        let mut elements = strategy.find_by(session, &parsed)?;

        if elements.is_empty() {
            debug!(session = %session.id(), locator, required, "Locator matched nothing");
            if required {
                return Err(Error::element_not_found(locator));
            }
            return Ok(elements);
        }

        if first_only {
            elements.truncate(1);
        }
        Ok(elements)
    }

    /// Returns the first element matching `locator`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if nothing matched; see
    /// [`resolve`](Self::resolve) for the rest.
    pub fn find_element(&self, locator: &str) -> Result<Element> {
        self.resolve(locator, None, true, true)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::element_not_found(locator))
    }

    /// Returns `true` if `locator` matches at least one element.
    ///
    /// Absence is not an error.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn is_element_present(&self, locator: &str) -> Result<bool> {
        let elements = self.resolve(locator, None, true, false)?;
        Ok(!elements.is_empty())
    }

    /// Finds an element of `class_name` by `index=<n>` or visible text.
    ///
    /// # Errors
    ///
    /// See [`locator::find_by_class_name`].
    pub fn find_by_class_name(&self, class_name: &str, index_or_text: &str) -> Result<Element> {
        let session = self.sessions.current()?;
        locator::find_by_class_name(session, class_name, index_or_text)
    }

    /// Finds a button of the current platform by `index=<n>` or visible text.
    ///
    /// # Errors
    ///
    /// See [`locator::find_by_class_name`].
    pub fn find_button(&self, index_or_text: &str) -> Result<Element> {
        let session = self.sessions.current()?;
        let class_name = session.platform().button_class();
        locator::find_by_class_name(session, class_name, index_or_text)
    }

    /// Registers a script-backed location strategy.
    ///
    /// `name` is case-insensitive. With a `delimiter` the criteria is split
    /// into positional script arguments.
    pub fn add_location_strategy(&self, name: &str, expression: &str, delimiter: Option<&str>) {
        self.strategies.register(name, expression, delimiter);
    }

    /// Returns the shared strategy table.
    #[inline]
    #[must_use]
    pub fn strategies(&self) -> &Arc<StrategyRegistry> {
        &self.strategies
    }
}

// ============================================================================
// Library - Configuration
// ============================================================================

impl Library {
    /// Returns the timeout exposed to wait keywords.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the timeout exposed to wait keywords.
    #[inline]
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}

// ============================================================================
// Tests
// ============================================================================
