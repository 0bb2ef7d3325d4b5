//! A single application session.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::debug;

use crate::driver::{Capabilities, Platform, RemoteDriver};
use crate::error::Result;
use crate::identifiers::SessionId;

// ============================================================================
// SessionState
// ============================================================================

/// Lifecycle state of a [`Session`].
///
/// `Opening -> Open -> Closed`. Nothing leaves `Closed`. A session whose
/// remote creation fails never exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Remote session created, not yet registered.
    Opening,
    /// Registered and usable.
    Open,
    /// Torn down.
    Closed,
}

// ============================================================================
// Session
// ============================================================================

/// One open connection to a remote automation-controlled application.
///
/// The session exclusively owns its driver handle.
pub struct Session {
    id: SessionId,
    alias: Option<String>,
    platform: Platform,
    capabilities: Capabilities,
    driver: Box<dyn RemoteDriver>,
    state: SessionState,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("alias", &self.alias)
            .field("platform", &self.platform)
            .field("remote_session", &self.driver.session_id())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wraps a freshly created remote session.
    pub(crate) fn new(
        id: SessionId,
        alias: Option<String>,
        platform: Platform,
        capabilities: Capabilities,
        driver: Box<dyn RemoteDriver>,
    ) -> Self {
        Self {
            id,
            alias,
            platform,
            capabilities,
            driver,
            state: SessionState::Opening,
        }
    }

    /// Marks the session as registered.
    pub(crate) fn mark_open(&mut self) {
        debug_assert_eq!(self.state, SessionState::Opening);
        self.state = SessionState::Open;
    }

    /// Tears down the remote session.
    ///
    /// The session is `Closed` afterwards even if the driver reports an
    /// error while quitting.
    pub(crate) fn close(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        debug!(id = %self.id, remote_session = self.driver.session_id(), "Quitting remote session");
        self.driver.quit()
    }

    /// Returns the registry index.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the alias given at open time.
    #[inline]
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the session's platform.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the capabilities the session was opened with.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the remote driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &dyn RemoteDriver {
        self.driver.as_ref()
    }

    /// Returns the lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` while the session is registered and usable.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }
}

// ============================================================================
// Tests
// ============================================================================
