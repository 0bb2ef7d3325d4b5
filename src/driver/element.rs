//! Element handles returned by locator resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifiers::{ElementId, SessionId};

// ============================================================================
// Element
// ============================================================================

/// A matched element in one application session.
///
/// The handle is plain data: it names the element and the session it was
/// found in. Interacting with it goes through that session's driver, so a
/// handle never keeps a closed session's connection alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    session: SessionId,
}

impl Element {
    /// Creates a new element handle.
    #[inline]
    pub(crate) fn new(id: ElementId, session: SessionId) -> Self {
        Self { id, session }
    }

    /// Returns the driver's reference for this element.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Returns the session this element belongs to.
    #[inline]
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.session)
    }
}
