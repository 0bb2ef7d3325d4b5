//! Remote automation session interface.
//!
//! The wire protocol to the automation server lives outside this crate.
//! Anything that can open a session and answer element queries plugs in
//! through [`DriverFactory`] and [`RemoteDriver`].
//!
//! Every call is blocking and is issued exactly once; callers that want to
//! wait for an element poll on their own schedule.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::identifiers::ElementId;

use super::capabilities::{Capabilities, Platform};
use super::selector::By;

// ============================================================================
// ScriptOutput
// ============================================================================

/// Value returned by [`RemoteDriver::execute_script`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptOutput {
    /// Script returned nothing.
    Null,
    /// Script returned a single element.
    Element(ElementId),
    /// Script returned a list of elements.
    Elements(Vec<ElementId>),
    /// Script returned a non-element value.
    Value(Value),
}

impl ScriptOutput {
    /// Coerces the output into an element list.
    ///
    /// A single element becomes a one-element list; anything that is not
    /// an element yields an empty list.
    #[must_use]
    pub fn into_elements(self) -> Vec<ElementId> {
        match self {
            Self::Element(id) => vec![id],
            Self::Elements(ids) => ids,
            Self::Null | Self::Value(_) => Vec::new(),
        }
    }
}

// ============================================================================
// RemoteDriver
// ============================================================================

/// Handle to one open remote automation session.
pub trait RemoteDriver: Send + Sync {
    /// Returns the session identifier assigned by the remote server.
    fn session_id(&self) -> &str;

    /// Runs a primitive element query.
    fn find_elements(&self, by: &By) -> Result<Vec<ElementId>>;

    /// Executes a script with positional arguments.
    fn execute_script(&self, script: &str, args: &[Value]) -> Result<ScriptOutput>;

    /// Returns the URL of the current page or context.
    fn current_url(&self) -> Result<String>;

    /// Returns the element's tag name as reported by the server.
    fn tag_name(&self, element: &ElementId) -> Result<String>;

    /// Returns an attribute value, or `None` when the attribute is absent.
    fn attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>>;

    /// Returns the element's visible text.
    fn text(&self, element: &ElementId) -> Result<String>;

    /// Ends the remote session.
    fn quit(&self) -> Result<()>;
}

// ============================================================================
// DriverFactory
// ============================================================================

/// Opens remote sessions.
pub trait DriverFactory: Send + Sync {
    /// Creates a session on the server at `remote_url`.
    ///
    /// # Errors
    ///
    /// Any error is surfaced unchanged to the caller of `open`; no session
    /// index is allocated for a failed attempt.
    fn create(
        &self,
        remote_url: &Url,
        platform: Platform,
        capabilities: &Capabilities,
    ) -> Result<Box<dyn RemoteDriver>>;
}

impl<F> DriverFactory for F
where
    F: Fn(&Url, Platform, &Capabilities) -> Result<Box<dyn RemoteDriver>> + Send + Sync,
{
    fn create(
        &self,
        remote_url: &Url,
        platform: Platform,
        capabilities: &Capabilities,
    ) -> Result<Box<dyn RemoteDriver>> {
        self(remote_url, platform, capabilities)
    }
}

// ============================================================================
// Tests
// ============================================================================
