//! Class-name lookup by index or visible text.
//!
//! Used by keywords such as "click button": the token is either
//! `index=<n>` (zero-based) or the element's exact visible text.

use tracing::debug;

use crate::driver::{By, Element};
use crate::error::{Error, Result};
use crate::session::Session;

/// Prefix selecting an element by position.
const INDEX_PREFIX: &str = "index=";

/// Finds one element of `class_name` by `index=<n>` or visible text.
///
/// With visible text every match is inspected and the last equal element
/// is returned.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if the index is not a non-negative integer
/// - [`Error::ElementNotFound`] if the index is out of range or no text matches
pub fn find_by_class_name(session: &Session, class_name: &str, index_or_text: &str) -> Result<Element> {
    let driver = session.driver();
    let ids = driver.find_elements(&By::class_name(class_name))?;

    let found = if let Some(index) = index_or_text.strip_prefix(INDEX_PREFIX) {
        let index: usize = index.trim().parse().map_err(|_| {
            Error::invalid_argument(format!("'{index_or_text}' is not a valid element index"))
        })?;
        ids.into_iter().nth(index)
    } else {
        let mut last = None;
        for id in ids {
            let text = driver.text(&id)?;
            debug!(class_name, text = %text, "Inspecting element text");
            if text == index_or_text {
                last = Some(id);
            }
        }
        last
    };

    found
        .map(|id| Element::new(id, session.id()))
        .ok_or_else(|| Error::element_not_found(format!("{class_name}:{index_or_text}")))
}

// ============================================================================
// Tests
// ============================================================================
