//! Mobile keywords - Locator resolution and session management for mobile
//! UI test keywords.
//!
//! This library turns human-authored locator strings into element queries
//! against a remote mobile automation server, and manages several open
//! application sessions at once.
//!
//! # Architecture
//!
//! The library sits between keyword adapters and a remote driver:
//!
//! - **Keywords**: Call [`Library`] methods with locator strings and tags
//! - **Locator engine**: Parses, normalizes, and runs strategies
//! - **Remote driver**: Answers primitive queries over the wire
//!
//! Key design principles:
//!
//! - Each [`Session`] owns its [`RemoteDriver`]
//! - Element handles are plain data tagged with their [`SessionId`]
//! - Custom strategies live in a shared, lock-protected [`StrategyRegistry`]
//! - Every remote call is blocking and issued exactly once
//!
//! # Quick Start
//!
//! ```no_run
//! use mobile_keywords::{Capabilities, Library, Platform, RemoteDriver, Result};
//! use url::Url;
//! # fn connect(url: &Url) -> Result<Box<dyn RemoteDriver>> { unimplemented!() }
//!
//! fn main() -> Result<()> {
//!     let mut library = Library::builder()
//!         .driver_factory(|url: &Url, _: Platform, _: &Capabilities| connect(url))
//!         .build()?;
//!
//!     library.open_application(
//!         "http://localhost:4723/wd/hub",
//!         "main",
//!         "platformName=Android,deviceName=emulator-5554",
//!     )?;
//!
//!     let login = library.find_element("accessibility_id=Login")?;
//!     println!("Found {login}");
//!
//!     library.close_all_applications()
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | Remote driver interface, selectors, capabilities |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`library`] | Keyword-facing [`Library`] and its builder |
//! | [`locator`] | Locator parsing, strategies, XPath building |
//! | [`session`] | Sessions and the multi-session registry |

// ============================================================================
// Modules
// ============================================================================

/// Remote driver interface.
///
/// Implement [`RemoteDriver`] and [`DriverFactory`] to connect a server.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for sessions and elements.
pub mod identifiers;

/// Keyword-facing facade.
///
/// Use [`Library::builder()`] to create a configured instance.
pub mod library;

/// Locator resolution engine.
pub mod locator;

/// Application sessions.
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Driver types
pub use driver::{By, Capabilities, DriverFactory, Element, Platform, RemoteDriver, ScriptOutput};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, SessionId};

// Library types
pub use library::{Library, LibraryBuilder};

// Locator types
pub use locator::{ParsedLocator, Strategy, StrategyRegistry};

// Session types
pub use session::{Session, SessionRegistry, SessionState};
