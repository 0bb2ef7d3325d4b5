//! Registry of open application sessions.
//!
//! Sessions are tracked by integer index and optional alias. One session
//! is current at a time; keywords act on it unless told otherwise.
//!
//! ```text
//! sessions  : 1 -> Session(alias "main")   2 -> Session   3 -> Session(alias "web")
//! aliases   : "main" -> 1   "web" -> 3
//! current   : 3
//! next_id   : 4
//! ```
//!
//! The registry is not synchronized. Use one registry per test-run context.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};
use url::Url;

use crate::driver::{Capabilities, DriverFactory};
use crate::error::{Error, Result};
use crate::identifiers::SessionId;

use super::core::Session;

// ============================================================================
// SessionRegistry
// ============================================================================

/// Owns every open session, its index, and its alias.
#[derive(Debug)]
pub struct SessionRegistry {
    /// Open sessions by index.
    sessions: FxHashMap<SessionId, Session>,
    /// Alias to index. Every value is a key of `sessions`.
    aliases: FxHashMap<String, SessionId>,
    /// Current session, always a key of `sessions`.
    current: Option<SessionId>,
    /// Index handed to the next successful open.
    next_id: SessionId,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            sessions: FxHashMap::default(),
            aliases: FxHashMap::default(),
            current: None,
            next_id: SessionId::FIRST,
        }
    }
}

// ============================================================================
// SessionRegistry - Lifecycle
// ============================================================================

impl SessionRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session and makes it current.
    ///
    /// An empty alias means no alias. Registering an alias that is already
    /// in use moves it to the new session.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilitiesFormat`] if `capabilities` is malformed
    /// - [`Error::Config`] for an unknown platform or invalid URL
    /// - Any error from `factory`
    ///
    /// On error the registry is unchanged and no index is consumed.
    pub fn open(
        &mut self,
        factory: &dyn DriverFactory,
        remote_url: &str,
        alias: Option<&str>,
        capabilities: &str,
    ) -> Result<SessionId> {
        let capabilities = Capabilities::parse(capabilities)?;
        let platform = capabilities.platform()?;
        let url = Url::parse(remote_url)
            .map_err(|e| Error::config(format!("Invalid remote URL '{remote_url}': {e}")))?;

        debug!(url = %url, %platform, "Creating remote session");
        let driver = factory.create(&url, platform, &capabilities)?;

        let id = self.next_id;
        self.next_id = id.next();

        let alias = alias.filter(|a| !a.is_empty()).map(str::to_string);
        if let Some(alias) = &alias
            && let Some(previous) = self.aliases.insert(alias.clone(), id)
        {
            debug!(alias = %alias, previous = %previous, id = %id, "Alias reassigned");
        }

        let mut session = Session::new(id, alias, platform, capabilities, driver);
        session.mark_open();

        info!(
            id = %id,
            alias = ?session.alias(),
            %platform,
            remote_session = session.driver().session_id(),
            "Opened application"
        );

        self.sessions.insert(id, session);
        self.current = Some(id);

        Ok(id)
    }

    /// Makes the session named by `token` current.
    ///
    /// Returns the previously current index, which can be passed back to
    /// restore it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if `token` names no open session;
    /// the current session is unchanged.
    pub fn switch(&mut self, token: &str) -> Result<Option<SessionId>> {
        let id = self.resolve(token)?;
        let previous = self.current.replace(id);

        info!(id = %id, previous = ?previous.map(SessionId::get), "Switched application");
        Ok(previous)
    }

    /// Closes one session: the one named by `token`, or the current one.
    ///
    /// If the closed session was current, the most recently opened session
    /// still open becomes current.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSession`] if `token` names no open session
    /// - [`Error::NoOpenSession`] if `token` is `None` and nothing is current
    /// - The driver's error if the remote teardown fails; the session is
    ///   removed regardless
    pub fn close(&mut self, token: Option<&str>) -> Result<SessionId> {
        let id = match token {
            Some(token) => self.resolve(token)?,
            None => self.current.ok_or(Error::NoOpenSession)?,
        };

        let mut session = self
            .sessions
            .remove(&id)
            .ok_or_else(|| Error::unknown_session(id.to_string()))?;
        self.aliases.retain(|_, target| *target != id);

        if self.current == Some(id) {
            self.current = self.sessions.keys().max().copied();
        }

        info!(id = %id, current = ?self.current.map(SessionId::get), "Closing application");
        session.close()?;

        Ok(id)
    }

    /// Closes every session and resets indices to start from `1`.
    ///
    /// # Errors
    ///
    /// Every session is closed even if some teardowns fail; the first
    /// failure is returned.
    pub fn close_all(&mut self) -> Result<()> {
        let mut sessions: Vec<Session> = self.sessions.drain().map(|(_, s)| s).collect();
        sessions.sort_by_key(Session::id);

        self.aliases.clear();
        self.current = None;
        self.next_id = SessionId::FIRST;

        info!(count = sessions.len(), "Closing all applications");

        let mut first_error = None;
        for mut session in sessions {
            if let Err(e) = session.close() {
                warn!(id = %session.id(), error = %e, "Error closing application");
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

// ============================================================================
// SessionRegistry - Lookup
// ============================================================================

impl SessionRegistry {
    /// Resolves an index or alias to an open session's index.
    ///
    /// A token made of digits, with an optional sign, is only ever treated
    /// as an index, even when it is too large to be one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if nothing matches.
    pub fn resolve(&self, token: &str) -> Result<SessionId> {
        let trimmed = token.trim();

        let id = if is_index_token(trimmed) {
            trimmed.parse::<u32>().ok().and_then(SessionId::new)
        } else {
            self.aliases.get(token).copied()
        };

        id.filter(|id| self.sessions.contains_key(id))
            .ok_or_else(|| Error::unknown_session(token))
    }

    /// Returns the current session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSession`] if no session is open.
    pub fn current(&self) -> Result<&Session> {
        self.current
            .and_then(|id| self.sessions.get(&id))
            .ok_or(Error::NoOpenSession)
    }

    /// Returns the current session's index.
    #[inline]
    #[must_use]
    pub fn current_id(&self) -> Option<SessionId> {
        self.current
    }

    /// Returns an open session by index.
    #[inline]
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Returns open session indices in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of open sessions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no session is open.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Returns `true` for `[+-]?[0-9]+`.
fn is_index_token(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::session::SessionState;
    use crate::testing::FakeFactory;

    const URL: &str = "http://localhost:4723/wd/hub";
    const ANDROID: &str = "platformName=Android,deviceName=emulator-5554";

    fn open(registry: &mut SessionRegistry, factory: &FakeFactory, alias: &str) -> SessionId {
        registry.open(factory, URL, Some(alias), ANDROID).unwrap()
    }

    #[test]
    fn test_ids_are_sequential() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();

        let ids: Vec<u32> = (0..3).map(|_| open(&mut registry, &factory, "").get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(registry.current_id().map(SessionId::get), Some(3));
    }

    #[test]
    fn test_close_all_resets_ids() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        for _ in 0..3 {
            open(&mut registry, &factory, "");
        }

        registry.close_all().unwrap();
        assert!(registry.is_empty());
        assert!(registry.current_id().is_none());
        assert!(factory.drivers().iter().all(|d| d.quit_count() == 1));

        assert_eq!(open(&mut registry, &factory, "").get(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_close() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "");
        open(&mut registry, &factory, "");

        registry.close(None).unwrap();
        assert_eq!(open(&mut registry, &factory, "").get(), 3);
    }

    #[test]
    fn test_malformed_capabilities_consume_no_id() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();

        let err = registry
            .open(&factory, URL, None, "platformName Android,deviceName=X")
            .unwrap_err();
        assert!(matches!(err, Error::CapabilitiesFormat { .. }));
        assert!(registry.is_empty());
        assert!(factory.drivers().is_empty());

        assert_eq!(open(&mut registry, &factory, "").get(), 1);
    }

    #[test]
    fn test_unknown_platform_is_config_error() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();

        let err = registry
            .open(&factory, URL, None, "platformName=Windows")
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(factory.drivers().is_empty());
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();

        let err = registry.open(&factory, "not a url", None, ANDROID).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_factory_failure_leaves_registry_untouched() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        let first = open(&mut registry, &factory, "main");

        factory.fail_next();
        let err = registry.open(&factory, URL, Some("other"), ANDROID).unwrap_err();
        assert!(matches!(err, Error::Driver { .. }));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.current_id(), Some(first));
        assert!(registry.resolve("other").is_err());
        assert_eq!(open(&mut registry, &factory, "").get(), 2);
    }

    #[test]
    fn test_switch_by_alias_and_back() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        let main = open(&mut registry, &factory, "main");
        let web = open(&mut registry, &factory, "web");

        let previous = registry.switch("main").unwrap();
        assert_eq!(previous, Some(web));
        assert_eq!(registry.current().unwrap().id(), main);

        let restored = registry.switch(&previous.unwrap().to_string()).unwrap();
        assert_eq!(restored, Some(main));
        assert_eq!(registry.current_id(), Some(web));
    }

    #[test]
    fn test_switch_unknown_alias_keeps_current() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "main");
        let web = open(&mut registry, &factory, "web");

        let err = registry.switch("missing").unwrap_err();
        assert!(matches!(err, Error::UnknownSession { ref token } if token == "missing"));
        assert_eq!(registry.current_id(), Some(web));
    }

    #[test]
    fn test_integer_token_never_matches_alias() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "7");

        assert!(registry.switch("7").is_err());
        assert!(registry.switch("0").is_err());
        assert!(registry.switch("-1").is_err());
        assert_eq!(registry.switch(" 1 ").unwrap().map(SessionId::get), Some(1));
    }

    #[test]
    fn test_oversized_integer_token_never_matches_alias() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "main");
        open(&mut registry, &factory, "99999999999999999999");
        open(&mut registry, &factory, "+2");

        let err = registry.switch("99999999999999999999").unwrap_err();
        assert!(matches!(err, Error::UnknownSession { .. }));
        assert_eq!(registry.switch("+2").unwrap().map(SessionId::get), Some(3));
        assert_eq!(registry.current_id().map(SessionId::get), Some(2));
    }

    #[test]
    fn test_is_index_token() {
        assert!(is_index_token("12"));
        assert!(is_index_token("-1"));
        assert!(is_index_token("+3"));
        assert!(is_index_token("99999999999999999999"));
        assert!(!is_index_token(""));
        assert!(!is_index_token("-"));
        assert!(!is_index_token("1a"));
        assert!(!is_index_token("main"));
    }

    #[test]
    fn test_duplicate_alias_last_registration_wins() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "app");
        let second = open(&mut registry, &factory, "app");

        assert_eq!(registry.resolve("app").unwrap(), second);

        // Closing the first session must not drop the alias now owned by the second.
        registry.close(Some("1")).unwrap();
        assert_eq!(registry.resolve("app").unwrap(), second);
    }

    #[test]
    fn test_close_current_falls_back_to_most_recent() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "a");
        let b = open(&mut registry, &factory, "b");
        open(&mut registry, &factory, "c");

        registry.switch("a").unwrap();
        registry.close(None).unwrap();
        assert_eq!(registry.current_id().map(SessionId::get), Some(3));

        registry.close(Some("c")).unwrap();
        assert_eq!(registry.current_id(), Some(b));

        registry.close(None).unwrap();
        assert!(registry.current_id().is_none());
        assert!(matches!(registry.current(), Err(Error::NoOpenSession)));
    }

    #[test]
    fn test_close_non_current_keeps_current() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "a");
        let b = open(&mut registry, &factory, "b");

        registry.close(Some("a")).unwrap();
        assert_eq!(registry.current_id(), Some(b));
        assert!(registry.resolve("a").is_err());
        assert_eq!(registry.ids(), vec![b]);
    }

    #[test]
    fn test_closed_session_is_unknown() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "a");
        open(&mut registry, &factory, "b");

        registry.close(Some("1")).unwrap();
        assert!(matches!(registry.switch("1"), Err(Error::UnknownSession { .. })));
        assert!(matches!(registry.close(Some("a")), Err(Error::UnknownSession { .. })));
    }

    #[test]
    fn test_close_without_sessions() {
        let mut registry = SessionRegistry::new();
        assert!(matches!(registry.close(None), Err(Error::NoOpenSession)));
    }

    #[test]
    fn test_close_removes_even_if_quit_fails() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        open(&mut registry, &factory, "a");

        factory.drivers()[0].fail_quit();
        assert!(registry.close(None).is_err());
        assert!(registry.is_empty());
        assert!(registry.resolve("a").is_err());
    }

    #[test]
    fn test_close_all_reports_first_error_and_closes_rest() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        for _ in 0..3 {
            open(&mut registry, &factory, "");
        }

        factory.drivers()[1].fail_quit();
        assert!(registry.close_all().is_err());
        assert!(registry.is_empty());
        assert!(factory.drivers().iter().all(|d| d.quit_count() == 1));
    }

    #[test]
    fn test_opened_session_is_open() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        let id = open(&mut registry, &factory, "main");

        let session = registry.get(id).unwrap();
        assert_eq!(session.state(), SessionState::Open);
        assert_eq!(session.alias(), Some("main"));
    }

    #[test]
    fn test_empty_alias_is_not_registered() {
        let factory = FakeFactory::new();
        let mut registry = SessionRegistry::new();
        let id = open(&mut registry, &factory, "");

        assert!(registry.get(id).unwrap().alias().is_none());
        assert!(registry.resolve("").is_err());
    }
}
