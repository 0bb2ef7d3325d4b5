//! In-memory driver doubles for unit tests.
//!
//! [`FakeDriver`] answers queries from a canned table and records every
//! call. Clones share state, so a test can keep one handle while the
//! session owns another.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use url::Url;

use crate::driver::{By, Capabilities, DriverFactory, Platform, RemoteDriver, ScriptOutput};
use crate::error::{Error, Result};
use crate::identifiers::ElementId;

// ============================================================================
// FakeDriver
// ============================================================================

/// Canned element data.
#[derive(Debug, Clone, Default)]
struct FakeElement {
    tag: String,
    attributes: FxHashMap<String, String>,
    text: String,
}

#[derive(Debug, Default)]
struct FakeState {
    url: String,
    results: Vec<(By, Vec<ElementId>)>,
    elements: FxHashMap<ElementId, FakeElement>,
    script_output: Option<ScriptOutput>,
    queries: Vec<By>,
    scripts: Vec<(String, Vec<Value>)>,
    url_reads: usize,
    text_reads: usize,
    quit_count: usize,
    fail_queries: bool,
    fail_quit: bool,
}

/// Scriptable [`RemoteDriver`].
#[derive(Debug, Clone)]
pub(crate) struct FakeDriver {
    session_id: String,
    state: Arc<Mutex<FakeState>>,
}

impl FakeDriver {
    pub(crate) fn new(session_id: &str) -> Self {
        let state = FakeState {
            url: "about:blank".to_string(),
            ..FakeState::default()
        };
        Self {
            session_id: session_id.to_string(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub(crate) fn with_url(self, url: &str) -> Self {
        self.state.lock().url = url.to_string();
        self
    }

    /// Answers `by` with `ids`. Unregistered queries match nothing.
    pub(crate) fn on(&self, by: By, ids: &[&str]) {
        let ids = ids.iter().copied().map(ElementId::from).collect();
        self.state.lock().results.push((by, ids));
    }

    pub(crate) fn element(&self, id: &str, tag: &str, attributes: &[(&str, &str)], text: &str) {
        let element = FakeElement {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            text: text.to_string(),
        };
        self.state.lock().elements.insert(ElementId::from(id), element);
    }

    pub(crate) fn script_returns(&self, output: ScriptOutput) {
        self.state.lock().script_output = Some(output);
    }

    pub(crate) fn fail_queries(&self) {
        self.state.lock().fail_queries = true;
    }

    pub(crate) fn fail_quit(&self) {
        self.state.lock().fail_quit = true;
    }

    pub(crate) fn queries(&self) -> Vec<By> {
        self.state.lock().queries.clone()
    }

    pub(crate) fn scripts(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().scripts.clone()
    }

    pub(crate) fn url_reads(&self) -> usize {
        self.state.lock().url_reads
    }

    pub(crate) fn text_reads(&self) -> usize {
        self.state.lock().text_reads
    }

    pub(crate) fn quit_count(&self) -> usize {
        self.state.lock().quit_count
    }

    fn with_element<T>(&self, id: &ElementId, f: impl FnOnce(&FakeElement) -> T) -> Result<T> {
        self.state
            .lock()
            .elements
            .get(id)
            .map(f)
            .ok_or_else(|| Error::driver(format!("stale element {id}")))
    }
}

impl RemoteDriver for FakeDriver {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn find_elements(&self, by: &By) -> Result<Vec<ElementId>> {
        let mut state = self.state.lock();
        if state.fail_queries {
            return Err(Error::driver("connection refused"));
        }
        state.queries.push(by.clone());

        Ok(state
            .results
            .iter()
            .find(|(query, _)| query == by)
            .map(|(_, ids)| ids.clone())
            .unwrap_or_default())
    }

    fn execute_script(&self, script: &str, args: &[Value]) -> Result<ScriptOutput> {
        let mut state = self.state.lock();
        state.scripts.push((script.to_string(), args.to_vec()));
        Ok(state.script_output.clone().unwrap_or(ScriptOutput::Null))
    }

    fn current_url(&self) -> Result<String> {
        let mut state = self.state.lock();
        state.url_reads += 1;
        Ok(state.url.clone())
    }

    fn tag_name(&self, element: &ElementId) -> Result<String> {
        self.with_element(element, |e| e.tag.clone())
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>> {
        self.with_element(element, |e| e.attributes.get(name).cloned())
    }

    fn text(&self, element: &ElementId) -> Result<String> {
        self.state.lock().text_reads += 1;
        self.with_element(element, |e| e.text.clone())
    }

    fn quit(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.quit_count += 1;
        if state.fail_quit {
            Err(Error::driver("session already terminated"))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// FakeFactory
// ============================================================================

#[derive(Debug, Default)]
struct FactoryState {
    drivers: Vec<FakeDriver>,
    fail_next: bool,
}

/// [`DriverFactory`] handing out [`FakeDriver`]s named `remote-<n>`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFactory {
    state: Arc<Mutex<FactoryState>>,
}

impl FakeFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create` call fail.
    pub(crate) fn fail_next(&self) {
        self.state.lock().fail_next = true;
    }

    /// Returns every driver created so far, in creation order.
    pub(crate) fn drivers(&self) -> Vec<FakeDriver> {
        self.state.lock().drivers.clone()
    }
}

impl DriverFactory for FakeFactory {
    fn create(
        &self,
        _remote_url: &Url,
        _platform: Platform,
        _capabilities: &Capabilities,
    ) -> Result<Box<dyn RemoteDriver>> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(Error::driver("could not start session"));
        }

        let driver = FakeDriver::new(&format!("remote-{}", state.drivers.len() + 1));
        state.drivers.push(driver.clone());
        Ok(Box::new(driver))
    }
}

/// Routes `tracing` output to the test harness when `RUST_LOG` is set.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
