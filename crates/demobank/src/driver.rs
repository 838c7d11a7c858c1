//! Page driver abstraction.
//!
//! [`PageDriver`] is the seam between locators and whatever executes them:
//! the CDP driver in `browser` talks to a real Chromium tab, [`MockDriver`]
//! answers from an in-memory element table so page objects and fixtures can
//! be exercised without a browser.

use crate::locator::{OptionChoice, Query};
use crate::result::{E2eError, E2eResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Snapshot of the first element matched by a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// `textContent`
    pub text: String,
    /// Has a non-empty box and is not hidden by style
    pub visible: bool,
    /// Not disabled
    pub enabled: bool,
    /// Checkbox state
    pub checked: bool,
}

/// Interactions a driver performs on the first match of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementAction {
    /// Mouse click at the element centre
    Click {
        /// Skip actionability checks
        force: bool,
    },
    /// Pointer over the element centre
    Hover,
    /// Keyboard focus
    Focus,
    /// Replace value with text
    Fill(String),
    /// Empty the value
    Clear,
    /// Tick a checkbox
    Check,
    /// Pick a `<select>` entry
    Select(OptionChoice),
}

impl ElementAction {
    /// Short verb used in logs and mock call history
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Hover => "hover",
            Self::Focus => "focus",
            Self::Fill(_) => "fill",
            Self::Clear => "clear",
            Self::Check => "check",
            Self::Select(_) => "select",
        }
    }

    /// Bypasses visibility and enabled checks
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        matches!(self, Self::Click { force: true })
    }

    /// Requires an enabled target
    #[must_use]
    pub const fn needs_enabled(&self) -> bool {
        !matches!(self, Self::Hover)
    }
}

/// Executes queries and actions against one browser tab
#[async_trait]
pub trait PageDriver: Send + Sync + fmt::Debug {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> E2eResult<()>;

    /// Current URL
    async fn current_url(&self) -> E2eResult<String>;

    /// `document.readyState`
    async fn ready_state(&self) -> E2eResult<String>;

    /// Number of elements the query matches
    async fn count(&self, query: &Query) -> E2eResult<usize>;

    /// State of the first match, `None` when nothing matches
    async fn inspect(&self, query: &Query) -> E2eResult<Option<ElementState>>;

    /// Attribute of the first match
    async fn attribute(&self, query: &Query, name: &str) -> E2eResult<Option<String>>;

    /// Text content of every match
    async fn texts(&self, query: &Query) -> E2eResult<Vec<String>>;

    /// Perform an action on the first match
    async fn perform(&self, query: &Query, action: &ElementAction) -> E2eResult<()>;

    /// PNG screenshot of the viewport
    async fn screenshot(&self) -> E2eResult<Vec<u8>>;

    /// Close the tab
    async fn close(&self) -> E2eResult<()>;
}

// =============================================================================
// MOCK DRIVER
// =============================================================================

/// Element in the mock DOM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    /// Text content
    pub text: String,
    /// Visible
    pub visible: bool,
    /// Enabled
    pub enabled: bool,
    /// Checked
    pub checked: bool,
    /// Current input value
    pub value: String,
    /// Attributes
    pub attributes: BTreeMap<String, String>,
}

impl MockElement {
    /// Visible, enabled element with text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
            enabled: true,
            ..Self::default()
        }
    }

    /// Mark hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the `class` attribute
    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    fn state(&self) -> ElementState {
        ElementState {
            text: self.text.clone(),
            visible: self.visible,
            enabled: self.enabled,
            checked: self.checked,
        }
    }
}

/// Mutable view of the mock document, handed to reactions
#[derive(Debug, Default)]
pub struct MockDom {
    url: String,
    ready_state: String,
    elements: HashMap<String, Vec<MockElement>>,
}

impl MockDom {
    /// Replace all elements under a key
    pub fn set(&mut self, key: impl Into<String>, elements: Vec<MockElement>) {
        self.elements.insert(key.into(), elements);
    }

    /// Remove every element under a key
    pub fn remove(&mut self, key: &str) {
        self.elements.remove(key);
    }

    /// First element under a key
    #[must_use]
    pub fn element(&self, key: &str) -> Option<&MockElement> {
        self.elements.get(key).and_then(|els| els.first())
    }

    /// First element under a key, mutably
    pub fn element_mut(&mut self, key: &str) -> Option<&mut MockElement> {
        self.elements.get_mut(key).and_then(|els| els.first_mut())
    }

    /// Current value of the first element under a key
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.element(key).map(|el| el.value.as_str())
    }

    /// Set text of the first element under a key, creating it if missing
    pub fn set_text(&mut self, key: &str, text: impl Into<String>) {
        let text = text.into();
        match self.element_mut(key) {
            Some(el) => el.text = text,
            None => self.set(key, vec![MockElement::new(text)]),
        }
    }

    /// Set an attribute of the first element under a key
    pub fn set_attr(&mut self, key: &str, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(key) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Show or hide the first element under a key
    pub fn set_visible(&mut self, key: &str, visible: bool) {
        if let Some(el) = self.element_mut(key) {
            el.visible = visible;
        }
    }

    /// Enable or disable the first element under a key
    pub fn set_enabled(&mut self, key: &str, enabled: bool) {
        if let Some(el) = self.element_mut(key) {
            el.enabled = enabled;
        }
    }
}

/// Callback run after the mock applies an action to a key
pub type Reaction = Box<dyn Fn(&mut MockDom, &ElementAction) + Send + Sync>;

struct MockState {
    dom: MockDom,
    reactions: Vec<(String, Reaction)>,
    navigations: Vec<(String, Reaction)>,
    history: Vec<String>,
    screenshot: Vec<u8>,
    closed: bool,
}

/// In-memory driver keyed by rendered selector chains.
///
/// Elements are registered under the `Display` form of the [`Query`] a
/// locator resolves, e.g. `#login_id` or
/// `.box-white:has-text("przelew") >> role=button`. Reactions emulate the
/// application's responses to user actions.
#[derive(Clone)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("MockDriver")
            .field("url", &state.dom.url)
            .field("keys", &state.dom.elements.len())
            .field("calls", &state.history.len())
            .finish()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Empty document at `about:blank`
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                dom: MockDom {
                    url: "about:blank".to_string(),
                    ready_state: "complete".to_string(),
                    elements: HashMap::new(),
                },
                reactions: Vec::new(),
                navigations: Vec::new(),
                history: Vec::new(),
                screenshot: Vec::new(),
                closed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register one element under a key
    pub fn insert(&self, key: impl ToString, element: MockElement) {
        self.lock().dom.set(key.to_string(), vec![element]);
    }

    /// Register several elements under a key
    pub fn insert_all(&self, key: impl ToString, elements: Vec<MockElement>) {
        self.lock().dom.set(key.to_string(), elements);
    }

    /// Mutate the document directly
    pub fn with_dom<R>(&self, f: impl FnOnce(&mut MockDom) -> R) -> R {
        f(&mut self.lock().dom)
    }

    /// Run `reaction` after every action on `key`
    pub fn on_action<F>(&self, key: impl ToString, reaction: F)
    where
        F: Fn(&mut MockDom, &ElementAction) + Send + Sync + 'static,
    {
        self.lock()
            .reactions
            .push((key.to_string(), Box::new(reaction)));
    }

    /// Run `reaction` after navigating to `url`
    pub fn on_navigate<F>(&self, url: impl ToString, reaction: F)
    where
        F: Fn(&mut MockDom) + Send + Sync + 'static,
    {
        self.lock()
            .navigations
            .push((url.to_string(), Box::new(move |dom, _| reaction(dom))));
    }

    /// Bytes returned by `screenshot`
    pub fn set_screenshot(&self, png: Vec<u8>) {
        self.lock().screenshot = png;
    }

    /// Value `ready_state` reports
    pub fn set_ready_state(&self, state: impl Into<String>) {
        self.lock().dom.ready_state = state.into();
    }

    /// Recorded calls, as `verb:target`
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Whether a call with this exact `verb:target` was recorded
    #[must_use]
    pub fn was_called(&self, entry: &str) -> bool {
        self.lock().history.iter().any(|h| h == entry)
    }

    /// Position of the first matching call in the history
    #[must_use]
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.lock().history.iter().position(|h| h == entry)
    }

    /// Current value of the first element under a key
    #[must_use]
    pub fn value(&self, key: impl ToString) -> Option<String> {
        self.lock().dom.value(&key.to_string()).map(str::to_string)
    }

    /// Whether `close` has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn live(&self) -> E2eResult<MutexGuard<'_, MockState>> {
        let state = self.lock();
        if state.closed {
            return Err(E2eError::PageClosed);
        }
        Ok(state)
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&self, url: &str) -> E2eResult<()> {
        let mut guard = self.live()?;
        let state = &mut *guard;
        state.history.push(format!("navigate:{url}"));
        state.dom.url = url.to_string();
        for (target, reaction) in &state.navigations {
            if target == url {
                reaction(&mut state.dom, &ElementAction::Focus);
            }
        }
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self.live()?.dom.url.clone())
    }

    async fn ready_state(&self) -> E2eResult<String> {
        Ok(self.live()?.dom.ready_state.clone())
    }

    async fn count(&self, query: &Query) -> E2eResult<usize> {
        let key = query.to_string();
        Ok(self.live()?.dom.elements.get(&key).map_or(0, Vec::len))
    }

    async fn inspect(&self, query: &Query) -> E2eResult<Option<ElementState>> {
        let key = query.to_string();
        Ok(self.live()?.dom.element(&key).map(MockElement::state))
    }

    async fn attribute(&self, query: &Query, name: &str) -> E2eResult<Option<String>> {
        let key = query.to_string();
        Ok(self
            .live()?
            .dom
            .element(&key)
            .and_then(|el| el.attributes.get(name).cloned()))
    }

    async fn texts(&self, query: &Query) -> E2eResult<Vec<String>> {
        let key = query.to_string();
        Ok(self
            .live()?
            .dom
            .elements
            .get(&key)
            .map(|els| els.iter().map(|el| el.text.clone()).collect())
            .unwrap_or_default())
    }

    async fn perform(&self, query: &Query, action: &ElementAction) -> E2eResult<()> {
        let key = query.to_string();
        let mut guard = self.live()?;
        let state = &mut *guard;
        let Some(element) = state.dom.element_mut(&key) else {
            return Err(E2eError::ElementNotFound { locator: key });
        };
        match action {
            ElementAction::Fill(text) => element.value.clone_from(text),
            ElementAction::Clear => element.value.clear(),
            ElementAction::Check => element.checked = true,
            ElementAction::Select(choice) => element.value = choice.to_string(),
            ElementAction::Click { .. } | ElementAction::Hover | ElementAction::Focus => {}
        }
        state.history.push(format!("{}:{key}", action.verb()));
        for (target, reaction) in &state.reactions {
            if *target == key {
                reaction(&mut state.dom, action);
            }
        }
        Ok(())
    }

    async fn screenshot(&self) -> E2eResult<Vec<u8>> {
        Ok(self.live()?.screenshot.clone())
    }

    async fn close(&self) -> E2eResult<()> {
        let mut state = self.lock();
        state.closed = true;
        state.history.push("close".to_string());
        Ok(())
    }
}
