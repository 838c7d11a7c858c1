//! Locator abstraction.
//!
//! A [`Locator`] is a lazily-resolved chain of selector steps bound to a
//! [`Page`]. Nothing touches the DOM until an action or query runs; at that
//! point the chain is resolved against the live document, auto-waiting up to
//! the action timeout. Locators are strict by default: an action on a chain
//! that matches several elements fails instead of picking one.

use crate::driver::{ElementAction, ElementState};
use crate::page::Page;
use crate::result::{E2eError, E2eResult};
use crate::wait::{poll_until, WaitOptions};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

// =============================================================================
// SELECTORS
// =============================================================================

/// ARIA roles the page objects query by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Buttons and submit inputs
    Button,
    /// Text inputs and textareas
    Textbox,
    /// Checkboxes
    Checkbox,
    /// `<option>` entries
    Option,
    /// Modal dialogs
    Dialog,
    /// Headings
    Heading,
    /// `<select>` elements
    Combobox,
}

impl Role {
    /// ARIA role name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Textbox => "textbox",
            Self::Checkbox => "checkbox",
            Self::Option => "option",
            Self::Dialog => "dialog",
            Self::Heading => "heading",
            Self::Combobox => "combobox",
        }
    }

    /// CSS selector list matching elements with this implicit or explicit role
    #[must_use]
    pub const fn css(&self) -> &'static str {
        match self {
            Self::Button => {
                r#"button, [role="button"], input[type="button"], input[type="submit"]"#
            }
            Self::Textbox => {
                r#"input:not([type]), input[type="text"], input[type="password"], input[type="email"], input[type="number"], input[type="tel"], textarea, [role="textbox"]"#
            }
            Self::Checkbox => r#"input[type="checkbox"], [role="checkbox"]"#,
            Self::Option => r#"option, [role="option"]"#,
            Self::Dialog => r#"dialog, [role="dialog"]"#,
            Self::Heading => r#"h1, h2, h3, h4, h5, h6, [role="heading"]"#,
            Self::Combobox => r#"select, [role="combobox"]"#,
        }
    }
}

/// One step of a selector chain, applied to the matches of the previous step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Descendants matching a CSS selector
    Css(String),
    /// CSS matches whose text contains a substring (case-insensitive)
    CssWithText {
        /// CSS selector
        css: String,
        /// Required text fragment
        text: String,
    },
    /// Innermost descendants whose text contains a substring (case-insensitive)
    Text(String),
    /// Descendants with an ARIA role
    Role(Role),
    /// Keep only the n-th match (0-based)
    Nth(usize),
    /// Step into the documents of matching iframes
    Frame(String),
}

impl Selector {
    /// JavaScript statement transforming `els` for this step.
    ///
    /// Expects a normaliser `n` and the running match list `els` in scope.
    #[must_use]
    pub fn to_js(&self) -> String {
        match self {
            Self::Css(css) => css_step(css),
            Self::Role(role) => css_step(role.css()),
            Self::CssWithText { css, text } => format!(
                "{} els = els.filter(e => n(e.textContent).includes({}));",
                css_step(css),
                js_string(&fold_text(text))
            ),
            Self::Text(text) => {
                let needle = js_string(&fold_text(text));
                format!(
                    "els = [...new Set(els.flatMap(r => Array.from(r.querySelectorAll('*')).filter(e => \
                     !['SCRIPT', 'STYLE', 'HEAD'].includes(e.tagName) && n(e.textContent).includes({needle}) && \
                     !Array.from(e.children).some(c => n(c.textContent).includes({needle})))))];"
                )
            }
            Self::Nth(index) => format!("els = els.length > {index} ? [els[{index}]] : [];"),
            Self::Frame(css) => format!(
                "els = els.flatMap(r => Array.from(r.querySelectorAll({}))).map(f => f.contentDocument).filter(Boolean);",
                js_string(css)
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::CssWithText { css, text } => write!(f, "{css}:has-text({text:?})"),
            Self::Text(text) => write!(f, "text={text:?}"),
            Self::Role(role) => write!(f, "role={}", role.name()),
            Self::Nth(index) => write!(f, "nth={index}"),
            Self::Frame(css) => write!(f, "frame={css}"),
        }
    }
}

fn css_step(css: &str) -> String {
    format!(
        "els = [...new Set(els.flatMap(r => Array.from(r.querySelectorAll({}))))];",
        js_string(css)
    )
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Collapse whitespace runs and lowercase, the way text steps compare
#[must_use]
pub fn fold_text(text: &str) -> String {
    normalize_whitespace(text).to_lowercase()
}

/// Collapse whitespace runs to single spaces and trim
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// An ordered selector chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    steps: Vec<Selector>,
}

impl Query {
    /// Chain with a single step
    #[must_use]
    pub fn new(step: Selector) -> Self {
        Self { steps: vec![step] }
    }

    /// Chain extended by one step
    #[must_use]
    pub fn then(&self, step: Selector) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Steps in application order
    #[must_use]
    pub fn steps(&self) -> &[Selector] {
        &self.steps
    }

    /// JavaScript expression evaluating to the array of matched elements
    #[must_use]
    pub fn to_js(&self) -> String {
        let mut js = String::from(
            "(() => { const n = s => (s || '').replace(/\\s+/g, ' ').trim().toLowerCase(); let els = [document];",
        );
        for step in &self.steps {
            js.push(' ');
            js.push_str(&step.to_js());
        }
        js.push_str(" return els; })()");
        js
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// How to choose an entry of a `<select>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionChoice {
    /// By position, 0-based
    Index(usize),
    /// By visible label
    Label(String),
}

impl OptionChoice {
    /// Choose by label
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }
}

impl fmt::Display for OptionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "index={i}"),
            Self::Label(label) => write!(f, "label={label:?}"),
        }
    }
}

/// Element states [`Locator::wait_for`] can wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementWait {
    /// At least one match exists
    Attached,
    /// First match is visible
    Visible,
    /// No match, or first match is not visible
    Hidden,
}

/// Locator options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Auto-wait bound in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_ms: u64,
    /// Fail when the chain matches more than one element
    pub strict: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout_ms: crate::wait::DEFAULT_ACTION_TIMEOUT_MS,
            poll_ms: crate::wait::DEFAULT_POLL_INTERVAL_MS,
            strict: true,
        }
    }
}

impl LocatorOptions {
    /// Equivalent wait options
    #[must_use]
    pub const fn wait(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.timeout_ms,
            poll_interval_ms: self.poll_ms,
        }
    }
}

// =============================================================================
// LOCATOR
// =============================================================================

/// Lazily-resolved element handle
#[derive(Debug, Clone)]
pub struct Locator {
    page: Page,
    query: Query,
    options: LocatorOptions,
}

impl Locator {
    /// Bind a chain to a page
    #[must_use]
    pub fn new(page: Page, query: Query) -> Self {
        let options = page.locator_options();
        Self {
            page,
            query,
            options,
        }
    }

    fn then(&self, step: Selector) -> Self {
        Self {
            page: self.page.clone(),
            query: self.query.then(step),
            options: self.options,
        }
    }

    /// Descendants matching CSS
    #[must_use]
    pub fn locator(&self, css: impl Into<String>) -> Self {
        self.then(Selector::Css(css.into()))
    }

    /// Descendants matching CSS that contain `text`
    #[must_use]
    pub fn locator_with_text(&self, css: impl Into<String>, text: impl Into<String>) -> Self {
        self.then(Selector::CssWithText {
            css: css.into(),
            text: text.into(),
        })
    }

    /// Innermost descendants containing `text`
    #[must_use]
    pub fn get_by_text(&self, text: impl Into<String>) -> Self {
        self.then(Selector::Text(text.into()))
    }

    /// Descendants with an ARIA role
    #[must_use]
    pub fn get_by_role(&self, role: Role) -> Self {
        self.then(Selector::Role(role))
    }

    /// n-th match (0-based)
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        self.then(Selector::Nth(index))
    }

    /// First match
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Step into matching iframes
    #[must_use]
    pub fn frame_locator(&self, css: impl Into<String>) -> Self {
        self.then(Selector::Frame(css.into()))
    }

    /// Override the auto-wait bound
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = timeout_ms;
        self
    }

    /// Allow actions on the first of several matches
    #[must_use]
    pub const fn non_strict(mut self) -> Self {
        self.options.strict = false;
        self
    }

    /// The selector chain
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Page this locator is bound to
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> LocatorOptions {
        self.options
    }

    /// Number of current matches, without waiting
    pub async fn count(&self) -> E2eResult<usize> {
        self.page.driver()?.count(&self.query).await
    }

    /// Wait until the chain resolves to a single element.
    ///
    /// Zero matches are retried until the timeout; more than one match fails
    /// immediately when strict.
    async fn resolve(&self) -> E2eResult<()> {
        let driver = self.page.driver()?;
        let deadline = Instant::now() + Duration::from_millis(self.options.timeout_ms);
        loop {
            let count = driver.count(&self.query).await?;
            match count {
                0 => {}
                1 => return Ok(()),
                _ if self.options.strict => {
                    return Err(E2eError::AmbiguousElement {
                        locator: self.query.to_string(),
                        count,
                    })
                }
                _ => return Ok(()),
            }
            if Instant::now() >= deadline {
                return Err(E2eError::ElementNotFound {
                    locator: self.query.to_string(),
                });
            }
            tokio::time::sleep(Duration::from_millis(self.options.poll_ms)).await;
        }
    }

    /// Current state of the first match, if any
    pub(crate) async fn state(&self) -> E2eResult<Option<ElementState>> {
        self.page.driver()?.inspect(&self.query).await
    }

    async fn perform(&self, action: ElementAction) -> E2eResult<()> {
        tracing::debug!(locator = %self.query, action = action.verb(), "perform");
        self.resolve().await?;
        if !action.is_forced() {
            let needs_enabled = action.needs_enabled();
            let what = format!("{} to be actionable", self.query);
            poll_until(self.options.wait(), &what, || async move {
                let ready = self.state().await?.is_some_and(|s| {
                    s.visible && (s.enabled || !needs_enabled)
                });
                Ok(ready.then_some(()))
            })
            .await?;
        }
        self.page.driver()?.perform(&self.query, &action).await
    }

    /// Click once visible and enabled
    pub async fn click(&self) -> E2eResult<()> {
        self.perform(ElementAction::Click { force: false }).await
    }

    /// Click without actionability checks (used to blur a field)
    pub async fn click_forced(&self) -> E2eResult<()> {
        self.perform(ElementAction::Click { force: true }).await
    }

    /// Move the pointer over the element
    pub async fn hover(&self) -> E2eResult<()> {
        self.perform(ElementAction::Hover).await
    }

    /// Give the element keyboard focus
    pub async fn focus(&self) -> E2eResult<()> {
        self.perform(ElementAction::Focus).await
    }

    /// Replace the element's value with `text`
    pub async fn fill(&self, text: impl Into<String>) -> E2eResult<()> {
        self.perform(ElementAction::Fill(text.into())).await
    }

    /// Empty the element's value
    pub async fn clear(&self) -> E2eResult<()> {
        self.perform(ElementAction::Clear).await
    }

    /// Tick a checkbox (no-op if already ticked)
    pub async fn check(&self) -> E2eResult<()> {
        self.perform(ElementAction::Check).await
    }

    /// Pick an entry of a `<select>`
    pub async fn select_option(&self, choice: OptionChoice) -> E2eResult<()> {
        self.perform(ElementAction::Select(choice)).await
    }

    /// Text content of the single match
    pub async fn text_content(&self) -> E2eResult<String> {
        self.resolve().await?;
        Ok(self.state().await?.map(|s| s.text).unwrap_or_default())
    }

    /// Attribute value of the single match
    pub async fn get_attribute(&self, name: &str) -> E2eResult<Option<String>> {
        self.resolve().await?;
        self.page.driver()?.attribute(&self.query, name).await
    }

    /// Visible right now; no match counts as not visible
    pub async fn is_visible(&self) -> E2eResult<bool> {
        Ok(self.state().await?.is_some_and(|s| s.visible))
    }

    /// Enabled state of the single match
    pub async fn is_enabled(&self) -> E2eResult<bool> {
        self.resolve().await?;
        Ok(self.state().await?.is_some_and(|s| s.enabled))
    }

    /// Checked state of the single match
    pub async fn is_checked(&self) -> E2eResult<bool> {
        self.resolve().await?;
        Ok(self.state().await?.is_some_and(|s| s.checked))
    }

    /// Text content of every match, in document order
    pub async fn all_text_contents(&self) -> E2eResult<Vec<String>> {
        self.page.driver()?.texts(&self.query).await
    }

    /// Wait for an element state
    pub async fn wait_for(&self, state: ElementWait) -> E2eResult<()> {
        let what = format!("{} to be {state:?}", self.query).to_lowercase();
        poll_until(self.options.wait(), &what, || async move {
            let reached = match state {
                ElementWait::Attached => self.count().await? > 0,
                ElementWait::Visible => self.is_visible().await?,
                ElementWait::Hidden => !self.is_visible().await?,
            };
            Ok(reached.then_some(()))
        })
        .await
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)
    }
}
