//! Retrying assertions.
//!
//! `expect(&locator).to_have_text("...")` polls the live element until the
//! expectation holds or the locator's timeout expires, then reports the last
//! observed value. Text comparisons collapse whitespace on both sides.

use crate::locator::{normalize_whitespace, Locator};
use crate::result::{E2eError, E2eResult};
use std::time::Duration;
use tokio::time::Instant;

/// Start an assertion on a locator
#[must_use]
pub const fn expect(locator: &Locator) -> LocatorExpect<'_> {
    LocatorExpect { locator }
}

#[derive(Debug, Clone)]
enum Expectation {
    Text(String),
    ContainsText(String),
    Texts(Vec<String>),
    Count(usize),
    HasAttribute(String),
    Class(String),
    ContainsClass(String),
    LacksClass(String),
    Visible(bool),
    Enabled(bool),
    Checked(bool),
}

impl Expectation {
    fn describe(&self) -> String {
        match self {
            Self::Text(t) => format!("text {t:?}"),
            Self::ContainsText(t) => format!("text containing {t:?}"),
            Self::Texts(ts) => format!("texts {ts:?}"),
            Self::Count(n) => format!("{n} elements"),
            Self::HasAttribute(name) => format!("attribute {name}"),
            Self::Class(c) => format!("class {c:?}"),
            Self::ContainsClass(c) => format!("class containing {c:?}"),
            Self::LacksClass(c) => format!("class without {c:?}"),
            Self::Visible(true) => "visible".to_string(),
            Self::Visible(false) => "hidden".to_string(),
            Self::Enabled(true) => "enabled".to_string(),
            Self::Enabled(false) => "disabled".to_string(),
            Self::Checked(true) => "checked".to_string(),
            Self::Checked(false) => "unchecked".to_string(),
        }
    }
}

/// Assertions on one locator
#[derive(Debug, Clone, Copy)]
pub struct LocatorExpect<'a> {
    locator: &'a Locator,
}

impl LocatorExpect<'_> {
    /// Text equals `expected` (whitespace-normalised)
    pub async fn to_have_text(&self, expected: impl Into<String>) -> E2eResult<()> {
        self.settle(Expectation::Text(expected.into())).await
    }

    /// Text contains `expected` (whitespace-normalised)
    pub async fn to_contain_text(&self, expected: impl Into<String>) -> E2eResult<()> {
        self.settle(Expectation::ContainsText(expected.into())).await
    }

    /// Texts of all matches equal `expected`, in order
    pub async fn to_have_texts<S: AsRef<str>>(&self, expected: &[S]) -> E2eResult<()> {
        let expected = expected.iter().map(|s| s.as_ref().to_string()).collect();
        self.settle(Expectation::Texts(expected)).await
    }

    /// Exactly `count` matches
    pub async fn to_have_count(&self, count: usize) -> E2eResult<()> {
        self.settle(Expectation::Count(count)).await
    }

    /// Attribute is present (any value)
    pub async fn to_have_attribute(&self, name: impl Into<String>) -> E2eResult<()> {
        self.settle(Expectation::HasAttribute(name.into())).await
    }

    /// `class` attribute equals `expected`
    pub async fn to_have_class(&self, expected: impl Into<String>) -> E2eResult<()> {
        self.settle(Expectation::Class(expected.into())).await
    }

    /// `class` attribute contains the token
    pub async fn to_contain_class(&self, token: impl Into<String>) -> E2eResult<()> {
        self.settle(Expectation::ContainsClass(token.into())).await
    }

    /// `class` attribute lacks the token
    pub async fn not_to_contain_class(&self, token: impl Into<String>) -> E2eResult<()> {
        self.settle(Expectation::LacksClass(token.into())).await
    }

    /// First match is visible
    pub async fn to_be_visible(&self) -> E2eResult<()> {
        self.settle(Expectation::Visible(true)).await
    }

    /// No match, or first match is hidden
    pub async fn to_be_hidden(&self) -> E2eResult<()> {
        self.settle(Expectation::Visible(false)).await
    }

    /// First match is enabled
    pub async fn to_be_enabled(&self) -> E2eResult<()> {
        self.settle(Expectation::Enabled(true)).await
    }

    /// First match is disabled
    pub async fn to_be_disabled(&self) -> E2eResult<()> {
        self.settle(Expectation::Enabled(false)).await
    }

    /// First match is checked
    pub async fn to_be_checked(&self) -> E2eResult<()> {
        self.settle(Expectation::Checked(true)).await
    }

    /// First match is not checked
    pub async fn not_to_be_checked(&self) -> E2eResult<()> {
        self.settle(Expectation::Checked(false)).await
    }

    async fn settle(&self, expectation: Expectation) -> E2eResult<()> {
        let options = self.locator.options();
        let deadline = Instant::now() + Duration::from_millis(options.timeout_ms);
        loop {
            let (passed, actual) = self.observe(&expectation).await?;
            if passed {
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::debug!(locator = %self.locator, expected = %expectation.describe(), %actual, "assertion failed");
                return Err(E2eError::assertion(
                    self.locator.to_string(),
                    expectation.describe(),
                    actual,
                ));
            }
            tokio::time::sleep(Duration::from_millis(options.poll_ms)).await;
        }
    }

    async fn observe(&self, expectation: &Expectation) -> E2eResult<(bool, String)> {
        let locator = self.locator;
        match expectation {
            Expectation::Texts(expected) => {
                let actual = locator.all_text_contents().await?;
                let mismatch = ordered_mismatch(expected, &actual);
                Ok((mismatch.is_none(), format!("{actual:?}")))
            }
            Expectation::Count(n) => {
                let count = locator.count().await?;
                Ok((count == *n, format!("{count} elements")))
            }
            Expectation::Visible(want) => {
                let visible = locator.is_visible().await?;
                Ok((visible == *want, describe_visible(visible)))
            }
            _ => {
                let count = locator.count().await?;
                if count == 0 {
                    return Ok((false, "no element".to_string()));
                }
                if count > 1 && locator.options().strict {
                    return Err(E2eError::AmbiguousElement {
                        locator: locator.to_string(),
                        count,
                    });
                }
                self.observe_single(expectation).await
            }
        }
    }

    async fn observe_single(&self, expectation: &Expectation) -> E2eResult<(bool, String)> {
        let locator = self.locator;
        let page = locator.page().driver()?;
        let state = locator.state().await?.unwrap_or_default();
        let class = || async move {
            page.attribute(locator.query(), "class")
                .await
                .map(Option::unwrap_or_default)
        };
        Ok(match expectation {
            Expectation::Text(expected) => (
                text_matches(expected, &state.text),
                format!("{:?}", normalize_whitespace(&state.text)),
            ),
            Expectation::ContainsText(expected) => (
                text_contains(expected, &state.text),
                format!("{:?}", normalize_whitespace(&state.text)),
            ),
            Expectation::HasAttribute(name) => {
                let value = page.attribute(locator.query(), name).await?;
                (value.is_some(), format!("{value:?}"))
            }
            Expectation::Class(expected) => {
                let actual = class().await?;
                (actual.trim() == expected.trim(), format!("{actual:?}"))
            }
            Expectation::ContainsClass(token) => {
                let actual = class().await?;
                (has_class(&actual, token), format!("{actual:?}"))
            }
            Expectation::LacksClass(token) => {
                let actual = class().await?;
                (!has_class(&actual, token), format!("{actual:?}"))
            }
            Expectation::Enabled(want) => (
                state.enabled == *want,
                if state.enabled { "enabled" } else { "disabled" }.to_string(),
            ),
            Expectation::Checked(want) => (
                state.checked == *want,
                if state.checked { "checked" } else { "unchecked" }.to_string(),
            ),
            Expectation::Texts(_) | Expectation::Count(_) | Expectation::Visible(_) => {
                (false, String::new())
            }
        })
    }
}

fn describe_visible(visible: bool) -> String {
    if visible { "visible" } else { "hidden" }.to_string()
}

/// Exact match after whitespace normalisation
#[must_use]
pub fn text_matches(expected: &str, actual: &str) -> bool {
    normalize_whitespace(expected) == normalize_whitespace(actual)
}

/// Substring match after whitespace normalisation
#[must_use]
pub fn text_contains(expected: &str, actual: &str) -> bool {
    normalize_whitespace(actual).contains(&normalize_whitespace(expected))
}

/// Whether a `class` attribute contains a whitespace-separated token
#[must_use]
pub fn has_class(class_attr: &str, token: &str) -> bool {
    class_attr.split_whitespace().any(|c| c == token)
}

/// First difference between expected and actual option lists, compared
/// in order after whitespace normalisation
#[must_use]
pub fn ordered_mismatch<E: AsRef<str>, A: AsRef<str>>(
    expected: &[E],
    actual: &[A],
) -> Option<String> {
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        if !text_matches(e.as_ref(), a.as_ref()) {
            return Some(format!(
                "position {i}: expected {:?}, got {:?}",
                e.as_ref(),
                normalize_whitespace(a.as_ref())
            ));
        }
    }
    if expected.len() == actual.len() {
        None
    } else {
        Some(format!(
            "expected {} entries, got {}",
            expected.len(),
            actual.len()
        ))
    }
}
