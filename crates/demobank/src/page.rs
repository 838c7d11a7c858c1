//! Page handle shared by every locator and page object of a session.

use crate::config::Timeouts;
use crate::driver::PageDriver;
use crate::locator::{Locator, LocatorOptions, Query, Role, Selector};
use crate::result::{E2eError, E2eResult};
use crate::wait::{poll_until, LoadState, WaitOptions};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct PageInner {
    driver: Arc<dyn PageDriver>,
    closed: AtomicBool,
    timeouts: Timeouts,
}

/// One isolated browser tab.
///
/// Cheap to clone; all clones share the same tab. Once [`Page::close`] runs,
/// every locator bound to the page fails with [`E2eError::PageClosed`].
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("driver", &self.inner.driver)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Page {
    /// Wrap a driver
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, timeouts: Timeouts) -> Self {
        Self {
            inner: Arc::new(PageInner {
                driver,
                closed: AtomicBool::new(false),
                timeouts,
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(mock: crate::driver::MockDriver, action_ms: u64) -> Self {
        Self::new(
            Arc::new(mock),
            Timeouts {
                action_ms,
                navigation_ms: action_ms,
                poll_ms: 5,
            },
        )
    }

    /// Driver, unless the page is closed
    pub(crate) fn driver(&self) -> E2eResult<&Arc<dyn PageDriver>> {
        if self.is_closed() {
            return Err(E2eError::PageClosed);
        }
        Ok(&self.inner.driver)
    }

    pub(crate) fn locator_options(&self) -> LocatorOptions {
        LocatorOptions {
            timeout_ms: self.inner.timeouts.action_ms,
            poll_ms: self.inner.timeouts.poll_ms,
            strict: true,
        }
    }

    /// Wait bounds in effect
    #[must_use]
    pub fn timeouts(&self) -> Timeouts {
        self.inner.timeouts
    }

    fn root(&self, step: Selector) -> Locator {
        Locator::new(self.clone(), Query::new(step))
    }

    /// Elements matching CSS
    #[must_use]
    pub fn locator(&self, css: impl Into<String>) -> Locator {
        self.root(Selector::Css(css.into()))
    }

    /// Elements matching CSS that contain `text`
    #[must_use]
    pub fn locator_with_text(&self, css: impl Into<String>, text: impl Into<String>) -> Locator {
        self.root(Selector::CssWithText {
            css: css.into(),
            text: text.into(),
        })
    }

    /// Innermost elements containing `text`
    #[must_use]
    pub fn get_by_text(&self, text: impl Into<String>) -> Locator {
        self.root(Selector::Text(text.into()))
    }

    /// Elements with an ARIA role
    #[must_use]
    pub fn get_by_role(&self, role: Role) -> Locator {
        self.root(Selector::Role(role))
    }

    /// Documents of matching iframes
    #[must_use]
    pub fn frame_locator(&self, css: impl Into<String>) -> Locator {
        self.root(Selector::Frame(css.into()))
    }

    /// Navigate and wait for the load event
    pub async fn goto(&self, url: &str) -> E2eResult<()> {
        tracing::info!(url, "navigate");
        self.driver()?.navigate(url).await?;
        self.wait_for_load_state(LoadState::Load).await
    }

    /// Current URL
    pub async fn url(&self) -> E2eResult<String> {
        self.driver()?.current_url().await
    }

    /// Wait until the document reaches `state`
    pub async fn wait_for_load_state(&self, state: LoadState) -> E2eResult<()> {
        let options = WaitOptions::new()
            .with_timeout(self.inner.timeouts.navigation_ms)
            .with_poll_interval(self.inner.timeouts.poll_ms);
        let what = format!("document {state}");
        poll_until(options, &what, || async move {
            let ready = self.driver()?.ready_state().await?;
            Ok(state.is_reached_by(&ready).then_some(()))
        })
        .await
    }

    /// PNG screenshot of the viewport
    pub async fn screenshot(&self) -> E2eResult<Vec<u8>> {
        self.driver()?.screenshot().await
    }

    /// Close the tab; later calls through this page fail
    pub async fn close(&self) -> E2eResult<()> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.inner.driver.close().await
    }

    /// Whether the page has been closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}
