//! Browser sessions.
//!
//! A [`Session`] is one isolated tab plus the browser process behind it. With
//! the `browser` feature, [`Session::launch`] starts Chromium over CDP and
//! opens the tab in a fresh browser context so cookies and storage never leak
//! between scenarios. Without it, sessions wrap any [`PageDriver`], which is
//! how the offline tests run page objects against [`crate::MockDriver`].

use crate::config::Timeouts;
use crate::driver::PageDriver;
use crate::page::Page;
use crate::result::E2eResult;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(feature = "browser")]
use crate::config::SuiteConfig;

/// One isolated tab for one scenario
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    page: Page,
    #[cfg(feature = "browser")]
    browser: Option<cdp::Browser>,
}

impl Session {
    /// Session over an existing driver
    #[must_use]
    pub fn from_driver(driver: Arc<dyn PageDriver>, timeouts: Timeouts) -> Self {
        Self {
            id: Uuid::new_v4(),
            page: Page::new(driver, timeouts),
            #[cfg(feature = "browser")]
            browser: None,
        }
    }

    /// Launch Chromium and open an isolated tab
    #[cfg(feature = "browser")]
    pub async fn launch(config: &SuiteConfig) -> E2eResult<Self> {
        let mut browser = cdp::Browser::launch(&config.browser).await?;
        let driver = browser.new_isolated_page().await?;
        let session = Self {
            id: Uuid::new_v4(),
            page: Page::new(Arc::new(driver), config.timeouts),
            browser: Some(browser),
        };
        tracing::debug!(session = %session.id, "browser session started");
        Ok(session)
    }

    /// Session identifier, used in log spans and artifact names
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The session's tab
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Close the tab, then the browser
    pub async fn close(self) -> E2eResult<()> {
        let closed = self.page.close().await;
        #[cfg(feature = "browser")]
        if let Some(browser) = self.browser {
            browser.close().await?;
        }
        tracing::debug!(session = %self.id, "session closed");
        closed
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;

#[cfg(feature = "browser")]
mod cdp {
    use crate::config::BrowserSettings;
    use crate::driver::{ElementAction, ElementState, PageDriver};
    use crate::locator::{fold_text, OptionChoice, Query};
    use crate::result::{E2eError, E2eResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::cdp::browser_protocol::target::{
        CreateBrowserContextParams, CreateTargetParams,
    };
    use chromiumoxide::layout::Point;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;

    /// Chromium process with its CDP event loop
    #[derive(Debug)]
    pub struct Browser {
        inner: CdpBrowser,
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch Chromium with the configured settings
        pub async fn launch(settings: &BrowserSettings) -> E2eResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(settings.viewport_width, settings.viewport_height);

            if !settings.headless {
                builder = builder.with_head();
            }

            if !settings.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = settings.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|message| {
                if message.contains("Could not auto detect") {
                    E2eError::BrowserNotFound
                } else {
                    E2eError::BrowserLaunch { message }
                }
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| E2eError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                inner: browser,
                handle,
            })
        }

        /// Open a tab in a fresh browser context
        pub async fn new_isolated_page(&mut self) -> E2eResult<CdpDriver> {
            let context = self
                .inner
                .create_browser_context(CreateBrowserContextParams::default())
                .await
                .map_err(|e| E2eError::page(e.to_string()))?;
            let target = CreateTargetParams::builder()
                .url("about:blank")
                .browser_context_id(context)
                .build()
                .map_err(E2eError::page)?;
            let page = self
                .inner
                .new_page(target)
                .await
                .map_err(|e| E2eError::page(e.to_string()))?;
            Ok(CdpDriver { page })
        }

        /// Close the browser and stop the event loop
        pub async fn close(mut self) -> E2eResult<()> {
            let closed = self
                .inner
                .close()
                .await
                .map_err(|e| E2eError::BrowserLaunch {
                    message: e.to_string(),
                });
            let _ = self.inner.wait().await;
            self.handle.abort();
            closed.map(|_| ())
        }
    }

    #[derive(Debug, Deserialize)]
    struct Center {
        x: f64,
        y: f64,
    }

    /// [`PageDriver`] over a CDP tab.
    ///
    /// Queries are compiled to JavaScript and evaluated in the page; pointer
    /// actions go through CDP input events at the element's centre so the
    /// application sees trusted events.
    #[derive(Debug, Clone)]
    pub struct CdpDriver {
        page: CdpPage,
    }

    impl CdpDriver {
        async fn eval<T: DeserializeOwned>(&self, js: &str) -> E2eResult<T> {
            let json: String = self
                .page
                .evaluate(format!("JSON.stringify({js})"))
                .await
                .map_err(|e| E2eError::page(e.to_string()))?
                .into_value()
                .map_err(|e| E2eError::page(e.to_string()))?;
            Ok(serde_json::from_str(&json)?)
        }

        /// Run `body` with `el` bound to the first match, `null` if none
        async fn on_first<T: DeserializeOwned>(&self, query: &Query, body: &str) -> E2eResult<T> {
            let js = format!(
                "(() => {{ const el = {}[0]; if (!el) return null; {body} }})()",
                query.to_js()
            );
            self.eval(&js).await
        }

        async fn center(&self, query: &Query) -> E2eResult<Point> {
            let center: Option<Center> = self
                .on_first(
                    query,
                    "el.scrollIntoView({ block: 'center', inline: 'center' }); \
                     const r = el.getBoundingClientRect(); \
                     let x = r.left + r.width / 2, y = r.top + r.height / 2; \
                     let w = el.ownerDocument.defaultView; \
                     while (w && w.frameElement) { const f = w.frameElement.getBoundingClientRect(); x += f.left; y += f.top; w = w.parent; } \
                     return { x, y };",
                )
                .await?;
            let center = center.ok_or_else(|| E2eError::ElementNotFound {
                locator: query.to_string(),
            })?;
            Ok(Point::new(center.x, center.y))
        }

        async fn run(&self, query: &Query, body: &str) -> E2eResult<()> {
            let done: Option<bool> = self.on_first(query, body).await?;
            match done {
                Some(true) => Ok(()),
                Some(false) => Err(E2eError::page(format!("action rejected by {query}"))),
                None => Err(E2eError::ElementNotFound {
                    locator: query.to_string(),
                }),
            }
        }
    }

    fn select_body(choice: &OptionChoice) -> String {
        let pick = match choice {
            OptionChoice::Index(i) => format!("const i = {i};"),
            OptionChoice::Label(label) => format!(
                "const n = s => (s || '').replace(/\\s+/g, ' ').trim().toLowerCase(); \
                 const i = opts.findIndex(o => n(o.textContent) === {});",
                serde_json::to_string(&fold_text(label)).unwrap_or_default()
            ),
        };
        format!(
            "const sel = el.tagName === 'SELECT' ? el : el.querySelector('select'); \
             if (!sel) return false; const opts = Array.from(sel.options); {pick} \
             if (i < 0 || i >= opts.length) return false; \
             sel.selectedIndex = i; \
             sel.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             sel.dispatchEvent(new Event('change', {{ bubbles: true }})); return true;"
        )
    }

    const CLEAR_BODY: &str = "el.focus(); el.value = ''; \
        el.dispatchEvent(new Event('input', { bubbles: true })); \
        el.dispatchEvent(new Event('change', { bubbles: true })); return true;";

    #[async_trait]
    impl PageDriver for CdpDriver {
        async fn navigate(&self, url: &str) -> E2eResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| E2eError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> E2eResult<String> {
            let url = self
                .page
                .url()
                .await
                .map_err(|e| E2eError::page(e.to_string()))?;
            Ok(url.unwrap_or_default())
        }

        async fn ready_state(&self) -> E2eResult<String> {
            self.eval("document.readyState").await
        }

        async fn count(&self, query: &Query) -> E2eResult<usize> {
            self.eval(&format!("{}.length", query.to_js())).await
        }

        async fn inspect(&self, query: &Query) -> E2eResult<Option<ElementState>> {
            self.on_first(
                query,
                "const r = el.getBoundingClientRect(); \
                 const s = el.ownerDocument.defaultView.getComputedStyle(el); \
                 return { text: el.textContent || '', \
                   visible: r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none', \
                   enabled: !el.disabled && el.getAttribute('aria-disabled') !== 'true', \
                   checked: !!el.checked };",
            )
            .await
        }

        async fn attribute(&self, query: &Query, name: &str) -> E2eResult<Option<String>> {
            let body = format!(
                "return el.getAttribute({});",
                serde_json::to_string(name)?
            );
            self.on_first(query, &body).await
        }

        async fn texts(&self, query: &Query) -> E2eResult<Vec<String>> {
            self.eval(&format!("{}.map(e => e.textContent || '')", query.to_js()))
                .await
        }

        async fn perform(&self, query: &Query, action: &ElementAction) -> E2eResult<()> {
            match action {
                ElementAction::Click { .. } => {
                    let point = self.center(query).await?;
                    self.page
                        .click(point)
                        .await
                        .map_err(|e| E2eError::page(e.to_string()))?;
                }
                ElementAction::Hover => {
                    let point = self.center(query).await?;
                    self.page
                        .move_mouse(point)
                        .await
                        .map_err(|e| E2eError::page(e.to_string()))?;
                }
                ElementAction::Focus => self.run(query, "el.focus(); return true;").await?,
                ElementAction::Fill(text) => {
                    self.run(query, CLEAR_BODY).await?;
                    self.page
                        .execute(InsertTextParams::new(text.clone()))
                        .await
                        .map_err(|e| E2eError::page(e.to_string()))?;
                }
                ElementAction::Clear => self.run(query, CLEAR_BODY).await?,
                ElementAction::Check => {
                    self.run(query, "if (!el.checked) { el.click(); } return !!el.checked;")
                        .await?;
                }
                ElementAction::Select(choice) => {
                    self.run(query, &select_body(choice)).await?;
                }
            }
            Ok(())
        }

        async fn screenshot(&self) -> E2eResult<Vec<u8>> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = self
                .page
                .execute(params)
                .await
                .map_err(|e| E2eError::page(e.to_string()))?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| E2eError::page(e.to_string()))
        }

        async fn close(&self) -> E2eResult<()> {
            self.page
                .clone()
                .close()
                .await
                .map_err(|e| E2eError::page(e.to_string()))
        }
    }

}
