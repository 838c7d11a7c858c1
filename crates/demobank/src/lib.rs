//! Demobank E2E: page objects and fixtures for the Demobank web application
//!
//! Scenarios drive the bank through a [`Page`]: a handle over a
//! [`PageDriver`] that is either Chromium over CDP (`browser` feature) or the
//! in-memory [`MockDriver`]. Page objects wrap each screen in intent-level
//! verbs, and the fixture layer resolves each scenario's preconditions.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌─────────┐    ┌────────────────┐
//! │ Scenario   │───►│ Page objects│───►│ Locator │───►│ PageDriver     │
//! │ (Fixtures) │    │ + expect()  │    │ + Page  │    │ CDP │ MockDriver│
//! └────────────┘    └─────────────┘    └─────────┘    └────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use demobank_e2e::prelude::*;
//! use futures::FutureExt;
//!
//! run_scenario(SuiteConfig::load()?, "quick transfer", &[Precondition::SignIn], |fx| {
//!     async move {
//!         let widget = fx.dashboard().quick_transfer();
//!         widget.send_transfer(OptionChoice::Index(1), "100", "Transfer Title").await
//!     }
//!     .boxed()
//! })
//! .await?;
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_frames))]

#[allow(clippy::missing_errors_doc)]
mod assertion;
#[allow(clippy::missing_errors_doc)]
mod browser;
mod config;
#[allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
mod driver;
mod locator;
mod logging;
#[allow(clippy::missing_errors_doc)]
mod page;
mod page_object;
mod result;
mod wait;

/// Literal copy the application shows
pub mod content;

/// Scenario preconditions and per-scenario fixtures
#[allow(clippy::missing_errors_doc)]
pub mod fixture;

/// Form rows and shared field-validation verbs
#[allow(clippy::missing_errors_doc)]
pub mod form;

/// Page objects for every screen
#[allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
pub mod pages;

/// Business rules as pure functions
pub mod rules;

pub use assertion::{expect, has_class, ordered_mismatch, text_contains, text_matches, LocatorExpect};
#[cfg(feature = "browser")]
pub use browser::CdpDriver;
pub use browser::Session;
pub use config::{
    BrowserSettings, Credentials, SuiteConfig, Timeouts, CONFIG_PATH_ENV, DEFAULT_BASE_URL,
};
pub use driver::{ElementAction, ElementState, MockDom, MockDriver, MockElement, PageDriver};
pub use fixture::{FixtureRegistry, FixtureSpec, Fixtures, Precondition};
#[cfg(feature = "browser")]
pub use fixture::run_scenario;
pub use fixture::run_in_session;
pub use form::{FormPage, FormRow, Highlight};
pub use locator::{
    fold_text, normalize_whitespace, ElementWait, Locator, LocatorOptions, OptionChoice, Query,
    Role, Selector,
};
pub use logging::{init_tracing, init_tracing_with, DEFAULT_FILTER};
pub use page::Page;
pub use page_object::PageObject;
pub use result::{E2eError, E2eResult};
pub use wait::{
    poll_until, LoadState, WaitOptions, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_NAVIGATION_TIMEOUT_MS,
    DEFAULT_POLL_INTERVAL_MS,
};

/// Everything a scenario file usually needs
pub mod prelude {
    pub use crate::content;
    pub use crate::pages::*;
    pub use crate::rules::{boundary_probes, is_valid_account_number, sign_in_allowed, TopUpLimit};
    pub use crate::{
        expect, init_tracing, run_in_session, E2eError, E2eResult, FormPage, FormRow, Highlight,
        Locator, MockDriver, MockElement, OptionChoice, Page, PageObject, Precondition, Session,
        SuiteConfig, Timeouts,
    };
    #[cfg(feature = "browser")]
    pub use crate::run_scenario;
}
