//! Page Object Model support.
//!
//! A page object wraps one screen of the application: it owns the locators
//! for that screen and exposes intent-level verbs (`sign_in`,
//! `send_transfer`) so scenarios never touch selectors directly.

use crate::page::Page;

/// A screen-level wrapper over a [`Page`]
pub trait PageObject: Sized + Send + Sync {
    /// Name used in logs
    const NAME: &'static str;

    /// Build the object's locators against `page`. Nothing is resolved yet.
    fn build(page: &Page) -> Self;

    /// Page the object is bound to
    fn page(&self) -> &Page;
}
