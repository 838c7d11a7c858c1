//! Confirmation dialog shown after a transfer or top-up.

use crate::assertion::expect;
use crate::locator::{Locator, Role};
use crate::page::Page;
use crate::result::E2eResult;

/// Modal confirmation dialog
#[derive(Debug, Clone)]
pub struct CompletedDialog {
    dialog: Locator,
    title: Locator,
    content: Locator,
    close_button: Locator,
}

impl CompletedDialog {
    /// Locate the dialog on `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let dialog = page.get_by_role(Role::Dialog);
        Self {
            title: dialog.locator(".ui-widget-header"),
            content: dialog.locator(".hide.ui-widget-content"),
            close_button: dialog.get_by_role(Role::Button),
            dialog,
        }
    }

    /// The dialog element
    #[must_use]
    pub const fn dialog(&self) -> &Locator {
        &self.dialog
    }

    /// Title bar
    #[must_use]
    pub const fn title(&self) -> &Locator {
        &self.title
    }

    /// Body text
    #[must_use]
    pub const fn content(&self) -> &Locator {
        &self.content
    }

    /// Title contains `expected`
    pub async fn check_title(&self, expected: &str) -> E2eResult<()> {
        expect(&self.title).to_contain_text(expected).await
    }

    /// Body equals `expected`
    pub async fn check_content(&self, expected: &str) -> E2eResult<()> {
        expect(&self.content).to_have_text(expected).await
    }

    /// Close the dialog and check it is gone
    pub async fn close_dialog_and_verify_closed(&self) -> E2eResult<()> {
        expect(&self.dialog).to_be_visible().await?;
        self.close_button.click().await?;
        expect(&self.dialog).to_be_hidden().await
    }
}
