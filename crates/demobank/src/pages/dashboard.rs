//! "Mój pulpit", the screen shown after signing in.

use crate::page::Page;
use crate::page_object::PageObject;
use crate::pages::account::AccountWidget;
use crate::pages::dialog::CompletedDialog;
use crate::pages::last_operations::LastOperations;
use crate::pages::phone_top_up::PhoneTopUp;
use crate::pages::quick_transfer::QuickTransfer;

/// Dashboard with its widgets
#[derive(Debug, Clone)]
pub struct DashboardPage {
    page: Page,
    quick_transfer: QuickTransfer,
    phone_top_up: PhoneTopUp,
    account: AccountWidget,
    last_operations: LastOperations,
    dialog: CompletedDialog,
}

impl PageObject for DashboardPage {
    const NAME: &'static str = "dashboard";

    fn build(page: &Page) -> Self {
        Self {
            page: page.clone(),
            quick_transfer: QuickTransfer::new(page),
            phone_top_up: PhoneTopUp::new(page),
            account: AccountWidget::new(page),
            last_operations: LastOperations::new(page),
            dialog: CompletedDialog::new(page),
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }
}

impl DashboardPage {
    /// "Szybki przelew" widget
    #[must_use]
    pub const fn quick_transfer(&self) -> &QuickTransfer {
        &self.quick_transfer
    }

    /// "Doładowanie telefonu" widget
    #[must_use]
    pub const fn phone_top_up(&self) -> &PhoneTopUp {
        &self.phone_top_up
    }

    /// "Konto na życie" widget
    #[must_use]
    pub const fn account(&self) -> &AccountWidget {
        &self.account
    }

    /// "Ostatnie operacje" table
    #[must_use]
    pub const fn last_operations(&self) -> &LastOperations {
        &self.last_operations
    }

    /// Confirmation dialog shared by both forms
    #[must_use]
    pub const fn dialog(&self) -> &CompletedDialog {
        &self.dialog
    }
}
