//! "Szybki przelew" widget on the dashboard.

use crate::assertion::expect;
use crate::content::quick_transfer;
use crate::form::{FormPage, FormRow};
use crate::locator::{Locator, OptionChoice, Role};
use crate::page::Page;
use crate::pages::dialog::CompletedDialog;
use crate::result::E2eResult;

/// Details the confirmation dialog should echo back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfirmation {
    /// Receiver label as shown in the dropdown
    pub receiver: String,
    /// Whole-złoty amount as typed
    pub amount: String,
    /// Transfer title
    pub title: String,
}

impl TransferConfirmation {
    /// Expected dialog body
    #[must_use]
    pub fn expected_text(&self) -> String {
        format!(
            "Przelew wykonany!Odbiorca:  {}Kwota: {},00PLN Nazwa: {}",
            self.receiver, self.amount, self.title
        )
    }
}

/// Quick transfer form
#[derive(Debug, Clone)]
pub struct QuickTransfer {
    header: Locator,
    tooltip_button: Locator,
    to_field: FormRow,
    amount_field: FormRow,
    title_field: FormRow,
    submit_button: Locator,
    dialog: CompletedDialog,
}

impl QuickTransfer {
    /// Locate the widget on `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let container = page.locator_with_text(".box-white", "przelew");
        let row = |text: &str| container.locator_with_text(".form-row", text);
        Self {
            header: container.locator(".wborder"),
            tooltip_button: container.locator("i"),
            to_field: FormRow::new("receiver", row("do"), ".grid-space-2"),
            amount_field: FormRow::new("amount", row("kwota"), ".grid-space-2"),
            title_field: FormRow::new("title", row("tytu"), ".grid-space-2"),
            submit_button: container.get_by_role(Role::Button),
            dialog: CompletedDialog::new(page),
        }
    }

    /// Receiver dropdown row
    #[must_use]
    pub const fn to_field(&self) -> &FormRow {
        &self.to_field
    }

    /// Amount row
    #[must_use]
    pub const fn amount_field(&self) -> &FormRow {
        &self.amount_field
    }

    /// Title row
    #[must_use]
    pub const fn title_field(&self) -> &FormRow {
        &self.title_field
    }

    /// Submit button
    #[must_use]
    pub const fn submit_button(&self) -> &Locator {
        &self.submit_button
    }

    /// Header icon with the widget tooltip
    #[must_use]
    pub const fn tooltip_button(&self) -> &Locator {
        &self.tooltip_button
    }

    /// Confirmation dialog
    #[must_use]
    pub const fn dialog(&self) -> &CompletedDialog {
        &self.dialog
    }

    /// Widget header text equals `expected`
    pub async fn check_header(&self, expected: &str) -> E2eResult<()> {
        expect(&self.header).to_have_text(expected).await
    }

    /// Hover the header icon and check the tooltip copy
    pub async fn check_tooltip(&self, expected: &str) -> E2eResult<()> {
        self.tooltip_button.hover().await?;
        expect(&self.tooltip_button).to_have_text(expected).await
    }

    /// Pick a receiver
    pub async fn select_receiver(&self, choice: OptionChoice) -> E2eResult<()> {
        self.to_field.select().select_option(choice).await
    }

    /// Receiver label at a dropdown index
    pub async fn receiver_label(&self, index: usize) -> E2eResult<String> {
        self.to_field.option_label(index).await
    }

    /// Submit without filling anything
    pub async fn submit(&self) -> E2eResult<()> {
        self.submit_button.click().await
    }

    /// Fill the form and submit
    pub async fn send_transfer(
        &self,
        receiver: OptionChoice,
        amount: &str,
        title: &str,
    ) -> E2eResult<()> {
        tracing::info!(%receiver, amount, title, "quick transfer");
        self.select_receiver(receiver).await?;
        self.amount_field.textbox().fill(amount).await?;
        self.title_field.textbox().fill(title).await?;
        self.submit_button.click().await
    }

    /// Dialog title and body match the transfer
    pub async fn check_transfer_dialog(&self, expected: &TransferConfirmation) -> E2eResult<()> {
        self.dialog.check_title(quick_transfer::DIALOG_TITLE).await?;
        self.dialog.check_content(&expected.expected_text()).await
    }
}

impl FormPage for QuickTransfer {
    fn blur_target(&self) -> &Locator {
        &self.tooltip_button
    }
}
