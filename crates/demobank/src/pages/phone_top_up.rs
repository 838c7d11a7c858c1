//! "Doładowanie telefonu" widget on the dashboard.

use crate::assertion::expect;
use crate::content::{top_up, REQUIRED_FIELD};
use crate::form::{FormPage, FormRow, Highlight};
use crate::locator::{Locator, OptionChoice, Role};
use crate::page::Page;
use crate::pages::dialog::CompletedDialog;
use crate::result::{E2eError, E2eResult};
use crate::rules::{boundary_probes, AmountVerdict, BoundaryProbe, TopUpLimit};

/// Details the top-up dialog should echo back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUpConfirmation {
    /// Phone label as shown in the dropdown
    pub phone: String,
    /// Whole-złoty amount as typed
    pub amount: String,
}

impl TopUpConfirmation {
    /// Expected dialog body
    #[must_use]
    pub fn expected_text(&self) -> String {
        format!(
            " Doładowanie wykonane!Kwota: {},00PLN Numer: {}",
            self.amount, self.phone
        )
    }
}

/// Phone top-up form
#[derive(Debug, Clone)]
pub struct PhoneTopUp {
    header: Locator,
    to_field: FormRow,
    amount_field: FormRow,
    verification: FormRow,
    info_tooltip: Locator,
    fixed_amount_selector: Locator,
    submit_button: Locator,
    dialog: CompletedDialog,
}

impl PhoneTopUp {
    /// Locate the widget on `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let container = page.locator_with_text(".box-white", "telefonu");
        let row = |text: &str| container.locator_with_text(".form-row", text);
        let amount_row = row("kwota");
        Self {
            header: container.locator(".wborder"),
            info_tooltip: amount_row.locator("i.tooltip"),
            fixed_amount_selector: amount_row.locator("#uniform-widget_1_topup_amount"),
            to_field: FormRow::new("phone", row("wybierz"), ".grid-space-2"),
            amount_field: FormRow::new("amount", amount_row, ".grid-space-2"),
            verification: FormRow::new("verification", row("zapozna"), ".grid-space-2"),
            submit_button: container.get_by_role(Role::Button),
            dialog: CompletedDialog::new(page),
        }
    }

    /// Phone dropdown row
    #[must_use]
    pub const fn to_field(&self) -> &FormRow {
        &self.to_field
    }

    /// Amount row
    #[must_use]
    pub const fn amount_field(&self) -> &FormRow {
        &self.amount_field
    }

    /// Terms checkbox row
    #[must_use]
    pub const fn verification(&self) -> &FormRow {
        &self.verification
    }

    /// Amount hint icon
    #[must_use]
    pub const fn info_tooltip(&self) -> &Locator {
        &self.info_tooltip
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

    /// Pick a phone
    pub async fn select_phone(&self, choice: OptionChoice) -> E2eResult<()> {
        self.to_field.select().select_option(choice).await
    }

    /// Phone label at a dropdown index
    pub async fn phone_label(&self, index: usize) -> E2eResult<String> {
        self.to_field.option_label(index).await
    }

    /// Submit without filling anything
    pub async fn submit(&self) -> E2eResult<()> {
        self.submit_button.click().await
    }

    /// Type an amount and blur so it validates
    pub async fn provide_amount(&self, amount: &str) -> E2eResult<()> {
        self.amount_field.textbox().fill(amount).await?;
        self.blur_target().click_forced().await
    }

    /// Checkbox starts unchecked and can be ticked
    pub async fn check_verification_checkbox(&self) -> E2eResult<()> {
        let checkbox = self.verification.checkbox();
        expect(&checkbox).not_to_be_checked().await?;
        checkbox.check().await?;
        expect(&checkbox).to_be_checked().await
    }

    /// Pick a phone, type an amount, accept the terms and submit
    pub async fn send_top_up(&self, phone: OptionChoice, amount: &str) -> E2eResult<()> {
        tracing::info!(%phone, amount, "phone top-up");
        self.select_phone(phone).await?;
        self.amount_field.textbox().fill(amount).await?;
        self.verification.checkbox().check().await?;
        self.submit_button.click().await
    }

    /// Dialog title and body match the top-up
    pub async fn check_top_up_dialog(&self, expected: &TopUpConfirmation) -> E2eResult<()> {
        expect(self.dialog.title())
            .to_contain_text(top_up::DIALOG_TITLE)
            .await?;
        self.dialog.check_content(&expected.expected_text()).await
    }

    /// After picking `phone`, the amount hint is visible with the right copy
    pub async fn check_info_tooltip(&self, phone: &str) -> E2eResult<()> {
        let limit = TopUpLimit::for_recipient(phone);
        let Some(expected) = limit.tooltip() else {
            return Err(E2eError::assertion(
                phone,
                "a free-amount phone",
                "fixed-amount phone",
            ));
        };
        self.select_phone(OptionChoice::label(phone)).await?;
        self.info_tooltip.hover().await?;
        expect(&self.info_tooltip).to_be_visible().await?;
        expect(&self.info_tooltip).to_have_text(expected).await
    }

    /// After picking a fixed-amount phone, the amount becomes a styled dropdown
    pub async fn check_fixed_amount_selector(&self, phone: &str) -> E2eResult<()> {
        self.select_phone(OptionChoice::label(phone)).await?;
        expect(&self.fixed_amount_selector)
            .to_have_class(top_up::FIXED_AMOUNT_CLASS)
            .await
    }

    /// Fixed-amount dropdown lists `expected`, in order
    pub async fn check_fixed_amounts<S: AsRef<str> + Sync>(
        &self,
        phone: &str,
        expected: &[S],
    ) -> E2eResult<()> {
        self.select_phone(OptionChoice::label(phone)).await?;
        self.amount_field.check_options(expected).await
    }

    /// Type one probe amount and check the verdict the form shows
    pub async fn check_probe(&self, limit: &TopUpLimit, probe: BoundaryProbe) -> E2eResult<()> {
        tracing::debug!(amount = probe.amount, verdict = ?probe.verdict, "amount probe");
        self.provide_amount(&probe.amount.to_string()).await?;
        match (probe.verdict, limit.message_for(probe.amount)) {
            (AmountVerdict::Valid, _) => self.amount_field.check_highlight(Highlight::Valid).await?,
            (_, Some(message)) => {
                self.amount_field
                    .check_error_message(message, Some(Highlight::Error))
                    .await?;
            }
            (_, None) => {
                return Err(E2eError::assertion(
                    self.amount_field.error().to_string(),
                    format!("a message for {}", probe.amount),
                    "none defined",
                ))
            }
        }
        self.amount_field.textbox().clear().await
    }

    /// Walk the amount boundaries for a free-amount phone
    pub async fn check_amount_boundaries(&self, phone: &str) -> E2eResult<()> {
        let limit = TopUpLimit::for_recipient(phone);
        let Some(range) = limit.range() else {
            return Err(E2eError::assertion(
                phone,
                "a free-amount phone",
                "fixed-amount phone",
            ));
        };
        self.select_phone(OptionChoice::label(phone)).await?;
        for probe in boundary_probes(range) {
            self.check_probe(&limit, probe).await?;
        }
        Ok(())
    }

    /// Submit empty: phone and amount show the required message
    pub async fn check_required_fields(&self) -> E2eResult<()> {
        self.submit().await?;
        self.to_field
            .check_error_message(REQUIRED_FIELD, Some(Highlight::Error))
            .await?;
        self.amount_field
            .check_error_message(REQUIRED_FIELD, Some(Highlight::Error))
            .await
    }
}

impl FormPage for PhoneTopUp {
    fn blur_target(&self) -> &Locator {
        &self.header
    }
}
