//! "Generuj przelew": the full transfer form.

use crate::content::{generate_transfer, REQUIRED_FIELD};
use crate::form::{FormPage, FormRow, Highlight};
use crate::locator::{Locator, OptionChoice};
use crate::page::Page;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::rules::is_valid_account_number;

/// Wrapper carrying the highlight class in every row of this form
const FIELD_WRAPPER: &str = ".field";

/// Transfer generation form
#[derive(Debug, Clone)]
pub struct GenerateTransferPage {
    page: Page,
    account_field: FormRow,
    receiver_field: FormRow,
    to_account_field: FormRow,
    amount_field: FormRow,
    title_field: FormRow,
    available_amount_label: Locator,
    address_toggle: Locator,
    address_lines: [FormRow; 3],
}

impl PageObject for GenerateTransferPage {
    const NAME: &'static str = "generate-transfer";

    fn build(page: &Page) -> Self {
        let row = |text: &str| page.locator_with_text(".form-row", text);
        // "na rachunek" also contains "rachunek"; the account row comes first
        let account_row = row("rachunek").first();
        let address_line =
            |n: usize, name| FormRow::new(name, row(&format!("linia {n}")), FIELD_WRAPPER);
        Self {
            page: page.clone(),
            available_amount_label: account_row.locator(".form-info"),
            account_field: FormRow::new("account", account_row, FIELD_WRAPPER),
            receiver_field: FormRow::new("receiver", row("nazwa odbiorcy"), FIELD_WRAPPER),
            to_account_field: FormRow::new("to-account", row("na rachunek"), FIELD_WRAPPER),
            amount_field: FormRow::new("amount", row("kwota"), FIELD_WRAPPER),
            title_field: FormRow::new("title", row("tytu"), FIELD_WRAPPER),
            address_toggle: page.get_by_text("adres odbiorcy"),
            address_lines: [
                address_line(1, "address-line-1"),
                address_line(2, "address-line-2"),
                address_line(3, "address-line-3"),
            ],
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }
}

impl FormPage for GenerateTransferPage {
    fn blur_target(&self) -> &Locator {
        &self.available_amount_label
    }
}

impl GenerateTransferPage {
    /// Source account dropdown
    #[must_use]
    pub const fn account_field(&self) -> &FormRow {
        &self.account_field
    }

    /// Receiver name
    #[must_use]
    pub const fn receiver_field(&self) -> &FormRow {
        &self.receiver_field
    }

    /// Receiver account number
    #[must_use]
    pub const fn to_account_field(&self) -> &FormRow {
        &self.to_account_field
    }

    /// Amount
    #[must_use]
    pub const fn amount_field(&self) -> &FormRow {
        &self.amount_field
    }

    /// Title
    #[must_use]
    pub const fn title_field(&self) -> &FormRow {
        &self.title_field
    }

    /// Available funds label under the account dropdown
    #[must_use]
    pub const fn available_amount_label(&self) -> &Locator {
        &self.available_amount_label
    }

    /// Address line `n` (1 to 3)
    #[must_use]
    pub fn address_line(&self, n: usize) -> Option<&FormRow> {
        n.checked_sub(1).and_then(|i| self.address_lines.get(i))
    }

    /// Every address line, in order
    #[must_use]
    pub const fn address_lines(&self) -> &[FormRow; 3] {
        &self.address_lines
    }

    /// Unfold the receiver address section
    pub async fn open_address_section(&self) -> E2eResult<()> {
        self.address_toggle.click().await
    }

    /// The account dropdown starts in error; picking an account clears it
    pub async fn check_account_required(&self) -> E2eResult<()> {
        self.account_field
            .check_error_message(REQUIRED_FIELD, Some(Highlight::Error))
            .await?;
        self.account_field
            .select()
            .select_option(OptionChoice::Index(1))
            .await?;
        self.account_field.check_highlight(Highlight::Valid).await
    }

    /// Type an account number and blur
    pub async fn provide_to_account(&self, number: &str) -> E2eResult<()> {
        self.to_account_field.textbox().fill(number).await?;
        self.available_amount_label.click_forced().await
    }

    /// Type `number` and check the form reacts the way the 26-digit rule says
    pub async fn check_account_number_rule(&self, number: &str) -> E2eResult<()> {
        let valid = is_valid_account_number(number);
        tracing::debug!(number, valid, "account number probe");
        self.provide_to_account(number).await?;
        if valid {
            self.to_account_field.check_highlight(Highlight::Valid).await
        } else {
            self.to_account_field
                .check_error_message(
                    generate_transfer::INVALID_ACCOUNT_NUMBER,
                    Some(Highlight::Error),
                )
                .await
        }
    }

    /// Required-field checks for the four text inputs
    pub async fn check_required_text_fields(&self, to_account: &str) -> E2eResult<()> {
        let fields = [
            (&self.receiver_field, "Test Name"),
            (&self.to_account_field, to_account),
            (&self.amount_field, "300"),
            (&self.title_field, "Test Title"),
        ];
        for (field, sample) in fields {
            field.textbox().clear().await?;
            self.is_required_field_behavior(true, field, sample, REQUIRED_FIELD)
                .await?;
        }
        Ok(())
    }

    /// Every address line is optional
    pub async fn check_address_lines_optional(&self) -> E2eResult<()> {
        self.open_address_section().await?;
        for (i, line) in self.address_lines.iter().enumerate() {
            let sample = format!("Address Line {}", i + 1);
            self.is_required_field_behavior(false, line, &sample, "")
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use crate::rules::random_account_number;

    fn form() -> (MockDriver, GenerateTransferPage) {
        let mock = MockDriver::new();
        let page = Page::for_tests(mock.clone(), 40);
        let form = GenerateTransferPage::build(&page);
        let blur = form.available_amount_label().query().to_string();
        let textbox = form.to_account_field().textbox().query().to_string();
        let wrapper = form.to_account_field().wrapper().query().to_string();
        let error = form.to_account_field().error().query().to_string();
        mock.insert(&blur, MockElement::new("dostępne środki"));
        mock.insert(&textbox, MockElement::new(""));
        mock.insert(&wrapper, MockElement::new("").with_class("field"));
        mock.insert(&error, MockElement::new(""));
        mock.on_action(&blur, move |dom, _| {
            let value = dom.value(&textbox).unwrap_or_default().to_string();
            let (class, message) = if value.is_empty() {
                ("field has-error", REQUIRED_FIELD)
            } else if is_valid_account_number(&value) {
                ("field is-valid", "")
            } else {
                ("field has-error", generate_transfer::INVALID_ACCOUNT_NUMBER)
            };
            dom.set_attr(&wrapper, "class", class);
            dom.set_text(&error, message);
        });
        (mock, form)
    }

    #[test]
    fn test_address_lines_are_distinct() {
        let page = Page::for_tests(MockDriver::new(), 10);
        let form = GenerateTransferPage::build(&page);
        let rows: Vec<String> = form
            .address_lines()
            .iter()
            .map(|line| line.textbox().to_string())
            .collect();
        assert_eq!(rows.len(), 3);
        assert_ne!(rows[0], rows[1]);
        assert_ne!(rows[1], rows[2]);
        assert!(form.address_line(0).is_none());
        assert!(form.address_line(4).is_none());
        assert_eq!(form.address_line(3).map(FormRow::name), Some("address-line-3"));
    }

    #[test]
    fn test_account_row_is_first_match() {
        let page = Page::for_tests(MockDriver::new(), 10);
        let form = GenerateTransferPage::build(&page);
        assert_eq!(
            form.available_amount_label().to_string(),
            r#".form-row:has-text("rachunek") >> nth=0 >> .form-info"#
        );
    }

    #[tokio::test]
    async fn test_account_number_rule() {
        let (_mock, form) = form();
        let mut rng = rand::thread_rng();
        form.check_account_number_rule(&random_account_number(&mut rng))
            .await
            .unwrap();
        form.check_account_number_rule("123456789012345678901")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_to_account_is_required() {
        let (_mock, form) = form();
        let sample = random_account_number(&mut rand::thread_rng());
        form.is_required_field_behavior(true, form.to_account_field(), &sample, REQUIRED_FIELD)
            .await
            .unwrap();
    }
}
