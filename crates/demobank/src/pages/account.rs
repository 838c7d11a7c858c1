//! "Konto na życie" account widget: a collapsible summary of the main account.

use crate::assertion::expect;
use crate::locator::{normalize_whitespace, Locator};
use crate::page::Page;
use crate::result::{E2eError, E2eResult};

/// Remove every whitespace character, the way amounts are compared
#[must_use]
pub fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Detail rows hidden while the widget is collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountDetail {
    /// Funds on hold
    Blocked,
    /// Overdraft limit
    CreditLimit,
    /// Account holder
    Owner,
}

impl AccountDetail {
    /// Every detail row
    pub const ALL: [Self; 3] = [Self::Blocked, Self::CreditLimit, Self::Owner];

    /// Text that identifies the row
    #[must_use]
    pub const fn row_text(self) -> &'static str {
        match self {
            Self::Blocked => "blokady",
            Self::CreditLimit => "limit kredytowy",
            Self::Owner => "posiadacz",
        }
    }
}

/// The account widget
#[derive(Debug, Clone)]
pub struct AccountWidget {
    container: Locator,
    more_button: Locator,
    account_number: Locator,
    available: Locator,
}

impl AccountWidget {
    /// Locate the widget on `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let container = page.locator_with_text(".box-white", crate::content::account::HEADER);
        Self {
            more_button: container.locator("#show_more_less"),
            account_number: container.locator("#account_number"),
            available: container.locator(".table-header .fancy-amount"),
            container,
        }
    }

    /// The widget box; clicking it toggles the details
    #[must_use]
    pub const fn container(&self) -> &Locator {
        &self.container
    }

    /// "więcej" toggle
    #[must_use]
    pub const fn more_button(&self) -> &Locator {
        &self.more_button
    }

    /// Row of a detail
    #[must_use]
    pub fn detail_row(&self, detail: AccountDetail) -> Locator {
        self.container.locator_with_text("li", detail.row_text())
    }

    fn detail_value(&self, detail: AccountDetail) -> Locator {
        match detail {
            AccountDetail::Owner => self.detail_row(detail).locator("#owner"),
            _ => self.detail_row(detail).locator(".fancy-amount"),
        }
    }

    /// Toggle by clicking the box
    pub async fn toggle_by_box(&self) -> E2eResult<()> {
        self.container.click().await
    }

    /// Toggle by clicking the "more" button
    pub async fn toggle_by_more_button(&self) -> E2eResult<()> {
        self.more_button.click().await
    }

    /// Every detail row is shown (`true`) or hidden (`false`)
    pub async fn check_details_visible(&self, visible: bool) -> E2eResult<()> {
        for detail in AccountDetail::ALL {
            let row = self.detail_row(detail);
            if visible {
                expect(&row).to_be_visible().await?;
            } else {
                expect(&row).to_be_hidden().await?;
            }
        }
        Ok(())
    }

    /// Expand unless already expanded
    pub async fn expand(&self) -> E2eResult<()> {
        if !self.detail_row(AccountDetail::Owner).is_visible().await? {
            self.toggle_by_box().await?;
        }
        self.check_details_visible(true).await
    }

    /// Account number with whitespace runs collapsed
    pub async fn account_number(&self) -> E2eResult<String> {
        Ok(normalize_whitespace(&self.account_number.text_content().await?))
    }

    /// Available funds, whitespace removed (`"13159,20PLN"`)
    pub async fn available_amount(&self) -> E2eResult<String> {
        Ok(compact(&self.available.text_content().await?))
    }

    /// A detail value. Amounts have whitespace removed; the owner name has
    /// whitespace runs collapsed. The widget is expanded first.
    pub async fn detail(&self, detail: AccountDetail) -> E2eResult<String> {
        self.expand().await?;
        let raw = self.detail_value(detail).text_content().await?;
        Ok(match detail {
            AccountDetail::Owner => normalize_whitespace(&raw),
            _ => compact(&raw),
        })
    }

    /// A read value contains `expected`
    pub fn check_contains(what: &str, actual: &str, expected: &str) -> E2eResult<()> {
        if actual.contains(expected) {
            Ok(())
        } else {
            Err(E2eError::assertion(what, format!("contains {expected:?}"), actual))
        }
    }
}
