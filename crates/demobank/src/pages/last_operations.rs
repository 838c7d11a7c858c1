//! "Ostatnie operacje" table on the dashboard.

use crate::assertion::expect;
use crate::content::last_operations;
use crate::locator::{normalize_whitespace, ElementWait, Locator};
use crate::page::Page;
use crate::pages::account::compact;
use crate::result::{E2eError, E2eResult};

/// Columns read from each operation row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationColumn {
    /// Booking date, first cell
    Date,
    /// Title, third cell
    Title,
    /// Signed amount, fourth cell
    Amount,
}

impl OperationColumn {
    /// Pattern every value of the column must match
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Date => r"^\d{2,4}[-./]\d{2}[-./]\d{2,4}$",
            Self::Title => r"^\S.*$",
            Self::Amount => r"^[-+]?\d+,\d{2}PLN$",
        }
    }

    /// Whether a read value has the column's shape
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        regex::Regex::new(self.pattern())
            .map(|re| re.is_match(value))
            .unwrap_or(false)
    }
}

/// The last operations table
#[derive(Debug, Clone)]
pub struct LastOperations {
    header: Locator,
    rows: Locator,
}

impl LastOperations {
    /// Locate the table on `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let container = page.locator_with_text(".box-white", last_operations::HEADER);
        Self {
            header: container.locator(".wborder"),
            rows: container.locator("tr"),
        }
    }

    /// Every row
    #[must_use]
    pub const fn rows(&self) -> &Locator {
        &self.rows
    }

    /// Cell holding a column's value in the `index`-th row
    #[must_use]
    pub fn cell(&self, index: usize, column: OperationColumn) -> Locator {
        let cells = self.rows.nth(index).locator("td");
        match column {
            OperationColumn::Date => cells.first(),
            OperationColumn::Title => cells.nth(2).locator(".short"),
            OperationColumn::Amount => cells.nth(3).locator(".fancy-amount"),
        }
    }

    /// Header text equals the table title
    pub async fn check_header(&self) -> E2eResult<()> {
        expect(&self.header).to_have_text(last_operations::HEADER).await
    }

    /// Values of one column, top to bottom. Dates and titles keep single
    /// spaces; amounts have every space removed.
    pub async fn column(&self, column: OperationColumn) -> E2eResult<Vec<String>> {
        self.rows.first().wait_for(ElementWait::Attached).await?;
        let count = self.rows.count().await?;
        let mut values = Vec::with_capacity(count);
        for index in 0..count {
            let raw = self.cell(index, column).text_content().await?;
            values.push(match column {
                OperationColumn::Amount => compact(&raw),
                _ => normalize_whitespace(&raw),
            });
        }
        tracing::debug!(?column, rows = count, "read operations column");
        Ok(values)
    }

    /// Every value of `column` has the expected shape
    pub async fn check_column_shape(&self, column: OperationColumn) -> E2eResult<()> {
        let values = self.column(column).await?;
        match values.iter().find(|v| !column.matches(v)) {
            Some(bad) => Err(E2eError::assertion(
                format!("{column:?} column"),
                column.pattern(),
                bad.as_str(),
            )),
            None => Ok(()),
        }
    }

    /// Column equals `expected`, in order
    pub async fn check_column<S: AsRef<str>>(
        &self,
        column: OperationColumn,
        expected: &[S],
    ) -> E2eResult<()> {
        let actual = self.column(column).await?;
        match crate::assertion::ordered_mismatch(expected, &actual) {
            Some(mismatch) => Err(E2eError::assertion(
                format!("{column:?} column"),
                mismatch,
                format!("{actual:?}"),
            )),
            None => Ok(()),
        }
    }
}
