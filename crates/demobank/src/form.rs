//! Form rows and the validation verbs shared by every form screen.
//!
//! A form row groups a label, an input (textbox, `<select>` or checkbox), a
//! wrapper whose class reflects validation state, and an error element. The
//! application validates a field when it loses focus.

use crate::assertion::{expect, has_class};
use crate::locator::{Locator, Role};
use crate::result::{E2eError, E2eResult};
use async_trait::async_trait;

/// Wrapper class marking a field as accepted
pub const VALID_CLASS: &str = "is-valid";

/// Wrapper class marking a field as rejected
pub const ERROR_CLASS: &str = "has-error";

/// Validation state shown by a field wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Never validated
    Untouched,
    /// `has-error`
    Error,
    /// `is-valid`
    Valid,
}

impl Highlight {
    /// Class token for the state, `None` for untouched
    #[must_use]
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Untouched => None,
            Self::Error => Some(ERROR_CLASS),
            Self::Valid => Some(VALID_CLASS),
        }
    }

    /// State read from a wrapper's `class` attribute
    #[must_use]
    pub fn from_classes(class_attr: &str) -> Self {
        if has_class(class_attr, ERROR_CLASS) {
            Self::Error
        } else if has_class(class_attr, VALID_CLASS) {
            Self::Valid
        } else {
            Self::Untouched
        }
    }

    /// Transitions the application can make on blur.
    ///
    /// A field leaves `Untouched` on its first blur and then moves between
    /// `Error` and `Valid`; it never returns to `Untouched`.
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        !matches!(
            (self, next),
            (Self::Error | Self::Valid, Self::Untouched)
        )
    }
}

/// One labelled row of a form
#[derive(Debug, Clone)]
pub struct FormRow {
    name: &'static str,
    row: Locator,
    wrapper: Locator,
}

impl FormRow {
    /// Row located by `row`, with the highlight wrapper at `wrapper_css`
    /// (first match) inside it
    #[must_use]
    pub fn new(name: &'static str, row: Locator, wrapper_css: &str) -> Self {
        let wrapper = row.locator(wrapper_css).first();
        Self { name, row, wrapper }
    }

    /// Field name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The row container
    #[must_use]
    pub const fn row(&self) -> &Locator {
        &self.row
    }

    /// Element whose class carries the highlight
    #[must_use]
    pub const fn wrapper(&self) -> &Locator {
        &self.wrapper
    }

    /// Text input
    #[must_use]
    pub fn textbox(&self) -> Locator {
        self.row.get_by_role(Role::Textbox)
    }

    /// `<select>` element
    #[must_use]
    pub fn select(&self) -> Locator {
        self.row.locator("select")
    }

    /// Dropdown entries
    #[must_use]
    pub fn options(&self) -> Locator {
        self.row.get_by_role(Role::Option)
    }

    /// Checkbox
    #[must_use]
    pub fn checkbox(&self) -> Locator {
        self.row.get_by_role(Role::Checkbox)
    }

    /// Validation message element
    #[must_use]
    pub fn error(&self) -> Locator {
        self.row.locator(".error")
    }

    /// Label of the `index`-th dropdown entry
    pub async fn option_label(&self, index: usize) -> E2eResult<String> {
        self.options().nth(index).text_content().await
    }

    /// Error message equals `expected`, optionally with the wrapper in `highlight`
    pub async fn check_error_message(
        &self,
        expected: &str,
        highlight: Option<Highlight>,
    ) -> E2eResult<()> {
        expect(&self.error()).to_have_text(expected).await?;
        if let Some(highlight) = highlight {
            self.check_highlight(highlight).await?;
        }
        Ok(())
    }

    /// Wrapper shows `highlight`
    pub async fn check_highlight(&self, highlight: Highlight) -> E2eResult<()> {
        let wrapper = expect(&self.wrapper);
        match highlight.class_name() {
            Some(class) => wrapper.to_contain_class(class).await,
            None => {
                wrapper.not_to_contain_class(ERROR_CLASS).await?;
                wrapper.not_to_contain_class(VALID_CLASS).await
            }
        }
    }

    /// Open the dropdown and check its entries equal `expected`, in order
    pub async fn check_options<S: AsRef<str>>(&self, expected: &[S]) -> E2eResult<()> {
        self.select().click().await?;
        expect(&self.options()).to_have_texts(expected).await
    }

    /// Current highlight, read once
    pub async fn highlight(&self) -> E2eResult<Highlight> {
        let class = self.wrapper.get_attribute("class").await?.unwrap_or_default();
        Ok(Highlight::from_classes(&class))
    }

    /// Focus the textbox, then blur it by clicking `blur_target` (forced,
    /// so an overlapping element cannot swallow the click)
    pub async fn touch(&self, blur_target: &Locator) -> E2eResult<()> {
        self.textbox().click().await?;
        blur_target.click_forced().await
    }

    /// Check how the field validates.
    ///
    /// Required: focus then blur while empty shows `error_text` and
    /// `has-error`; typing `sample` and blurring again shows `is-valid`.
    /// Optional: blurring while empty shows no message and neither class,
    /// and after typing `sample` the field never shows `has-error`.
    pub async fn is_required_field_behavior(
        &self,
        required: bool,
        sample: &str,
        error_text: &str,
        blur_target: &Locator,
    ) -> E2eResult<()> {
        tracing::debug!(field = self.name, required, "required-field check");
        self.touch(blur_target).await?;
        if required {
            self.check_error_message(error_text, Some(Highlight::Error))
                .await?;
        } else {
            self.check_highlight(Highlight::Untouched).await?;
            self.expect_no_error().await?;
        }

        let before = self.highlight().await?;
        self.textbox().fill(sample).await?;
        blur_target.click_forced().await?;

        if required {
            self.check_highlight(Highlight::Valid).await?;
        } else {
            expect(&self.wrapper).not_to_contain_class(ERROR_CLASS).await?;
        }

        let after = self.highlight().await?;
        if !before.can_become(after) {
            return Err(E2eError::assertion(
                self.wrapper.to_string(),
                format!("a transition allowed from {before:?}"),
                format!("{after:?}"),
            ));
        }
        Ok(())
    }

    async fn expect_no_error(&self) -> E2eResult<()> {
        if self.error().count().await? == 0 {
            return Ok(());
        }
        expect(&self.error()).to_have_text("").await
    }
}

/// A screen made of [`FormRow`]s.
///
/// Provides the field-level verbs every form shares; implementors only say
/// which element to click to blur a field.
#[async_trait]
pub trait FormPage: Sync {
    /// Element clicked to move focus out of a field
    fn blur_target(&self) -> &Locator;

    /// Error message of `field` equals `expected`, optionally with a highlight
    async fn check_field_error_message(
        &self,
        field: &FormRow,
        expected: &str,
        highlight: Option<Highlight>,
    ) -> E2eResult<()> {
        field.check_error_message(expected, highlight).await
    }

    /// `field`'s wrapper shows `highlight`
    async fn check_field_highlight(&self, field: &FormRow, highlight: Highlight) -> E2eResult<()> {
        field.check_highlight(highlight).await
    }

    /// Required or optional validation behaviour of `field`
    async fn is_required_field_behavior(
        &self,
        required: bool,
        field: &FormRow,
        sample: &str,
        error_text: &str,
    ) -> E2eResult<()> {
        field
            .is_required_field_behavior(required, sample, error_text, self.blur_target())
            .await
    }

    /// `field`'s dropdown lists `expected`, in order
    async fn check_dropdown_options<S: AsRef<str> + Sync>(
        &self,
        field: &FormRow,
        expected: &[S],
    ) -> E2eResult<()> {
        field.check_options(expected).await
    }
}
