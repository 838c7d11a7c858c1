//! Login screen and the security information page it links to.

use crate::assertion::expect;
use crate::config::Credentials;
use crate::content::login;
use crate::form::Highlight;
use crate::locator::Locator;
use crate::page::Page;
use crate::page_object::PageObject;
use crate::result::E2eResult;

/// The two login inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    /// `#login_id`
    Id,
    /// `#login_password`
    Password,
}

impl LoginField {
    /// Key used in the field's element ids
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Password => "password",
        }
    }

    /// Error shown for a too-short value
    #[must_use]
    pub const fn too_short_message(self) -> &'static str {
        match self {
            Self::Id => login::ID_TOO_SHORT,
            Self::Password => login::PASSWORD_TOO_SHORT,
        }
    }

    /// Expected tooltip copy
    #[must_use]
    pub const fn tooltip_text(self) -> &'static str {
        match self {
            Self::Id => login::ID_TOOLTIP,
            Self::Password => login::PASSWORD_TOOLTIP,
        }
    }

    fn container(self) -> String {
        format!("#login_{}_container", self.key())
    }
}

/// Login screen
#[derive(Debug, Clone)]
pub struct LoginPage {
    page: Page,
    id_input: Locator,
    password_input: Locator,
    more_about_security: Locator,
    sign_in_button: Locator,
    back_to_login: Locator,
    header: Locator,
    highlight_banner: Locator,
}

impl PageObject for LoginPage {
    const NAME: &'static str = "login";

    fn build(page: &Page) -> Self {
        Self {
            page: page.clone(),
            id_input: page.locator("#login_id"),
            password_input: page.locator("#login_password"),
            more_about_security: page.get_by_text("o bezpiecze"),
            sign_in_button: page.get_by_text("zaloguj"),
            back_to_login: page.get_by_text("do strony logowania"),
            header: page.locator(".wborder#header_2"),
            highlight_banner: page.locator(".login-highlight").first(),
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }
}

impl LoginPage {
    /// Input for a field
    #[must_use]
    pub const fn input(&self, field: LoginField) -> &Locator {
        match field {
            LoginField::Id => &self.id_input,
            LoginField::Password => &self.password_input,
        }
    }

    /// Question-mark icon next to a field
    #[must_use]
    pub fn tooltip(&self, field: LoginField) -> Locator {
        self.page
            .locator(format!("{} i.tooltip", field.container()))
    }

    /// Element carrying the field's highlight class
    #[must_use]
    pub fn highlight_wrapper(&self, field: LoginField) -> Locator {
        self.page.locator(format!("{} .grid-20", field.container()))
    }

    /// Validation message of a field
    #[must_use]
    pub fn error(&self, field: LoginField) -> Locator {
        self.page.locator(format!("#error_login_{}", field.key()))
    }

    /// The sign-in button
    #[must_use]
    pub const fn sign_in_button(&self) -> &Locator {
        &self.sign_in_button
    }

    /// The "more about security" link
    #[must_use]
    pub const fn more_about_security(&self) -> &Locator {
        &self.more_about_security
    }

    /// Error message of a field equals `expected`
    pub async fn check_error_message(&self, field: LoginField, expected: &str) -> E2eResult<()> {
        expect(&self.error(field)).to_have_text(expected).await
    }

    /// Field wrapper shows `highlight`
    pub async fn check_field_highlight(
        &self,
        field: LoginField,
        highlight: Highlight,
    ) -> E2eResult<()> {
        let wrapper = self.highlight_wrapper(field);
        match highlight.class_name() {
            Some(class) => expect(&wrapper).to_contain_class(class).await,
            None => {
                expect(&wrapper)
                    .not_to_contain_class(crate::form::ERROR_CLASS)
                    .await?;
                expect(&wrapper)
                    .not_to_contain_class(crate::form::VALID_CLASS)
                    .await
            }
        }
    }

    /// Sign-in button is enabled (`true`) or disabled (`false`)
    pub async fn is_sign_in_button_active(&self, active: bool) -> E2eResult<()> {
        let button = expect(&self.sign_in_button);
        if active {
            button.to_be_enabled().await
        } else {
            button.to_be_disabled().await
        }
    }

    /// Hover the field's tooltip icon and check its copy
    pub async fn check_tooltip(&self, field: LoginField, expected: &str) -> E2eResult<()> {
        let icon = self.tooltip(field);
        icon.hover().await?;
        expect(&icon).to_have_attribute("aria-describedby").await?;
        expect(&icon).to_have_text(expected).await
    }

    /// Type a value, then blur by force-clicking the sign-in button so
    /// validation runs even while the button is disabled
    pub async fn provide(&self, field: LoginField, value: &str) -> E2eResult<()> {
        self.input(field).fill(value).await?;
        self.sign_in_button.click_forced().await
    }

    /// Focus one field, then the other, leaving the first empty
    pub async fn touch_and_leave(&self, field: LoginField) -> E2eResult<()> {
        let other = match field {
            LoginField::Id => LoginField::Password,
            LoginField::Password => LoginField::Id,
        };
        self.input(field).click().await?;
        self.input(other).click().await
    }

    /// Type credentials and submit
    pub async fn sign_in(&self, credentials: &Credentials) -> E2eResult<()> {
        tracing::info!(user = %credentials.user_id, "sign in");
        self.id_input.fill(&credentials.user_id).await?;
        self.password_input.fill(&credentials.password).await?;
        self.sign_in_button.click().await
    }

    /// Follow the security link and check the headline
    pub async fn open_security_info(&self) -> E2eResult<()> {
        expect(&self.more_about_security).to_be_enabled().await?;
        self.more_about_security.click().await?;
        expect(&self.highlight_banner)
            .to_have_text(login::SECURITY_HEADLINE)
            .await
    }

    /// From the security page, go back and check the login header
    pub async fn back_to_login(&self) -> E2eResult<()> {
        self.back_to_login.click().await?;
        self.check_login_header().await
    }

    /// Login screen header is shown
    pub async fn check_login_header(&self) -> E2eResult<()> {
        expect(&self.header).to_have_text(login::HEADER).await
    }
}
