//! Side menu navigation and the header checks that confirm arrival.

use crate::assertion::expect;
use crate::content;
use crate::locator::{Locator, Role};
use crate::page::Page;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::wait::LoadState;

/// How a destination proves it has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// First `h1.wborder` has this text
    Header(&'static str),
    /// First heading inside the main-content iframe has this text
    FrameHeading(&'static str),
    /// `.login-highlight` banner has this text
    Banner(&'static str),
}

/// Screens reachable from the side menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// mój pulpit
    Dashboard,
    /// mój pulpit, szybki przelew
    QuickTransfer,
    /// mój pulpit, doładowanie telefonu
    PhoneTopUp,
    /// mój pulpit, manager finansowy
    FinancialManager,
    /// konta osobiste
    PersonalAccounts,
    /// płatności
    Payments,
    /// raporty
    Reports,
    /// raporty (iframe)
    ReportsIframe,
    /// generuj przelew
    GenerateTransfer,
    /// wykresy
    Charts,
    /// tabele danych
    DataTables,
    /// ustawienia
    Settings,
}

impl Destination {
    /// Every destination, in menu order
    pub const ALL: [Self; 12] = [
        Self::Dashboard,
        Self::QuickTransfer,
        Self::PhoneTopUp,
        Self::FinancialManager,
        Self::PersonalAccounts,
        Self::Payments,
        Self::Reports,
        Self::ReportsIframe,
        Self::GenerateTransfer,
        Self::Charts,
        Self::DataTables,
        Self::Settings,
    ];

    /// Menu entry selector
    #[must_use]
    pub const fn menu_selector(self) -> &'static str {
        match self {
            Self::Dashboard => "#pulpit_btn",
            Self::QuickTransfer => "#quick_btn",
            Self::PhoneTopUp => ".i-phone",
            Self::FinancialManager => ".i-nav-savings#manager_fin_btn",
            Self::PersonalAccounts => "#privaccounts_btn",
            Self::Payments => "#payments_btn",
            Self::Reports => "#reports_btn",
            Self::ReportsIframe => "#reports_iframe_btn",
            Self::GenerateTransfer => "#user_reports_btn",
            Self::Charts => "#charts_btn",
            Self::DataTables => "#tables_btn",
            Self::Settings => ".i-nav-settings",
        }
    }

    /// What the destination shows once loaded
    #[must_use]
    pub const fn arrival(self) -> Arrival {
        match self {
            Self::Dashboard | Self::PersonalAccounts => Arrival::Header("konta osobiste"),
            Self::QuickTransfer => Arrival::Header("szybki przelew"),
            Self::PhoneTopUp => Arrival::Header("doładowanie telefonu"),
            Self::FinancialManager => Arrival::Header("manager finansowy"),
            Self::Payments => Arrival::Header("przelew dowolny"),
            Self::Reports => Arrival::Header("Raporty"),
            Self::ReportsIframe => Arrival::FrameHeading(content::REPORTS_IFRAME_HEADING),
            Self::GenerateTransfer => Arrival::Header("Generowanie Przelewu"),
            Self::Charts => Arrival::Header("Wykresy"),
            Self::DataTables => Arrival::Header("Tabele danych"),
            Self::Settings => Arrival::Banner(content::SETTINGS_UNDER_CONSTRUCTION),
        }
    }
}

/// Side menu of the signed-in application
#[derive(Debug, Clone)]
pub struct Navigation {
    page: Page,
    header: Locator,
    frame_heading: Locator,
    banner: Locator,
    logout_link: Locator,
}

impl PageObject for Navigation {
    const NAME: &'static str = "navigation";

    fn build(page: &Page) -> Self {
        Self {
            page: page.clone(),
            header: page.locator("h1.wborder").first(),
            frame_heading: page
                .frame_locator("#main_content iframe")
                .get_by_role(Role::Heading)
                .first(),
            banner: page.locator(".login-highlight"),
            logout_link: page.get_by_text("Wyloguj"),
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }
}

impl Navigation {
    /// Menu entry for a destination
    #[must_use]
    pub fn menu_entry(&self, destination: Destination) -> Locator {
        self.page.locator(destination.menu_selector())
    }

    /// Click the menu entry for `destination`
    pub async fn go_to(&self, destination: Destination) -> E2eResult<()> {
        tracing::info!(?destination, "navigate by menu");
        self.menu_entry(destination).click().await?;
        self.page.wait_for_load_state(LoadState::Load).await
    }

    /// Go to mój pulpit
    pub async fn go_to_dashboard(&self) -> E2eResult<()> {
        self.go_to(Destination::Dashboard).await
    }

    /// Go to szybki przelew
    pub async fn go_to_quick_transfer(&self) -> E2eResult<()> {
        self.go_to(Destination::QuickTransfer).await
    }

    /// Go to doładowanie telefonu
    pub async fn go_to_phone_top_up(&self) -> E2eResult<()> {
        self.go_to(Destination::PhoneTopUp).await
    }

    /// Go to manager finansowy
    pub async fn go_to_financial_manager(&self) -> E2eResult<()> {
        self.go_to(Destination::FinancialManager).await
    }

    /// Go to konta osobiste
    pub async fn go_to_personal_accounts(&self) -> E2eResult<()> {
        self.go_to(Destination::PersonalAccounts).await
    }

    /// Go to płatności
    pub async fn go_to_payments(&self) -> E2eResult<()> {
        self.go_to(Destination::Payments).await
    }

    /// Go to raporty
    pub async fn go_to_reports(&self) -> E2eResult<()> {
        self.go_to(Destination::Reports).await
    }

    /// Go to raporty (iframe)
    pub async fn go_to_reports_iframe(&self) -> E2eResult<()> {
        self.go_to(Destination::ReportsIframe).await
    }

    /// Go to generuj przelew
    pub async fn go_to_generate_transfer(&self) -> E2eResult<()> {
        self.go_to(Destination::GenerateTransfer).await
    }

    /// Go to wykresy
    pub async fn go_to_charts(&self) -> E2eResult<()> {
        self.go_to(Destination::Charts).await
    }

    /// Go to tabele danych
    pub async fn go_to_data_tables(&self) -> E2eResult<()> {
        self.go_to(Destination::DataTables).await
    }

    /// Go to ustawienia
    pub async fn go_to_settings(&self) -> E2eResult<()> {
        self.go_to(Destination::Settings).await
    }

    /// First sub-page header equals `expected`
    pub async fn check_header_text(&self, expected: &str) -> E2eResult<()> {
        expect(&self.header).to_have_text(expected).await
    }

    /// Destination shows its arrival marker
    pub async fn check_arrival(&self, destination: Destination) -> E2eResult<()> {
        match destination.arrival() {
            Arrival::Header(text) => self.check_header_text(text).await,
            Arrival::FrameHeading(text) => expect(&self.frame_heading).to_have_text(text).await,
            Arrival::Banner(text) => expect(&self.banner).to_have_text(text).await,
        }
    }

    /// Sign out and check the login header is back
    pub async fn logout(&self) -> E2eResult<()> {
        self.logout_link.click().await?;
        expect(&self.page.locator(".wborder#header_2"))
            .to_have_text(content::login::HEADER)
            .await
    }
}
