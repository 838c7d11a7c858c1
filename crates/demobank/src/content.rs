//! Expected application copy.
//!
//! Literal texts the suite asserts against, grouped by screen. Kept in one
//! place so a copy change in the application is a one-line fix here.

/// Message shown under any empty required field
pub const REQUIRED_FIELD: &str = "pole wymagane";

/// Login screen
pub mod login {
    /// Identifier shorter than 8 characters
    pub const ID_TOO_SHORT: &str = "identyfikator ma min. 8 znaków";
    /// Password shorter than 8 characters
    pub const PASSWORD_TOO_SHORT: &str = "hasło ma min. 8 znaków";
    /// Tooltip on the identifier field
    pub const ID_TOOLTIP: &str = "Wprowadź identyfikator otrzymany z banku lub alias - dodatkowy własny identyfikator, samodzielnie zdefiniowany w Demobank online.";
    /// Tooltip on the password field
    pub const PASSWORD_TOOLTIP: &str = "Wprowadź swoje hasło. Sprawdź, czy przycisk Caps Lock jest włączony. Uwaga: 3-krotne wprowadzenie błędnego hasła spowoduje zablokowanie dostępu do systemu.";
    /// Headline of the security information page
    pub const SECURITY_HEADLINE: &str = "Pamiętaj o swoim bezpieczeństwie!";
    /// Header of the login screen
    pub const HEADER: &str = "Wersja demonstracyjna serwisu Demobank";
    /// Identifier that fails the length rule
    pub const INVALID_ID: &str = "Test123";
    /// Password that fails the length rule
    pub const INVALID_PASSWORD: &str = "Pass123";
}

/// Quick transfer widget
pub mod quick_transfer {
    /// Widget header
    pub const HEADER: &str = "szybki przelew";
    /// Tooltip on the widget header
    pub const TOOLTIP: &str =
        "widżet umożliwia zlecenie przelewu zwykłego do jednego ze zdefiniowanych odbiorców";
    /// Receiver dropdown, in display order
    pub const RECEIVERS: [&str; 4] = [
        "wybierz odbiorcę przelewu",
        "Jan Demobankowy",
        "Chuck Demobankowy",
        "Michael Scott",
    ];
    /// Title of the confirmation dialog
    pub const DIALOG_TITLE: &str = "Przelew wykonany";
}

/// Phone top-up widget
pub mod top_up {
    /// Widget header
    pub const HEADER: &str = "doładowanie telefonu";
    /// Phone dropdown, in display order
    pub const PHONES: [&str; 5] = [
        "wybierz telefon do doładowania",
        "500 xxx xxx",
        "502 xxx xxx",
        "503 xxx xxx",
        "504 xxx xxx",
    ];
    /// Phones topped up with a free amount
    pub const FREE_AMOUNT_PHONES: [&str; 3] = ["500 xxx xxx", "502 xxx xxx", "503 xxx xxx"];
    /// Phones topped up from a fixed amount list
    pub const FIXED_AMOUNT_PHONES: [&str; 1] = ["504 xxx xxx"];
    /// Amount dropdown for fixed-amount phones
    pub const FIXED_AMOUNTS: [&str; 4] = ["wybierz kwotę", "40", "50", "100"];
    /// Class of the styled fixed-amount dropdown wrapper
    pub const FIXED_AMOUNT_CLASS: &str = "selector fixedWidth";
    /// Amount below the minimum
    pub const AMOUNT_TOO_LOW: &str = "kwota musi być większa lub równa 5";
    /// Amount above the 500 ceiling
    pub const AMOUNT_TOO_HIGH_500: &str = "kwota musi być mniejsza lub równa 500";
    /// Amount above the 150 ceiling
    pub const AMOUNT_TOO_HIGH_150: &str = "kwota musi być mniejsza lub równa 150";
    /// Amount hint for 500-ceiling phones
    pub const TOOLTIP_500: &str = "doładowanie w kwocie od 5 zł do 500 zł";
    /// Amount hint for 150-ceiling phones
    pub const TOOLTIP_150: &str = "doładowanie w kwocie od 5 zł do 150 zł";
    /// Title of the confirmation dialog
    pub const DIALOG_TITLE: &str = "Doładowanie wykonane";
}

/// "Konto na życie" account widget
pub mod account {
    /// Widget header
    pub const HEADER: &str = "konto na życie";
    /// Account number as displayed
    pub const NUMBER: &str = "41 4100 1111 1111 1111 1111 0000";
    /// Available funds
    pub const AVAILABLE: &str = "13159,20PLN";
    /// Blocked funds
    pub const BLOCKED: &str = "300,00PLN";
    /// Credit limit
    pub const CREDIT_LIMIT: &str = "10000,00PLN";
    /// Account owner
    pub const OWNER: &str = "Jan Demobankowy";
}

/// Last operations widget
pub mod last_operations {
    /// Widget header
    pub const HEADER: &str = "ostatnie operacje";
}

/// Generate transfer form
pub mod generate_transfer {
    /// Account number that is not 26 digits
    pub const INVALID_ACCOUNT_NUMBER: &str = "nieprawidłowy numer rachunku";
}

/// Settings page placeholder
pub const SETTINGS_UNDER_CONSTRUCTION: &str = "Strona w budowie!";

/// Heading inside the reports iframe
pub const REPORTS_IFRAME_HEADING: &str = "Raporty (iframe)";
