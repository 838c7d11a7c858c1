//! A scripted stand-in for the bank, built on `MockDriver`.
//!
//! Elements are registered under the selector chains the page objects
//! produce, and reactions reproduce the application's validation: fields
//! validate on blur, the sign-in button follows the length rule, forms open
//! a confirmation dialog on a complete submit.

#![allow(dead_code)]

use demobank_e2e::pages::{
    AccountDetail, DashboardPage, Destination, GenerateTransferPage, LoginField, LoginPage,
    Navigation, OperationColumn,
};
use demobank_e2e::prelude::*;
use demobank_e2e::rules::credential_error;
use demobank_e2e::{ElementAction, Fixtures, MockDom, DEFAULT_BASE_URL};
use std::sync::Arc;

/// Short waits so failing expectations fail fast
pub fn fast_timeouts() -> Timeouts {
    Timeouts {
        action_ms: 80,
        navigation_ms: 80,
        poll_ms: 5,
    }
}

/// Selector chain a locator resolves to
pub fn key(locator: &Locator) -> String {
    locator.query().to_string()
}

fn class_for(error: Option<&str>) -> &'static str {
    if error.is_some() {
        "field has-error"
    } else {
        "field is-valid"
    }
}

fn touched(dom: &MockDom, input: &str) -> bool {
    dom.element(input)
        .is_some_and(|el| el.attributes.contains_key("data-touched"))
}

fn touch(dom: &mut MockDom, input: &str) {
    dom.set_attr(input, "data-touched", "1");
}

fn chosen_label(action: &ElementAction, labels: &[&str]) -> Option<String> {
    match action {
        ElementAction::Select(OptionChoice::Index(i)) => labels.get(*i).map(ToString::to_string),
        ElementAction::Select(OptionChoice::Label(label)) => Some(label.clone()),
        _ => None,
    }
}

/// The fake bank
pub struct Bank {
    pub mock: MockDriver,
    page: Page,
}

impl Bank {
    /// Bank with the login screen served at the base URL
    pub fn new() -> Self {
        let mock = MockDriver::new();
        let page = Session::from_driver(Arc::new(mock.clone()), fast_timeouts())
            .page()
            .clone();
        let bank = Self { mock, page };
        bank.serve_login();
        bank
    }

    /// A fresh session over the bank
    pub fn session(&self) -> Session {
        Session::from_driver(Arc::new(self.mock.clone()), fast_timeouts())
    }

    /// Fixtures over a fresh session
    pub fn fixtures(&self) -> Fixtures {
        Fixtures::new(
            self.session(),
            SuiteConfig::default().with_timeouts(fast_timeouts()),
        )
    }

    // ---------------------------------------------------------------------
    // Login
    // ---------------------------------------------------------------------

    fn serve_login(&self) {
        let login = LoginPage::build(&self.page);
        let id = key(login.input(LoginField::Id));
        let pw = key(login.input(LoginField::Password));
        let button = key(login.sign_in_button());
        let security = key(login.more_about_security());

        let mut screen = vec![
            (id.clone(), MockElement::new("")),
            (pw.clone(), MockElement::new("")),
            (button.clone(), MockElement::new("zaloguj").disabled()),
            (security.clone(), MockElement::new("więcej o bezpieczeństwie")),
            (
                ".wborder#header_2".to_string(),
                MockElement::new(content::login::HEADER),
            ),
        ];
        for field in [LoginField::Id, LoginField::Password] {
            screen.push((key(&login.error(field)), MockElement::new("")));
            screen.push((
                key(&login.highlight_wrapper(field)),
                MockElement::new("").with_class("grid-20"),
            ));
            screen.push((
                key(&login.tooltip(field)),
                MockElement::new(field.tooltip_text()),
            ));
        }
        self.mock.on_navigate(DEFAULT_BASE_URL, move |dom| {
            for (k, el) in &screen {
                dom.set(k.clone(), vec![el.clone()]);
            }
        });

        let fields = [(LoginField::Id, id.clone()), (LoginField::Password, pw.clone())].map(
            |(field, input)| {
                (
                    field,
                    input,
                    key(&login.error(field)),
                    key(&login.highlight_wrapper(field)),
                )
            },
        );
        let validate = {
            let fields = fields.clone();
            move |dom: &mut MockDom, only: Option<&str>| {
                for (field, input, error, wrapper) in &fields {
                    if only.is_some_and(|o| o != input.as_str()) || !touched(dom, input) {
                        continue;
                    }
                    let value = dom.value(input).unwrap_or_default().to_string();
                    let message = credential_error(&value, field.too_short_message());
                    dom.set_text(error, message.unwrap_or_default());
                    dom.set_attr(wrapper, "class", format!("grid-20 {}", class_for(message)));
                }
            }
        };
        let gate = {
            let (id, pw, button) = (id.clone(), pw.clone(), button.clone());
            move |dom: &mut MockDom| {
                let ok = sign_in_allowed(
                    dom.value(&id).unwrap_or_default(),
                    dom.value(&pw).unwrap_or_default(),
                );
                dom.set_enabled(&button, ok);
            }
        };

        for (input, other) in [(id.clone(), pw.clone()), (pw.clone(), id.clone())] {
            let validate = validate.clone();
            let gate = gate.clone();
            self.mock.on_action(&input.clone(), move |dom, action| {
                touch(dom, &input);
                match action {
                    ElementAction::Click { .. } | ElementAction::Focus => {
                        validate(dom, Some(other.as_str()));
                    }
                    _ => gate(dom),
                }
            });
        }

        let dashboard = self.dashboard_screen();
        self.mock.on_action(&button.clone(), move |dom, action| {
            validate(dom, None);
            let allowed = dom.element(&button).is_some_and(|b| b.enabled);
            if matches!(action, ElementAction::Click { force: false }) && allowed {
                for (k, els) in &dashboard {
                    dom.set(k.clone(), els.clone());
                }
            }
        });

        let banner = ".login-highlight >> nth=0".to_string();
        self.mock.on_action(&security, move |dom, _| {
            dom.set_text(&banner, content::login::SECURITY_HEADLINE);
            dom.set_text("text=\"do strony logowania\"", "do strony logowania");
        });
        self.mock.on_action("text=\"do strony logowania\"", |dom, _| {
            dom.remove(".login-highlight >> nth=0");
        });

        for field in [LoginField::Id, LoginField::Password] {
            let icon = key(&login.tooltip(field));
            self.mock.on_action(&icon.clone(), move |dom, action| {
                if matches!(action, ElementAction::Hover) {
                    dom.set_attr(&icon, "aria-describedby", "ui-tooltip-0");
                }
            });
        }
    }

    // ---------------------------------------------------------------------
    // Dashboard
    // ---------------------------------------------------------------------

    fn dashboard_screen(&self) -> Vec<(String, Vec<MockElement>)> {
        let dashboard = DashboardPage::build(&self.page);
        let nav = Navigation::build(&self.page);
        let mut screen: Vec<(String, Vec<MockElement>)> = vec![(
            "h1.wborder >> nth=0".to_string(),
            vec![MockElement::new("konta osobiste")],
        )];
        for destination in Destination::ALL {
            screen.push((key(&nav.menu_entry(destination)), vec![MockElement::new("")]));
        }
        screen.push(("text=\"Wyloguj\"".to_string(), vec![MockElement::new("Wyloguj")]));

        let transfer = dashboard.quick_transfer();
        let receivers: Vec<MockElement> = content::quick_transfer::RECEIVERS
            .iter()
            .map(|r| MockElement::new(*r))
            .collect();
        screen.extend([
            (key(transfer.tooltip_button()), vec![MockElement::new(content::quick_transfer::TOOLTIP)]),
            (key(transfer.submit_button()), vec![MockElement::new("wykonaj")]),
            (key(&transfer.to_field().select()), vec![MockElement::new("")]),
            (key(&transfer.to_field().options()), receivers),
            (
                ".box-white:has-text(\"przelew\") >> .wborder".to_string(),
                vec![MockElement::new(content::quick_transfer::HEADER)],
            ),
        ]);
        for row in [transfer.to_field(), transfer.amount_field(), transfer.title_field()] {
            screen.push((key(&row.textbox()), vec![MockElement::new("")]));
            screen.push((key(&row.error()), vec![MockElement::new("")]));
            screen.push((key(row.wrapper()), vec![MockElement::new("").with_class("field")]));
        }

        let top_up = dashboard.phone_top_up();
        let phones: Vec<MockElement> = content::top_up::PHONES
            .iter()
            .map(|p| MockElement::new(*p))
            .collect();
        screen.extend([
            (key(&top_up.to_field().select()), vec![MockElement::new("")]),
            (key(&top_up.to_field().options()), phones),
            (key(&top_up.verification().checkbox()), vec![MockElement::new("")]),
            (key(top_up.info_tooltip()), vec![MockElement::new("").hidden()]),
            (
                ".box-white:has-text(\"telefonu\") >> role=button".to_string(),
                vec![MockElement::new("doładuj telefon")],
            ),
            (
                ".box-white:has-text(\"telefonu\") >> .wborder".to_string(),
                vec![MockElement::new(content::top_up::HEADER)],
            ),
        ]);
        screen.push((key(&top_up.amount_field().select()), vec![MockElement::new("")]));
        for row in [top_up.to_field(), top_up.amount_field()] {
            screen.push((key(&row.textbox()), vec![MockElement::new("")]));
            screen.push((key(&row.error()), vec![MockElement::new("")]));
            screen.push((key(row.wrapper()), vec![MockElement::new("").with_class("field")]));
        }

        let account = dashboard.account();
        screen.push((key(account.container()), vec![MockElement::new(content::account::HEADER)]));
        screen.push((key(account.more_button()), vec![MockElement::new("więcej")]));
        screen.push((
            ".box-white:has-text(\"konto na życie\") >> #account_number".to_string(),
            vec![MockElement::new("41 4100 1111 1111\n 1111 1111 0000")],
        ));
        screen.push((
            ".box-white:has-text(\"konto na życie\") >> .table-header .fancy-amount".to_string(),
            vec![MockElement::new("13 159,20 PLN")],
        ));
        let values = [
            (AccountDetail::Blocked, ".fancy-amount", "300,00 PLN"),
            (AccountDetail::CreditLimit, ".fancy-amount", "10 000,00 PLN"),
            (AccountDetail::Owner, "#owner", "  Jan\n Demobankowy "),
        ];
        for (detail, css, text) in values {
            let row = account.detail_row(detail);
            screen.push((key(&row), vec![MockElement::new("").hidden()]));
            screen.push((key(&row.locator(css)), vec![MockElement::new(text)]));
        }

        let operations = dashboard.last_operations();
        let rows = [
            ("2024-05-12", "Opłata za telefon", "-69,00 PLN"),
            ("2024-05-10", "Wynagrodzenie", "5 400,00 PLN"),
            ("2024-05-08", "Zakupy spożywcze", "-231,15 PLN"),
        ];
        screen.push((key(operations.rows()), rows.iter().map(|_| MockElement::new("")).collect()));
        screen.push((key(&operations.rows().first()), vec![MockElement::new("")]));
        screen.push((
            ".box-white:has-text(\"ostatnie operacje\") >> .wborder".to_string(),
            vec![MockElement::new(content::last_operations::HEADER)],
        ));
        for (i, (date, title, amount)) in rows.iter().enumerate() {
            screen.push((key(&operations.cell(i, OperationColumn::Date)), vec![MockElement::new(*date)]));
            screen.push((key(&operations.cell(i, OperationColumn::Title)), vec![MockElement::new(*title)]));
            screen.push((key(&operations.cell(i, OperationColumn::Amount)), vec![MockElement::new(*amount)]));
        }

        let dialog = dashboard.dialog();
        screen.push((key(dialog.dialog()), vec![MockElement::new("").hidden()]));
        screen.push((key(dialog.title()), vec![MockElement::new("")]));
        screen.push((key(dialog.content()), vec![MockElement::new("")]));
        screen.push((
            "role=dialog >> role=button".to_string(),
            vec![MockElement::new("zamknij")],
        ));
        screen
    }

    /// Install the dashboard's reactions: validation, toggles, dialogs
    pub fn script_dashboard(&self) {
        let dashboard = DashboardPage::build(&self.page);
        self.script_quick_transfer(&dashboard);
        self.script_top_up(&dashboard);
        self.script_account(&dashboard);
        self.script_dialog(&dashboard);
        self.script_menu();
    }

    fn script_quick_transfer(&self, dashboard: &DashboardPage) {
        let transfer = dashboard.quick_transfer();
        let select = key(&transfer.to_field().select());
        let rows: Vec<(String, String, String)> = [transfer.amount_field(), transfer.title_field()]
            .iter()
            .map(|row| (key(&row.textbox()), key(&row.error()), key(row.wrapper())))
            .collect();
        let receiver = (key(&transfer.to_field().error()), key(transfer.to_field().wrapper()));
        let (title_key, content_key, dialog_key) = (
            key(dashboard.dialog().title()),
            key(dashboard.dialog().content()),
            key(dashboard.dialog().dialog()),
        );

        let validate = {
            let (rows, select, receiver) = (rows.clone(), select.clone(), receiver.clone());
            move |dom: &mut MockDom| {
                let picked = dom.value(&select).unwrap_or_default().to_string();
                let message = (picked.is_empty() || picked == "index=0").then_some(REQUIRED);
                dom.set_text(&receiver.0, message.unwrap_or_default());
                dom.set_attr(&receiver.1, "class", class_for(message));
                for (input, error, wrapper) in &rows {
                    let empty = dom.value(input).unwrap_or_default().is_empty();
                    let message = empty.then_some(REQUIRED);
                    dom.set_text(error, message.unwrap_or_default());
                    dom.set_attr(wrapper, "class", class_for(message));
                }
            }
        };

        let labels: Vec<String> = content::quick_transfer::RECEIVERS
            .iter()
            .map(ToString::to_string)
            .collect();
        self.mock.on_action(&select.clone(), move |dom, action| {
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            if let Some(label) = chosen_label(action, &labels) {
                dom.set_attr(&select, "data-label", label);
            }
        });

        let blur = validate.clone();
        self.mock.on_action(key(transfer.tooltip_button()), move |dom, action| {
            if matches!(action, ElementAction::Click { .. }) {
                blur(dom);
            }
        });

        let select = key(&transfer.to_field().select());
        self.mock.on_action(key(transfer.submit_button()), move |dom, _| {
            validate(dom);
            let label = dom
                .element(&select)
                .and_then(|el| el.attributes.get("data-label").cloned());
            let amount = dom.value(&rows[0].0).unwrap_or_default().to_string();
            let title = dom.value(&rows[1].0).unwrap_or_default().to_string();
            if let Some(receiver) = label.filter(|_| !amount.is_empty() && !title.is_empty()) {
                dom.set_text(&title_key, "Przelew wykonany");
                dom.set_text(
                    &content_key,
                    format!("Przelew wykonany!Odbiorca:  {receiver}Kwota: {amount},00PLN Nazwa: {title}"),
                );
                dom.set_visible(&dialog_key, true);
            }
        });
    }

    fn script_top_up(&self, dashboard: &DashboardPage) {
        let top_up = dashboard.phone_top_up();
        let select = key(&top_up.to_field().select());
        let amount = key(&top_up.amount_field().textbox());
        let amount_error = key(&top_up.amount_field().error());
        let amount_wrapper = key(top_up.amount_field().wrapper());
        let phone_error = key(&top_up.to_field().error());
        let phone_wrapper = key(top_up.to_field().wrapper());
        let tooltip = key(top_up.info_tooltip());
        let checkbox = key(&top_up.verification().checkbox());
        let fixed = ".box-white:has-text(\"telefonu\") >> .form-row:has-text(\"kwota\") >> #uniform-widget_1_topup_amount".to_string();
        let amount_options = key(&top_up.amount_field().options());
        let dialog = (
            key(dashboard.dialog().title()),
            key(dashboard.dialog().content()),
            key(dashboard.dialog().dialog()),
        );

        let labels: Vec<String> = content::top_up::PHONES
            .iter()
            .map(ToString::to_string)
            .collect();
        {
            let (select, tooltip, fixed, amount_options) =
                (select.clone(), tooltip.clone(), fixed.clone(), amount_options.clone());
            self.mock.on_action(&select.clone(), move |dom, action| {
                let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
                let Some(label) = chosen_label(action, &labels) else {
                    return;
                };
                dom.set_attr(&select, "data-label", label.clone());
                match TopUpLimit::for_recipient(&label).tooltip() {
                    Some(text) => {
                        dom.set_text(&tooltip, text);
                        dom.set_visible(&tooltip, true);
                        dom.remove(&fixed);
                        dom.remove(&amount_options);
                    }
                    None => {
                        dom.set_visible(&tooltip, false);
                        dom.set(
                            fixed.clone(),
                            vec![MockElement::new("").with_class(content::top_up::FIXED_AMOUNT_CLASS)],
                        );
                        dom.set(
                            amount_options.clone(),
                            content::top_up::FIXED_AMOUNTS
                                .iter()
                                .map(|a| MockElement::new(*a))
                                .collect(),
                        );
                    }
                }
            });
        }

        let validate_amount = {
            let (select, amount, amount_error, amount_wrapper) =
                (select.clone(), amount.clone(), amount_error.clone(), amount_wrapper.clone());
            move |dom: &mut MockDom| {
                let label = dom
                    .element(&select)
                    .and_then(|el| el.attributes.get("data-label").cloned())
                    .unwrap_or_default();
                let raw = dom.value(&amount).unwrap_or_default().to_string();
                let message = if raw.is_empty() {
                    Some(REQUIRED)
                } else {
                    raw.parse::<u32>()
                        .ok()
                        .and_then(|a| TopUpLimit::for_recipient(&label).message_for(a))
                };
                dom.set_text(&amount_error, message.unwrap_or_default());
                dom.set_attr(&amount_wrapper, "class", class_for(message));
            }
        };

        let blur = validate_amount.clone();
        self.mock.on_action(
            ".box-white:has-text(\"telefonu\") >> .wborder",
            move |dom, action| {
                if matches!(action, ElementAction::Click { .. }) {
                    blur(dom);
                }
            },
        );

        self.mock.on_action(
            ".box-white:has-text(\"telefonu\") >> role=button",
            move |dom, _| {
                let label = dom
                    .element(&select)
                    .and_then(|el| el.attributes.get("data-label").cloned());
                dom.set_text(&phone_error, if label.is_some() { "" } else { REQUIRED });
                dom.set_attr(
                    &phone_wrapper,
                    "class",
                    class_for(label.is_none().then_some(REQUIRED)),
                );
                validate_amount(dom);
                let amount = dom.value(&amount).unwrap_or_default().to_string();
                let accepted = dom.element(&checkbox).is_some_and(|c| c.checked);
                if let (Some(phone), true, false) = (label, accepted, amount.is_empty()) {
                    dom.set_text(&dialog.0, "Doładowanie wykonane");
                    dom.set_text(
                        &dialog.1,
                        format!(" Doładowanie wykonane!Kwota: {amount},00PLN Numer: {phone}"),
                    );
                    dom.set_visible(&dialog.2, true);
                }
            },
        );
    }

    fn script_account(&self, dashboard: &DashboardPage) {
        let account = dashboard.account();
        let rows: Vec<String> = AccountDetail::ALL
            .iter()
            .map(|d| key(&account.detail_row(*d)))
            .collect();
        let toggle = move |dom: &mut MockDom, _: &ElementAction| {
            for row in &rows {
                let shown = dom.element(row).is_some_and(|el| el.visible);
                dom.set_visible(row, !shown);
            }
        };
        self.mock.on_action(key(account.container()), toggle.clone());
        self.mock.on_action(key(account.more_button()), toggle);
    }

    fn script_dialog(&self, dashboard: &DashboardPage) {
        let dialog = key(dashboard.dialog().dialog());
        self.mock.on_action("role=dialog >> role=button", move |dom, _| {
            dom.set_visible(&dialog, false);
        });
    }

    fn script_menu(&self) {
        let nav = Navigation::build(&self.page);
        for destination in Destination::ALL {
            let target = match destination.arrival() {
                demobank_e2e::pages::Arrival::Header(text) => ("h1.wborder >> nth=0", text),
                demobank_e2e::pages::Arrival::FrameHeading(text) => {
                    ("frame=#main_content iframe >> role=heading >> nth=0", text)
                }
                demobank_e2e::pages::Arrival::Banner(text) => (".login-highlight", text),
            };
            self.mock
                .on_action(key(&nav.menu_entry(destination)), move |dom, _| {
                    dom.set_text(target.0, target.1);
                });
        }
        self.mock.on_action("text=\"Wyloguj\"", |dom, _| {
            dom.set_text(".wborder#header_2", content::login::HEADER);
        });
    }

    // ---------------------------------------------------------------------
    // Generate transfer
    // ---------------------------------------------------------------------

    /// Render the transfer generator and script its validation
    pub fn serve_generate_transfer(&self) {
        let form = GenerateTransferPage::build(&self.page);
        let blur = key(form.available_amount_label());
        let account_select = key(&form.account_field().select());
        let account = (key(&form.account_field().error()), key(form.account_field().wrapper()));

        let mut screen: Vec<(String, MockElement)> = vec![
            (blur.clone(), MockElement::new("dostępne środki: 13 159,20 PLN")),
            (account_select.clone(), MockElement::new("")),
            (account.0.clone(), MockElement::new(REQUIRED)),
            (account.1.clone(), MockElement::new("").with_class("field has-error")),
            ("text=\"adres odbiorcy\"".to_string(), MockElement::new("adres odbiorcy")),
        ];
        let mut required = Vec::new();
        for row in [
            form.receiver_field(),
            form.to_account_field(),
            form.amount_field(),
            form.title_field(),
        ] {
            let entry = (key(&row.textbox()), key(&row.error()), key(row.wrapper()));
            screen.push((entry.0.clone(), MockElement::new("")));
            screen.push((entry.1.clone(), MockElement::new("")));
            screen.push((entry.2.clone(), MockElement::new("").with_class("field")));
            required.push(entry);
        }
        let mut optional = Vec::new();
        for line in form.address_lines() {
            let entry = (key(&line.textbox()), key(line.wrapper()));
            screen.push((entry.0.clone(), MockElement::new("").hidden()));
            screen.push((entry.1.clone(), MockElement::new("").with_class("field")));
            optional.push(entry);
        }

        self.mock.with_dom(|dom| {
            for (k, el) in screen {
                dom.set(k, vec![el]);
            }
        });

        let lines: Vec<String> = optional.iter().map(|(input, _)| input.clone()).collect();
        let to_account = key(&form.to_account_field().textbox());
        self.mock.on_action(&blur, move |dom, _| {
            for (input, error, wrapper) in &required {
                if !touched(dom, input) {
                    continue;
                }
                let value = dom.value(input).unwrap_or_default().to_string();
                let message = if value.is_empty() {
                    Some(REQUIRED)
                } else if *input == to_account && !is_valid_account_number(&value) {
                    Some(content::generate_transfer::INVALID_ACCOUNT_NUMBER)
                } else {
                    None
                };
                dom.set_text(error, message.unwrap_or_default());
                dom.set_attr(wrapper, "class", class_for(message));
            }
            for (input, wrapper) in &optional {
                if dom.value(input).is_some_and(|v| !v.is_empty()) {
                    dom.set_attr(wrapper, "class", "field is-valid");
                }
            }
        });

        for row in [
            form.receiver_field(),
            form.to_account_field(),
            form.amount_field(),
            form.title_field(),
        ]
        .into_iter()
        .chain(form.address_lines())
        {
            let input = key(&row.textbox());
            self.mock
                .on_action(&input.clone(), move |dom, _| touch(dom, &input));
        }

        self.mock.on_action("text=\"adres odbiorcy\"", move |dom, _| {
            for line in &lines {
                dom.set_visible(line, true);
            }
        });

        self.mock.on_action(&account_select, move |dom, action| {
            if matches!(action, ElementAction::Select(_)) {
                dom.set_text(&account.0, "");
                dom.set_attr(&account.1, "class", "field is-valid");
            }
        });
    }

    /// Make every address line turn `is-valid` on blur, empty or not
    pub fn mark_address_lines_valid_on_blur(&self) {
        let form = GenerateTransferPage::build(&self.page);
        let wrappers: Vec<String> = form
            .address_lines()
            .iter()
            .map(|line| key(line.wrapper()))
            .collect();
        self.mock
            .on_action(key(form.available_amount_label()), move |dom, _| {
                for wrapper in &wrappers {
                    dom.set_attr(wrapper, "class", "field is-valid");
                }
            });
    }
}

/// The "required" message
pub const REQUIRED: &str = content::REQUIRED_FIELD;
