//! Side menu scenarios: every destination proves it has loaded.

mod common;

use common::Bank;
use demobank_e2e::prelude::*;
use demobank_e2e::{FixtureRegistry, Fixtures};

async fn signed_in(bank: &Bank) -> Fixtures {
    bank.script_dashboard();
    let fixtures = bank.fixtures();
    fixtures
        .setup(&FixtureRegistry::standard(), &[Precondition::SignIn])
        .await
        .unwrap();
    fixtures
}

#[tokio::test]
async fn test_every_destination_arrives() {
    let bank = Bank::new();
    let fx = signed_in(&bank).await;
    let nav = fx.navigation();

    for destination in Destination::ALL {
        nav.go_to(destination).await.unwrap();
        nav.check_arrival(destination).await.unwrap();
    }
}

#[tokio::test]
async fn test_named_shortcuts() {
    let bank = Bank::new();
    let fx = signed_in(&bank).await;
    let nav = fx.navigation();

    nav.go_to_payments().await.unwrap();
    nav.check_header_text("przelew dowolny").await.unwrap();
    nav.go_to_financial_manager().await.unwrap();
    nav.check_header_text("manager finansowy").await.unwrap();
    nav.go_to_quick_transfer().await.unwrap();
    nav.check_header_text("szybki przelew").await.unwrap();
    nav.go_to_phone_top_up().await.unwrap();
    nav.check_header_text("doładowanie telefonu").await.unwrap();
    nav.go_to_dashboard().await.unwrap();
    nav.check_header_text("konta osobiste").await.unwrap();
}

#[tokio::test]
async fn test_reports_iframe_heading() {
    let bank = Bank::new();
    let fx = signed_in(&bank).await;
    let nav = fx.navigation();

    nav.go_to_reports_iframe().await.unwrap();
    nav.check_arrival(Destination::ReportsIframe).await.unwrap();
}

#[tokio::test]
async fn test_settings_is_under_construction() {
    let bank = Bank::new();
    let fx = signed_in(&bank).await;
    let nav = fx.navigation();

    nav.go_to_settings().await.unwrap();
    nav.check_arrival(Destination::Settings).await.unwrap();
}

#[tokio::test]
async fn test_wrong_header_fails() {
    let bank = Bank::new();
    let fx = signed_in(&bank).await;
    let nav = fx.navigation();

    nav.go_to_charts().await.unwrap();
    let err = nav.check_header_text("Tabele danych").await.unwrap_err();
    assert!(err.is_assertion() || err.is_timeout(), "{err}");
}

#[tokio::test]
async fn test_open_generate_transfer_fixture() {
    let bank = Bank::new();
    bank.script_dashboard();
    let fx = bank.fixtures();
    fx.setup(
        &FixtureRegistry::standard(),
        &[Precondition::OpenGenerateTransfer],
    )
    .await
    .unwrap();

    fx.navigation()
        .check_arrival(Destination::GenerateTransfer)
        .await
        .unwrap();
    let history = bank.mock.history();
    let nav_click = format!("click:{}", Destination::GenerateTransfer.menu_selector());
    let sign_in = history
        .iter()
        .position(|h| h == "click:text=\"zaloguj\"")
        .unwrap();
    let opened = history.iter().position(|h| *h == nav_click).unwrap();
    assert!(sign_in < opened);
}
