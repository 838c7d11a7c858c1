//! Login screen scenarios against the scripted bank.

mod common;

use common::{Bank, REQUIRED};
use demobank_e2e::prelude::*;
use demobank_e2e::FixtureRegistry;

async fn login_screen(bank: &Bank) -> demobank_e2e::Fixtures {
    let fixtures = bank.fixtures();
    fixtures
        .setup(&FixtureRegistry::standard(), &[Precondition::OpenSite])
        .await
        .unwrap();
    fixtures
}

// =============================================================================
// Field validation
// =============================================================================

#[tokio::test]
async fn test_user_id_is_required() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login.touch_and_leave(LoginField::Id).await.unwrap();
    login.check_error_message(LoginField::Id, REQUIRED).await.unwrap();
    login
        .check_field_highlight(LoginField::Id, Highlight::Error)
        .await
        .unwrap();
    login.is_sign_in_button_active(false).await.unwrap();
}

#[tokio::test]
async fn test_password_is_required() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login.touch_and_leave(LoginField::Password).await.unwrap();
    login
        .check_error_message(LoginField::Password, REQUIRED)
        .await
        .unwrap();
    login
        .check_field_highlight(LoginField::Password, Highlight::Error)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_short_credentials_show_length_messages() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login
        .provide(LoginField::Id, content::login::INVALID_ID)
        .await
        .unwrap();
    login
        .check_error_message(LoginField::Id, content::login::ID_TOO_SHORT)
        .await
        .unwrap();

    login
        .provide(LoginField::Password, content::login::INVALID_PASSWORD)
        .await
        .unwrap();
    login
        .check_error_message(LoginField::Password, content::login::PASSWORD_TOO_SHORT)
        .await
        .unwrap();
    login.is_sign_in_button_active(false).await.unwrap();
}

#[tokio::test]
async fn test_valid_id_clears_the_error() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login.provide(LoginField::Id, "short").await.unwrap();
    login
        .check_field_highlight(LoginField::Id, Highlight::Error)
        .await
        .unwrap();
    login.provide(LoginField::Id, "LongEnough").await.unwrap();
    login.check_error_message(LoginField::Id, "").await.unwrap();
    login
        .check_field_highlight(LoginField::Id, Highlight::Valid)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_untouched_fields_have_no_highlight() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    for field in [LoginField::Id, LoginField::Password] {
        login
            .check_field_highlight(field, Highlight::Untouched)
            .await
            .unwrap();
    }
}

// =============================================================================
// Sign-in gating
// =============================================================================

#[tokio::test]
async fn test_sign_in_needs_both_fields_long_enough() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login.is_sign_in_button_active(false).await.unwrap();
    login.provide(LoginField::Id, "TestUser").await.unwrap();
    login.is_sign_in_button_active(false).await.unwrap();
    login.provide(LoginField::Password, "Pass123").await.unwrap();
    login.is_sign_in_button_active(false).await.unwrap();
    login.provide(LoginField::Password, "Pass1234").await.unwrap();
    login.is_sign_in_button_active(true).await.unwrap();
}

#[tokio::test]
async fn test_sign_in_reaches_the_dashboard() {
    let bank = Bank::new();
    let fx = bank.fixtures();
    fx.setup(&FixtureRegistry::standard(), &[Precondition::SignIn])
        .await
        .unwrap();

    fx.navigation()
        .check_arrival(Destination::Dashboard)
        .await
        .unwrap();
    assert!(bank.mock.was_called("click:text=\"zaloguj\""));
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let bank = Bank::new();
    bank.script_dashboard();
    let fx = bank.fixtures();
    fx.setup(&FixtureRegistry::standard(), &[Precondition::SignIn])
        .await
        .unwrap();

    fx.navigation().logout().await.unwrap();
    fx.login().check_login_header().await.unwrap();
}

// =============================================================================
// Tooltips and security info
// =============================================================================

#[tokio::test]
async fn test_field_tooltips() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login
        .check_tooltip(LoginField::Id, content::login::ID_TOOLTIP)
        .await
        .unwrap();
    login
        .check_tooltip(LoginField::Password, content::login::PASSWORD_TOOLTIP)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_security_info_and_back() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;
    let login = fx.login();

    login.open_security_info().await.unwrap();
    login.back_to_login().await.unwrap();
}

#[tokio::test]
async fn test_wrong_tooltip_copy_fails() {
    let bank = Bank::new();
    let fx = login_screen(&bank).await;

    let err = fx
        .login()
        .check_tooltip(LoginField::Id, content::login::PASSWORD_TOOLTIP)
        .await
        .unwrap_err();
    assert!(err.is_assertion() || err.is_timeout(), "{err}");
}
