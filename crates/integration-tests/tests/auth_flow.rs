//! Sign-in, dashboard and session expiry against the mock API.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use secrecy::ExposeSecret;
use stampdesk_console::screens::entities::{ProductListScreen, product_update};
use stampdesk_console::screens::{DashboardScreen, FormPhase, LoginScreen};
use stampdesk_console::{ApiClient, Console, ConsoleConfig, Navigator, Route, Session};
use stampdesk_core::forms::LoginDraft;
use stampdesk_core::types::ProductId;
use stampdesk_integration_tests::{MockServer, PASSWORD, TOKEN};

#[tokio::test]
async fn test_login_then_dashboard_greets_user() {
    let server = MockServer::start().await;
    let client = server.client();
    let mut nav = Navigator::new(Route::Login);

    let mut login = LoginScreen::new(LoginDraft::new("jane@example.com", PASSWORD));
    assert!(login.submit(&client, &mut nav).await);
    assert_eq!(nav.current(), &Route::Dashboard);

    let token = client.session().token().unwrap().unwrap();
    assert_eq!(token.expose_secret(), TOKEN);

    let mut dashboard = DashboardScreen::new();
    dashboard.load(&client, &mut nav).await;
    assert_eq!(
        dashboard.greeting().as_deref(),
        Some("Welcome, Jane Doe\nEmail: jane@example.com\nPhone: N/A")
    );
    assert_eq!(nav.current(), &Route::Dashboard);
}

#[tokio::test]
async fn test_wrong_password_keeps_user_on_login() {
    let server = MockServer::start().await;
    let client = server.client();
    let mut nav = Navigator::new(Route::Login);

    let mut login = LoginScreen::new(LoginDraft::new("jane@example.com", "nope"));
    assert!(!login.submit(&client, &mut nav).await);
    assert_eq!(login.phase().error(), Some("Invalid credentials"));
    assert_eq!(nav.current(), &Route::Login);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_expired_token_clears_session_and_redirects() {
    let server = MockServer::with_products(3).await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::ProductList);

    server.expire_session();
    let mut screen = ProductListScreen::new(10);
    screen.load(&client, &mut nav).await;

    assert_eq!(nav.current(), &Route::Login);
    assert!(!client.session().is_authenticated());
    assert!(screen.state().error().unwrap().contains("401"));
}

#[tokio::test]
async fn test_expired_token_on_update_load_redirects() {
    let server = MockServer::with_products(1).await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::ProductEdit(ProductId::new("p1")));

    server.expire_session();
    let mut edit = product_update(ProductId::new("p1"));
    edit.load(&client, &mut nav).await;

    assert_eq!(nav.current(), &Route::Login);
    assert!(!client.session().is_authenticated());
    assert!(matches!(edit.phase(), FormPhase::LoadFailed(message) if message.contains("401")));
    assert!(!edit.is_prefilled());
    assert!(edit.submit(&client, &mut nav).await.is_none());
}

#[tokio::test]
async fn test_dashboard_failure_signs_out() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::Dashboard);

    server.expire_session();
    let mut dashboard = DashboardScreen::new();
    dashboard.load(&client, &mut nav).await;

    assert_eq!(nav.current(), &Route::Login);
    assert!(dashboard.greeting().is_none());
    assert!(client.session().token().unwrap().is_none());
}

#[tokio::test]
async fn test_logout_drops_token() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    assert!(client.session().is_authenticated());

    client.logout().await.unwrap();
    assert!(!client.session().is_authenticated());

    // The next request goes out without credentials.
    let result = client.refetch::<stampdesk_console::api::ops::GetCurrentUser>(()).await;
    assert!(result.unwrap_err().is_auth_failure());
    let last = server.requests().pop().unwrap();
    assert_eq!(last.authorization, None);
}

#[tokio::test]
async fn test_token_survives_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let client = ApiClient::new(&server.base_url(), Session::file(&session_file)).unwrap();
    let mut nav = Navigator::new(Route::Login);
    let mut login = LoginScreen::new(LoginDraft::new("jane", PASSWORD));
    assert!(login.submit(&client, &mut nav).await);
    drop(client);

    let vars = HashMap::from([
        ("STAMPDESK_API_BASE_URL", server.base_url()),
        (
            "STAMPDESK_SESSION_FILE",
            session_file.to_string_lossy().into_owned(),
        ),
    ]);
    let config = ConsoleConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let console = Console::new(config).unwrap();
    assert_eq!(console.navigator.current(), &Route::Dashboard);

    let mut nav = console.navigator.clone();
    let mut dashboard = DashboardScreen::new();
    dashboard.load(&console.client, &mut nav).await;
    assert!(dashboard.greeting().unwrap().starts_with("Welcome, Jane Doe"));
}

#[tokio::test]
async fn test_console_without_token_starts_at_login() {
    let vars = HashMap::from([("STAMPDESK_API_BASE_URL", "http://127.0.0.1:9/api".to_string())]);
    let config = ConsoleConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let console = Console::with_session(config, Session::in_memory()).unwrap();
    assert_eq!(console.navigator.current(), &Route::Login);
}
