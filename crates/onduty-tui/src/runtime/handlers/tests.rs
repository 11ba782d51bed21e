use std::sync::Arc;
use std::time::Duration;

use onduty_core::{
    AllowListAuthenticator, Authenticator, Credentials, LoginError, LoginMode, Route,
};
use tokio_util::sync::CancellationToken;

use super::{authenticate, debounce, redirect};
use crate::events::UiEvent;

fn allow_list() -> Arc<dyn Authenticator> {
    Arc::new(AllowListAuthenticator::default())
}

#[tokio::test]
async fn test_debounce_elapses_after_delay() {
    tokio::time::pause();
    let start = tokio::time::Instant::now();

    let event = debounce(Duration::from_millis(500), CancellationToken::new()).await;

    assert!(matches!(event, UiEvent::DebounceElapsed));
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn test_cancelled_debounce_returns_immediately() {
    tokio::time::pause();
    let token = CancellationToken::new();
    let handle = tokio::spawn(debounce(Duration::from_secs(60), token.clone()));

    token.cancel();

    let event = handle.await.expect("task should not panic");
    assert!(matches!(event, UiEvent::TaskCancelled));
}

#[tokio::test]
async fn test_redirect_carries_route() {
    tokio::time::pause();
    let event = redirect(
        Route::AdminDashboard,
        Duration::from_millis(1000),
        CancellationToken::new(),
    )
    .await;
    assert!(matches!(
        event,
        UiEvent::RedirectDue {
            route: Route::AdminDashboard
        }
    ));
}

#[tokio::test]
async fn test_authenticate_checks_after_delay() {
    tokio::time::pause();
    let start = tokio::time::Instant::now();

    let event = authenticate(
        allow_list(),
        Credentials::new("admin@domain.com", "admin123"),
        LoginMode::Admin,
        Duration::from_millis(1000),
        CancellationToken::new(),
    )
    .await;

    assert!(start.elapsed() >= Duration::from_millis(1000));
    match event {
        UiEvent::AuthFinished { mode, result } => {
            assert_eq!(mode, LoginMode::Admin);
            assert_eq!(result, Ok(LoginMode::Admin));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticate_rejects_cross_role() {
    tokio::time::pause();
    let event = authenticate(
        allow_list(),
        Credentials::new("admin@domain.com", "admin123"),
        LoginMode::Employee,
        Duration::ZERO,
        CancellationToken::new(),
    )
    .await;

    assert!(matches!(
        event,
        UiEvent::AuthFinished {
            result: Err(LoginError::CredentialMismatch),
            ..
        }
    ));
}

#[tokio::test]
async fn test_child_token_follows_view_lifetime() {
    tokio::time::pause();
    let lifetime = CancellationToken::new();
    let handle = tokio::spawn(authenticate(
        allow_list(),
        Credentials::new("employee@domain.com", "employee123"),
        LoginMode::Employee,
        Duration::from_secs(1),
        lifetime.child_token(),
    ));

    lifetime.cancel();

    let event = handle.await.expect("task should not panic");
    assert!(matches!(event, UiEvent::TaskCancelled));
}
