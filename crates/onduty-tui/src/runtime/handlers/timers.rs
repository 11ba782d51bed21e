use std::time::Duration;

use onduty_core::Route;
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

/// Waits out the debounce window for live validation.
pub async fn debounce(delay: Duration, cancel: CancellationToken) -> UiEvent {
    tokio::select! {
        biased;
        () = cancel.cancelled() => UiEvent::TaskCancelled,
        () = tokio::time::sleep(delay) => UiEvent::DebounceElapsed,
    }
}

/// Waits out the delay between a successful login and the redirect.
pub async fn redirect(route: Route, delay: Duration, cancel: CancellationToken) -> UiEvent {
    tokio::select! {
        biased;
        () = cancel.cancelled() => UiEvent::TaskCancelled,
        () = tokio::time::sleep(delay) => UiEvent::RedirectDue { route },
    }
}
