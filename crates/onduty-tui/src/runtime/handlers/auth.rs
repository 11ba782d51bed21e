use std::sync::Arc;
use std::time::Duration;

use onduty_core::{Authenticator, Credentials, LoginMode};
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

/// Simulates the remote authentication call: waits `delay`, then asks the
/// authenticator. Nothing is checked if the token fires first.
pub async fn authenticate(
    authenticator: Arc<dyn Authenticator>,
    credentials: Credentials,
    mode: LoginMode,
    delay: Duration,
    cancel: CancellationToken,
) -> UiEvent {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!(%mode, "authentication cancelled");
            UiEvent::TaskCancelled
        }
        () = tokio::time::sleep(delay) => UiEvent::AuthFinished {
            mode,
            result: authenticator.authenticate(&credentials, mode),
        },
    }
}
