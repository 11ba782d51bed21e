//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent timers, the authentication call, and calls into the host
//! hooks (navigator, login listener). The reducer never performs these
//! directly.
//!
//! ## Cancellation Effects
//!
//! Every deferred effect carries a `CancellationToken` derived from the login
//! view's lifetime token. The reducer decides when to cancel (debounce
//! restart, unmount); the runtime executes by calling `token.cancel()`.

use std::time::Duration;

use onduty_core::{Credentials, LoginMode, Route};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run live validation once `delay` has passed without being cancelled.
    ScheduleValidation {
        task: TaskId,
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Run the mocked authentication call after `delay`.
    Authenticate {
        task: TaskId,
        credentials: Credentials,
        mode: LoginMode,
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Fire the post-login redirect after `delay`.
    ScheduleRedirect {
        task: TaskId,
        route: Route,
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Hand a destination to the injected navigator.
    Navigate { route: Route },

    /// Notify the host application of a successful login.
    NotifyLoginSuccess { role: LoginMode },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    /// The login view was unmounted: cancel its lifetime token (and with it
    /// every deferred task it spawned).
    ReleaseView { lifetime: CancellationToken },
}
