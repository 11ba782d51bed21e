//! UI event types.
//!
//! All external inputs (terminal, scripted actions, async results) are
//! converted to `UiEvent` before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! The reducer registers a task (id + cancellation token) when it emits the
//! effect. The runtime sends `UiEvent::TaskCompleted` carrying the handler's
//! result event; the reducer only applies it if the id is still the active
//! one for that kind.

use crossterm::event::Event as CrosstermEvent;
use onduty_core::{Field, LoginError, LoginMode, Route};

use crate::common::{TaskCompleted, TaskKind};
use crate::features::login::Focus;

/// User intents on the login form, independent of the input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    /// Replace the value of a text field.
    Input { field: Field, value: String },
    /// Role toggle selection. `None` is an empty selection and is ignored.
    SelectMode(Option<LoginMode>),
    ToggleRememberMe,
    TogglePasswordVisibility,
    Focus(Focus),
    FocusNext,
    FocusPrev,
    Submit,
    ForgotPassword,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (drives the spinner and rendering cadence).
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// A login form intent (from key mapping or a headless script).
    Login(LoginAction),

    /// Leave a destination screen and mount a fresh login form.
    SignOut,

    /// Async task finished; `result` is one of the result events below.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Debounce window elapsed without another keystroke.
    DebounceElapsed,

    /// Authentication call returned.
    AuthFinished {
        mode: LoginMode,
        result: Result<LoginMode, LoginError>,
    },

    /// Redirect delay elapsed.
    RedirectDue { route: Route },

    /// Handler observed its cancellation token before finishing.
    TaskCancelled,
}
