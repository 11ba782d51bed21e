//! Application state composition.
//!
//! ```text
//! AppState
//! ├── screen: Screen
//! │   ├── Login(LoginState)          (form values, flags, tasks, lifetime token)
//! │   └── Destination(DestinationState)
//! ├── task_seq: TaskSeq              (async task id generator)
//! ├── timing: Timing                 (debounce / auth / redirect delays)
//! └── default_mode: LoginMode        (mode a freshly mounted form starts in)
//! ```
//!
//! The login form state lives inside `Screen::Login`, so navigating away
//! drops it. Remounting always starts from a fresh `LoginState`.

use std::time::Duration;

use chrono::{DateTime, Local};
use onduty_core::{Config, LoginMode, Route};

use crate::common::TaskSeq;
use crate::features::login::LoginState;

/// Artificial delays used by the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub debounce: Duration,
    pub auth_delay: Duration,
    pub redirect_delay: Duration,
}

impl Timing {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.debounce(),
            auth_delay: config.auth_delay(),
            redirect_delay: config.redirect_delay(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Screen shown after leaving the login form.
#[derive(Debug, Clone)]
pub struct DestinationState {
    pub route: Route,
    /// Role granted by the login that led here (none for `/ForgotPassword`).
    pub role: Option<LoginMode>,
    pub arrived_at: DateTime<Local>,
}

#[derive(Debug)]
pub enum Screen {
    Login(LoginState),
    Destination(DestinationState),
}

impl Screen {
    pub fn login(&self) -> Option<&LoginState> {
        match self {
            Screen::Login(login) => Some(login),
            Screen::Destination(_) => None,
        }
    }

    pub fn login_mut(&mut self) -> Option<&mut LoginState> {
        match self {
            Screen::Login(login) => Some(login),
            Screen::Destination(_) => None,
        }
    }

    pub fn destination(&self) -> Option<&DestinationState> {
        match self {
            Screen::Login(_) => None,
            Screen::Destination(dest) => Some(dest),
        }
    }
}

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub screen: Screen,
    /// Task id sequence for async operations (shared across remounts).
    pub task_seq: TaskSeq,
    pub timing: Timing,
    pub default_mode: LoginMode,
    /// Most recent route handed to the navigator.
    pub last_route: Option<Route>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_timing(Timing::from_config(config), config.default_mode)
    }

    pub fn with_timing(timing: Timing, default_mode: LoginMode) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Login(LoginState::new(default_mode)),
            task_seq: TaskSeq::default(),
            timing,
            default_mode,
            last_route: None,
            spinner_frame: 0,
        }
    }

    /// Mounts a fresh login form.
    pub fn mount_login(&mut self) {
        self.screen = Screen::Login(LoginState::new(self.default_mode));
    }
}
