//! Navigation targets and the host-application hooks.
//!
//! The login flow never switches screens through ambient globals; the
//! runtime is handed a `Navigator` and an optional `LoginListener` and
//! calls them when the reducer asks for it.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::form::LoginMode;

/// Destinations reachable from the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    AdminDashboard,
    AttendanceCard,
    ForgotPassword,
}

impl Route {
    /// Landing route after a successful login for `role`.
    pub fn for_role(role: LoginMode) -> Self {
        match role {
            LoginMode::Admin => Route::AdminDashboard,
            LoginMode::Employee => Route::AttendanceCard,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::AdminDashboard => "/AdminDashboard",
            Route::AttendanceCard => "/AttendanceCard",
            Route::ForgotPassword => "/ForgotPassword",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::AdminDashboard => "Admin Dashboard",
            Route::AttendanceCard => "Attendance Card",
            Route::ForgotPassword => "Forgot Password",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

/// Outbound navigation capability.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Inbound hook notified once per successful login.
pub trait LoginListener: Send + Sync {
    fn on_login_success(&self, role: LoginMode);
}

/// Navigator that only records the transition in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = route.path(), "navigate");
    }
}
