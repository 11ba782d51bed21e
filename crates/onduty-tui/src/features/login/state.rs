//! Login form state holder.

use onduty_core::{FieldErrors, FormInput, LoginMode, StatusMessage};
use tokio_util::sync::CancellationToken;

use crate::common::Tasks;

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Mode,
    #[default]
    Email,
    Password,
    RememberMe,
    ForgotPassword,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Mode,
        Focus::Email,
        Focus::Password,
        Focus::RememberMe,
        Focus::ForgotPassword,
        Focus::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

/// Where the submission controller is.
///
/// `Validating` is transient (it happens inside a single reducer call), so
/// it has no variant. `Rejected` and `Failed` accept a new submission just
/// like `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Rejected,
    Pending,
    Succeeded(LoginMode),
    Failed,
}

/// State for the mounted login form.
#[derive(Debug)]
pub struct LoginState {
    pub input: FormInput,
    pub errors: FieldErrors,
    pub status: Option<StatusMessage>,
    /// True while the authentication call is in flight.
    pub loading: bool,
    pub show_password: bool,
    pub focus: Focus,
    pub phase: SubmissionPhase,
    pub tasks: Tasks,
    /// Cancelled when the form is unmounted; parent of every task token.
    pub lifetime: CancellationToken,
}

impl LoginState {
    pub fn new(mode: LoginMode) -> Self {
        Self {
            input: FormInput::new(mode),
            errors: FieldErrors::default(),
            status: None,
            loading: false,
            show_password: false,
            focus: Focus::default(),
            phase: SubmissionPhase::default(),
            tasks: Tasks::default(),
            lifetime: CancellationToken::new(),
        }
    }

    /// Whether the submit trigger is enabled.
    ///
    /// Disabled while authenticating and while a redirect is pending.
    pub fn submit_enabled(&self) -> bool {
        !self.loading && !matches!(self.phase, SubmissionPhase::Succeeded(_))
    }

    /// True once the current submission has reached an outcome that needs
    /// no further timer to resolve.
    pub fn is_settled(&self) -> bool {
        let waiting = self.tasks.authentication.is_running() || self.tasks.redirect.is_running();
        match self.phase {
            SubmissionPhase::Rejected | SubmissionPhase::Failed => !waiting,
            SubmissionPhase::Idle => !self.tasks.is_any_running(),
            SubmissionPhase::Pending | SubmissionPhase::Succeeded(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_both_ways() {
        assert_eq!(Focus::Submit.next(), Focus::Mode);
        assert_eq!(Focus::Mode.prev(), Focus::Submit);
        assert_eq!(Focus::Email.next(), Focus::Password);
        assert_eq!(Focus::Password.prev(), Focus::Email);
    }

    #[test]
    fn test_new_form_is_empty_and_enabled() {
        let state = LoginState::new(LoginMode::Admin);
        assert_eq!(state.input.login_mode, LoginMode::Admin);
        assert!(state.input.email.is_empty());
        assert!(state.errors.is_empty());
        assert!(state.submit_enabled());
        assert!(state.is_settled());
        assert!(!state.lifetime.is_cancelled());
    }
}
