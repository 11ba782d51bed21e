//! Login feature reducer.
//!
//! Handles form edits, the debounce timer, the submission state machine
//! and the mode toggle. Returns effects plus a transition telling the main
//! reducer whether the form stays mounted.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use onduty_core::status::{
    CORRECT_ERRORS_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LOGIN_SUCCESS_MESSAGE,
};
use onduty_core::{Credentials, Field, FieldErrors, LoginMode, Route, StatusMessage, validate_input};

use super::state::{Focus, LoginState, SubmissionPhase};
use crate::common::{TaskKind, TaskSeq};
use crate::effects::UiEffect;
use crate::events::{LoginAction, UiEvent};
use crate::state::Timing;

/// What the main reducer should do with the form after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginTransition {
    Stay,
    /// Unmount the form and navigate to `route`.
    Leave(Route),
    Quit,
}

/// Update returned by the login reducer.
#[derive(Debug)]
pub struct LoginUpdate {
    pub transition: LoginTransition,
    pub effects: Vec<UiEffect>,
}

impl LoginUpdate {
    fn new(transition: LoginTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(LoginTransition::Stay)
    }

    pub fn leave(route: Route) -> Self {
        Self::new(LoginTransition::Leave(route))
    }

    pub fn quit() -> Self {
        Self::new(LoginTransition::Quit)
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// Result of mapping a key press on the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIntent {
    Action(LoginAction),
    Quit,
}

/// Maps a key press to an intent.
///
/// This is the input boundary: activating submit while the trigger is
/// disabled produces nothing.
pub fn key_intent(login: &LoginState, key: KeyEvent) -> Option<KeyIntent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = |a: LoginAction| Some(KeyIntent::Action(a));

    match key.code {
        KeyCode::Char('c') if ctrl => Some(KeyIntent::Quit),
        KeyCode::Esc => Some(KeyIntent::Quit),
        KeyCode::Char('p') if ctrl => action(LoginAction::TogglePasswordVisibility),
        KeyCode::Tab | KeyCode::Down => action(LoginAction::FocusNext),
        KeyCode::BackTab | KeyCode::Up => action(LoginAction::FocusPrev),
        KeyCode::Enter => match login.focus {
            Focus::ForgotPassword => action(LoginAction::ForgotPassword),
            Focus::RememberMe => action(LoginAction::ToggleRememberMe),
            Focus::Mode | Focus::Email | Focus::Password | Focus::Submit => {
                if login.submit_enabled() {
                    action(LoginAction::Submit)
                } else {
                    None
                }
            }
        },
        _ => match login.focus {
            Focus::Mode => mode_key(login, key.code),
            Focus::Email => text_key(login, Field::Email, key.code, ctrl),
            Focus::Password => text_key(login, Field::Password, key.code, ctrl),
            Focus::RememberMe if key.code == KeyCode::Char(' ') => {
                action(LoginAction::ToggleRememberMe)
            }
            Focus::RememberMe | Focus::ForgotPassword | Focus::Submit => None,
        },
    }
}

fn mode_key(login: &LoginState, code: KeyCode) -> Option<KeyIntent> {
    let selection = match code {
        KeyCode::Left => Some(LoginMode::Employee),
        KeyCode::Right => Some(LoginMode::Admin),
        KeyCode::Char(' ') => Some(login.input.login_mode.other()),
        _ => return None,
    };
    Some(KeyIntent::Action(LoginAction::SelectMode(selection)))
}

fn text_key(login: &LoginState, field: Field, code: KeyCode, ctrl: bool) -> Option<KeyIntent> {
    let current = login.input.value(field);
    let value = match code {
        KeyCode::Char('u') if ctrl => String::new(),
        KeyCode::Char(c) if !ctrl => {
            let mut value = current.to_string();
            value.push(c);
            value
        }
        KeyCode::Backspace => {
            if current.is_empty() {
                return None;
            }
            let mut value = current.to_string();
            value.pop();
            value
        }
        _ => return None,
    };
    Some(KeyIntent::Action(LoginAction::Input { field, value }))
}

/// Appends pasted text to the focused text field.
pub fn paste_intent(login: &LoginState, text: &str) -> Option<KeyIntent> {
    let field = match login.focus {
        Focus::Email => Field::Email,
        Focus::Password => Field::Password,
        _ => return None,
    };
    let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
    if pasted.is_empty() {
        return None;
    }
    let value = format!("{}{pasted}", login.input.value(field));
    Some(KeyIntent::Action(LoginAction::Input { field, value }))
}

/// Applies a form intent.
pub fn apply_action(
    login: &mut LoginState,
    seq: &mut TaskSeq,
    timing: &Timing,
    action: LoginAction,
) -> LoginUpdate {
    match action {
        LoginAction::Input { field, value } => {
            if login.input.value(field) == value {
                return LoginUpdate::stay();
            }
            login.input = login.input.with_value(field, value);
            LoginUpdate::stay().with_effects(restart_debounce(login, seq, timing))
        }
        LoginAction::SelectMode(selection) => {
            select_mode(login, selection);
            LoginUpdate::stay()
        }
        LoginAction::ToggleRememberMe => {
            login.input = login.input.with_remember_me(!login.input.remember_me);
            LoginUpdate::stay()
        }
        LoginAction::TogglePasswordVisibility => {
            login.show_password = !login.show_password;
            LoginUpdate::stay()
        }
        LoginAction::Focus(focus) => {
            login.focus = focus;
            LoginUpdate::stay()
        }
        LoginAction::FocusNext => {
            login.focus = login.focus.next();
            LoginUpdate::stay()
        }
        LoginAction::FocusPrev => {
            login.focus = login.focus.prev();
            LoginUpdate::stay()
        }
        LoginAction::Submit => submit(login, seq, timing),
        LoginAction::ForgotPassword => LoginUpdate::leave(Route::ForgotPassword),
    }
}

/// Cancels any pending live validation and, when a field has text,
/// schedules a new one. Only the latest scheduled validation can fire.
fn restart_debounce(login: &mut LoginState, seq: &mut TaskSeq, timing: &Timing) -> Vec<UiEffect> {
    let mut effects = Vec::new();

    if login.tasks.validation.is_running() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::Validation,
            token: login.tasks.validation.cancel.clone(),
        });
        login.tasks.validation.clear();
    }

    if login.input.has_text() {
        let task = seq.next_id();
        let cancel = login.lifetime.child_token();
        login.tasks.validation.begin(task, cancel.clone());
        effects.push(UiEffect::ScheduleValidation {
            task,
            delay: timing.debounce,
            cancel,
        });
    }

    effects
}

fn select_mode(login: &mut LoginState, selection: Option<LoginMode>) {
    let Some(mode) = selection else {
        return;
    };
    if mode == login.input.login_mode {
        return;
    }
    tracing::debug!(%mode, "login mode changed");
    login.input = login.input.with_mode(mode);
    login.errors = FieldErrors::default();
    login.status = None;
}

/// Validating -> Rejected | Pending.
fn submit(login: &mut LoginState, seq: &mut TaskSeq, timing: &Timing) -> LoginUpdate {
    login.errors = validate_input(&login.input);
    if !login.errors.is_empty() {
        tracing::debug!(errors = login.errors.len(), "submission rejected by validation");
        login.status = Some(StatusMessage::failure(CORRECT_ERRORS_MESSAGE));
        login.phase = SubmissionPhase::Rejected;
        return LoginUpdate::stay();
    }

    let mode = login.input.login_mode;
    let task = seq.next_id();
    let cancel = login.lifetime.child_token();
    login.loading = true;
    login.phase = SubmissionPhase::Pending;
    login.tasks.authentication.begin(task, cancel.clone());
    tracing::info!(%mode, "authentication started");

    LoginUpdate::stay().with_effects(vec![UiEffect::Authenticate {
        task,
        credentials: Credentials::from_input(&login.input),
        mode,
        delay: timing.auth_delay,
        cancel,
    }])
}

/// Applies the result of a finished task. The caller has already checked
/// that the task is the active one and that the form is still mounted.
pub fn handle_task_result(
    login: &mut LoginState,
    seq: &mut TaskSeq,
    timing: &Timing,
    result: UiEvent,
) -> LoginUpdate {
    match result {
        UiEvent::DebounceElapsed => {
            login.errors = validate_input(&login.input);
            LoginUpdate::stay()
        }
        UiEvent::AuthFinished { mode, result } => {
            login.loading = false;
            match result {
                // The callback and redirect follow the mode that was submitted.
                Ok(_) => {
                    tracing::info!(%mode, "login succeeded");
                    login.status = Some(StatusMessage::success(LOGIN_SUCCESS_MESSAGE));
                    login.phase = SubmissionPhase::Succeeded(mode);

                    let task = seq.next_id();
                    let cancel = login.lifetime.child_token();
                    login.tasks.redirect.begin(task, cancel.clone());
                    LoginUpdate::stay().with_effects(vec![
                        UiEffect::NotifyLoginSuccess { role: mode },
                        UiEffect::ScheduleRedirect {
                            task,
                            route: Route::for_role(mode),
                            delay: timing.redirect_delay,
                            cancel,
                        },
                    ])
                }
                Err(err) => {
                    tracing::info!(%mode, error = %err, "login failed");
                    login.status = Some(StatusMessage::failure(INVALID_CREDENTIALS_MESSAGE));
                    login.phase = SubmissionPhase::Failed;
                    LoginUpdate::stay()
                }
            }
        }
        UiEvent::RedirectDue { route } => LoginUpdate::leave(route),
        UiEvent::TaskCancelled
        | UiEvent::Tick
        | UiEvent::Terminal(_)
        | UiEvent::Login(_)
        | UiEvent::SignOut
        | UiEvent::TaskCompleted { .. } => LoginUpdate::stay(),
    }
}
