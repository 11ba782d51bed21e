//! Headless runtime: the reducer and executor without a terminal.
//!
//! Used by `onduty login` and by end-to-end tests. Events are dispatched
//! directly and deferred results are pulled from the inbox until the
//! submission reaches an outcome.

use std::time::Duration;

use anyhow::{Context, Result};
use onduty_core::{Config, Field, FieldErrors, LoginMode, Route, StatusMessage};
use serde::Serialize;
use tokio::sync::mpsc;

use super::executor::{EffectExecutor, Services};
use super::inbox::UiEventReceiver;
use crate::events::{LoginAction, UiEvent};
use crate::state::{AppState, Screen};
use crate::update;

/// Scripted login attempt.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Outcome of a headless login, as the form last showed it.
#[derive(Debug, Clone, Serialize)]
pub struct LoginReport {
    pub mode: LoginMode,
    pub remember_me: bool,
    pub field_errors: FieldErrors,
    pub status: Option<StatusMessage>,
    /// Route handed to the navigator, if any.
    pub route: Option<Route>,
}

impl LoginReport {
    pub fn succeeded(&self) -> bool {
        self.status.as_ref().is_some_and(StatusMessage::is_success) && self.route.is_some()
    }
}

pub struct HeadlessRuntime {
    pub state: AppState,
    executor: EffectExecutor,
    inbox_rx: UiEventReceiver,
    report: LoginReport,
}

impl HeadlessRuntime {
    pub fn new(state: AppState, services: Services) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let report = LoginReport {
            mode: state.default_mode,
            remember_me: false,
            field_errors: FieldErrors::default(),
            status: None,
            route: None,
        };
        Self {
            state,
            executor: EffectExecutor::new(inbox_tx, services),
            inbox_rx,
            report,
        }
    }

    /// Runs one event through the reducer and executes its effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.executor.execute_all(effects);
        self.capture();
    }

    /// Shorthand for dispatching a form intent.
    pub fn act(&mut self, action: LoginAction) {
        self.dispatch(UiEvent::Login(action));
    }

    /// True once the current submission needs nothing further: the form has
    /// been left, the user quit, or the form shows a final outcome.
    pub fn is_settled(&self) -> bool {
        if self.state.should_quit {
            return true;
        }
        match &self.state.screen {
            Screen::Login(login) => login.is_settled(),
            Screen::Destination(_) => true,
        }
    }

    /// Processes deferred results until `is_settled()`.
    pub async fn run_until_settled(&mut self) -> Result<()> {
        while !self.is_settled() {
            let event = self
                .inbox_rx
                .recv()
                .await
                .context("Task inbox closed before the login settled")?;
            self.dispatch(event);
        }
        Ok(())
    }

    /// Processes deferred results for `duration`, settled or not.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            tokio::select! {
                () = tokio::time::sleep_until(deadline) => return,
                event = self.inbox_rx.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => return,
                },
            }
        }
    }

    pub fn report(&self) -> &LoginReport {
        &self.report
    }

    /// Keeps the report in sync with the mounted form. Once the form is
    /// unmounted the report keeps what it last showed.
    fn capture(&mut self) {
        self.report.route = self.state.last_route;
        if let Some(login) = self.state.screen.login() {
            self.report.mode = login.input.login_mode;
            self.report.remember_me = login.input.remember_me;
            self.report.field_errors = login.errors.clone();
            self.report.status = login.status.clone();
        }
    }
}

/// Fills the form like a user would and submits it once.
pub async fn run_login(
    config: &Config,
    services: Services,
    request: LoginRequest,
) -> Result<LoginReport> {
    let mut runtime = HeadlessRuntime::new(AppState::new(config), services);

    runtime.act(LoginAction::SelectMode(Some(request.mode)));
    runtime.act(LoginAction::Input {
        field: Field::Email,
        value: request.email,
    });
    runtime.act(LoginAction::Input {
        field: Field::Password,
        value: request.password,
    });
    if request.remember_me {
        runtime.act(LoginAction::ToggleRememberMe);
    }
    runtime.act(LoginAction::Submit);

    runtime.run_until_settled().await?;
    Ok(runtime.report().clone())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use onduty_core::status::{
        CORRECT_ERRORS_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LOGIN_SUCCESS_MESSAGE,
    };
    use onduty_core::{LoginListener, Navigator};

    use super::*;

    #[derive(Default)]
    struct RecordingNavigator(Mutex<Vec<Route>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.0.lock().unwrap().push(route);
        }
    }

    #[derive(Default)]
    struct RecordingListener(Mutex<Vec<LoginMode>>);

    impl LoginListener for RecordingListener {
        fn on_login_success(&self, role: LoginMode) {
            self.0.lock().unwrap().push(role);
        }
    }

    struct Harness {
        navigator: Arc<RecordingNavigator>,
        listener: Arc<RecordingListener>,
        services: Services,
    }

    fn harness(config: &Config) -> Harness {
        let navigator = Arc::new(RecordingNavigator::default());
        let listener = Arc::new(RecordingListener::default());
        let services = Services::from_config(config)
            .with_navigator(Arc::clone(&navigator) as Arc<dyn Navigator>)
            .with_listener(Arc::clone(&listener) as Arc<dyn LoginListener>);
        Harness {
            navigator,
            listener,
            services,
        }
    }

    fn request(mode: LoginMode, email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            mode,
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    fn type_into(runtime: &mut HeadlessRuntime, field: Field, value: &str) {
        runtime.act(LoginAction::Input {
            field,
            value: value.to_string(),
        });
    }

    #[tokio::test]
    async fn test_employee_login_redirects_after_both_delays() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);
        let start = tokio::time::Instant::now();

        let report = run_login(
            &config,
            h.services,
            request(LoginMode::Employee, "employee@domain.com", "employee123"),
        )
        .await
        .unwrap();

        assert!(report.succeeded());
        assert_eq!(report.route, Some(Route::AttendanceCard));
        assert_eq!(
            report.status,
            Some(StatusMessage::success(LOGIN_SUCCESS_MESSAGE))
        );
        assert_eq!(*h.navigator.0.lock().unwrap(), vec![Route::AttendanceCard]);
        assert_eq!(*h.listener.0.lock().unwrap(), vec![LoginMode::Employee]);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_admin_login_redirects_to_dashboard() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);

        let report = run_login(
            &config,
            h.services,
            request(LoginMode::Admin, "admin@domain.com", "admin123"),
        )
        .await
        .unwrap();

        assert_eq!(report.route, Some(Route::AdminDashboard));
        assert_eq!(report.mode, LoginMode::Admin);
        assert!(!report.remember_me);
        assert_eq!(*h.listener.0.lock().unwrap(), vec![LoginMode::Admin]);
    }

    #[tokio::test]
    async fn test_remember_me_is_reported() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);

        let report = run_login(
            &config,
            h.services,
            LoginRequest {
                remember_me: true,
                ..request(LoginMode::Employee, "employee@domain.com", "employee123")
            },
        )
        .await
        .unwrap();

        assert!(report.succeeded());
        assert!(report.remember_me);
    }

    #[tokio::test]
    async fn test_cross_role_login_fails_without_side_effects() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);

        let report = run_login(
            &config,
            h.services,
            request(LoginMode::Admin, "employee@domain.com", "employee123"),
        )
        .await
        .unwrap();

        assert!(!report.succeeded());
        assert_eq!(
            report.status,
            Some(StatusMessage::failure(INVALID_CREDENTIALS_MESSAGE))
        );
        assert!(report.route.is_none());
        assert!(h.navigator.0.lock().unwrap().is_empty());
        assert!(h.listener.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_without_waiting() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);
        let start = tokio::time::Instant::now();

        let report = run_login(&config, h.services, request(LoginMode::Employee, "nope", ""))
            .await
            .unwrap();

        assert_eq!(
            report.status,
            Some(StatusMessage::failure(CORRECT_ERRORS_MESSAGE))
        );
        assert_eq!(report.field_errors.len(), 2);
        assert!(start.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_debounce_fires_once_after_last_keystroke() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);
        let mut runtime = HeadlessRuntime::new(AppState::new(&config), h.services);

        type_into(&mut runtime, Field::Email, "a");
        runtime.run_for(Duration::from_millis(400)).await;
        type_into(&mut runtime, Field::Email, "ab");
        runtime.run_for(Duration::from_millis(400)).await;
        assert!(runtime.report().field_errors.is_empty());

        runtime.run_for(Duration::from_millis(200)).await;
        assert_eq!(runtime.report().field_errors.len(), 2);
    }

    #[tokio::test]
    async fn test_unmount_cancels_pending_authentication() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);
        let mut runtime = HeadlessRuntime::new(AppState::new(&config), h.services);

        type_into(&mut runtime, Field::Email, "employee@domain.com");
        type_into(&mut runtime, Field::Password, "employee123");
        runtime.act(LoginAction::Submit);
        runtime.act(LoginAction::ForgotPassword);
        runtime.run_for(Duration::from_secs(5)).await;

        assert_eq!(*h.navigator.0.lock().unwrap(), vec![Route::ForgotPassword]);
        assert!(h.listener.0.lock().unwrap().is_empty());
        assert!(runtime.state.screen.destination().is_some());
    }

    #[tokio::test]
    async fn test_failed_login_can_be_retried() {
        tokio::time::pause();
        let config = Config::default();
        let h = harness(&config);
        let mut runtime = HeadlessRuntime::new(AppState::new(&config), h.services);

        type_into(&mut runtime, Field::Email, "employee@domain.com");
        type_into(&mut runtime, Field::Password, "wrong");
        runtime.act(LoginAction::Submit);
        runtime.run_until_settled().await.unwrap();
        assert!(!runtime.report().succeeded());

        type_into(&mut runtime, Field::Password, "employee123");
        runtime.act(LoginAction::Submit);
        runtime.run_until_settled().await.unwrap();

        assert_eq!(runtime.report().route, Some(Route::AttendanceCard));
        assert_eq!(h.listener.0.lock().unwrap().len(), 1);
    }
}
