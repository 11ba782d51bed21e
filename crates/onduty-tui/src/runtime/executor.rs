//! Effect execution shared by the terminal and headless runtimes.

use std::future::Future;
use std::sync::Arc;

use onduty_core::{Authenticator, Config, LogNavigator, LoginListener, Navigator};

use super::handlers;
use super::inbox::UiEventSender;
use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;

/// Capabilities injected by the host application.
#[derive(Clone)]
pub struct Services {
    pub authenticator: Arc<dyn Authenticator>,
    pub navigator: Arc<dyn Navigator>,
    pub listener: Option<Arc<dyn LoginListener>>,
}

impl Services {
    /// Allow-list authenticator from `config`, log-only navigator, no listener.
    pub fn from_config(config: &Config) -> Self {
        Self {
            authenticator: Arc::new(config.authenticator()),
            navigator: Arc::new(LogNavigator),
            listener: None,
        }
    }

    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn LoginListener>) -> Self {
        self.listener = Some(listener);
        self
    }
}

/// Runs reducer effects. Deferred work is spawned onto the tokio runtime and
/// reports back through the inbox.
pub struct EffectExecutor {
    inbox_tx: UiEventSender,
    services: Services,
}

impl EffectExecutor {
    pub fn new(inbox_tx: UiEventSender, services: Services) -> Self {
        Self { inbox_tx, services }
    }

    pub fn execute_all(&self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute(effect);
        }
    }

    pub fn execute(&self, effect: UiEffect) {
        match effect {
            // The reducer has already flagged `should_quit`.
            UiEffect::Quit => tracing::debug!("quit requested"),

            UiEffect::ScheduleValidation {
                task,
                delay,
                cancel,
            } => {
                self.spawn_task(TaskKind::Validation, task, move || {
                    handlers::debounce(delay, cancel)
                });
            }
            UiEffect::Authenticate {
                task,
                credentials,
                mode,
                delay,
                cancel,
            } => {
                let authenticator = Arc::clone(&self.services.authenticator);
                self.spawn_task(TaskKind::Authentication, task, move || {
                    handlers::authenticate(authenticator, credentials, mode, delay, cancel)
                });
            }
            UiEffect::ScheduleRedirect {
                task,
                route,
                delay,
                cancel,
            } => {
                self.spawn_task(TaskKind::Redirect, task, move || {
                    handlers::redirect(route, delay, cancel)
                });
            }

            UiEffect::Navigate { route } => self.services.navigator.navigate(route),
            UiEffect::NotifyLoginSuccess { role } => {
                if let Some(listener) = &self.services.listener {
                    listener.on_login_success(role);
                }
            }

            UiEffect::CancelTask { kind, token } => {
                if let Some(cancel) = token {
                    tracing::trace!(?kind, "cancelling task");
                    cancel.cancel();
                }
            }
            UiEffect::ReleaseView { lifetime } => lifetime.cancel(),
        }
    }

    /// Spawns a handler and sends its result back as `TaskCompleted`.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }
}
