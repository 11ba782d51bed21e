//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use chrono::Local;
use crossterm::event::Event;
use onduty_core::Route;

use crate::effects::UiEffect;
use crate::events::{LoginAction, UiEvent};
use crate::features::destination::{self, DestinationIntent};
use crate::features::login::{
    self, KeyIntent, LoginState, LoginTransition, LoginUpdate, SubmissionPhase,
};
use crate::state::{AppState, DestinationState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Login(action) => handle_login_action(app, action),
        UiEvent::SignOut => {
            if app.screen.destination().is_none() {
                return vec![];
            }
            tracing::debug!("signed out, remounting login form");
            app.mount_login();
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let AppState {
                screen,
                task_seq,
                timing,
                ..
            } = &mut *app;
            let Some(login) = screen.login_mut() else {
                // The form that spawned this task is gone.
                return vec![];
            };
            if login.lifetime.is_cancelled()
                || !login.tasks.state_mut(kind).finish_if_active(completed.id)
            {
                return vec![];
            }
            let update = login::handle_task_result(login, task_seq, timing, *completed.result);
            apply_login_update(app, update)
        }
        // Result events only count when they arrive wrapped in `TaskCompleted`.
        UiEvent::DebounceElapsed
        | UiEvent::AuthFinished { .. }
        | UiEvent::RedirectDue { .. }
        | UiEvent::TaskCancelled => vec![],
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match &app.screen {
        Screen::Login(login) => {
            let intent = match event {
                Event::Key(key) => login::key_intent(login, key),
                Event::Paste(text) => login::paste_intent(login, &text),
                _ => None,
            };
            match intent {
                Some(KeyIntent::Action(action)) => handle_login_action(app, action),
                Some(KeyIntent::Quit) => apply_login_update(app, LoginUpdate::quit()),
                None => vec![],
            }
        }
        Screen::Destination(_) => {
            let Event::Key(key) = event else {
                return vec![];
            };
            match destination::key_intent(key) {
                Some(DestinationIntent::SignOut) => update(app, UiEvent::SignOut),
                Some(DestinationIntent::Quit) => {
                    app.should_quit = true;
                    vec![UiEffect::Quit]
                }
                None => vec![],
            }
        }
    }
}

fn handle_login_action(app: &mut AppState, action: LoginAction) -> Vec<UiEffect> {
    let AppState {
        screen,
        task_seq,
        timing,
        ..
    } = &mut *app;
    let Some(login) = screen.login_mut() else {
        return vec![];
    };
    // A disabled submit trigger swallows the activation.
    if action == LoginAction::Submit && !login.submit_enabled() {
        tracing::debug!("submit ignored while disabled");
        return vec![];
    }
    let update = login::apply_action(login, task_seq, timing, action);
    apply_login_update(app, update)
}

/// Applies the transition half of a `LoginUpdate` and returns its effects.
fn apply_login_update(app: &mut AppState, update: LoginUpdate) -> Vec<UiEffect> {
    let LoginUpdate {
        transition,
        mut effects,
    } = update;

    match transition {
        LoginTransition::Stay => {}
        LoginTransition::Leave(route) => {
            if let Some(login) = unmount_login(app, route) {
                effects.push(UiEffect::ReleaseView {
                    lifetime: login.lifetime.clone(),
                });
                effects.push(UiEffect::Navigate { route });
            }
        }
        LoginTransition::Quit => {
            if let Some(login) = app.screen.login() {
                effects.push(UiEffect::ReleaseView {
                    lifetime: login.lifetime.clone(),
                });
            }
            app.should_quit = true;
            effects.push(UiEffect::Quit);
        }
    }

    effects
}

/// Replaces the login form with the destination screen, returning the
/// dropped form state.
fn unmount_login(app: &mut AppState, route: Route) -> Option<LoginState> {
    let role = match app.screen.login()?.phase {
        SubmissionPhase::Succeeded(role) => Some(role),
        _ => None,
    };
    let destination = Screen::Destination(DestinationState {
        route,
        role,
        arrived_at: Local::now(),
    });
    let Screen::Login(login) = std::mem::replace(&mut app.screen, destination) else {
        return None;
    };
    app.last_route = Some(route);
    tracing::info!(route = route.path(), "login view unmounted");
    Some(login)
}
