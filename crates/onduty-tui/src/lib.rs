//! Terminal login form for onduty.
//!
//! The form is an Elm-style state machine: `update` reduces `UiEvent`s into
//! state changes plus `UiEffect`s, and a runtime (terminal or headless)
//! executes the effects against injected services.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use onduty_core::{Config, Route};
pub use runtime::{HeadlessRuntime, LoginReport, LoginRequest, Services, TuiRuntime, run_login};

use crate::state::AppState;

/// Runs the full-screen login form until the user quits.
///
/// Returns the route the session ended on, if the form ever navigated.
pub async fn run_interactive_login(config: &Config, services: Services) -> Result<Option<Route>> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The login form requires a terminal.\n\
             Use `onduty login --role ... --email ... --password ...` for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(AppState::new(config), services)?;
    let route = runtime.run()?;
    tracing::info!(route = route.map(Route::path), "interactive session ended");
    Ok(route)
}
