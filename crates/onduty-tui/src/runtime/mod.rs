//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; `EffectExecutor` runs them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send their `UiEvent` results to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//!
//! Structure:
//! - `mod.rs`: terminal runtime (TuiRuntime, event loop)
//! - `headless.rs`: the same reducer and executor driven without a terminal
//! - `executor.rs`: effect dispatch and injected services
//! - `inbox.rs`: inbox channel types
//! - `handlers/`: timer and authentication handlers

mod executor;
mod handlers;
mod headless;
mod inbox;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
pub use executor::{EffectExecutor, Services};
pub use headless::{HeadlessRuntime, LoginReport, LoginRequest, run_login};
use inbox::UiEventReceiver;
use onduty_core::Route;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame cadence while something is animating or a timer is pending.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    executor: EffectExecutor,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    pub fn new(state: AppState, services: Services) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state,
            executor: EffectExecutor::new(inbox_tx, services),
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the user quits. Returns the last route
    /// handed to the navigator.
    pub fn run(&mut self) -> Result<Option<Route>> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            dirty |= !events.is_empty();
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.executor.execute_all(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(self.state.last_route)
    }

    /// Collects inbox results, terminal input and the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let animating = self
            .state
            .screen
            .login()
            .is_some_and(|login| login.tasks.is_any_running());
        let tick_interval = if animating {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
