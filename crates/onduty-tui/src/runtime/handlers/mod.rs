//! Effect handlers for the runtime.
//!
//! Handlers are async functions that return a `UiEvent`. They never touch
//! state; the executor spawns them and forwards the result to the inbox
//! wrapped in `UiEvent::TaskCompleted`.
//!
//! Every handler races its work against a cancellation token. A cancelled
//! handler returns `UiEvent::TaskCancelled` instead of its result.

pub mod auth;
pub mod timers;

pub use auth::*;
pub use timers::*;

#[cfg(test)]
mod tests;
