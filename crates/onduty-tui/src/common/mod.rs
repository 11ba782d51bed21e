//! Shared helpers for the TUI (task lifecycle, text, render utilities).

pub mod render_utils;
pub mod task;
pub mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::{mask, truncate_start_with_ellipsis};
