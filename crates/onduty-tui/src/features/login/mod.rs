//! Login form feature: state, reducer, view.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{Focus, LoginState, SubmissionPhase};
pub use update::{
    KeyIntent, LoginTransition, LoginUpdate, apply_action, handle_task_result, key_intent,
    paste_intent,
};
