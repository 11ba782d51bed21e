//! Destination screen shown after the login form navigates away.

mod render;
mod update;

pub use render::render_destination;
pub use update::{DestinationIntent, key_intent};
