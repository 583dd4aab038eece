//! Input handling with gamepad support
//!
//! Reduces keyboard and gamepad state to the four directions the
//! platformer cares about.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Uses Web Gamepad API bindings from the page's JS plugin

mod gamepad;
mod state;

pub use gamepad::{button, Gamepad, PadSnapshot};
pub use state::{Controls, InputState};
