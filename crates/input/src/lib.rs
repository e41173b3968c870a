//! Terminal input module.
//!
//! Maps `crossterm` key events onto the four game signals and keeps track of
//! which keys are currently held, so the game loop can sample key-down state
//! once per tick. Works with terminals that report key releases and with
//! terminals that only report presses and auto-repeats.

pub mod map;
pub mod state;

pub use console_tetris_types as types;

pub use map::{map_key, should_quit};
pub use state::KeyStateTracker;
