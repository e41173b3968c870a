//! Console Tetris (workspace facade crate).
//!
//! The game rules live in `console_tetris_core`, key handling in
//! `console_tetris_input` and drawing in `console_tetris_term`. This package
//! re-exports them under `console_tetris::{core,input,term,types}` and adds
//! the real-time loop that ties them to a terminal.

pub use console_tetris_core as core;
pub use console_tetris_input as input;
pub use console_tetris_term as term;
pub use console_tetris_types as types;

pub mod config;
pub mod runner;
pub mod terminal;
