//! Terminal rendering for the console game.
//!
//! Gameplay never touches the terminal directly: a [`GameView`] composes a
//! [`core::GameSnapshot`] into a [`FrameBuffer`], and a [`TerminalRenderer`]
//! flushes that buffer with crossterm, writing only what changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use console_tetris_core as core;
pub use console_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{cell_glyph, AnchorY, FieldLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
