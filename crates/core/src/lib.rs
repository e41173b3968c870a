//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic.
//! It has no dependencies on the terminal, input devices, or wall-clock time:
//! the caller drives it one tick at a time with sampled key-down signals.
//!
//! # Module Structure
//!
//! - [`pieces`]: the 7-piece catalog and the rotation mapper
//! - [`field`]: 14x18 bordered playfield, fit checks, line detection and collapse
//! - [`game_state`]: the session state machine (input, gravity, locking, spawning)
//! - [`rng`]: uniform random piece selection
//! - [`scoring`]: lock points, line bonuses, and the speed ramp
//! - [`snapshot`]: plain-data copy of a session for renderers
//!
//! # Example
//!
//! ```
//! use console_tetris_core::{Phase, Session};
//! use console_tetris_core::types::{InputSignals, Signal};
//!
//! let mut session = Session::new(12345);
//! assert!(session.start());
//!
//! let x = session.active().unwrap().x;
//! session.tick(InputSignals::NONE.with(Signal::MoveRight));
//! assert_eq!(session.active().unwrap().x, x + 1);
//! assert_eq!(session.phase(), Phase::Falling);
//! ```

pub mod field;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use console_tetris_types as types;

// Re-export commonly used types for convenience
pub use field::{fits, Field, LineRows};
pub use game_state::{ActivePiece, LockEvent, Phase, Session};
pub use pieces::{get_shape, is_occupied, rotation_index, tetromino, Tetromino, CATALOG};
pub use rng::{PieceRandomizer, PieceSource, ScriptedPieces};
pub use scoring::{calculate_score, next_speed, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
