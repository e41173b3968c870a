//! Plain-data copy of a session for rendering and observers.

use crate::game_state::{ActivePiece, Phase};
use crate::types::{PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Cell tags, row-major (see `Cell::tag`).
    pub field: [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub speed: u32,
    pub pieces: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            field: [[0u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            active: None,
            phase: Phase::Spawning,
            score: 0,
            speed: 0,
            pieces: 0,
            lines: 0,
        }
    }
}
