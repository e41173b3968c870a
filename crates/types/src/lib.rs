//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, scripted test harnesses).
//!
//! # Field Dimensions
//!
//! The playfield is 14 columns by 18 rows *including* its border:
//!
//! - **Columns 0 and 1**: left wall (outer and inner)
//! - **Columns 12 and 13**: right wall (inner and outer)
//! - **Rows 16 and 17**: floor (top and base)
//! - **Interior**: 10 columns (2..12) by 16 rows (0..16)
//! - **Spawn anchor**: (7, 0), rotation 0
//!
//! # Timing and Difficulty
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | One logical tick of the game loop |
//! | `LINE_FLASH_MS` | 400 | Pause while completed lines are shown |
//! | `INITIAL_SPEED` | 20 | Ticks per forced descent at start |
//! | `SPEED_FLOOR` | 10 | Fastest possible speed (ticks per descent) |
//! | `PIECES_PER_SPEEDUP` | 10 | Locked pieces between speed-ups |
//!
//! # Examples
//!
//! ```
//! use console_tetris_types::{PieceKind, Rotation, Cell, FIELD_WIDTH};
//!
//! let piece = PieceKind::from_index(1).unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_turns(5), Rotation::East);
//!
//! assert!(Cell::Empty.is_empty());
//! assert_eq!(Cell::Locked(PieceKind::I).glyph(), 'A');
//! assert_eq!(FIELD_WIDTH, 14);
//! ```

/// Playfield width in cells, border included (14 columns)
pub const FIELD_WIDTH: u8 = 14;

/// Playfield height in cells, floor included (18 rows)
pub const FIELD_HEIGHT: u8 = 18;

/// Wall thickness on each side of the playfield
pub const WALL_COLUMNS: u8 = 2;

/// Floor thickness at the bottom of the playfield
pub const FLOOR_ROWS: u8 = 2;

/// Width of the playable interior (10 columns)
pub const INTERIOR_WIDTH: u8 = FIELD_WIDTH - 2 * WALL_COLUMNS;

/// Height of the playable interior (16 rows)
pub const INTERIOR_HEIGHT: u8 = FIELD_HEIGHT - FLOOR_ROWS;

/// Side length of a piece's occupancy grid
pub const PIECE_SIZE: u8 = 4;

/// Spawn anchor column for every new piece
pub const SPAWN_X: i8 = (FIELD_WIDTH / 2) as i8;

/// Spawn anchor row for every new piece
pub const SPAWN_Y: i8 = 0;

/// Wall-clock length of one logical tick in milliseconds
pub const TICK_MS: u32 = 50;

/// Pause while completed lines are displayed before they collapse
pub const LINE_FLASH_MS: u32 = 400;

/// Ticks per forced descent when a session starts
pub const INITIAL_SPEED: u32 = 20;

/// Speed never goes below this many ticks per forced descent
pub const SPEED_FLOOR: u32 = 10;

/// Number of locked pieces between speed-ups
pub const PIECES_PER_SPEEDUP: u32 = 10;

/// Points awarded for every locked piece
pub const LOCK_SCORE: u32 = 25;

/// Line bonus base: clearing `n` lines awards `LINE_BONUS_BASE << n`
pub const LINE_BONUS_BASE: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_geometry_defaults() {
        assert_eq!(INTERIOR_WIDTH, 10);
        assert_eq!(INTERIOR_HEIGHT, 16);
        assert_eq!(SPAWN_X, 7);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn timing_and_scoring_defaults() {
        assert_eq!(TICK_MS, 50);
        assert_eq!(LINE_FLASH_MS, 400);
        assert_eq!(INITIAL_SPEED, 20);
        assert_eq!(SPEED_FLOOR, 10);
        assert_eq!(PIECES_PER_SPEEDUP, 10);
        assert_eq!(LOCK_SCORE, 25);
        assert_eq!(LINE_BONUS_BASE, 100);
    }

    #[test]
    fn cell_tags_roundtrip() {
        for tag in 0..=14u8 {
            let cell = Cell::from_tag(tag).unwrap();
            assert_eq!(cell.tag(), tag);
        }
        assert_eq!(Cell::from_tag(15), None);
    }

    #[test]
    fn piece_index_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }
}

/// The seven tetromino piece kinds, in catalog order (ids 0..=6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    S,
    O,
    J,
    L,
    Z,
}

impl PieceKind {
    /// All kinds, indexed by catalog id
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::S,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
    ];

    /// Catalog id (0..=6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by catalog id
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Rotation states, clockwise quarter turns from the catalog orientation
///
/// The cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use console_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Build a rotation from any number of quarter turns (reduced modulo 4)
    pub fn from_turns(turns: u32) -> Self {
        match turns % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Quarter turns in `0..4`
    pub fn turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// A cell on the playfield
///
/// Each variant has a compact tag (see [`Cell::tag`]) used by snapshots.
/// Border variants are written once by field initialization and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Interior cell filled by a locked piece of this kind
    Locked(PieceKind),
    /// Completed line waiting to collapse
    Flash,
    /// Outer left wall (column 0)
    LeftWall,
    /// Outer right wall (last column)
    RightWall,
    /// Inner wall columns next to the interior
    InnerWall,
    /// Bottom floor row between the corners
    FloorBase,
    /// Bottom floor row under the walls
    FloorCorner,
    /// Floor row directly below the interior
    FloorTop,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_border(&self) -> bool {
        matches!(
            self,
            Cell::LeftWall
                | Cell::RightWall
                | Cell::InnerWall
                | Cell::FloorBase
                | Cell::FloorCorner
                | Cell::FloorTop
        )
    }

    /// Compact tag: 0 empty, 1..=7 locked kinds, 8.. decorations
    pub fn tag(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Locked(kind) => kind.index() as u8 + 1,
            Cell::Flash => 8,
            Cell::LeftWall => 9,
            Cell::RightWall => 10,
            Cell::InnerWall => 11,
            Cell::FloorBase => 12,
            Cell::FloorCorner => 13,
            Cell::FloorTop => 14,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Cell::Empty),
            1..=7 => PieceKind::from_index(tag as usize - 1).map(Cell::Locked),
            8 => Some(Cell::Flash),
            9 => Some(Cell::LeftWall),
            10 => Some(Cell::RightWall),
            11 => Some(Cell::InnerWall),
            12 => Some(Cell::FloorBase),
            13 => Some(Cell::FloorCorner),
            14 => Some(Cell::FloorTop),
            _ => None,
        }
    }

    /// Classic one-character glyph for this cell
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Locked(kind) => (b'A' + kind.index() as u8) as char,
            Cell::Flash | Cell::FloorTop => '=',
            Cell::LeftWall => '<',
            Cell::RightWall => '>',
            Cell::InnerWall => '!',
            Cell::FloorBase => 'V',
            Cell::FloorCorner => ' ',
        }
    }
}

/// The four logical player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Key-down state of every signal, sampled once per tick
///
/// These are levels, not events: a held key reads `true` on every tick
/// until it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSignals {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub rotate: bool,
}

impl InputSignals {
    /// No keys held
    pub const NONE: InputSignals = InputSignals {
        move_left: false,
        move_right: false,
        soft_drop: false,
        rotate: false,
    };

    pub fn is_set(&self, signal: Signal) -> bool {
        match signal {
            Signal::MoveLeft => self.move_left,
            Signal::MoveRight => self.move_right,
            Signal::SoftDrop => self.soft_drop,
            Signal::Rotate => self.rotate,
        }
    }

    pub fn set(&mut self, signal: Signal, down: bool) {
        match signal {
            Signal::MoveLeft => self.move_left = down,
            Signal::MoveRight => self.move_right = down,
            Signal::SoftDrop => self.soft_drop = down,
            Signal::Rotate => self.rotate = down,
        }
    }

    /// Builder-style helper for scripted inputs
    pub fn with(mut self, signal: Signal) -> Self {
        self.set(signal, true);
        self
    }
}
