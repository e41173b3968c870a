//! Pieces module - Tetromino catalog and rotation mapping
//!
//! Every piece is a 4x4 occupancy grid stored row-major in 16 cells.
//! Rotations are never stored: [`rotation_index`] maps a cell of the rotated
//! piece back to the cell of the base grid, so pieces turn in place around
//! the middle of their 4x4 box.

use crate::types::{PieceKind, Rotation, PIECE_SIZE};

/// Flat 4x4 occupancy grid, row-major (`py * 4 + px`)
pub type PieceGrid = [bool; 16];

/// Offset of a single occupied cell relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 occupied offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// A catalog entry: piece id plus its base occupancy grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub grid: PieceGrid,
}

const fn grid(rows: &[u8; 16]) -> PieceGrid {
    let mut out = [false; 16];
    let mut i = 0;
    while i < 16 {
        out[i] = rows[i] == b'X';
        i += 1;
    }
    out
}

/// The seven pieces, indexed by [`PieceKind::index`]
pub static CATALOG: [Tetromino; 7] = [
    Tetromino {
        kind: PieceKind::I,
        grid: grid(b"..X...X...X...X."),
    },
    Tetromino {
        kind: PieceKind::T,
        grid: grid(b"..X..XX...X....."),
    },
    Tetromino {
        kind: PieceKind::S,
        grid: grid(b".X...XX...X....."),
    },
    Tetromino {
        kind: PieceKind::O,
        grid: grid(b".....XX..XX....."),
    },
    Tetromino {
        kind: PieceKind::J,
        grid: grid(b".....XX...X...X."),
    },
    Tetromino {
        kind: PieceKind::L,
        grid: grid(b".....XX..X...X.."),
    },
    Tetromino {
        kind: PieceKind::Z,
        grid: grid(b"..X..XX..X......"),
    },
];

/// Catalog entry for a piece kind
pub fn tetromino(kind: PieceKind) -> &'static Tetromino {
    &CATALOG[kind.index()]
}

/// Map cell (px, py) of a rotated piece to an index into its base grid.
///
/// `px` and `py` must be in `0..4`.
///
/// | rotation | index |
/// |----------|-------|
/// | 0°   | `py * 4 + px` |
/// | 90°  | `12 + py - px * 4` |
/// | 180° | `15 - py * 4 - px` |
/// | 270° | `3 - py + px * 4` |
#[inline]
pub fn rotation_index(px: u8, py: u8, rotation: Rotation) -> usize {
    let (px, py) = (px as usize, py as usize);
    match rotation {
        Rotation::North => py * 4 + px,
        Rotation::East => 12 + py - px * 4,
        Rotation::South => 15 - py * 4 - px,
        Rotation::West => 3 + px * 4 - py,
    }
}

/// Whether cell (px, py) is occupied for `kind` turned to `rotation`
#[inline]
pub fn is_occupied(kind: PieceKind, rotation: Rotation, px: u8, py: u8) -> bool {
    tetromino(kind).grid[rotation_index(px, py, rotation)]
}

/// Occupied offsets of a piece in the given rotation.
///
/// Offsets are listed column by column (px outer, py inner).
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let mut shape = [(0, 0); 4];
    let mut n = 0;
    for px in 0..PIECE_SIZE {
        for py in 0..PIECE_SIZE {
            if is_occupied(kind, rotation, px, py) && n < shape.len() {
                shape[n] = (px as i8, py as i8);
                n += 1;
            }
        }
    }
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(tetromino(kind).kind, kind);
        }
    }

    #[test]
    fn every_piece_has_four_cells() {
        for t in CATALOG.iter() {
            assert_eq!(t.grid.iter().filter(|&&c| c).count(), 4, "{:?}", t.kind);
        }
    }

    #[test]
    fn rotation_index_corners() {
        assert_eq!(rotation_index(0, 0, Rotation::North), 0);
        assert_eq!(rotation_index(0, 0, Rotation::East), 12);
        assert_eq!(rotation_index(0, 0, Rotation::South), 15);
        assert_eq!(rotation_index(0, 0, Rotation::West), 3);
        assert_eq!(rotation_index(3, 3, Rotation::North), 15);
        assert_eq!(rotation_index(3, 3, Rotation::East), 3);
        assert_eq!(rotation_index(3, 3, Rotation::South), 0);
        assert_eq!(rotation_index(3, 3, Rotation::West), 12);
    }

    #[test]
    fn rotation_index_is_a_permutation() {
        for rotation in ROTATIONS {
            let mut seen = [false; 16];
            for py in 0..4 {
                for px in 0..4 {
                    let i = rotation_index(px, py, rotation);
                    assert!(!seen[i], "{:?} maps twice to {}", rotation, i);
                    seen[i] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn four_turns_return_to_start() {
        for kind in PieceKind::ALL {
            let base = get_shape(kind, Rotation::North);
            let turned = get_shape(kind, Rotation::from_turns(4));
            assert_eq!(base, turned);
        }
    }

    #[test]
    fn i_piece_turns_horizontal() {
        // Column 2 becomes row 2 after a quarter turn.
        let shape = get_shape(PieceKind::I, Rotation::East);
        assert_eq!(shape, [(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn square_is_rotation_invariant() {
        let mut north = get_shape(PieceKind::O, Rotation::North);
        north.sort();
        for rotation in ROTATIONS {
            let mut s = get_shape(PieceKind::O, rotation);
            s.sort();
            assert_eq!(s, north);
        }
    }
}
