//! Piece catalog and rotation mapper tests

use std::collections::HashSet;

use console_tetris::core::{get_shape, is_occupied, rotation_index, tetromino, CATALOG};
use console_tetris::types::{PieceKind, Rotation};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

#[test]
fn test_rotation_index_is_a_bijection() {
    for rotation in ROTATIONS {
        let mut seen = HashSet::new();
        for py in 0..4 {
            for px in 0..4 {
                let i = rotation_index(px, py, rotation);
                assert!(i < 16);
                assert!(seen.insert(i), "{:?} repeats index {}", rotation, i);
            }
        }
        assert_eq!(seen.len(), 16);
    }
}

#[test]
fn test_rotation_index_formulas() {
    // (1, 2) under each turn.
    assert_eq!(rotation_index(1, 2, Rotation::North), 9);
    assert_eq!(rotation_index(1, 2, Rotation::East), 10);
    assert_eq!(rotation_index(1, 2, Rotation::South), 6);
    assert_eq!(rotation_index(1, 2, Rotation::West), 5);
}

#[test]
fn test_catalog_order_matches_kind_index() {
    for (i, t) in CATALOG.iter().enumerate() {
        assert_eq!(t.kind.index(), i);
        assert_eq!(tetromino(t.kind).kind, t.kind);
    }
}

#[test]
fn test_every_rotation_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let shape = get_shape(kind, rotation);
            let unique: HashSet<_> = shape.iter().copied().collect();
            assert_eq!(unique.len(), 4, "{:?} {:?}", kind, rotation);
            for &(px, py) in shape.iter() {
                assert!((0..4).contains(&px) && (0..4).contains(&py));
                assert!(is_occupied(kind, rotation, px as u8, py as u8));
            }
        }
    }
}

#[test]
fn test_vertical_i_turns_horizontal() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::North),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    let east = get_shape(PieceKind::I, Rotation::East);
    assert!(east.iter().all(|&(_, py)| py == 2));
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in ROTATIONS {
        let mut a = get_shape(PieceKind::O, rotation).to_vec();
        let mut b = north.to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
