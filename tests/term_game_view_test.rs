use console_tetris::core::{Field, Phase, ScriptedPieces, Session};
use console_tetris::term::{AnchorY, GameView, Viewport};
use console_tetris::types::{Cell, PieceKind};

fn chars(row: String, skip: usize, take: usize) -> String {
    row.chars().skip(skip).take(take).collect()
}

#[test]
fn term_view_draws_walls_two_columns_per_cell() {
    let snap = Session::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // 14 cells * 2 = 28 columns; centered in 28 leaves no margin.
    let fb = view.render(&snap, Viewport::new(28, 18));
    assert_eq!(chars(fb.row_text(0), 0, 4), "<<!!");
    assert_eq!(chars(fb.row_text(0), 24, 4), "!!>>");
    assert_eq!(chars(fb.row_text(16), 4, 4), "====");
    assert_eq!(chars(fb.row_text(17), 4, 4), "VVVV");
}

#[test]
fn term_view_draws_active_piece_and_locked_cells() {
    let mut field = Field::new();
    field.set(2, 15, Cell::Locked(PieceKind::L));
    let mut s = Session::with_source(field, ScriptedPieces::repeat(PieceKind::I));
    s.start();
    let snap = s.snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(28, 18));

    // Vertical I at anchor (7, 0) occupies column 9.
    for y in 0..4 {
        assert_eq!(fb.get(18, y).unwrap().ch, '█');
        assert_eq!(fb.get(19, y).unwrap().ch, '█');
    }
    assert_ne!(fb.get(18, 4).unwrap().ch, '█');
    assert_eq!(fb.get(4, 15).unwrap().ch, '█');
    assert_eq!(fb.get(5, 15).unwrap().ch, '█');
}

#[test]
fn term_view_side_panel_shows_stats() {
    let mut snap = Session::new(1).snapshot();
    snap.score = 1625;
    snap.lines = 4;
    snap.pieces = 12;
    snap.speed = 19;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(48, 18));
    // Field starts at column 10; panel two columns past its right edge.
    assert_eq!(chars(fb.row_text(0), 40, 5), "SCORE");
    assert_eq!(chars(fb.row_text(1), 40, 8), "    1625");
    assert_eq!(chars(fb.row_text(3), 40, 5), "LINES");
    assert_eq!(chars(fb.row_text(6), 40, 6), "PIECES");
    assert_eq!(chars(fb.row_text(10), 40, 8), "      19");
}

#[test]
fn term_view_game_over_overlay() {
    let mut snap = Session::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(28, 18));
    assert!(!fb.row_text(9).contains("GAME OVER"));

    snap.phase = Phase::GameOver;
    let fb = view.render(&snap, Viewport::new(28, 18));
    assert!(fb.row_text(9).contains("GAME OVER"));
}

#[test]
fn term_view_render_into_reuses_buffer_across_sizes() {
    let snap = Session::new(1).snapshot();
    let view = GameView::default();
    let mut fb = view.render(&snap, Viewport::new(80, 24));
    view.render_into(&snap, Viewport::new(40, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 20));
}
