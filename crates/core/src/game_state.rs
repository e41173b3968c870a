//! Game state module - the session state machine
//!
//! This module ties together the field, the piece catalog, the randomizer and
//! the scoring rules. Time is measured in logical ticks: the caller runs
//! [`Session::tick`] once per [`TICK_MS`](crate::types::TICK_MS) with the
//! current key-down signals, and the session counts ticks towards the next
//! forced descent.
//!
//! Phases: `Spawning` until [`Session::start`], then `Falling`. A lock that
//! completes lines moves to `LineFlash` until the caller shows the flashed
//! rows and calls [`Session::finish_line_clear`]. A spawn that does not fit
//! ends the session in `GameOver`.

use log::{debug, info};

use crate::field::{Field, LineRows};
use crate::pieces::{get_shape, PieceShape};
use crate::rng::{PieceRandomizer, PieceSource};
use crate::scoring::{calculate_score, next_speed, ScoreResult};
use crate::types::{InputSignals, PieceKind, Rotation, INITIAL_SPEED, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the occupied offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Check the piece against the field at its current placement
    pub fn fits(&self, field: &Field) -> bool {
        field.fits(self.kind, self.rotation, self.x, self.y)
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, no piece in play yet.
    Spawning,
    /// A piece is in play and accepts input.
    Falling,
    /// Completed lines are marked and waiting to collapse.
    LineFlash,
    /// A new piece did not fit at the spawn anchor.
    GameOver,
}

/// Emitted after every lock, consumed by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub rows: LineRows,
    pub score: ScoreResult,
    pub pieces_locked: u32,
    pub speed: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session<P = PieceRandomizer> {
    field: Field,
    active: Option<ActivePiece>,
    pieces: P,
    phase: Phase,
    score: u32,
    /// Ticks per forced descent.
    speed: u32,
    /// Ticks since the last forced descent.
    speed_counter: u32,
    pieces_locked: u32,
    lines_cleared: u32,
    /// Rows marked by the last lock, waiting for `finish_line_clear`.
    pending_lines: LineRows,
    /// Rotate signal level on the previous tick (edge detection).
    rotate_held: bool,
    ticks: u64,
    last_event: Option<LockEvent>,
}

impl Session<PieceRandomizer> {
    /// Create a new session with a seeded randomizer
    pub fn new(seed: u64) -> Self {
        Self::with_source(Field::new(), PieceRandomizer::new(seed))
    }

    /// Create a new session with an entropy-seeded randomizer
    pub fn from_entropy() -> Self {
        Self::with_source(Field::new(), PieceRandomizer::from_entropy())
    }
}

impl<P: PieceSource> Session<P> {
    /// Create a session over an existing field and piece source
    pub fn with_source(field: Field, pieces: P) -> Self {
        Self {
            field,
            active: None,
            pieces,
            phase: Phase::Spawning,
            score: 0,
            speed: INITIAL_SPEED,
            speed_counter: 0,
            pieces_locked: 0,
            lines_cleared: 0,
            pending_lines: LineRows::new(),
            rotate_held: false,
            ticks: 0,
            last_event: None,
        }
    }

    /// Spawn the first piece. Returns false if it does not fit.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Spawning {
            return self.phase != Phase::GameOver;
        }
        info!("session started");
        self.spawn_piece()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn speed_counter(&self) -> u32 {
        self.speed_counter
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct field access for scripted setups (puzzles, tests).
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Rows marked by the last lock that have not collapsed yet
    pub fn pending_lines(&self) -> &[i8] {
        &self.pending_lines
    }

    pub fn has_pending_lines(&self) -> bool {
        !self.pending_lines.is_empty()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::ActiveSnapshot;

        self.field.write_tag_grid(&mut out.field);
        out.active = self.active.map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.score = self.score;
        out.speed = self.speed;
        out.pieces = self.pieces_locked;
        out.lines = self.lines_cleared;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the source at the spawn anchor.
    ///
    /// The piece stays visible even when it does not fit, so the final frame
    /// shows where the stack overflowed.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::new(self.pieces.next_kind());
        self.active = Some(piece);

        if !piece.fits(&self.field) {
            self.phase = Phase::GameOver;
            info!(
                "game over: {:?} blocked at spawn, score {}, {} pieces, {} lines",
                piece.kind, self.score, self.pieces_locked, self.lines_cleared
            );
            return false;
        }

        self.phase = if self.pending_lines.is_empty() {
            Phase::Falling
        } else {
            Phase::LineFlash
        };
        true
    }

    /// Try to move the active piece; rejected moves leave it unchanged
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if moved.fits(&self.field) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    /// Try to rotate the active piece a quarter turn in place (no kicks)
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            rotation: active.rotation.rotate_cw(),
            ..active
        };
        if rotated.fits(&self.field) {
            self.active = Some(rotated);
            return true;
        }
        false
    }

    /// Apply one tick's worth of key-down signals.
    ///
    /// Left, right and down apply on every tick they are held. Rotate only
    /// applies on the tick it goes from released to held.
    pub fn apply_input(&mut self, input: InputSignals) {
        if input.move_left {
            self.try_move(-1, 0);
        }
        if input.move_right {
            self.try_move(1, 0);
        }
        if input.soft_drop {
            self.try_move(0, 1);
        }
        if input.rotate {
            if !self.rotate_held {
                self.try_rotate();
            }
            self.rotate_held = true;
        } else {
            self.rotate_held = false;
        }
    }

    /// Lock the active piece, score it, and spawn the next one.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.field
            .lock(active.kind, active.rotation, active.x, active.y);

        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        let speed = next_speed(self.speed, self.pieces_locked);
        if speed != self.speed {
            debug!("speed {} -> {}", self.speed, speed);
            self.speed = speed;
        }

        let rows = self.field.find_complete_lines(active.y);
        self.field.mark_lines_for_clear(&rows);
        self.pending_lines = rows.clone();

        let score = calculate_score(rows.len());
        self.score = self.score.saturating_add(score.total);
        self.lines_cleared = self.lines_cleared.wrapping_add(rows.len() as u32);

        debug!(
            "locked {:?} at ({}, {}) rot {}, rows {:?}, +{}",
            active.kind,
            active.x,
            active.y,
            active.rotation.turns(),
            rows.as_slice(),
            score.total
        );

        self.last_event = Some(LockEvent {
            kind: active.kind,
            rows,
            score,
            pieces_locked: self.pieces_locked,
            speed: self.speed,
        });

        self.spawn_piece();
    }

    /// Collapse the rows marked by the last lock and resume falling.
    ///
    /// Collapses even after game over so the final frame shows the settled
    /// stack.
    pub fn finish_line_clear(&mut self) {
        if self.pending_lines.is_empty() {
            return;
        }
        self.field.collapse(&self.pending_lines);
        self.pending_lines.clear();
        if self.phase == Phase::LineFlash {
            self.phase = Phase::Falling;
        }
    }

    /// Main game tick - apply input and count towards the forced descent.
    ///
    /// Returns true if the forced descent fired on this tick (the piece
    /// either moved down or locked).
    pub fn tick(&mut self, input: InputSignals) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.ticks = self.ticks.wrapping_add(1);

        self.speed_counter += 1;
        let force_down = self.speed_counter >= self.speed;

        self.apply_input(input);

        if !force_down {
            return false;
        }

        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        self.speed_counter = 0;
        true
    }
}

impl Default for Session<PieceRandomizer> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedPieces;
    use crate::types::{Cell, Signal, SPEED_FLOOR};

    fn scripted(kind: PieceKind) -> Session<ScriptedPieces> {
        let mut s = Session::with_source(Field::new(), ScriptedPieces::repeat(kind));
        assert!(s.start());
        s
    }

    fn idle_until_lock<P: PieceSource>(s: &mut Session<P>) {
        let locked = s.pieces_locked();
        for _ in 0..10_000 {
            s.tick(InputSignals::NONE);
            if s.pieces_locked() != locked {
                return;
            }
        }
        panic!("piece never locked");
    }

    #[test]
    fn test_new_session() {
        let s = Session::new(12345);
        assert_eq!(s.phase(), Phase::Spawning);
        assert_eq!(s.score(), 0);
        assert_eq!(s.speed(), INITIAL_SPEED);
        assert!(s.active().is_none());
    }

    #[test]
    fn test_start_spawns_at_anchor() {
        let mut s = Session::new(12345);
        assert!(s.start());
        assert_eq!(s.phase(), Phase::Falling);
        let a = s.active().unwrap();
        assert_eq!((a.x, a.y, a.rotation), (SPAWN_X, SPAWN_Y, Rotation::North));
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut s = Session::new(1);
        assert!(!s.tick(InputSignals::NONE));
        assert_eq!(s.ticks(), 0);
    }

    #[test]
    fn test_forced_descent_after_speed_ticks() {
        let mut s = scripted(PieceKind::O);
        let y0 = s.active().unwrap().y;
        for _ in 0..INITIAL_SPEED - 1 {
            assert!(!s.tick(InputSignals::NONE));
        }
        assert_eq!(s.active().unwrap().y, y0);
        assert!(s.tick(InputSignals::NONE));
        assert_eq!(s.active().unwrap().y, y0 + 1);
        assert_eq!(s.speed_counter(), 0);
    }

    #[test]
    fn test_move_blocked_by_wall_is_ignored() {
        let mut s = scripted(PieceKind::O);
        let left = InputSignals::NONE.with(Signal::MoveLeft);
        for _ in 0..15 {
            s.tick(left);
        }
        // O occupies columns 1..=2 of its box; interior starts at column 2.
        assert_eq!(s.active().unwrap().x, 1);
        assert!(!s.try_move(-1, 0));
    }

    #[test]
    fn test_held_rotate_turns_once() {
        let mut s = scripted(PieceKind::T);
        let rotate = InputSignals::NONE.with(Signal::Rotate);
        s.tick(rotate);
        s.tick(rotate);
        s.tick(rotate);
        assert_eq!(s.active().unwrap().rotation, Rotation::East);
        s.tick(InputSignals::NONE);
        s.tick(rotate);
        assert_eq!(s.active().unwrap().rotation, Rotation::South);
    }

    #[test]
    fn test_lock_scores_base_points() {
        let mut s = scripted(PieceKind::O);
        idle_until_lock(&mut s);
        assert_eq!(s.score(), 25);
        assert_eq!(s.pieces_locked(), 1);
        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.kind, PieceKind::O);
        assert!(ev.rows.is_empty());
        assert!(s.take_last_event().is_none());
    }

    #[test]
    fn test_locked_piece_rests_on_floor() {
        let mut s = scripted(PieceKind::O);
        idle_until_lock(&mut s);
        // O cells sit in rows 1..=2 of the box; floor top is row 16.
        assert_eq!(s.field().get(8, 15), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(s.field().get(9, 14), Some(Cell::Locked(PieceKind::O)));
    }

    #[test]
    fn test_line_clear_flow() {
        let mut s = scripted(PieceKind::I);
        // Row 15 filled except column 9; vertical I at x=7 drops into column 9.
        s.field_mut().fill_row_except(15, &[9], PieceKind::L);
        idle_until_lock(&mut s);

        assert_eq!(s.pending_lines(), &[15]);
        assert_eq!(s.phase(), Phase::LineFlash);
        assert_eq!(s.score(), 225);
        assert_eq!(s.lines_cleared(), 1);
        assert_eq!(s.field().get(5, 15), Some(Cell::Flash));

        // Ticks are frozen while lines flash.
        assert!(!s.tick(InputSignals::NONE));

        s.finish_line_clear();
        assert_eq!(s.phase(), Phase::Falling);
        assert!(!s.has_pending_lines());
        // The rest of the I (rows 12..=14) dropped by one.
        assert_eq!(s.field().get(9, 15), Some(Cell::Locked(PieceKind::I)));
        assert_eq!(s.field().get(9, 13), Some(Cell::Locked(PieceKind::I)));
        assert_eq!(s.field().get(9, 12), Some(Cell::Empty));
        assert_eq!(s.field().get(5, 15), Some(Cell::Empty));
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut field = Field::new();
        for y in 0..4 {
            for x in 2..12 {
                field.set(x, y, Cell::Locked(PieceKind::Z));
            }
        }
        let mut s = Session::with_source(field, ScriptedPieces::repeat(PieceKind::T));
        assert!(!s.start());
        assert!(s.is_game_over());
        assert!(s.active().is_some());
        assert!(!s.tick(InputSignals::NONE.with(Signal::MoveLeft)));
    }

    #[test]
    fn test_speed_floor_holds_over_many_locks() {
        let mut s = scripted(PieceKind::I);
        s.speed = SPEED_FLOOR + 1;
        s.pieces_locked = 9;
        s.lock_piece();
        assert_eq!(s.speed(), SPEED_FLOOR);
        s.pieces_locked = 19;
        s.lock_piece();
        assert_eq!(s.speed(), SPEED_FLOOR);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut s = scripted(PieceKind::S);
        s.tick(InputSignals::NONE);
        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::Falling);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.active.unwrap().kind, PieceKind::S);
        assert_eq!(snap.field[0][0], Cell::LeftWall.tag());
    }
}
