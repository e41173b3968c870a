//! Scoring module - lock points, line bonuses, and the speed ramp
//!
//! Every locked piece is worth a flat [`LOCK_SCORE`]. Clearing `n` lines with
//! that piece adds `LINE_BONUS_BASE * 2^n` on top.

use crate::types::{LINE_BONUS_BASE, LOCK_SCORE, PIECES_PER_SPEEDUP, SPEED_FLOOR};

/// Score calculation result for a single lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Flat points for locking the piece.
    pub lock_score: u32,
    /// Bonus for the lines completed by this lock (0 when none).
    pub line_bonus: u32,
    pub total: u32,
}

/// Calculate the line bonus for `lines` rows completed at once
pub fn calculate_line_bonus(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    // A lock touches at most 4 rows; clamp so the shift cannot overflow.
    LINE_BONUS_BASE.saturating_mul(1 << lines.min(16))
}

/// Calculate the complete score for a lock that completed `lines` rows
pub fn calculate_score(lines: usize) -> ScoreResult {
    let line_bonus = calculate_line_bonus(lines);
    ScoreResult {
        lock_score: LOCK_SCORE,
        line_bonus,
        total: LOCK_SCORE.saturating_add(line_bonus),
    }
}

/// Speed after `pieces_locked` pieces have been locked.
///
/// Every [`PIECES_PER_SPEEDUP`]th piece takes one tick off the descent
/// interval, never going below [`SPEED_FLOOR`].
pub fn next_speed(speed: u32, pieces_locked: u32) -> u32 {
    if pieces_locked > 0 && pieces_locked % PIECES_PER_SPEEDUP == 0 && speed > SPEED_FLOOR {
        speed - 1
    } else {
        speed
    }
}
