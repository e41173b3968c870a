//! Held-key tracking for terminal environments.
//!
//! Terminals deliver key events, while the game wants key-down levels. When
//! the terminal reports releases, a key is held from press to release.
//! Otherwise a key counts as held for a short timeout after its last press
//! or auto-repeat event.
//!
//! Timeout mode has a known gap: many terminals wait 250-600 ms before the
//! first auto-repeat, longer than the default 150 ms timeout. A held key then
//! reads as released until repeats start, so a held rotate key can turn the
//! piece a second time. Raise `TETRIS_KEY_RELEASE_MS` past the terminal's
//! repeat delay to avoid it, at the cost of taps lingering longer.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{InputSignals, Signal};

// Long enough to bridge the gap between terminal auto-repeat events, short
// enough that a single tap does not read as a long hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

const SIGNALS: [Signal; 4] = [
    Signal::MoveLeft,
    Signal::MoveRight,
    Signal::SoftDrop,
    Signal::Rotate,
];

fn slot(signal: Signal) -> usize {
    match signal {
        Signal::MoveLeft => 0,
        Signal::MoveRight => 1,
        Signal::SoftDrop => 2,
        Signal::Rotate => 3,
    }
}

/// Tracks which signals are held.
#[derive(Debug, Clone)]
pub struct KeyStateTracker {
    /// Time of the last press/repeat per signal; `None` when released.
    last_seen: [Option<Instant>; 4],
    release_events: bool,
    key_release_timeout_ms: u32,
}

impl KeyStateTracker {
    pub fn new() -> Self {
        Self {
            last_seen: [None; 4],
            release_events: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Trust release events instead of timing out held keys.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one key event observed at `now`.
    ///
    /// Returns the signal the key maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Option<Signal> {
        let signal = map_key(key.code)?;
        let slot = &mut self.last_seen[slot(signal)];
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => *slot = Some(now),
            KeyEventKind::Release => *slot = None,
        }
        Some(signal)
    }

    /// Key-down state of every signal at `now`.
    pub fn signals(&self, now: Instant) -> InputSignals {
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        let mut out = InputSignals::NONE;
        for signal in SIGNALS {
            let held = match self.last_seen[slot(signal)] {
                Some(_) if self.release_events => true,
                Some(at) => now.saturating_duration_since(at) <= timeout,
                None => false,
            };
            out.set(signal, held);
        }
        out
    }

    pub fn reset(&mut self) {
        self.last_seen = [None; 4];
    }
}

impl Default for KeyStateTracker {
    fn default() -> Self {
        Self::new()
    }
}
