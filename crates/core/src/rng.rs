//! RNG module - piece selection for new spawns
//!
//! Every spawn picks one of the 7 kinds uniformly at random. The randomizer
//! is seedable so that a session can be replayed exactly; sessions are
//! generic over [`PieceSource`] so tests can script the piece sequence.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::types::PieceKind;

/// Anything that can hand out the next piece kind to spawn
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniformly random piece selection
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: StdRng,
    uniform: Uniform<usize>,
}

impl PieceRandomizer {
    /// Create a randomizer with a fixed seed (deterministic sequence)
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a randomizer seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            uniform: Uniform::from(0..PieceKind::ALL.len()),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.uniform.sample(&mut self.rng)]
    }
}

impl PieceSource for PieceRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        self.draw()
    }
}

/// Repeats a fixed sequence of kinds, for scripted sessions and benchmarks
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedPieces {
    /// `kinds` must not be empty; an empty script falls back to `I`.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, next: 0 }
    }

    /// Always hand out the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next = self.next.wrapping_add(1);
        kind
    }
}
