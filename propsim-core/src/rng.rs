//! Outcome sources and deterministic seed derivation.
//!
//! The engine never touches global random state: every run draws its uniform
//! variates from an explicit [`OutcomeSource`]. Batch runs take their seeds
//! from a [`SeedHierarchy`], where each sub-seed is a BLAKE3 hash of the master
//! seed and the run index alone.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplier of uniform draws in `[0, 1)`. A draw below the win rate is a win.
pub trait OutcomeSource {
    fn next_draw(&mut self) -> f64;
}

impl<S: OutcomeSource + ?Sized> OutcomeSource for &mut S {
    fn next_draw(&mut self) -> f64 {
        (**self).next_draw()
    }
}

/// Draws backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomOutcomes<R> {
    rng: R,
}

impl<R: Rng> RandomOutcomes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOutcomes<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> OutcomeSource for RandomOutcomes<R> {
    fn next_draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedOutcomes {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedOutcomes {
    /// Script that replays `draws` in order, cycling at the end.
    ///
    /// # Panics
    ///
    /// Panics if `draws` is empty: a cycling script needs at least one draw.
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted outcome sequence must not be empty");
        Self { draws, cursor: 0 }
    }

    /// Script of wins and losses: `true` maps to draw 0.0 (a win whenever the
    /// win rate is positive), `false` to draw 1.0 (always a loss).
    ///
    /// # Panics
    ///
    /// Panics if `wins` is empty.
    pub fn from_wins(wins: &[bool]) -> Self {
        Self::new(wins.iter().map(|&w| if w { 0.0 } else { 1.0 }).collect())
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_draw(&mut self) -> f64 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}

/// Deterministic seed hierarchy: a master seed expanded into per-run seeds.
#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Sub-seed for run `index`. Depends only on `(master_seed, index)`.
    pub fn sub_seed(&self, index: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(b"propsim-run");
        hasher.update(&index.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn outcomes_for(&self, index: u64) -> RandomOutcomes<StdRng> {
        RandomOutcomes::seeded(self.sub_seed(index))
    }
}
