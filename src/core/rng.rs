//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice and setup
//! - **Injectable**: Rules code depends on `RandomSource`, not on `GameRng`
//! - **Scriptable**: `ScriptedRng` replays a fixed roll sequence for tests
//!
//! ```
//! use conquest_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Faces on a die.
pub const DIE_FACES: u8 = 6;

/// Source of the randomness the rules consume.
///
/// Combat and initial army placement draw from this trait only, so any
/// deterministic generator can be plugged into the engine.
pub trait RandomSource {
    /// Roll one die, uniform in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Pick an index uniformly in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Seeded ChaCha8 generator used in normal play.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Replays a fixed sequence of die faces, cycling when exhausted.
///
/// Index picks walk a counter modulo the requested length, so setup stays
/// deterministic without consuming scripted rolls.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    rolls: Vec<u8>,
    next_roll: usize,
    next_pick: usize,
}

impl ScriptedRng {
    /// Create a scripted source. Faces outside `1..=6` are clamped.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty.
    #[must_use]
    pub fn new(rolls: impl Into<Vec<u8>>) -> Self {
        let rolls: Vec<u8> = rolls
            .into()
            .into_iter()
            .map(|face| face.clamp(1, DIE_FACES))
            .collect();
        assert!(!rolls.is_empty(), "ScriptedRng needs at least one roll");
        Self {
            rolls,
            next_roll: 0,
            next_pick: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn roll_die(&mut self) -> u8 {
        let face = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        face
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let index = self.next_pick % len;
        self.next_pick += 1;
        index
    }
}
