//! Seeded randomness that lives inside game state.
//!
//! Engines never own an RNG. A state that needs randomness after creation
//! (UNO reshuffles, Partshi dice) stores a [`GameRngState`]; the engine
//! restores a [`GameRng`] from it, draws, and writes the advanced position
//! into the successor state. Replaying the same actions from the same
//! snapshot therefore yields the same states.
//!
//! ```
//! use duel_engines::core::GameRng;
//!
//! let mut dice = GameRng::new(42);
//! let saved = dice.state();
//! let first = dice.roll_die();
//!
//! assert_eq!(first, GameRng::from_state(&saved).roll_die());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream remembering the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// A six-sided die, 1 to 6.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Fair coin.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// Fisher-Yates over `cards`.
    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume the stream exactly where `state` left it.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Stream position stored in snapshots: the seed plus the ChaCha8 word
/// counter, so restoring costs the same after one draw or a million.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

impl GameRngState {
    /// Fresh stream for `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        GameRng::new(seed).state()
    }
}
