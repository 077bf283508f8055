//! # duel-engines
//!
//! Deterministic rule engines for five two-player games: UNO, Chess,
//! Three Men's Morris, TTT-Move and Partshi.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `apply_action(&state, player, &action)` returns
//!    a new state or an error. A rejected action changes nothing.
//!
//! 2. **Randomness lives in the state**: shuffles and dice draw from a
//!    `GameRngState` stored in the snapshot, so replaying the same actions
//!    from the same snapshot is exact.
//!
//! 3. **Policies, not guesses**: rule variants (UNO win ordering, TTT-Move
//!    adjacency, Partshi re-rolls) are options chosen when a game is built.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, errors, game options
//! - `rules`: `RulesEngine` trait implemented by every game
//! - `games`: The five engines
//! - `store`: Versioned persistence seam for live tables
//!
//! ## Example
//!
//! ```
//! use duel_engines::games::morris::{MorrisAction, MorrisGame};
//! use duel_engines::{PlayerId, RulesEngine};
//!
//! let game = MorrisGame::new();
//! let state = game.initial_state(0);
//! let next = game
//!     .apply_action(&state, PlayerId::new(0), &MorrisAction::Place(4))
//!     .unwrap();
//! assert_eq!(next.turn, PlayerId::new(1));
//! ```

pub mod core;
pub mod games;
pub mod rules;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    EngineError, EngineResult, GameRng, GameRngState, IllegalAction, PlayerId, PlayerMap,
};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::store::{GameKind, GameTable, MemoryStore, StateStore, StoreError};
