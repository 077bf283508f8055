//! Core engine types: seats, RNG, errors, configuration.
//!
//! This module contains the building blocks shared by every game engine.
//! Games never depend on each other, only on `core` and `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, SEATS};
pub use rng::{GameRng, GameRngState};
pub use config::{MoveRule, PartshiOptions, SixReroll, TttMoveOptions, UnoOptions, WinPolicy};
pub use error::{EngineError, EngineResult, IllegalAction};
