//! The contract every game engine fulfils.
//!
//! An engine turns `(state, seat, action)` into the next state or an
//! [`IllegalAction`](crate::core::IllegalAction). The store layer drives
//! engines through [`RulesEngine`] only and never looks inside a game's
//! state.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
