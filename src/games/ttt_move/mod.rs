//! TTT-Move: tic-tac-toe where each mark has only three pieces.
//!
//! X and O drop three pieces each, then move them one at a time. Where a
//! piece may move is fixed per table by [`MoveRule`](crate::core::MoveRule).
//! The opening mark is drawn from the seed.

mod game;

pub use game::{Mark, TttMoveAction, TttMoveGame, TttMoveGameBuilder, TttMoveState, TttPhase};
