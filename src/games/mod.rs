//! Game implementations.

pub mod chess;
pub mod grid;
pub mod morris;
pub mod partshi;
pub mod ttt_move;
pub mod uno;
