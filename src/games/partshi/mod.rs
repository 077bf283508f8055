//! Partshi, a two-seat race game in the Ludo family.
//!
//! Four pieces per seat start in base. A six brings one out onto the
//! shared 52-cell track; each seat then runs most of the ring before
//! turning into its private six-cell home path. An exact roll reaches
//! the goal. Landing on an unsafe cell captures every opposing piece
//! there. The first seat with all four pieces home wins.

mod board;
mod game;

pub use board::{
    home_entry, next_position, start_cell, Position, ENTRY_ROLL, HOME_LEN, PIECES, SAFE_SPOTS,
    TRACK_LEN,
};
pub use game::{PartshiAction, PartshiGame, PartshiGameBuilder, PartshiPiece, PartshiState};
