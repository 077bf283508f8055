//! Three Men's Morris.
//!
//! Each side places three pieces, then slides them along the drawn lines
//! (the center touches every point; corners and edges touch their
//! neighbours and the center). Three in a row wins in either phase.

mod game;

pub use game::{MorrisAction, MorrisGame, MorrisPhase, MorrisState, ADJACENCY};
