//! Two-player chess.
//!
//! Full legal-move generation with castling, en passant and automatic
//! queen promotion. A move that leaves the mover's own king attacked is
//! never legal. The game ends on checkmate or stalemate; there is no
//! fifty-move or repetition rule.

mod board;
mod game;
mod movegen;
mod piece;

pub use board::Board;
pub use game::{perform_move, ChessAction, ChessGame, ChessOutcome, ChessState};
pub use movegen::{
    all_legal_moves, has_any_legal_move, is_castling, is_en_passant, legal_moves, pseudo_legal_moves,
    simulate, LastMove, Moves,
};
pub use piece::{Color, Piece, PieceKind, Square};
