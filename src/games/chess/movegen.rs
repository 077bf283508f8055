//! Legal move generation.
//!
//! Two stages: per-piece geometry produces pseudo-legal destinations, then
//! each candidate is played on a scratch board and dropped if it leaves the
//! mover's king attacked. Castling safety (start, transit and destination
//! squares) is checked during generation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::{Board, DIAGONAL, KNIGHT_JUMPS, STRAIGHT};
use super::piece::{Color, Piece, PieceKind, Square};

/// Destination list. A queen has at most 27 targets.
pub type Moves = SmallVec<[Square; 28]>;

/// The previous move, needed to recognise en passant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood before moving.
    pub piece: Piece,
}

impl LastMove {
    /// A pawn that just advanced two rows.
    #[must_use]
    pub fn is_double_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.row.abs_diff(self.to.row) == 2
    }
}

/// Whether moving the piece on `from` to `to` is an en-passant capture:
/// a pawn moving diagonally onto an empty square.
#[must_use]
pub fn is_en_passant(board: &Board, from: Square, to: Square) -> bool {
    matches!(board.get(from), Some(p) if p.kind == PieceKind::Pawn)
        && from.col != to.col
        && board.is_empty(to)
}

/// Whether moving the piece on `from` to `to` is a castling move.
#[must_use]
pub fn is_castling(board: &Board, from: Square, to: Square) -> bool {
    matches!(board.get(from), Some(p) if p.kind == PieceKind::King) && from.col.abs_diff(to.col) > 1
}

fn pawn_moves(board: &Board, from: Square, piece: Piece, last_move: Option<&LastMove>, out: &mut Moves) {
    let dir = piece.color.forward();

    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
        out.push(one);
        if from.row == piece.color.pawn_row() {
            if let Some(two) = from.offset(2 * dir, 0).filter(|&sq| board.is_empty(sq)) {
                out.push(two);
            }
        }
    }

    for dc in [-1, 1] {
        let Some(target) = from.offset(dir, dc) else {
            continue;
        };
        match board.get(target) {
            Some(victim) if victim.color != piece.color => out.push(target),
            Some(_) => {}
            None => {
                // En passant: the enemy pawn that just double-stepped stands
                // beside us on the target's column.
                let beside = from.with_col(target.col);
                let capturable = last_move.is_some_and(|lm| {
                    lm.is_double_step()
                        && lm.piece.color != piece.color
                        && lm.to == beside
                        && board.get(lm.to).is_some_and(|p| p.is(PieceKind::Pawn, lm.piece.color))
                });
                if capturable {
                    out.push(target);
                }
            }
        }
    }
}

fn step_moves(board: &Board, from: Square, color: Color, deltas: &[(i8, i8)], out: &mut Moves) {
    for &(dr, dc) in deltas {
        if let Some(target) = from.offset(dr, dc) {
            if board.get(target).map_or(true, |p| p.color != color) {
                out.push(target);
            }
        }
    }
}

fn slide_moves(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)], out: &mut Moves) {
    for &(dr, dc) in dirs {
        let mut cursor = from;
        while let Some(next) = cursor.offset(dr, dc) {
            cursor = next;
            match board.get(cursor) {
                None => out.push(cursor),
                Some(p) => {
                    if p.color != color {
                        out.push(cursor);
                    }
                    break;
                }
            }
        }
    }
}

fn castling_moves(board: &Board, from: Square, king: Piece, out: &mut Moves) {
    let color = king.color;
    let enemy = color.opposite();
    if king.has_moved || from.row != color.home_row() || from.col != 4 || board.is_in_check(color) {
        return;
    }

    let rook_ready = |col: u8| {
        board
            .get(from.with_col(col))
            .is_some_and(|p| p.is(PieceKind::Rook, color) && !p.has_moved)
    };
    let clear = |cols: &[u8]| cols.iter().all(|&c| board.is_empty(from.with_col(c)));
    let safe = |cols: &[u8]| cols.iter().all(|&c| !board.is_attacked(from.with_col(c), enemy));

    if rook_ready(7) && clear(&[5, 6]) && safe(&[5, 6]) {
        out.push(from.with_col(6));
    }
    if rook_ready(0) && clear(&[1, 2, 3]) && safe(&[3, 2]) {
        out.push(from.with_col(2));
    }
}

/// Destinations allowed by piece geometry alone. May leave the king in check.
#[must_use]
pub fn pseudo_legal_moves(board: &Board, from: Square, last_move: Option<&LastMove>) -> Moves {
    let mut moves = Moves::new();
    let Some(piece) = board.get(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece, last_move, &mut moves),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_JUMPS, &mut moves),
        PieceKind::King => {
            step_moves(board, from, piece.color, &STRAIGHT, &mut moves);
            step_moves(board, from, piece.color, &DIAGONAL, &mut moves);
            castling_moves(board, from, piece, &mut moves);
        }
        PieceKind::Rook => slide_moves(board, from, piece.color, &STRAIGHT, &mut moves),
        PieceKind::Bishop => slide_moves(board, from, piece.color, &DIAGONAL, &mut moves),
        PieceKind::Queen => {
            slide_moves(board, from, piece.color, &STRAIGHT, &mut moves);
            slide_moves(board, from, piece.color, &DIAGONAL, &mut moves);
        }
    }
    moves
}

/// Play a move on a copy of the board: relocate the piece and remove an
/// en-passant victim. Rook relocation for castling is left out because the
/// king's path was already checked during generation.
#[must_use]
pub fn simulate(board: &Board, from: Square, to: Square) -> Board {
    let mut scratch = *board;
    if is_en_passant(board, from, to) {
        scratch.set(from.with_col(to.col), None);
    }
    let piece = scratch.take(from);
    scratch.set(to, piece);
    scratch
}

/// Legal destinations for the piece on `from`.
#[must_use]
pub fn legal_moves(board: &Board, from: Square, last_move: Option<&LastMove>) -> Moves {
    if !from.is_on_board() {
        return Moves::new();
    }
    let Some(piece) = board.get(from) else {
        return Moves::new();
    };
    let mut moves = pseudo_legal_moves(board, from, last_move);
    moves.retain(|to| !simulate(board, from, *to).is_in_check(piece.color));
    moves
}

/// Every legal (from, to) pair for `color`.
#[must_use]
pub fn all_legal_moves(board: &Board, color: Color, last_move: Option<&LastMove>) -> Vec<(Square, Square)> {
    board
        .pieces(color)
        .flat_map(|(from, _)| {
            legal_moves(board, from, last_move)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Whether `color` has at least one legal move. Stops at the first one.
#[must_use]
pub fn has_any_legal_move(board: &Board, color: Color, last_move: Option<&LastMove>) -> bool {
    board
        .pieces(color)
        .any(|(from, _)| !legal_moves(board, from, last_move).is_empty())
}
