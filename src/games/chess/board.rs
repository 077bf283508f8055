//! The 8×8 board and attack detection.

use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const STRAIGHT: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Fixed 8×8 grid, `Copy` so simulations work on scratch values.
///
/// Serialized as an array of rows. Decoding pads missing or short rows
/// with empty squares, since sparse stores drop empty trailing entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBoard", into = "RawBoard")]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct RawBoard(Vec<Option<Vec<Option<Piece>>>>);

impl From<RawBoard> for Board {
    fn from(raw: RawBoard) -> Self {
        let mut board = Board::empty();
        for (row, cells) in raw.0.into_iter().take(8).enumerate() {
            for (col, cell) in cells.unwrap_or_default().into_iter().take(8).enumerate() {
                board.squares[row][col] = cell;
            }
        }
        board
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        RawBoard(board.squares.iter().map(|row| Some(row.to_vec())).collect())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(*kind, Color::Black));
            board.squares[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[7][col] = Some(Piece::new(*kind, Color::White));
        }
        board
    }

    #[must_use]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Place a piece, builder style.
    #[must_use]
    pub fn with(mut self, sq: Square, piece: Piece) -> Self {
        self.set(sq, Some(piece));
        self
    }

    /// Remove and return whatever stands on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize].take()
    }

    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// All pieces of one color with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    #[must_use]
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces(color).filter(|(_, p)| p.kind == kind).count()
    }

    /// Whether any piece of `attacker` attacks `target`.
    ///
    /// Scans outward from the target: pawn diagonals, knight jumps, then
    /// the eight rays, stopping each ray at its first piece.
    #[must_use]
    pub fn is_attacked(&self, target: Square, attacker: Color) -> bool {
        // An attacking pawn sits one step "behind" the target from its own
        // point of view.
        let behind = -attacker.forward();
        for dc in [-1, 1] {
            if let Some(p) = target.offset(behind, dc).and_then(|sq| self.get(sq)) {
                if p.is(PieceKind::Pawn, attacker) {
                    return true;
                }
            }
        }

        for (dr, dc) in KNIGHT_JUMPS {
            if let Some(p) = target.offset(dr, dc).and_then(|sq| self.get(sq)) {
                if p.is(PieceKind::Knight, attacker) {
                    return true;
                }
            }
        }

        let rays = STRAIGHT.iter().map(|d| (d, true)).chain(DIAGONAL.iter().map(|d| (d, false)));
        for (&(dr, dc), straight) in rays {
            let mut cursor = target;
            let mut distance = 0;
            while let Some(next) = cursor.offset(dr, dc) {
                cursor = next;
                distance += 1;
                let Some(p) = self.get(cursor) else {
                    continue;
                };
                if p.color == attacker {
                    let hit = match p.kind {
                        PieceKind::Queen => true,
                        PieceKind::Rook => straight,
                        PieceKind::Bishop => !straight,
                        PieceKind::King => distance == 1,
                        _ => false,
                    };
                    if hit {
                        return true;
                    }
                }
                break;
            }
        }

        false
    }

    /// Whether `color`'s king is attacked. A board without that king is
    /// never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| self.is_attacked(king, color.opposite()))
    }
}
