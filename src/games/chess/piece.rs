//! Chess colors, pieces and squares.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::PlayerId;

/// Side to move. White sits in seat 0, Black in seat 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step. Row 0 is Black's back rank.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row of this side's back rank.
    #[must_use]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[must_use]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    #[must_use]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().home_row()
    }

    #[must_use]
    pub const fn player(self) -> PlayerId {
        match self {
            Color::White => PlayerId::new(0),
            Color::Black => PlayerId::new(1),
        }
    }

    #[must_use]
    pub const fn for_player(player: PlayerId) -> Self {
        match player.0 {
            0 => Color::White,
            _ => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Sticky once set: a piece that moved never regains castling rights.
    #[serde(default)]
    pub has_moved: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    #[must_use]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }

    #[must_use]
    pub fn is(&self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// A board coordinate. Row 0 is rank 8, column 0 is file a.
///
/// ```
/// use duel_engines::games::chess::Square;
///
/// let e2: Square = "e2".parse().unwrap();
/// assert_eq!((e2.row, e2.col), (6, 4));
/// assert_eq!(e2.to_string(), "e2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

#[derive(Deserialize)]
struct RawSquare {
    row: u8,
    col: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = String;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.row, raw.col)
            .ok_or_else(|| format!("square off the board: row {} col {}", raw.row, raw.col))
    }
}

impl Square {
    /// Create a square, `None` when off the board.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// False for squares built by hand with fields past the edge.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// The square `dr` rows and `dc` columns away, if on the board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Same row, another column.
    #[must_use]
    pub const fn with_col(self, col: u8) -> Self {
        Self { row: self.row, col }
    }

    /// Iterate over all 64 squares, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square {
                row: 8 - (rank - b'0'),
                col: file - b'a',
            }),
            _ => Err(format!("not a square: {s:?}")),
        }
    }
}
