//! The 3×3 board shared by Morris and TTT-Move.
//!
//! Cells are indexed row by row:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```

use crate::core::{EngineResult, IllegalAction};

pub const CELLS: usize = 9;

/// Pieces each side brings onto the board.
pub const PIECES_PER_SIDE: u8 = 3;

/// Rows, columns and both diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub type Grid<T> = [Option<T>; CELLS];

/// Owner of the first completed line, if any.
pub fn line_owner<T: Copy + PartialEq>(board: &Grid<T>) -> Option<T> {
    LINES.iter().find_map(|&[a, b, c]| match board[a] {
        Some(owner) if board[b] == Some(owner) && board[c] == Some(owner) => Some(owner),
        _ => None,
    })
}

/// Reject indices off the board.
pub fn check_cell(idx: usize) -> EngineResult<usize> {
    if idx < CELLS {
        Ok(idx)
    } else {
        Err(IllegalAction::OutOfBounds.into())
    }
}

/// Whether two distinct cells touch orthogonally or diagonally.
pub fn is_king_step(from: usize, to: usize) -> bool {
    let (fr, fc) = ((from / 3) as i32, (from % 3) as i32);
    let (tr, tc) = ((to / 3) as i32, (to % 3) as i32);
    from != to && (fr - tr).abs() <= 1 && (fc - tc).abs() <= 1
}

/// Empty cells.
pub fn empty_cells<T>(board: &Grid<T>) -> impl Iterator<Item = usize> + '_ {
    board.iter().enumerate().filter(|(_, c)| c.is_none()).map(|(i, _)| i)
}

/// Cells holding `owner`'s pieces.
pub fn cells_of<T: Copy + PartialEq>(board: &Grid<T>, owner: T) -> impl Iterator<Item = usize> + '_ {
    board
        .iter()
        .enumerate()
        .filter(move |(_, c)| **c == Some(owner))
        .map(|(i, _)| i)
}
