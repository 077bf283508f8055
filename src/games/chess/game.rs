//! Chess state transitions and terminal detection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::Board;
use super::movegen::{all_legal_moves, has_any_legal_move, is_castling, is_en_passant, legal_moves, LastMove};
use super::piece::{Color, Piece, PieceKind, Square};
use crate::core::{EngineError, EngineResult, IllegalAction, PlayerId};
use crate::rules::{GameResult, RulesEngine};

/// Final result of a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChessOutcome {
    White,
    Black,
    Draw,
}

impl From<Color> for ChessOutcome {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ChessOutcome::White,
            Color::Black => ChessOutcome::Black,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessState {
    #[serde(default)]
    pub board: Board,
    pub turn: Color,
    #[serde(default)]
    pub winner: Option<ChessOutcome>,
    #[serde(default)]
    pub last_move: Option<LastMove>,
    #[serde(default)]
    pub in_check: bool,
    #[serde(default)]
    pub log: String,
}

impl ChessState {
    /// A game starting from an arbitrary position.
    #[must_use]
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            in_check: board.is_in_check(turn),
            board,
            turn,
            winner: None,
            last_move: None,
            log: "Game Started".to_string(),
        }
    }

    /// Legal destinations for the piece on `from`.
    #[must_use]
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        legal_moves(&self.board, from, self.last_move.as_ref()).into_vec()
    }
}

impl Default for ChessState {
    fn default() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }
}

/// Move the piece on `from` to `to`.
///
/// Handles castling (the rook hops over), en passant (the victim leaves),
/// promotion (always to a queen) and marks moved pieces. Afterwards decides
/// check, checkmate and stalemate for the side now on move.
pub fn perform_move(state: &ChessState, from: Square, to: Square) -> EngineResult<ChessState> {
    if state.winner.is_some() {
        return Err(IllegalAction::GameOver.into());
    }
    if !from.is_on_board() || !to.is_on_board() {
        return Err(IllegalAction::OutOfBounds.into());
    }
    let piece = match state.board.get(from) {
        Some(p) if p.color == state.turn => p,
        _ => return Err(IllegalAction::NotYourPiece.into()),
    };
    if !legal_moves(&state.board, from, state.last_move.as_ref()).contains(&to) {
        return Err(IllegalAction::IllegalMove.into());
    }

    let mover = state.turn;
    let mut board = state.board;
    let mut log = format!("{mover} moved");

    if is_castling(&board, from, to) {
        let kingside = to.col > from.col;
        let (rook_col, rook_dest) = if kingside { (7, 5) } else { (0, 3) };
        let rook = board.take(from.with_col(rook_col));
        board.set(from.with_col(rook_dest), rook.map(Piece::moved));
        log = "Castling".to_string();
    }

    if is_en_passant(&board, from, to) {
        board.set(from.with_col(to.col), None);
        log = "En Passant".to_string();
    }

    board.take(from);
    let mut placed = piece.moved();
    if piece.kind == PieceKind::Pawn && to.row == mover.promotion_row() {
        placed.kind = PieceKind::Queen;
        log = "Pawn Promoted".to_string();
    }
    board.set(to, Some(placed));

    let last_move = LastMove { from, to, piece };
    let next_turn = mover.opposite();
    let in_check = board.is_in_check(next_turn);
    let mut winner = None;

    if !has_any_legal_move(&board, next_turn, Some(&last_move)) {
        if in_check {
            winner = Some(ChessOutcome::from(mover));
            log = "Checkmate!".to_string();
        } else {
            winner = Some(ChessOutcome::Draw);
            log = "Stalemate!".to_string();
        }
        info!(?winner, "chess game finished");
    } else if in_check {
        log.push_str(" (Check)");
    }

    debug!(%from, %to, ?piece, in_check, "chess move");

    Ok(ChessState {
        board,
        turn: next_turn,
        winner,
        last_move: Some(last_move),
        in_check,
        log,
    })
}

/// A chess move by coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessAction {
    pub from: Square,
    pub to: Square,
}

impl ChessAction {
    /// Parse a move like `"e2e4"`.
    pub fn parse(text: &str) -> Result<Self, String> {
        if text.len() != 4 || !text.is_ascii() {
            return Err(format!("not a move: {text:?}"));
        }
        Ok(Self {
            from: text[..2].parse()?,
            to: text[2..].parse()?,
        })
    }
}

/// Chess rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessGame;

impl ChessGame {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for ChessGame {
    type State = ChessState;
    type Action = ChessAction;

    fn name(&self) -> &'static str {
        "chess"
    }

    /// Always the standard position; the seed is unused.
    fn initial_state(&self, _seed: u64) -> ChessState {
        ChessState::default()
    }

    fn active_player(&self, state: &ChessState) -> Option<PlayerId> {
        match state.winner {
            Some(_) => None,
            None => Some(state.turn.player()),
        }
    }

    fn legal_actions(&self, state: &ChessState, player: PlayerId) -> Vec<ChessAction> {
        if self.active_player(state) != Some(player) {
            return vec![];
        }
        all_legal_moves(&state.board, state.turn, state.last_move.as_ref())
            .into_iter()
            .map(|(from, to)| ChessAction { from, to })
            .collect()
    }

    fn apply_action(
        &self,
        state: &ChessState,
        player: PlayerId,
        action: &ChessAction,
    ) -> EngineResult<ChessState> {
        if state.winner.is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        if Color::for_player(player) != state.turn || !player.is_seat() {
            return Err(IllegalAction::NotYourTurn.into());
        }
        perform_move(state, action.from, action.to)
    }

    fn is_terminal(&self, state: &ChessState) -> Option<GameResult> {
        state.winner.map(|outcome| match outcome {
            ChessOutcome::White => GameResult::Winner(Color::White.player()),
            ChessOutcome::Black => GameResult::Winner(Color::Black.player()),
            ChessOutcome::Draw => GameResult::Draw,
        })
    }

    fn validate(&self, state: &ChessState) -> EngineResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = state.board.count(PieceKind::King, color);
            if kings != 1 {
                return Err(EngineError::malformed(format!("{color} has {kings} kings")));
            }
        }
        Ok(())
    }
}
