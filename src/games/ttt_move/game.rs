//! TTT-Move: drop three marks, then move them until a line forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::core::{EngineError, EngineResult, GameRng, IllegalAction, MoveRule, PlayerId, TttMoveOptions};
use crate::games::grid::{self, Grid, CELLS, PIECES_PER_SIDE};
use crate::rules::{GameResult, RulesEngine};

/// A side's mark. X sits in seat 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    #[must_use]
    pub const fn player(self) -> PlayerId {
        match self {
            Mark::X => PlayerId::new(0),
            Mark::O => PlayerId::new(1),
        }
    }

    #[must_use]
    pub const fn for_player(player: PlayerId) -> Self {
        match player.0 {
            0 => Mark::X,
            _ => Mark::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TttPhase {
    #[default]
    Drop,
    Move,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TttMoveState {
    #[serde(default)]
    pub board: Grid<Mark>,
    pub turn: Mark,
    #[serde(default)]
    pub phase: TttPhase,
    #[serde(default)]
    pub pieces_x: u8,
    #[serde(default)]
    pub pieces_o: u8,
    #[serde(default)]
    pub winner: Option<Mark>,
    #[serde(default)]
    pub log: String,
}

impl TttMoveState {
    /// Empty board with `starter` to drop first.
    #[must_use]
    pub fn new(starter: Mark) -> Self {
        Self {
            board: [None; CELLS],
            turn: starter,
            phase: TttPhase::Drop,
            pieces_x: 0,
            pieces_o: 0,
            winner: None,
            log: format!("Drop Phase: {starter}'s Turn"),
        }
    }

    /// Pieces `mark` has dropped so far.
    #[must_use]
    pub fn dropped(&self, mark: Mark) -> u8 {
        match mark {
            Mark::X => self.pieces_x,
            Mark::O => self.pieces_o,
        }
    }

    fn dropped_mut(&mut self, mark: Mark) -> &mut u8 {
        match mark {
            Mark::X => &mut self.pieces_x,
            Mark::O => &mut self.pieces_o,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TttMoveAction {
    Drop(usize),
    Move { from: usize, to: usize },
}

/// TTT-Move rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct TttMoveGame {
    options: TttMoveOptions,
}

/// Builder for creating a TttMoveGame.
#[derive(Clone, Copy, Debug, Default)]
pub struct TttMoveGameBuilder {
    options: TttMoveOptions,
}

impl TttMoveGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_rule(mut self, rule: MoveRule) -> Self {
        self.options.move_rule = rule;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> (TttMoveGame, TttMoveState) {
        let game = TttMoveGame::new(self.options);
        let state = game.initial_state(seed);
        (game, state)
    }
}

impl TttMoveGame {
    #[must_use]
    pub fn new(options: TttMoveOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn move_rule(&self) -> MoveRule {
        self.options.move_rule
    }

    fn can_reach(&self, from: usize, to: usize) -> bool {
        match self.options.move_rule {
            MoveRule::KingStep => grid::is_king_step(from, to),
            MoveRule::Free => from != to,
        }
    }

    fn drop_piece(state: &mut TttMoveState, idx: usize) -> EngineResult<()> {
        if state.phase != TttPhase::Drop {
            return Err(IllegalAction::WrongPhase.into());
        }
        let idx = grid::check_cell(idx)?;
        if state.board[idx].is_some() {
            return Err(IllegalAction::Occupied.into());
        }
        let mark = state.turn;
        if state.dropped(mark) >= PIECES_PER_SIDE {
            return Err(IllegalAction::PieceLimit.into());
        }

        state.board[idx] = Some(mark);
        *state.dropped_mut(mark) += 1;
        state.log = format!("{mark} dropped piece");

        if state.pieces_x == PIECES_PER_SIDE && state.pieces_o == PIECES_PER_SIDE {
            state.phase = TttPhase::Move;
            state.log = "Move Phase Begins!".to_string();
        }
        Ok(())
    }

    fn move_piece(&self, state: &mut TttMoveState, from: usize, to: usize) -> EngineResult<()> {
        if state.phase != TttPhase::Move {
            return Err(IllegalAction::WrongPhase.into());
        }
        let from = grid::check_cell(from)?;
        let to = grid::check_cell(to)?;
        let mark = state.turn;
        if state.board[from] != Some(mark) {
            return Err(IllegalAction::NotYourPiece.into());
        }
        if state.board[to].is_some() {
            return Err(IllegalAction::Occupied.into());
        }
        if !self.can_reach(from, to) {
            return Err(IllegalAction::NotAdjacent.into());
        }

        state.board[from] = None;
        state.board[to] = Some(mark);
        state.log = format!("{mark} moved");
        Ok(())
    }
}

impl RulesEngine for TttMoveGame {
    type State = TttMoveState;
    type Action = TttMoveAction;

    fn name(&self) -> &'static str {
        "ttt_move"
    }

    /// Fair coin from the seed decides who drops first.
    fn initial_state(&self, seed: u64) -> TttMoveState {
        let starter = if GameRng::new(seed).coin_flip() { Mark::X } else { Mark::O };
        TttMoveState::new(starter)
    }

    fn active_player(&self, state: &TttMoveState) -> Option<PlayerId> {
        match state.winner {
            Some(_) => None,
            None => Some(state.turn.player()),
        }
    }

    fn legal_actions(&self, state: &TttMoveState, player: PlayerId) -> Vec<TttMoveAction> {
        if self.active_player(state) != Some(player) {
            return vec![];
        }
        let mark = state.turn;
        match state.phase {
            TttPhase::Drop if state.dropped(mark) < PIECES_PER_SIDE => {
                grid::empty_cells(&state.board).map(TttMoveAction::Drop).collect()
            }
            TttPhase::Drop => vec![],
            TttPhase::Move => grid::cells_of(&state.board, mark)
                .flat_map(|from| {
                    grid::empty_cells(&state.board)
                        .filter(move |&to| self.can_reach(from, to))
                        .map(move |to| TttMoveAction::Move { from, to })
                })
                .collect(),
        }
    }

    fn apply_action(
        &self,
        state: &TttMoveState,
        player: PlayerId,
        action: &TttMoveAction,
    ) -> EngineResult<TttMoveState> {
        if state.winner.is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        if !player.is_seat() || Mark::for_player(player) != state.turn {
            return Err(IllegalAction::NotYourTurn.into());
        }

        let mut next = state.clone();
        match *action {
            TttMoveAction::Drop(idx) => Self::drop_piece(&mut next, idx)?,
            TttMoveAction::Move { from, to } => self.move_piece(&mut next, from, to)?,
        }
        debug!(mark = %state.turn, ?action, phase = ?next.phase, "ttt-move action");

        if let Some(winner) = grid::line_owner(&next.board) {
            next.winner = Some(winner);
            next.log = format!("{winner} Wins!");
            info!(%winner, "ttt-move game finished");
        } else {
            let opponent = state.turn.opposite();
            next.turn = opponent;
            next.log = match next.phase {
                TttPhase::Drop => format!("Drop Phase: {opponent}'s Turn"),
                TttPhase::Move => format!("Move Phase: {opponent}'s Turn"),
            };
        }
        Ok(next)
    }

    fn is_terminal(&self, state: &TttMoveState) -> Option<GameResult> {
        state.winner.map(|mark| GameResult::Winner(mark.player()))
    }

    fn validate(&self, state: &TttMoveState) -> EngineResult<()> {
        for mark in [Mark::X, Mark::O] {
            let on_board = grid::cells_of(&state.board, mark).count();
            let dropped = state.dropped(mark);
            if dropped > PIECES_PER_SIDE || on_board != dropped as usize {
                return Err(EngineError::malformed(format!(
                    "{mark} dropped {dropped} pieces but has {on_board} on the board"
                )));
            }
        }
        if state.phase == TttPhase::Move
            && (state.pieces_x != PIECES_PER_SIDE || state.pieces_o != PIECES_PER_SIDE)
        {
            return Err(EngineError::malformed("move phase before all pieces are dropped"));
        }
        Ok(())
    }
}
