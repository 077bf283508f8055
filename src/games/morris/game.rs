//! Three Men's Morris: placement phase, sliding phase, three in a line.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{EngineError, EngineResult, IllegalAction, PlayerId, PlayerMap};
use crate::games::grid::{self, Grid, CELLS, PIECES_PER_SIDE};
use crate::rules::{GameResult, RulesEngine};

/// Points connected by a drawn line. Edge midpoints do not touch each other.
pub const ADJACENCY: [&[usize]; CELLS] = [
    &[1, 3, 4],
    &[0, 2, 4],
    &[1, 5, 4],
    &[0, 6, 4],
    &[0, 1, 2, 3, 5, 6, 7, 8],
    &[2, 8, 4],
    &[3, 7, 4],
    &[6, 8, 4],
    &[5, 7, 4],
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MorrisPhase {
    #[default]
    Placing,
    Moving,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorrisState {
    #[serde(default)]
    pub board: Grid<PlayerId>,
    pub turn: PlayerId,
    #[serde(default)]
    pub phase: MorrisPhase,
    pub pieces_placed: PlayerMap<u8>,
    #[serde(default)]
    pub winner: Option<PlayerId>,
    #[serde(default)]
    pub log: String,
}

impl Default for MorrisState {
    fn default() -> Self {
        Self {
            board: [None; CELLS],
            turn: PlayerId::new(0),
            phase: MorrisPhase::Placing,
            pieces_placed: PlayerMap::with_value(0),
            winner: None,
            log: "Game Started: Place your pieces".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MorrisAction {
    Place(usize),
    Move { from: usize, to: usize },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MorrisGame;

impl MorrisGame {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn place(state: &mut MorrisState, player: PlayerId, idx: usize) -> EngineResult<()> {
        if state.phase != MorrisPhase::Placing {
            return Err(IllegalAction::WrongPhase.into());
        }
        let idx = grid::check_cell(idx)?;
        if state.board[idx].is_some() {
            return Err(IllegalAction::Occupied.into());
        }
        if state.pieces_placed[player] >= PIECES_PER_SIDE {
            return Err(IllegalAction::PieceLimit.into());
        }

        state.board[idx] = Some(player);
        state.pieces_placed[player] += 1;
        state.log = format!("{player} placed a piece");

        if state.pieces_placed.iter().all(|(_, &n)| n == PIECES_PER_SIDE) {
            state.phase = MorrisPhase::Moving;
            state.log = "All pieces placed. Movement phase!".to_string();
        }
        Ok(())
    }

    fn slide(state: &mut MorrisState, player: PlayerId, from: usize, to: usize) -> EngineResult<()> {
        if state.phase != MorrisPhase::Moving {
            return Err(IllegalAction::WrongPhase.into());
        }
        let from = grid::check_cell(from)?;
        let to = grid::check_cell(to)?;
        if state.board[from] != Some(player) {
            return Err(IllegalAction::NotYourPiece.into());
        }
        if state.board[to].is_some() {
            return Err(IllegalAction::Occupied.into());
        }
        if !ADJACENCY[from].contains(&to) {
            return Err(IllegalAction::NotAdjacent.into());
        }

        state.board[from] = None;
        state.board[to] = Some(player);
        state.log = format!("{player} moved");
        Ok(())
    }
}

impl RulesEngine for MorrisGame {
    type State = MorrisState;
    type Action = MorrisAction;

    fn name(&self) -> &'static str {
        "morris"
    }

    fn initial_state(&self, _seed: u64) -> MorrisState {
        MorrisState::default()
    }

    fn active_player(&self, state: &MorrisState) -> Option<PlayerId> {
        match state.winner {
            Some(_) => None,
            None => Some(state.turn),
        }
    }

    fn legal_actions(&self, state: &MorrisState, player: PlayerId) -> Vec<MorrisAction> {
        if self.active_player(state) != Some(player) {
            return vec![];
        }
        match state.phase {
            MorrisPhase::Placing if state.pieces_placed[player] < PIECES_PER_SIDE => {
                grid::empty_cells(&state.board).map(MorrisAction::Place).collect()
            }
            MorrisPhase::Placing => vec![],
            MorrisPhase::Moving => grid::cells_of(&state.board, player)
                .flat_map(|from| {
                    ADJACENCY[from]
                        .iter()
                        .filter(|&&to| state.board[to].is_none())
                        .map(move |&to| MorrisAction::Move { from, to })
                })
                .collect(),
        }
    }

    fn apply_action(
        &self,
        state: &MorrisState,
        player: PlayerId,
        action: &MorrisAction,
    ) -> EngineResult<MorrisState> {
        if state.winner.is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        if player != state.turn {
            return Err(IllegalAction::NotYourTurn.into());
        }

        let mut next = state.clone();
        match *action {
            MorrisAction::Place(idx) => Self::place(&mut next, player, idx)?,
            MorrisAction::Move { from, to } => Self::slide(&mut next, player, from, to)?,
        }
        debug!(%player, ?action, phase = ?next.phase, "morris action");

        if let Some(winner) = grid::line_owner(&next.board) {
            next.winner = Some(winner);
            next.log = format!("{winner} Wins!");
            info!(%winner, "morris game finished");
        } else {
            next.turn = player.opponent();
        }
        Ok(next)
    }

    fn is_terminal(&self, state: &MorrisState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }

    fn validate(&self, state: &MorrisState) -> EngineResult<()> {
        if !state.turn.is_seat() || state.pieces_placed.len() != 2 {
            return Err(EngineError::malformed("morris table needs two seats"));
        }
        for (player, &placed) in state.pieces_placed.iter() {
            let on_board = grid::cells_of(&state.board, player).count();
            if placed > PIECES_PER_SIDE || on_board != placed as usize {
                return Err(EngineError::malformed(format!(
                    "{player} placed {placed} pieces but has {on_board} on the board"
                )));
            }
        }
        if state.phase == MorrisPhase::Moving
            && state.pieces_placed.iter().any(|(_, &n)| n != PIECES_PER_SIDE)
        {
            return Err(EngineError::malformed("moving phase before all pieces are placed"));
        }
        Ok(())
    }
}
