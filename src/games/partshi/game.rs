//! Partshi turns: rolling, moving, captures and extra rolls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{next_position, Position, ENTRY_ROLL, PIECES};
use crate::core::{
    EngineError, EngineResult, GameRng, GameRngState, IllegalAction, PartshiOptions, PlayerId,
    PlayerMap, SixReroll,
};
use crate::rules::{GameResult, RulesEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartshiPiece {
    pub id: u8,
    #[serde(default)]
    pub position: Position,
}

impl PartshiPiece {
    /// Rebuild a piece from the legacy numeric position.
    #[must_use]
    pub fn from_legacy(id: u8, raw: i32) -> Option<Self> {
        Position::decode(raw).map(|position| Self { id, position })
    }
}

fn base_pieces() -> [PartshiPiece; PIECES] {
    std::array::from_fn(|id| PartshiPiece {
        id: id as u8,
        position: Position::Base,
    })
}

fn ready_to_roll() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartshiState {
    pub players: PlayerMap<[PartshiPiece; PIECES]>,
    pub turn: PlayerId,
    /// Last roll, waiting to be spent on a move.
    #[serde(default)]
    pub dice: Option<u8>,
    #[serde(default = "ready_to_roll")]
    pub can_roll: bool,
    #[serde(default)]
    pub winner: Option<PlayerId>,
    #[serde(default)]
    pub log: String,
    pub rng: GameRngState,
}

impl PartshiState {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            players: PlayerMap::new(|_| base_pieces()),
            turn: PlayerId::new(0),
            dice: None,
            can_roll: true,
            winner: None,
            log: "Game Started: Roll the dice!".to_string(),
            rng: GameRngState::from_seed(seed),
        }
    }

    #[must_use]
    pub fn pieces(&self, player: PlayerId) -> &[PartshiPiece; PIECES] {
        &self.players[player]
    }

    /// Whether any of `player`'s pieces can travel `roll` steps.
    #[must_use]
    pub fn can_use_roll(&self, player: PlayerId, roll: u8) -> bool {
        self.players[player]
            .iter()
            .any(|p| next_position(p.position, roll, player).is_some())
    }

    fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.dice = None;
        self.can_roll = true;
    }

    fn check_can_act(&self, player: PlayerId) -> EngineResult<()> {
        if self.winner.is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        if player != self.turn {
            return Err(IllegalAction::NotYourTurn.into());
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartshiAction {
    Roll,
    /// Spend the current roll on the piece with this id.
    Move(u8),
}

/// Partshi rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartshiGame {
    options: PartshiOptions,
}

/// Builder for creating a PartshiGame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartshiGameBuilder {
    options: PartshiOptions,
}

impl PartshiGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn six_reroll(mut self, policy: SixReroll) -> Self {
        self.options.six_reroll = policy;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> (PartshiGame, PartshiState) {
        let game = PartshiGame::new(self.options);
        let state = game.initial_state(seed);
        (game, state)
    }
}

impl PartshiGame {
    #[must_use]
    pub fn new(options: PartshiOptions) -> Self {
        Self { options }
    }

    /// Roll the die from the state's own RNG.
    pub fn apply_roll(&self, state: &PartshiState, player: PlayerId) -> EngineResult<PartshiState> {
        state.check_can_act(player)?;
        if !state.can_roll {
            return Err(IllegalAction::AlreadyRolled.into());
        }
        let mut rng = GameRng::from_state(&state.rng);
        let value = rng.roll_die();
        let mut rolled = self.apply_roll_value(state, player, value)?;
        rolled.rng = rng.state();
        Ok(rolled)
    }

    /// Resolve a roll of `value`.
    ///
    /// A roll no piece can use is forfeited. The turn passes unless the
    /// roll was a six and the table grants re-rolls on unusable sixes.
    pub fn apply_roll_value(
        &self,
        state: &PartshiState,
        player: PlayerId,
        value: u8,
    ) -> EngineResult<PartshiState> {
        state.check_can_act(player)?;
        if !state.can_roll {
            return Err(IllegalAction::AlreadyRolled.into());
        }
        if !(1..=6).contains(&value) {
            return Err(IllegalAction::OutOfBounds.into());
        }

        let mut next = state.clone();
        next.dice = Some(value);
        next.can_roll = false;
        next.log = format!("Rolled a {value}");
        debug!(%player, value, "partshi roll");

        if !next.can_use_roll(player, value) {
            next.log.push_str(" - No moves!");
            if value == ENTRY_ROLL && self.options.six_reroll == SixReroll::Always {
                next.can_roll = true;
                next.log.push_str(" (Roll again)");
            } else {
                next.pass_turn();
            }
        }
        Ok(next)
    }

    /// Move `piece_id` by the pending roll.
    ///
    /// Landing on an unsafe track cell sends every opposing piece there
    /// back to base. A six or a capture earns another roll.
    pub fn apply_move(
        &self,
        state: &PartshiState,
        player: PlayerId,
        piece_id: u8,
    ) -> EngineResult<PartshiState> {
        state.check_can_act(player)?;
        let roll = match state.dice {
            Some(roll) if !state.can_roll => roll,
            _ => return Err(IllegalAction::MustRoll.into()),
        };
        let slot = state.players[player]
            .iter()
            .position(|p| p.id == piece_id)
            .ok_or(IllegalAction::NoSuchPiece)?;

        let from = state.players[player][slot].position;
        let to = match from {
            Position::Base if roll != ENTRY_ROLL => return Err(IllegalAction::NeedSix.into()),
            Position::Goal => return Err(IllegalAction::IllegalMove.into()),
            _ => next_position(from, roll, player).ok_or(IllegalAction::Overshoot)?,
        };

        let mut next = state.clone();
        let opponent = player.opponent();
        let mut captured = 0;
        if matches!(to, Position::Track(_)) && !to.is_safe() {
            for victim in next.players[opponent].iter_mut().filter(|p| p.position == to) {
                victim.position = Position::Base;
                captured += 1;
            }
        }
        next.players[player][slot].position = to;
        debug!(%player, piece_id, ?from, ?to, captured, "partshi move");

        if next.players[player].iter().all(|p| p.position == Position::Goal) {
            next.winner = Some(player);
            next.can_roll = false;
            next.log = format!("{player} Wins!");
            info!(winner = %player, "partshi game finished");
            return Ok(next);
        }

        next.log = format!("{player} moved piece {piece_id}");
        if captured > 0 {
            next.log.push_str(" - Captured!");
        }
        if roll == ENTRY_ROLL || captured > 0 {
            next.dice = None;
            next.can_roll = true;
            next.log.push_str(" Roll again!");
        } else {
            next.pass_turn();
        }
        Ok(next)
    }
}

impl RulesEngine for PartshiGame {
    type State = PartshiState;
    type Action = PartshiAction;

    fn name(&self) -> &'static str {
        "partshi"
    }

    fn initial_state(&self, seed: u64) -> PartshiState {
        PartshiState::new(seed)
    }

    fn active_player(&self, state: &PartshiState) -> Option<PlayerId> {
        match state.winner {
            Some(_) => None,
            None => Some(state.turn),
        }
    }

    fn legal_actions(&self, state: &PartshiState, player: PlayerId) -> Vec<PartshiAction> {
        if state.check_can_act(player).is_err() {
            return vec![];
        }
        if state.can_roll {
            return vec![PartshiAction::Roll];
        }
        let Some(roll) = state.dice else {
            return vec![];
        };
        state.players[player]
            .iter()
            .filter(|p| next_position(p.position, roll, player).is_some())
            .map(|p| PartshiAction::Move(p.id))
            .collect()
    }

    fn apply_action(
        &self,
        state: &PartshiState,
        player: PlayerId,
        action: &PartshiAction,
    ) -> EngineResult<PartshiState> {
        match *action {
            PartshiAction::Roll => self.apply_roll(state, player),
            PartshiAction::Move(piece_id) => self.apply_move(state, player, piece_id),
        }
    }

    fn is_terminal(&self, state: &PartshiState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }

    fn validate(&self, state: &PartshiState) -> EngineResult<()> {
        if state.players.len() != 2 || !state.turn.is_seat() {
            return Err(EngineError::malformed("partshi table needs two seats"));
        }
        for (player, pieces) in state.players.iter() {
            for (slot, piece) in pieces.iter().enumerate() {
                if piece.id as usize != slot {
                    return Err(EngineError::malformed(format!(
                        "{player} piece in slot {slot} has id {}",
                        piece.id
                    )));
                }
                if !piece.position.is_valid() {
                    return Err(EngineError::malformed(format!(
                        "{player} piece {} at {:?}",
                        piece.id, piece.position
                    )));
                }
            }
        }
        if state.dice.is_some_and(|d| !(1..=6).contains(&d)) {
            return Err(EngineError::malformed("dice out of range"));
        }
        if state.winner.is_none() && !state.can_roll && state.dice.is_none() {
            return Err(EngineError::malformed("waiting for a move without a roll"));
        }
        Ok(())
    }
}
