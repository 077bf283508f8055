//! [`RulesEngine`] and the outcome type shared by all games.

use std::fmt::Debug;

use crate::core::error::EngineResult;
use crate::core::player::PlayerId;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    Winner(PlayerId),
    /// Chess stalemate. No other game here can end level.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(seat) => Some(seat),
            GameResult::Draw => None,
        }
    }
}

/// Rules of one game.
///
/// `apply_action` is pure: it borrows the state and returns a successor,
/// so a rejected action leaves the caller holding the untouched input.
/// Engines assume states passed in have been through [`validate`] once
/// if they came from storage.
///
/// [`validate`]: RulesEngine::validate
pub trait RulesEngine {
    /// Immutable snapshot of one game.
    type State: Clone;
    /// A move, placement, card play or die roll.
    type Action: Clone + Debug;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// A fresh starting state. Engines that shuffle or pick a starting
    /// side derive all randomness from `seed`.
    fn initial_state(&self, seed: u64) -> Self::State;

    /// Seat expected to act next, `None` once the game is over.
    fn active_player(&self, state: &Self::State) -> Option<PlayerId>;

    /// Every action `player` may take now. Empty when it is not their
    /// turn or the game is over.
    fn legal_actions(&self, state: &Self::State, player: PlayerId) -> Vec<Self::Action>;

    /// Check `action` and produce the next state.
    fn apply_action(
        &self,
        state: &Self::State,
        player: PlayerId,
        action: &Self::Action,
    ) -> EngineResult<Self::State>;

    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;

    /// Reject a decoded snapshot that breaks the game's shape, such as
    /// a missing king or a lost card, with `MalformedState`.
    fn validate(&self, _state: &Self::State) -> EngineResult<()> {
        Ok(())
    }

    /// Apply a sequence of actions, stopping at the first rejection.
    fn apply_all<'a, I>(&self, state: &Self::State, actions: I) -> EngineResult<Self::State>
    where
        I: IntoIterator<Item = &'a (PlayerId, Self::Action)>,
        Self::Action: 'a,
    {
        let mut current = state.clone();
        for (player, action) in actions {
            current = self.apply_action(&current, *player, action)?;
        }
        Ok(current)
    }
}
