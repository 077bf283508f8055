//! Game configuration types.
//!
//! Rule variants that house rules disagree on are modelled as
//! explicit policies chosen when a game is created:
//! - `WinPolicy`: UNO win vs. draw-penalty ordering
//! - `MoveRule`: TTT-Move movement adjacency
//! - `SixReroll`: Partshi re-roll on an unusable six
//!
//! The option structs are serializable so a table's rule set can be stored
//! next to its state.

use serde::{Deserialize, Serialize};

/// Order in which an emptied hand and a draw penalty resolve in UNO.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinPolicy {
    /// The game ends as soon as the hand is empty; the penalty is dropped.
    #[default]
    WinBeforePenalty,
    /// The next player draws the penalty cards, then the game ends.
    PenaltyBeforeWin,
}

/// Where a TTT-Move piece may go in the move phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRule {
    /// One king's step: orthogonal or diagonal neighbour.
    #[default]
    KingStep,
    /// Any empty cell.
    Free,
}

/// Whether a Partshi six that no piece can use still grants a re-roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SixReroll {
    /// Every six grants another roll.
    #[default]
    Always,
    /// A six grants another roll only when a piece actually moved.
    AfterMoveOnly,
}

/// UNO table options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnoOptions {
    /// Cards dealt to each player.
    pub hand_size: usize,
    /// Display names for seat 0 and seat 1.
    pub names: [String; 2],
    pub win_policy: WinPolicy,
}

impl Default for UnoOptions {
    fn default() -> Self {
        Self {
            hand_size: 7,
            names: ["Player 1".to_string(), "Player 2".to_string()],
            win_policy: WinPolicy::default(),
        }
    }
}

impl UnoOptions {
    /// Largest hand the deal supports. Two hands of 49 leave nine cards
    /// undealt, more than the eight wilds, so a colored card is always
    /// left to draw.
    pub const MAX_HAND_SIZE: usize = 49;

    /// Set the penalty ordering policy.
    #[must_use]
    pub fn with_win_policy(mut self, policy: WinPolicy) -> Self {
        self.win_policy = policy;
        self
    }

    /// Set the number of cards dealt per player. Sizes above
    /// [`MAX_HAND_SIZE`](Self::MAX_HAND_SIZE) are capped when the game is
    /// created.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }
}

/// TTT-Move options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TttMoveOptions {
    pub move_rule: MoveRule,
}

/// Partshi options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartshiOptions {
    pub six_reroll: SixReroll,
}
