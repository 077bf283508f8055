//! Engine error taxonomy.
//!
//! Every error is local to one attempted action. Engines return a fresh
//! state on success and leave the caller's state untouched on failure, so
//! the caller simply keeps what it had and re-prompts the same player.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an action was rejected.
///
/// Fieldless so callers and tests can match the exact reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum IllegalAction {
    #[error("the game is already over")]
    GameOver,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("action not allowed in the current phase")]
    WrongPhase,
    #[error("index is off the board")]
    OutOfBounds,
    #[error("destination is occupied")]
    Occupied,
    #[error("no piece of the acting player on the source")]
    NotYourPiece,
    #[error("destination is not connected to the source")]
    NotAdjacent,
    #[error("all pieces have already been placed")]
    PieceLimit,
    #[error("move breaks the movement rules")]
    IllegalMove,
    #[error("card is not in the player's hand")]
    CardNotInHand,
    #[error("card does not match the discard pile")]
    CardNotPlayable,
    #[error("a wild card needs a color choice")]
    ColorRequired,
    #[error("chosen color must be red, blue, green or yellow")]
    InvalidColor,
    #[error("the dice must be rolled first")]
    MustRoll,
    #[error("the dice were already rolled")]
    AlreadyRolled,
    #[error("a six is needed to leave the base")]
    NeedSix,
    #[error("no such piece")]
    NoSuchPiece,
    #[error("roll overshoots the goal")]
    Overshoot,
}

/// Engine failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The action violates the rules; state unchanged.
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    /// A snapshot read from storage does not describe a valid game.
    ///
    /// Raised at the store boundary only. Engines assume well-formed input.
    #[error("malformed state: {detail}")]
    MalformedState { detail: String },
}

impl EngineError {
    /// Build a `MalformedState` error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedState {
            detail: detail.into(),
        }
    }

    /// The rejection reason, if this is an illegal action.
    #[must_use]
    pub fn illegal(&self) -> Option<IllegalAction> {
        match self {
            Self::IllegalAction(reason) => Some(*reason),
            Self::MalformedState { .. } => None,
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_converts() {
        let err: EngineError = IllegalAction::NeedSix.into();
        assert_eq!(err.illegal(), Some(IllegalAction::NeedSix));
        assert_eq!(err.to_string(), "illegal action: a six is needed to leave the base");
    }

    #[test]
    fn test_malformed_has_no_reason() {
        let err = EngineError::malformed("board has 7 rows");
        assert_eq!(err.illegal(), None);
        assert!(err.to_string().contains("7 rows"));
    }
}
