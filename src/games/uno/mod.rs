//! Two-player UNO.
//!
//! - 108-card deck, 7-card hands, first discard is never a wild
//! - A card plays on the discard pile if it is wild, matches the active
//!   color, or matches the top card's value
//! - Skip, Reverse, Draw Two and Wild Draw Four all skip the opponent
//!   (Reverse has no one else to hand the turn to)
//! - Emptying your hand wins; whether a final Draw Two still hits the
//!   opponent is decided by [`WinPolicy`](crate::core::WinPolicy)

mod card;
mod game;

pub use card::{
    create_deck, is_valid_move, ordered_deck, Card, CardColor, CardId, CardValue, COLORS, DECK_SIZE,
};
pub use game::{Annotation, Direction, UnoAction, UnoGame, UnoGameBuilder, UnoPlayer, UnoState, UnoStatus};
