//! UNO cards, deck construction and the play-validity rule.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 108;

/// The four playable colors, in deck-building order.
pub const COLORS: [CardColor; 4] = [
    CardColor::Red,
    CardColor::Blue,
    CardColor::Green,
    CardColor::Yellow,
];

/// Unique card token within one game. Assigned densely at deck creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardColor {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardColor::Red => "Red",
            CardColor::Blue => "Blue",
            CardColor::Green => "Green",
            CardColor::Yellow => "Yellow",
            CardColor::Wild => "Wild",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardValue {
    /// 0 through 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardValue {
    /// Cards the next player must draw when this card is played.
    #[must_use]
    pub const fn penalty(self) -> usize {
        match self {
            CardValue::DrawTwo => 2,
            CardValue::WildDrawFour => 4,
            _ => 0,
        }
    }

    /// Whether playing this card skips the next seat.
    ///
    /// Reverse skips as well: with two players there is nobody to reverse
    /// towards.
    #[must_use]
    pub const fn skips_next(self) -> bool {
        matches!(
            self,
            CardValue::Skip | CardValue::Reverse | CardValue::DrawTwo | CardValue::WildDrawFour
        )
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardValue::Number(n) => write!(f, "{n}"),
            CardValue::Skip => f.write_str("Skip"),
            CardValue::Reverse => f.write_str("Reverse"),
            CardValue::DrawTwo => f.write_str("Draw Two"),
            CardValue::Wild => f.write_str("Wild"),
            CardValue::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

/// An immutable card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: CardColor,
    pub value: CardValue,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, color: CardColor, value: CardValue) -> Self {
        Self { id, color, value }
    }

    #[must_use]
    pub const fn is_wild(&self) -> bool {
        matches!(self.color, CardColor::Wild)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wild() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.color, self.value)
        }
    }
}

/// Build the 108 cards in a fixed order.
///
/// Per color: one 0, then two each of 1-9, Skip, Reverse and Draw Two.
/// Then four Wild and four Wild Draw Four.
#[must_use]
pub fn ordered_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    let mut next_id = 0u8;
    let mut push = |deck: &mut Vec<Card>, color, value| {
        deck.push(Card::new(CardId(next_id), color, value));
        next_id += 1;
    };

    for color in COLORS {
        push(&mut deck, color, CardValue::Number(0));
        let doubled = (1..=9)
            .map(CardValue::Number)
            .chain([CardValue::Skip, CardValue::Reverse, CardValue::DrawTwo]);
        for value in doubled {
            push(&mut deck, color, value);
            push(&mut deck, color, value);
        }
    }

    for _ in 0..4 {
        push(&mut deck, CardColor::Wild, CardValue::Wild);
        push(&mut deck, CardColor::Wild, CardValue::WildDrawFour);
    }

    deck
}

/// Build and shuffle a full deck. The top of the deck is the back.
#[must_use]
pub fn create_deck(rng: &mut GameRng) -> Vector<Card> {
    let mut deck = ordered_deck();
    rng.shuffle(&mut deck);
    deck.into_iter().collect()
}

/// Whether `card` may be played on `top` while `active_color` is in force.
///
/// A wild card is always playable. Otherwise the card must match the
/// active color or the top card's value. Matching the top card's printed
/// color is not enough once a wild has declared a different color.
#[must_use]
pub fn is_valid_move(card: &Card, top: &Card, active_color: CardColor) -> bool {
    card.is_wild() || card.color == active_color || card.value == top.value
}
