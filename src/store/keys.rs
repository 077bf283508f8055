//! Storage keys for live games and score counters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::PlayerId;

/// Which game a stored snapshot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameKind {
    Uno,
    Chess,
    Morris,
    TttMove,
    Partshi,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Uno,
        GameKind::Chess,
        GameKind::Morris,
        GameKind::TttMove,
        GameKind::Partshi,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameKind::Uno => "UNO",
            GameKind::Chess => "CHESS",
            GameKind::Morris => "MORRIS",
            GameKind::TttMove => "TTT_MOVE",
            GameKind::Partshi => "PARTSHI",
        }
    }

    /// Key of a room's live state. UNO owns the bare room key.
    ///
    /// ```
    /// use duel_engines::store::GameKind;
    ///
    /// assert_eq!(GameKind::Uno.state_key("den"), "games/den");
    /// assert_eq!(GameKind::TttMove.state_key("den"), "games/den_TTT_MOVE");
    /// ```
    #[must_use]
    pub fn state_key(self, room: &str) -> String {
        match self {
            GameKind::Uno => format!("games/{room}"),
            kind => format!("games/{room}_{}", kind.as_str()),
        }
    }

    /// Key of a seat's win counter in a room.
    #[must_use]
    pub fn score_key(self, room: &str, seat: PlayerId) -> String {
        format!("config/{room}/scores/{}/{}", self.as_str(), seat.0)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
