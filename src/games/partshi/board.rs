//! Track geometry: the shared 52-cell ring, per-seat home paths and the
//! legacy numeric position encoding.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

pub const TRACK_LEN: u8 = 52;

/// Cells on a home path before the goal.
pub const HOME_LEN: u8 = 6;

pub const PIECES: usize = 4;

/// Track cells where nobody can be captured.
pub const SAFE_SPOTS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Roll needed to bring a piece out of base.
pub const ENTRY_ROLL: u8 = 6;

const LEGACY_BASE: i32 = -1;
const LEGACY_GOAL: i32 = 999;

/// Where a piece stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Base,
    /// Shared ring, `0..52`.
    Track(u8),
    /// Private run-in, `0..6`.
    HomePath(u8),
    Goal,
}

impl Position {
    /// Legacy store encoding: base -1, track 0..51, home path 100+i for
    /// seat 0 and 200+i for seat 1, goal 999.
    #[must_use]
    pub fn encode(self, seat: PlayerId) -> i32 {
        match self {
            Position::Base => LEGACY_BASE,
            Position::Track(cell) => i32::from(cell),
            Position::HomePath(i) => home_offset(seat) + i32::from(i),
            Position::Goal => LEGACY_GOAL,
        }
    }

    /// Inverse of [`encode`](Self::encode). The home-path hundreds digit
    /// only identifies the seat, so either offset decodes.
    #[must_use]
    pub fn decode(raw: i32) -> Option<Self> {
        match raw {
            LEGACY_BASE => Some(Position::Base),
            LEGACY_GOAL => Some(Position::Goal),
            0..=51 => Some(Position::Track(raw as u8)),
            100..=105 => Some(Position::HomePath((raw - 100) as u8)),
            200..=205 => Some(Position::HomePath((raw - 200) as u8)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_safe(self) -> bool {
        matches!(self, Position::Track(cell) if SAFE_SPOTS.contains(&cell))
    }

    /// Whether the coordinates are in range.
    #[must_use]
    pub fn is_valid(self) -> bool {
        match self {
            Position::Track(cell) => cell < TRACK_LEN,
            Position::HomePath(i) => i < HOME_LEN,
            Position::Base | Position::Goal => true,
        }
    }
}

fn home_offset(seat: PlayerId) -> i32 {
    match seat.0 {
        0 => 100,
        _ => 200,
    }
}

/// Track cell a seat enters on.
#[must_use]
pub const fn start_cell(seat: PlayerId) -> u8 {
    match seat.0 {
        0 => 0,
        _ => 26,
    }
}

/// Last track cell before a seat turns into its home path.
#[must_use]
pub const fn home_entry(seat: PlayerId) -> u8 {
    match seat.0 {
        0 => 50,
        _ => 24,
    }
}

/// Where a piece at `pos` lands after `steps`, or `None` when it cannot
/// move that far.
///
/// ```
/// use duel_engines::core::PlayerId;
/// use duel_engines::games::partshi::{next_position, Position};
///
/// let seat = PlayerId::new(0);
/// assert_eq!(next_position(Position::Base, 6, seat), Some(Position::Track(0)));
/// assert_eq!(next_position(Position::Track(48), 5, seat), Some(Position::HomePath(2)));
/// assert_eq!(next_position(Position::HomePath(4), 3, seat), None);
/// ```
#[must_use]
pub fn next_position(pos: Position, steps: u8, seat: PlayerId) -> Option<Position> {
    match pos {
        Position::Base if steps == ENTRY_ROLL => Some(Position::Track(start_cell(seat))),
        Position::Base | Position::Goal => None,
        Position::HomePath(i) => {
            let target = i + steps;
            match target.cmp(&HOME_LEN) {
                std::cmp::Ordering::Less => Some(Position::HomePath(target)),
                std::cmp::Ordering::Equal => Some(Position::Goal),
                std::cmp::Ordering::Greater => None,
            }
        }
        Position::Track(cell) => {
            let to_entry = (i32::from(home_entry(seat)) - i32::from(cell)).rem_euclid(i32::from(TRACK_LEN));
            let steps_i = i32::from(steps);
            if steps_i > to_entry {
                let into_home = steps_i - to_entry - 1;
                (into_home < i32::from(HOME_LEN)).then(|| Position::HomePath(into_home as u8))
            } else {
                Some(Position::Track((cell + steps) % TRACK_LEN))
            }
        }
    }
}
