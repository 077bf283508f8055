//! Seats and per-seat data.
//!
//! Every engine in this crate is a two-seat game. Seat 0 moves first
//! unless the engine says otherwise (TTT-Move picks the opener at random).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of seats at every table.
pub const SEATS: usize = 2;

/// Seat identifier, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use duel_engines::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// False for ids decoded from a snapshot that name no seat.
    #[must_use]
    pub const fn is_seat(self) -> bool {
        (self.0 as usize) < SEATS
    }

    /// Seat 0 then seat 1.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexable by [`PlayerId`].
///
/// Stored as a plain list so snapshots read `[seat0, seat1]`. A decoded
/// map can hold the wrong number of entries; engines reject that in
/// `validate` before indexing.
///
/// ```
/// use duel_engines::core::{PlayerId, PlayerMap};
///
/// let mut placed: PlayerMap<u8> = PlayerMap::with_value(0);
/// placed[PlayerId::new(1)] += 1;
/// assert_eq!(placed[PlayerId::new(0)], 0);
/// assert_eq!(placed[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    pub fn new(per_seat: impl Fn(PlayerId) -> T) -> Self {
        Self {
            seats: PlayerId::all().map(per_seat).collect(),
        }
    }

    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Entries held. Anything but [`SEATS`] means a malformed snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats() {
        let seats: Vec<_> = PlayerId::all().collect();
        assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1)]);
        assert_eq!(PlayerId::new(1).to_string(), "Player 1");
        assert!(PlayerId::new(1).is_seat());
        assert!(!PlayerId::new(2).is_seat());
    }

    #[test]
    fn test_map_by_seat() {
        let mut pieces: PlayerMap<u8> = PlayerMap::new(|p| p.0 * 3);
        pieces[PlayerId::new(0)] += 1;

        let pairs: Vec<_> = pieces.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &1), (PlayerId::new(1), &3)]);
        assert_eq!(pieces.len(), SEATS);
    }

    #[test]
    fn test_snapshot_shape() {
        let names = PlayerMap::new(|p| format!("P{}", p.0));
        assert_eq!(serde_json::to_string(&names).unwrap(), r#"["P0","P1"]"#);

        let short: PlayerMap<u8> = serde_json::from_str("[3]").unwrap();
        assert_eq!(short.len(), 1);
    }
}
