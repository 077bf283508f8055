//! Read, apply and write back one game in one room.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::codec::{Codec, JsonCodec};
use super::error::{StoreError, StoreResult};
use super::keys::GameKind;
use super::{StateStore, Subscription, Versioned};
use crate::core::{EngineError, PlayerId};
use crate::rules::{GameResult, RulesEngine};

/// One game in one room, bound to a store.
///
/// Every state read through the table is decoded and validated; every
/// action is applied against the version it was read at.
pub struct GameTable<E, S, C = JsonCodec> {
    engine: E,
    store: S,
    codec: C,
    kind: GameKind,
    room: String,
}

impl<E, S, C> GameTable<E, S, C>
where
    E: RulesEngine,
    E::State: Serialize + DeserializeOwned,
    S: StateStore,
    C: Codec,
{
    pub fn new(engine: E, store: S, codec: C, kind: GameKind, room: impl Into<String>) -> Self {
        Self {
            engine,
            store,
            codec,
            kind,
            room: room.into(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Key holding this table's state.
    pub fn key(&self) -> String {
        self.kind.state_key(&self.room)
    }

    fn decode(&self, bytes: &[u8]) -> StoreResult<E::State> {
        let state: E::State = self
            .codec
            .decode(bytes)
            .map_err(|err| EngineError::malformed(format!("{} snapshot: {err}", self.kind)))?;
        self.engine.validate(&state)?;
        Ok(state)
    }

    /// Current state, `None` when no game was started in this room.
    pub fn load(&self) -> StoreResult<Option<Versioned<E::State>>> {
        match self.store.read(&self.key())? {
            Some(stored) => {
                let state = self.decode(&stored.value)?;
                Ok(Some(Versioned {
                    value: state,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    /// Like [`load`](Self::load) but a missing game is an error.
    pub fn require(&self) -> StoreResult<Versioned<E::State>> {
        self.load()?.ok_or_else(|| StoreError::Missing { key: self.key() })
    }

    /// Start a new game, replacing whatever was there.
    pub fn start(&self, seed: u64) -> StoreResult<Versioned<E::State>> {
        let state = self.engine.initial_state(seed);
        let version = self.put(&state)?;
        info!(game = self.engine.name(), room = %self.room, seed, version, "game started");
        Ok(Versioned { value: state, version })
    }

    /// Overwrite the stored state unconditionally.
    pub fn put(&self, state: &E::State) -> StoreResult<u64> {
        let bytes = self.codec.encode(state)?;
        self.store.write(&self.key(), bytes)
    }

    /// Apply `action` for `player` to the stored state.
    ///
    /// Fails with [`StoreError::Conflict`] when another write landed
    /// between the read and the write; nothing is written in that case.
    pub fn apply(&self, player: PlayerId, action: &E::Action) -> StoreResult<Versioned<E::State>> {
        let current = self.require()?;
        self.apply_at(current, player, action)
    }

    /// Apply `action` to a state the caller already read.
    pub fn apply_at(
        &self,
        current: Versioned<E::State>,
        player: PlayerId,
        action: &E::Action,
    ) -> StoreResult<Versioned<E::State>> {
        let next = self.engine.apply_action(&current.value, player, action)?;
        let bytes = self.codec.encode(&next)?;
        let version = self
            .store
            .write_if_version(&self.key(), bytes, Some(current.version))
            .inspect_err(|err| {
                if err.is_conflict() {
                    warn!(game = self.engine.name(), room = %self.room, %player, "stale action rejected");
                }
            })?;
        debug!(game = self.engine.name(), room = %self.room, %player, ?action, version, "action stored");
        Ok(Versioned { value: next, version })
    }

    /// Count a win for `seat`. Returns the seat's new total.
    pub fn record_win(&self, seat: PlayerId) -> StoreResult<u64> {
        let total = self.store.atomic_increment(&self.kind.score_key(&self.room, seat))?;
        info!(game = self.engine.name(), room = %self.room, %seat, total, "win recorded");
        Ok(total)
    }

    /// Record the winner of `state` if it has one.
    pub fn record_result(&self, state: &E::State) -> StoreResult<Option<u64>> {
        match self.engine.is_terminal(state).and_then(GameResult::winner) {
            Some(seat) => self.record_win(seat).map(Some),
            None => Ok(None),
        }
    }

    /// Wins recorded for `seat`.
    pub fn score(&self, seat: PlayerId) -> StoreResult<u64> {
        match self.store.read(&self.kind.score_key(&self.room, seat))? {
            Some(stored) => std::str::from_utf8(&stored.value)
                .map_err(StoreError::codec)?
                .trim()
                .parse()
                .map_err(StoreError::codec),
            None => Ok(0),
        }
    }
}

impl<E, S, C> GameTable<E, S, C>
where
    E: RulesEngine + Clone + Send + Sync + 'static,
    E::State: Serialize + DeserializeOwned + 'static,
    S: StateStore + 'static,
    C: Codec + Clone + 'static,
{
    /// Call `on_change` with every valid state written to this table.
    /// Snapshots that fail to decode or validate are logged and skipped.
    pub fn watch(
        &self,
        on_change: impl Fn(Versioned<E::State>) + Send + Sync + 'static,
    ) -> Subscription {
        let engine = self.engine.clone();
        let codec = self.codec.clone();
        let kind = self.kind;
        self.store.subscribe(
            &self.key(),
            Box::new(move |stored| {
                let decoded = codec
                    .decode::<E::State>(&stored.value)
                    .and_then(|state| engine.validate(&state).map(|()| state).map_err(StoreError::from));
                match decoded {
                    Ok(state) => on_change(Versioned {
                        value: state,
                        version: stored.version,
                    }),
                    Err(err) => warn!(%kind, version = stored.version, %err, "skipping unreadable snapshot"),
                }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IllegalAction;
    use crate::games::morris::{MorrisAction, MorrisGame};
    use crate::store::MemoryStore;

    fn table() -> GameTable<MorrisGame, MemoryStore> {
        GameTable::new(MorrisGame, MemoryStore::new(), JsonCodec, GameKind::Morris, "den")
    }

    #[test]
    fn test_start_and_apply() {
        let table = table();
        assert!(table.load().unwrap().is_none());
        assert_eq!(table.start(0).unwrap().version, 1);

        let next = table.apply(PlayerId::new(0), &MorrisAction::Place(4)).unwrap();
        assert_eq!(next.version, 2);
        assert_eq!(next.value.board[4], Some(PlayerId::new(0)));
        assert_eq!(table.load().unwrap().unwrap(), next);
    }

    #[test]
    fn test_missing_game() {
        let err = table().apply(PlayerId::new(0), &MorrisAction::Place(4)).unwrap_err();
        assert_eq!(
            err,
            StoreError::Missing {
                key: "games/den_MORRIS".to_string()
            }
        );
    }

    #[test]
    fn test_illegal_action_writes_nothing() {
        let table = table();
        table.start(0).unwrap();
        let err = table.apply(PlayerId::new(1), &MorrisAction::Place(4)).unwrap_err();
        assert_eq!(err, StoreError::Engine(IllegalAction::NotYourTurn.into()));
        assert_eq!(table.load().unwrap().unwrap().version, 1);
    }

    #[test]
    fn test_stale_read_conflicts() {
        let table = table();
        table.start(0).unwrap();
        let stale = table.require().unwrap();

        table.apply(PlayerId::new(0), &MorrisAction::Place(0)).unwrap();
        let err = table
            .apply_at(stale, PlayerId::new(0), &MorrisAction::Place(8))
            .unwrap_err();
        assert!(err.is_conflict());

        let stored = table.require().unwrap();
        assert_eq!(stored.value.board[0], Some(PlayerId::new(0)));
        assert!(stored.value.board[8].is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_malformed() {
        let table = table();
        table.store().write(&table.key(), b"{\"turn\":".to_vec()).unwrap();
        assert!(matches!(
            table.load(),
            Err(StoreError::Engine(EngineError::MalformedState { .. }))
        ));
    }

    #[test]
    fn test_scores() {
        let table = table();
        assert_eq!(table.score(PlayerId::new(1)).unwrap(), 0);
        assert_eq!(table.record_win(PlayerId::new(1)).unwrap(), 1);
        assert_eq!(table.record_win(PlayerId::new(1)).unwrap(), 2);
        assert_eq!(table.score(PlayerId::new(1)).unwrap(), 2);
        assert_eq!(table.score(PlayerId::new(0)).unwrap(), 0);
    }
}
