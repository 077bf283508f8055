//! Persistence seam for live games.
//!
//! Engines never touch storage. A [`GameTable`] reads a snapshot, runs
//! the engine and writes the successor back, guarded by the version it
//! read. Two clients acting on the same snapshot cannot both win: the
//! second write fails with [`StoreError::Conflict`] and that client
//! re-reads.
//!
//! ## Layout
//!
//! - `games/{room}` and `games/{room}_{KIND}` hold live states
//! - `config/{room}/scores/{KIND}/{seat}` hold win counters
//!
//! [`MemoryStore`] is the in-process backend. Anything offering versioned
//! writes and change callbacks can implement [`StateStore`].

mod codec;
mod error;
mod keys;
mod memory;
mod table;

pub use codec::{BincodeCodec, Codec, JsonCodec};
pub use error::{StoreError, StoreResult};
pub use keys::GameKind;
pub use memory::MemoryStore;
pub use table::GameTable;

use std::fmt;

/// A value together with the version it was written at.
///
/// Versions start at 1 and grow by one per write to the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            value: f(self.value),
            version: self.version,
        }
    }
}

/// Change listener for one key.
pub type Callback = Box<dyn Fn(&Versioned<Vec<u8>>) + Send + Sync>;

/// Key-value store with versioned writes and change notification.
pub trait StateStore: Send + Sync {
    fn read(&self, key: &str) -> StoreResult<Option<Versioned<Vec<u8>>>>;

    /// Unconditional write. Returns the new version.
    fn write(&self, key: &str, bytes: Vec<u8>) -> StoreResult<u64>;

    /// Write only if the stored version is still `expected` (`None` means
    /// the key must be absent).
    fn write_if_version(&self, key: &str, bytes: Vec<u8>, expected: Option<u64>) -> StoreResult<u64>;

    /// Call `callback` with the current value, if any, and after every
    /// later write to `key`.
    fn subscribe(&self, key: &str, callback: Callback) -> Subscription;

    /// Add one to a counter, creating it at 1. Returns the new count.
    fn atomic_increment(&self, key: &str) -> StoreResult<u64>;
}

/// Handle for a registered listener. Dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches the listener"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detach now.
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
