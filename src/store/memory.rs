//! In-process store backend.

use parking_lot::{Mutex, ReentrantMutex};
use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

use super::error::{StoreError, StoreResult};
use super::{Callback, StateStore, Subscription, Versioned};

type Listener = Arc<dyn Fn(&Versioned<Vec<u8>>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    entries: Mutex<FxHashMap<String, Versioned<Vec<u8>>>>,
    listeners: Mutex<FxHashMap<String, FxHashMap<u64, Listener>>>,
    next_token: AtomicU64,
}

impl Inner {
    /// Run every listener on `key`. Called with no lock held so listeners
    /// may read or write the store.
    fn notify(&self, key: &str, value: &Versioned<Vec<u8>>) {
        let listeners: Vec<Listener> = match self.listeners.lock().get(key) {
            Some(registered) => registered.values().cloned().collect(),
            None => return,
        };
        for listener in listeners {
            listener(value);
        }
    }

    fn unregister(&self, key: &str, token: u64) {
        let mut listeners = self.listeners.lock();
        if let Some(registered) = listeners.get_mut(key) {
            registered.remove(&token);
            if registered.is_empty() {
                listeners.remove(key);
            }
        }
    }
}

/// Thread-safe in-memory [`StateStore`]. Clones share the same data.
///
/// A listener sees each version of its key at most once and in increasing
/// order, even with writers on several threads. Versions superseded before
/// delivery are skipped.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners on `key`.
    #[must_use]
    pub fn listener_count(&self, key: &str) -> usize {
        self.inner.listeners.lock().get(key).map_or(0, |l| l.len())
    }

    fn put(&self, key: &str, bytes: Vec<u8>, expected: Option<Option<u64>>) -> StoreResult<Versioned<Vec<u8>>> {
        let written = {
            let mut entries = self.inner.entries.lock();
            let found = entries.get(key).map(|v| v.version);
            if let Some(expected) = expected {
                if found != expected {
                    warn!(key, ?expected, ?found, "store write conflict");
                    return Err(StoreError::Conflict {
                        key: key.to_string(),
                        expected,
                        found,
                    });
                }
            }
            let written = Versioned {
                value: bytes,
                version: found.unwrap_or(0) + 1,
            };
            entries.insert(key.to_string(), written.clone());
            written
        };
        debug!(key, version = written.version, bytes = written.value.len(), "store write");
        self.inner.notify(key, &written);
        Ok(written)
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Versioned<Vec<u8>>>> {
        Ok(self.inner.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: Vec<u8>) -> StoreResult<u64> {
        self.put(key, bytes, None).map(|v| v.version)
    }

    fn write_if_version(&self, key: &str, bytes: Vec<u8>, expected: Option<u64>) -> StoreResult<u64> {
        self.put(key, bytes, Some(expected)).map(|v| v.version)
    }

    fn subscribe(&self, key: &str, callback: Callback) -> Subscription {
        // Writers on other threads notify concurrently. Deliveries to one
        // listener are serialized and only versions newer than the last one
        // delivered get through. Reentrant so a listener may write its own key.
        let last_seen = ReentrantMutex::new(Cell::new(0u64));
        let listener: Listener = Arc::new(move |value: &Versioned<Vec<u8>>| {
            let last = last_seen.lock();
            if value.version > last.get() {
                last.set(value.version);
                callback(value);
            }
        });
        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);

        // Lock order: entries, then listeners.
        let current = {
            let entries = self.inner.entries.lock();
            self.inner
                .listeners
                .lock()
                .entry(key.to_string())
                .or_default()
                .insert(token, listener.clone());
            entries.get(key).cloned()
        };
        if let Some(current) = current {
            listener(&current);
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let key = key.to_string();
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.unregister(&key, token);
            }
        })
    }

    fn atomic_increment(&self, key: &str) -> StoreResult<u64> {
        let (count, written) = {
            let mut entries = self.inner.entries.lock();
            let (current, version) = match entries.get(key) {
                Some(stored) => {
                    let text = std::str::from_utf8(&stored.value).map_err(StoreError::codec)?;
                    let count: u64 = text.trim().parse().map_err(StoreError::codec)?;
                    (count, stored.version)
                }
                None => (0, 0),
            };
            let count = current + 1;
            let written = Versioned {
                value: count.to_string().into_bytes(),
                version: version + 1,
            };
            entries.insert(key.to_string(), written.clone());
            (count, written)
        };
        self.inner.notify(key, &written);
        Ok(count)
    }
}
