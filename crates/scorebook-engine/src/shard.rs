//! Per-key serialisation units.
//!
//! Every mutation of one innings (record, undo, recompute, status change)
//! runs while holding that innings' shard. Different keys never contend.
//! A closed innings gives its shard back; match shards live as long as
//! the fixture list.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lazily created mutex per key.
#[derive(Debug)]
pub struct ShardLocks<K> {
    shards: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Copy + Eq + Hash> ShardLocks<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shards: Mutex::new(HashMap::new()),
        }
    }

    /// The lock for `key`, created on first use.
    pub fn shard(&self, key: K) -> Arc<Mutex<()>> {
        Arc::clone(self.shards.lock().entry(key).or_default())
    }

    /// Run `f` while holding the shard for `key`.
    pub fn with<T>(&self, key: K, f: impl FnOnce() -> T) -> T {
        let shard = self.shard(key);
        let _guard = shard.lock();
        f()
    }

    /// Forget the shard for `key`. Holders of the old lock keep it; the
    /// next `shard` call creates a fresh one, so only drop keys whose
    /// state can no longer change.
    pub fn remove(&self, key: K) {
        self.shards.lock().remove(&key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Copy + Eq + Hash> Default for ShardLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}
