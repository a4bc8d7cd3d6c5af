//! Sharded map of weak references.

use crate::handle::{Cached, Slot};
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, Weak};

// Enough to keep unrelated keys off each other's locks for a handful of
// build threads, without making `len()`/`clear()` expensive.
const SHARD_COUNT: usize = 16;

type Shard<K, V> = RwLock<HashMap<K, Weak<Slot<K, V>>>>;

pub(crate) struct Shards<K: Eq + Hash, V> {
    hasher: RandomState,
    shards: Box<[Shard<K, V>]>,
}
impl<K: Eq + Hash, V> Shards<K, V> {
    fn shard_for<Q>(&self, key: &Q) -> &Shard<K, V>
    where
        Q: Hash + ?Sized,
    {
        let index = self.hasher.hash_one(key) as usize % self.shards.len();
        &self.shards[index]
    }

    /// Remove the entry for `key`, but only if its value has no owners left.
    ///
    /// A newer value inserted under the same key after the old one died must
    /// survive the old value's finalizer.
    pub(crate) fn evict_dead(&self, key: &K) {
        let mut shard = self.shard_for(key).write();
        if shard.get(key).is_some_and(|weak| weak.strong_count() == 0) {
            shard.remove(key);
            tracing::trace!("Evicted unreferenced cache entry");
        }
    }
}

/// Concurrent associative cache that holds its values weakly.
///
/// Values are handed out as [`Cached`] handles. The cache itself only keeps a
/// [`Weak`] back-reference, so an entry lives exactly as long as somebody
/// outside the cache holds a handle to it; when the last handle is dropped
/// the entry removes itself. A lookup never resurrects a dropped value.
///
/// Keys are spread over independently locked shards, so operations on
/// unrelated keys rarely contend. All operations take `&self` and are safe to
/// call from any number of threads.
///
/// # Examples
///
/// ```
/// use jsinc_cache::WeakCache;
///
/// let cache = WeakCache::new();
/// let handle = cache.insert("answer", 42);
/// assert_eq!(cache.get("answer").as_deref(), Some(&42));
///
/// drop(handle);
/// assert!(cache.get("answer").is_none());
/// ```
pub struct WeakCache<K: Eq + Hash, V> {
    inner: Arc<Shards<K, V>>,
}
impl<K: Eq + Hash, V> WeakCache<K, V> {
    pub fn new() -> Self {
        let shards = (0..SHARD_COUNT).map(|_| RwLock::new(HashMap::new())).collect();
        Self {
            inner: Arc::new(Shards { hasher: RandomState::new(), shards }),
        }
    }

    /// Look up a live value.
    ///
    /// Returns [`None`] both for keys that were never inserted and for keys
    /// whose value has since been dropped.
    pub fn get<Q>(&self, key: &Q) -> Option<Cached<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // The upgraded handle leaves the read guard's scope before anyone can
        // drop it, so a finalizer never runs under this shard's lock.
        let slot = self.inner.shard_for(key).read().get(key)?.upgrade()?;
        Some(Cached(slot))
    }

    /// Insert `value` under `key`, replacing any previous mapping, and return
    /// the first handle to it.
    ///
    /// Racing inserts for one key resolve last-write-wins. A replaced value
    /// that is still held elsewhere stays valid for its holders; it is just no
    /// longer reachable through the cache.
    pub fn insert(&self, key: K, value: V) -> Cached<K, V>
    where
        K: Clone,
    {
        let slot = Arc::new(Slot {
            key: key.clone(),
            value,
            home: Arc::downgrade(&self.inner),
        });
        // Replacing only drops a `Weak`, which never runs a finalizer.
        self.inner.shard_for(&key).write().insert(key, Arc::downgrade(&slot));
        Cached(slot)
    }

    /// Remove every mapping. Outstanding handles remain valid.
    pub fn clear(&self) {
        for shard in self.inner.shards.iter() {
            shard.write().clear();
        }
    }

    /// Number of entries whose value is still alive.
    pub fn len(&self) -> usize {
        self.inner
            .shards
            .iter()
            .map(|shard| shard.read().values().filter(|weak| weak.strong_count() > 0).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl<K: Eq + Hash, V> Default for WeakCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
impl<K: Eq + Hash, V> fmt::Debug for WeakCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakCache").field("live", &self.len()).finish_non_exhaustive()
    }
}
