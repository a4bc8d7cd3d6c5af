//! Owning handles to cached values.

use crate::weak::Shards;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::{Arc, Weak};

/// The allocation shared by every [`Cached`] handle of one value.
///
/// Remembers its key and the cache it was inserted into, so that dropping
/// the last handle can remove the (now dead) map entry.
pub(crate) struct Slot<K: Eq + Hash, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) home: Weak<Shards<K, V>>,
}
impl<K: Eq + Hash, V> Drop for Slot<K, V> {
    fn drop(&mut self) {
        // The cache may be gone already; then there's nothing to tidy.
        if let Some(home) = self.home.upgrade() {
            home.evict_dead(&self.key);
        }
    }
}

/// Shared-ownership handle to a value held by a [`WeakCache`](crate::WeakCache).
///
/// Cloning is cheap (reference count). The value stays alive, and reachable
/// through the cache, for as long as at least one handle exists. Dropping the
/// last handle drops the value and removes its cache entry.
pub struct Cached<K: Eq + Hash, V>(pub(crate) Arc<Slot<K, V>>);
impl<K: Eq + Hash, V> Cached<K, V> {
    /// The key this value was inserted under.
    pub fn key(&self) -> &K {
        &self.0.key
    }

    /// Returns `true` if both handles point at the same value.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }

    /// Number of live handles to this value.
    pub fn handle_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }
}
impl<K: Eq + Hash, V> Clone for Cached<K, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
impl<K: Eq + Hash, V> Deref for Cached<K, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.0.value
    }
}
impl<K: Eq + Hash, V> AsRef<V> for Cached<K, V> {
    fn as_ref(&self) -> &V {
        &self.0.value
    }
}
impl<K: Eq + Hash + fmt::Debug, V: fmt::Debug> fmt::Debug for Cached<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached").field("key", &self.0.key).field("value", &self.0.value).finish()
    }
}
