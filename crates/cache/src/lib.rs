//! Weakly held, concurrent value cache.
//!
//! [`WeakCache`] de-duplicates expensive values while somebody is using
//! them, and forgets them as soon as nobody is. It is the moral equivalent of
//! a concurrent map of weak references with a finalizer:
//!
//! - [`insert`](WeakCache::insert) wraps the value in a reference-counted
//!   [`Cached`] handle and keeps only a weak back-reference.
//! - [`get`](WeakCache::get) upgrades that back-reference if the value is
//!   still alive.
//! - Dropping the last [`Cached`] handle drops the value and removes the map
//!   entry, so the cache is never the reason a value survives.

mod handle;
mod weak;

pub use crate::handle::Cached;
pub use crate::weak::WeakCache;
