//! Bounded, thread-safe LRU cache.
//!
//! A thin synchronized wrapper around [`lru::LruCache`]. Every logical
//! operation runs under a single lock acquisition, so a lookup and its
//! recency update are never split across two critical sections.

use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// Fixed-capacity key-value store with least-recently-used eviction.
///
/// Safe for concurrent access from many tasks; the internal lock is held
/// only for the duration of a single operation and never across `.await`.
///
/// # Eviction
///
/// Inserting a new key while at capacity evicts the least recently touched
/// entry. Touching an existing key (`get` or re-`put`) promotes it to the
/// most-recently-used position without changing occupancy.
pub struct BoundedCache<K: Hash + Eq, V> {
    inner: Mutex<LruCache<K, V>>,
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Looks up a key, promoting it to most-recently-used on a hit.
    ///
    /// Returns a clone of the stored value so no borrow of the cache
    /// escapes the critical section.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts or overwrites an entry, promoting it to most-recently-used.
    ///
    /// A new key inserted at capacity evicts the current least-recently-used
    /// entry first. Overwriting an existing key never evicts.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// As [`Self::put`], but a no-op when the key already exists.
    ///
    /// The existing entry keeps its value and its recency position.
    pub fn put_if_absent(&self, key: K, value: V) {
        let mut cache = self.inner.lock();
        if !cache.contains(&key) {
            cache.put(key, value);
        }
    }

    /// Current number of entries; never exceeds the configured capacity.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }
}
