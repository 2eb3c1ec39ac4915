//! Thread-Safe Cache Wrapper
//!
//! [`SharedCache`] puts one [`Cache`] behind one `parking_lot::Mutex`.
//!
//! ## Why One Mutex?
//!
//! Every operation of every bounded policy mutates the order index, reads
//! included:
//!
//! - **LRU / MRU**: a `get` hit moves the key to the front of the recency list
//! - **LFU**: a `get` hit increments the frequency and relinks the key
//! - **FIFO / LIFO**: a `put` may evict
//!
//! So an `RwLock` would buy nothing. Splitting the key space into independently
//! locked segments would raise throughput, but then each segment evicts on its
//! own and the cache as a whole no longer follows its policy. A single lock
//! keeps the eviction order global: the shared cache evicts exactly what a
//! single-threaded cache fed the same serialized operations would.
//!
//! The eviction listener runs while the lock is held. It must not call back
//! into the same `SharedCache`.
//!
//! # Example
//!
//! ```rust
//! use policy_cache::{PolicyKind, SharedCache};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SharedCache::new(1000, PolicyKind::Lru).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.put(t * 100 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

extern crate alloc;

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::metrics::CacheMetrics;
use crate::policy::{AnyPolicy, CachePolicy, PolicyKind};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::{Mutex, MutexGuard};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A [`Cache`] that can be shared between threads.
///
/// Methods take `&self`; wrap it in an `Arc` to share ownership.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone + Debug`.
/// - `V`: Value type. [`get`](SharedCache::get) additionally needs `Clone`.
/// - `P`: Policy type. Defaults to [`AnyPolicy`].
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
pub struct SharedCache<K, V, P = AnyPolicy<K>, S = DefaultHashBuilder> {
    inner: Mutex<Cache<K, V, P, S>>,
}

impl<K: Hash + Eq + Clone + fmt::Debug, V> SharedCache<K, V> {
    /// Creates a shared cache holding at most `capacity` entries under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize, policy: PolicyKind) -> Result<Self> {
        Cache::new(capacity, policy).map(SharedCache::from)
    }

    /// Creates a shared cache from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if the configured capacity is zero.
    pub fn init(config: CacheConfig) -> Result<Self> {
        Cache::init(config).map(SharedCache::from)
    }
}

impl<K, V, P, S> From<Cache<K, V, P, S>> for SharedCache<K, V, P, S> {
    fn from(cache: Cache<K, V, P, S>) -> Self {
        SharedCache {
            inner: Mutex::new(cache),
        }
    }
}

impl<K, V, P, S> SharedCache<K, V, P, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    P: CachePolicy<K>,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the evicted entry if any.
    ///
    /// See [`Cache::put`].
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }

    /// See [`Cache::put_opt`].
    pub fn put_opt(&self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
        self.inner.lock().put_opt(key, value)
    }

    /// Retrieves a **clone** of the value and records the access.
    ///
    /// For operations that don't need ownership, use
    /// [`get_with()`](Self::get_with) instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value while holding the lock, recording the access.
    ///
    /// ```rust
    /// use policy_cache::{PolicyKind, SharedCache};
    ///
    /// let cache = SharedCache::new(4, PolicyKind::Lfu).unwrap();
    /// cache.put("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |value| value.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value, recording the access.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.lock().get_mut(key).map(f)
    }

    /// Removes a key without notifying the eviction listener.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Returns `true` if `key` is present. Does not touch the ordering.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// The eviction policy the cache was built with.
    pub fn policy(&self) -> PolicyKind {
        self.inner.lock().policy()
    }

    /// Removes every entry without notifying the listener.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Locks the cache for a sequence of operations that must not interleave
    /// with other threads.
    ///
    /// ```rust
    /// use policy_cache::{PolicyKind, SharedCache};
    ///
    /// let cache = SharedCache::new(2, PolicyKind::Fifo).unwrap();
    /// {
    ///     let mut guard = cache.lock();
    ///     guard.put(1, "one");
    ///     guard.put(2, "two");
    ///     assert_eq!(guard.eviction_order(), vec![&1, &2]);
    /// }
    /// assert_eq!(cache.len(), 2);
    /// ```
    pub fn lock(&self) -> MutexGuard<'_, Cache<K, V, P, S>> {
        self.inner.lock()
    }

    /// Consumes the wrapper and returns the cache.
    pub fn into_inner(self) -> Cache<K, V, P, S> {
        self.inner.into_inner()
    }
}

impl<K: Hash + Eq + Clone, V, P: CachePolicy<K>, S: BuildHasher> CacheMetrics
    for SharedCache<K, V, P, S>
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.inner.lock().algorithm_name()
    }
}

impl<K, V, P: CachePolicy<K>, S> fmt::Debug for SharedCache<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_struct("SharedCache").field("cache", &*cache).finish(),
            None => f.debug_struct("SharedCache").finish_non_exhaustive(),
        }
    }
}
