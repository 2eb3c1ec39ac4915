//! Capacity-aware cache façade.
//!
//! [`Cache`] owns the entry store (a hash map from key to value and order
//! record) and one policy acting as the order index. It is the only way in:
//! callers never see the policy or the map directly.
//!
//! # Operation Flow
//!
//! ```text
//! put(k, v) ── k present? ──yes──▶ replace value, policy.touch(Overwrite)
//!                  │
//!                  no
//!                  ▼
//!          at capacity? ──yes──▶ policy.pop_victim() ─▶ drop from map ─▶ notify
//!                  │                                                       │
//!                  ▼                                                       ▼
//!          policy.insert(k) ◀──────────────────────────────────────────────┘
//!
//! get(k) ── hit? ──yes──▶ policy.touch(Get) ─▶ Some(&v)
//!             │
//!             no ─▶ None
//! ```
//!
//! A `put` evicts at most one entry, and only when it introduces a new key.
//! Overwrites and reads never evict.

extern crate alloc;

use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::error::Result;
use crate::fifo::FifoPolicy;
use crate::lfu::LfuPolicy;
use crate::lifo::LifoPolicy;
use crate::listener::EvictionListener;
use crate::lru::LruPolicy;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::mru::MruPolicy;
use crate::policy::{AnyPolicy, CachePolicy, PolicyKind, Touch};
use crate::unbounded::UnboundedPolicy;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the number of slots reserved up front.
const MAX_PREALLOCATION: usize = 4096;

/// A cache that evicts first-in-first-out.
pub type FifoCache<K, V, S = DefaultHashBuilder> = Cache<K, V, FifoPolicy<K>, S>;
/// A cache that evicts last-in-first-out.
pub type LifoCache<K, V, S = DefaultHashBuilder> = Cache<K, V, LifoPolicy<K>, S>;
/// A cache that evicts the least recently used entry.
pub type LruCache<K, V, S = DefaultHashBuilder> = Cache<K, V, LruPolicy<K>, S>;
/// A cache that evicts the most recently used entry.
pub type MruCache<K, V, S = DefaultHashBuilder> = Cache<K, V, MruPolicy<K>, S>;
/// A cache that evicts the least frequently used entry.
pub type LfuCache<K, V, S = DefaultHashBuilder> = Cache<K, V, LfuPolicy<K>, S>;
/// A cache that never evicts.
pub type UnboundedCache<K, V, S = DefaultHashBuilder> = Cache<K, V, UnboundedPolicy, S>;

type BoxedListener<K, V> = Box<dyn EvictionListener<K, V> + Send>;

/// An in-memory key-value cache with a fixed capacity and eviction policy.
///
/// The policy is chosen at construction and never changes. With the default
/// `P = AnyPolicy<K>` it is picked at runtime from a [`PolicyKind`]; the
/// aliases [`LruCache`], [`LfuCache`] and friends fix it at compile time.
///
/// # Examples
///
/// ```
/// use policy_cache::{Cache, PolicyKind};
///
/// let mut cache = Cache::new(2, PolicyKind::Lru).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a"); // "a" becomes most recently used
///
/// let evicted = cache.put("c", 3); // "b" evicted (least recently used)
/// assert_eq!(evicted, Some(("b", 2)));
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct Cache<K, V, P = AnyPolicy<K>, S = DefaultHashBuilder> {
    capacity: NonZeroUsize,
    map: HashMap<K, CacheEntry<V>, S>,
    policy: P,
    listener: Option<BoxedListener<K, V>>,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq + Clone + fmt::Debug, V> Cache<K, V> {
    /// Creates a cache holding at most `capacity` entries under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize, policy: PolicyKind) -> Result<Self> {
        Self::init(CacheConfig { capacity, policy })
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if the configured capacity is zero.
    pub fn init(config: CacheConfig) -> Result<Self> {
        Cache::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V, S: BuildHasher> Cache<K, V, AnyPolicy<K>, S> {
    /// Creates a runtime-selected cache with a custom hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if the configured capacity is zero.
    pub fn with_hasher(config: CacheConfig, hash_builder: S) -> Result<Self> {
        let capacity = config.validate()?;
        let policy = AnyPolicy::with_capacity(config.policy, preallocation(capacity));
        Ok(Cache::with_policy_and_hasher(capacity, policy, hash_builder))
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V, P: CachePolicy<K>> Cache<K, V, P> {
    /// Creates a cache around an already built policy.
    pub fn with_policy(capacity: NonZeroUsize, policy: P) -> Self {
        Cache::with_policy_and_hasher(capacity, policy, DefaultHashBuilder::default())
    }

    /// Creates a cache with a default-constructed policy.
    ///
    /// ```
    /// use policy_cache::MruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache: MruCache<u32, &str> = MruCache::with_capacity(NonZeroUsize::new(8).unwrap());
    /// cache.put(1, "one");
    /// assert_eq!(cache.peek_victim(), Some(&1));
    /// ```
    pub fn with_capacity(capacity: NonZeroUsize) -> Self
    where
        P: Default,
    {
        Cache::with_policy(capacity, P::default())
    }
}

impl<K, V, P, S> Cache<K, V, P, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    P: CachePolicy<K>,
    S: BuildHasher,
{
    /// Creates a cache around a policy with a custom hash builder.
    ///
    /// Any keys the policy already tracks are discarded: the cache starts empty.
    pub fn with_policy_and_hasher(capacity: NonZeroUsize, mut policy: P, hash_builder: S) -> Self {
        policy.clear();
        debug!(
            capacity = capacity.get(),
            policy = %policy.kind(),
            "creating cache"
        );
        Cache {
            capacity,
            map: HashMap::with_capacity_and_hasher(preallocation(capacity), hash_builder),
            policy,
            listener: None,
            metrics: CoreCacheMetrics::default(),
        }
    }

    /// Registers the eviction listener, replacing any previous one.
    pub fn set_eviction_listener<L>(&mut self, listener: L)
    where
        L: EvictionListener<K, V> + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Builder-style [`set_eviction_listener`](Cache::set_eviction_listener).
    pub fn with_eviction_listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + Send + 'static,
    {
        self.set_eviction_listener(listener);
        self
    }

    /// The configured capacity.
    ///
    /// Unbounded caches report it but never enforce it.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Number of entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The eviction policy this cache was built with.
    #[inline]
    pub fn policy(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Counters for this cache's activity.
    #[inline]
    pub fn core_metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }

    /// Stores `value` under `key`.
    ///
    /// If `key` is present its value is replaced and the policy sees an
    /// overwrite; nothing is evicted. If `key` is new and the cache is full,
    /// exactly one victim is evicted first, the listener is notified, and the
    /// victim is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(entry) = self.map.get_mut(&key) {
            entry.value = value;
            self.policy.touch(entry.slot, Touch::Overwrite);
            self.metrics.record_overwrite();
            trace!(policy = %self.policy.kind(), "overwrote entry");
            return None;
        }

        let evicted = if self.policy.is_bounded() && self.map.len() >= self.capacity.get() {
            self.evict()
        } else {
            None
        };

        let slot = self.policy.insert(key.clone());
        self.map.insert(key, CacheEntry::new(value, slot));
        self.metrics.record_insertion();
        trace!(policy = %self.policy.kind(), len = self.map.len(), "inserted entry");

        evicted
    }

    /// [`put`](Cache::put) for callers whose key or value may be absent.
    ///
    /// An absent key or value leaves the cache untouched and notifies nobody.
    ///
    /// ```
    /// use policy_cache::{Cache, PolicyKind};
    ///
    /// let mut cache = Cache::new(2, PolicyKind::Fifo).unwrap();
    /// assert_eq!(cache.put_opt(None, Some(1)), None);
    /// assert_eq!(cache.put_opt(Some("k"), None), None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn put_opt(&mut self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
        match (key, value) {
            (Some(key), Some(value)) => self.put(key, value),
            _ => {
                trace!(policy = %self.policy.kind(), "ignoring put with absent key or value");
                None
            }
        }
    }

    /// Returns the value for `key`, recording the access with the policy.
    ///
    /// A miss returns `None` and leaves the ordering untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key) {
            Some(entry) => {
                self.policy.touch(entry.slot, Touch::Get);
                self.metrics.record_hit();
                Some(&entry.value)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// [`get`](Cache::get) for callers whose key may be absent.
    ///
    /// An absent key returns `None` without counting as a request.
    pub fn get_opt<Q>(&mut self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match key {
            Some(key) => self.get(key),
            None => None,
        }
    }

    /// Like [`get`](Cache::get) but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get_mut(key) {
            Some(entry) => {
                self.policy.touch(entry.slot, Touch::Get);
                self.metrics.record_hit();
                Some(&mut entry.value)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without touching the ordering or metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is present. Does not touch the ordering.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Access frequency of `key` under the LFU policy; `None` otherwise.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = self.map.get(key)?;
        self.policy.frequency(entry.slot)
    }

    /// Removes `key` and returns its value.
    ///
    /// This is not an eviction: the listener is not called.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = self.map.remove(key)?;
        self.policy.remove(entry.slot);
        self.metrics.record_removal();
        Some(entry.value)
    }

    /// The key the next overflowing `put` would evict.
    pub fn peek_victim(&self) -> Option<&K> {
        self.policy.peek_victim()
    }

    /// Present keys in eviction order, next victim first.
    ///
    /// Empty for unbounded caches, which never evict.
    pub fn eviction_order(&self) -> Vec<&K> {
        self.policy.eviction_order()
    }

    /// Evicts the current victim now, notifying the listener.
    pub fn pop_victim(&mut self) -> Option<(K, V)> {
        self.evict()
    }

    /// Iterates over all entries in arbitrary order without touching the ordering.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.map.iter().map(|(key, entry)| (key, &entry.value))
    }

    /// Removes every entry. The listener is not called.
    pub fn clear(&mut self) {
        self.map.clear();
        self.policy.clear();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        // victims the map does not hold carry no value and are skipped
        while let Some(key) = self.policy.pop_victim() {
            let Some(entry) = self.map.remove(&key) else {
                continue;
            };
            self.metrics.record_eviction();
            debug!(
                target: "policy_cache::evict",
                policy = %self.policy.kind(),
                key = ?key,
                len = self.map.len(),
                "evicted entry"
            );
            if let Some(listener) = self.listener.as_mut() {
                listener.on_evict(&key, &entry.value);
            }
            return Some((key, entry.value));
        }
        None
    }
}

impl<K: Hash + Eq + Clone, V, P: CachePolicy<K>, S: BuildHasher> CacheMetrics
    for Cache<K, V, P, S>
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();
        let len = self.map.len() as f64;
        let capacity = self.capacity.get() as f64;
        metrics.insert("len".to_string(), len);
        metrics.insert("capacity".to_string(), capacity);
        metrics.insert("utilization".to_string(), len / capacity);
        self.policy.record_metrics(&mut metrics);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.policy.kind().algorithm_name()
    }
}

impl<K, V, P: CachePolicy<K>, S> fmt::Debug for Cache<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy.kind())
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

fn preallocation(capacity: NonZeroUsize) -> usize {
    capacity.get().min(MAX_PREALLOCATION)
}
