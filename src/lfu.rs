//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) policy evicts the least frequently accessed
//! key when the cache reaches capacity. Among keys sharing the lowest
//! frequency, the one touched least recently goes first, so eviction follows
//! the total order (frequency ascending, last touch ascending).
//!
//! # Frequency Rules
//!
//! - A key enters at frequency 0.
//! - Every `get` hit and every `put` overwrite adds 1.
//! - An increment moves the key to the most recently touched position of its
//!   new frequency bucket.
//!
//! # Layout
//!
//! All keys live in one slot arena. Each distinct frequency owns a chain
//! (bucket) through that arena, newest touch at the front. Buckets are kept in
//! a `BTreeMap`, so the lowest frequency is its first entry and empty buckets
//! are dropped eagerly. Moving a key between buckets relinks its node and keeps
//! its slot, which is why the cache can store the slot as the key's order
//! record.
//!
//! - Touch: O(log b), b being the number of distinct frequencies
//! - Pop victim: O(log b)
//! - Insert: O(log b)

extern crate alloc;

use crate::list::{Arena, Chain, Slot};
use crate::meta::LfuMeta;
use crate::metrics::LfuCacheMetrics;
use crate::policy::{CachePolicy, PolicyKind, Touch};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A key together with its access counter.
#[derive(Debug)]
struct LfuNode<K> {
    key: K,
    meta: LfuMeta,
}

/// Frequency-bucketed index. The victim is the back of the lowest bucket.
///
/// # Examples
///
/// ```
/// use policy_cache::{LfuCache, LfuPolicy};
/// use core::num::NonZeroUsize;
///
/// let mut cache: LfuCache<&str, i32> =
///     LfuCache::with_policy(NonZeroUsize::new(2).unwrap(), LfuPolicy::default());
/// cache.put("rare", 1);
/// cache.put("popular", 2);
///
/// // Access "popular" multiple times
/// for _ in 0..10 {
///     cache.get(&"popular");
/// }
///
/// cache.put("new", 3); // "rare" evicted (lowest frequency)
/// assert!(cache.get(&"popular").is_some());
/// assert!(cache.get(&"rare").is_none());
/// ```
#[derive(Debug)]
pub struct LfuPolicy<K> {
    arena: Arena<LfuNode<K>>,

    /// Frequency to chain of keys with that frequency, most recently touched first.
    buckets: BTreeMap<u64, Chain>,

    metrics: LfuCacheMetrics,
}

impl<K> LfuPolicy<K> {
    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        LfuPolicy {
            arena: Arena::with_capacity(capacity),
            buckets: BTreeMap::new(),
            metrics: LfuCacheMetrics::default(),
        }
    }

    /// Lowest frequency currently present, if any key is tracked.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    /// Highest frequency currently present, if any key is tracked.
    pub fn max_frequency(&self) -> Option<u64> {
        self.buckets.keys().next_back().copied()
    }

    /// Links `slot` at the front of the bucket for `frequency`.
    fn attach(&mut self, frequency: u64, slot: Slot) {
        let bucket = self.buckets.entry(frequency).or_default();
        self.arena.push_front(bucket, slot);
    }

    /// Unlinks `slot` from the bucket for `frequency`, dropping the bucket once empty.
    fn detach(&mut self, frequency: u64, slot: Slot) {
        if let Some(bucket) = self.buckets.get_mut(&frequency) {
            self.arena.unlink(bucket, slot);
            if bucket.is_empty() {
                self.buckets.remove(&frequency);
            }
        }
    }
}

impl<K> Default for LfuPolicy<K> {
    fn default() -> Self {
        LfuPolicy::with_capacity(0)
    }
}

impl<K> CachePolicy<K> for LfuPolicy<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn insert(&mut self, key: K) -> Slot {
        let meta = LfuMeta::default();
        let slot = self.arena.alloc(LfuNode { key, meta });
        self.attach(meta.frequency, slot);
        slot
    }

    fn touch(&mut self, slot: Slot, _touch: Touch) {
        let Some(node) = self.arena.get_mut(slot) else {
            return;
        };
        let old_frequency = node.meta.frequency;
        let new_frequency = node.meta.increment();
        self.detach(old_frequency, slot);
        self.attach(new_frequency, slot);
        self.metrics.record_frequency_increment();
    }

    fn remove(&mut self, slot: Slot) -> Option<K> {
        let frequency = self.arena.get(slot)?.meta.frequency;
        self.detach(frequency, slot);
        self.arena.release(slot).map(|node| node.key)
    }

    fn pop_victim(&mut self) -> Option<K> {
        let mut lowest = self.buckets.first_entry()?;
        let slot = lowest.get().back()?;
        self.arena.unlink(lowest.get_mut(), slot);
        if lowest.get().is_empty() {
            lowest.remove();
        }
        self.arena.release(slot).map(|node| node.key)
    }

    fn peek_victim(&self) -> Option<&K> {
        let slot = self.buckets.values().next()?.back()?;
        self.arena.get(slot).map(|node| &node.key)
    }

    fn eviction_order(&self) -> Vec<&K> {
        self.buckets
            .values()
            .flat_map(|bucket| self.arena.iter_rev(bucket))
            .map(|(_, node)| &node.key)
            .collect()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.buckets.clear();
    }

    fn frequency(&self, slot: Slot) -> Option<u64> {
        self.arena.get(slot).map(|node| node.meta.frequency)
    }

    fn record_metrics(&self, metrics: &mut BTreeMap<String, f64>) {
        self.metrics.report(
            metrics,
            self.min_frequency(),
            self.max_frequency(),
            self.buckets.len(),
        );
    }
}
