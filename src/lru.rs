//! Least Recently Used (LRU) eviction policy.
//!
//! The LRU policy keeps keys in order of recency of use and evicts the least
//! recently used key when capacity is reached. This works on the principle of
//! temporal locality: items that have been accessed recently are likely to be
//! accessed again soon.
//!
//! # Algorithm
//!
//! Keys sit in a doubly linked list, most recently used at the front. A `get`
//! hit, a `put` overwrite and a fresh insert all place the key at the front.
//! The victim is the key at the back. A `get` miss changes nothing.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Insert: O(1)
//!   - Touch: O(1)
//!   - Pop victim: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the number of keys
//!   - One arena node per key: the key plus two slot indices
//!
//! # When to Use
//!
//! LRU is ideal for:
//! - General-purpose caching where access patterns exhibit temporal locality
//! - Simple implementation with predictable performance
//!
//! It is less suitable for:
//! - Workloads where frequency of access is more important than recency
//! - Scanning patterns where a large set of items is accessed once in sequence
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a single lock such as [`SharedCache`](crate::SharedCache)
//! (feature `concurrent`) or a `Mutex`.

extern crate alloc;

use crate::list::{List, Slot};
use crate::policy::{CachePolicy, PolicyKind, Touch};
use alloc::vec::Vec;

/// Recency index. Front is the most recently used key, back the victim.
///
/// # Examples
///
/// ```
/// use policy_cache::{LruCache, LruPolicy};
/// use core::num::NonZeroUsize;
///
/// let mut cache: LruCache<&str, i32> =
///     LruCache::with_policy(NonZeroUsize::new(2).unwrap(), LruPolicy::default());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruPolicy<K> {
    list: List<K>,
}

impl<K> LruPolicy<K> {
    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        LruPolicy {
            list: List::with_capacity(capacity),
        }
    }
}

impl<K> Default for LruPolicy<K> {
    fn default() -> Self {
        LruPolicy::with_capacity(0)
    }
}

impl<K> CachePolicy<K> for LruPolicy<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn insert(&mut self, key: K) -> Slot {
        self.list.push_front(key)
    }

    fn touch(&mut self, slot: Slot, _touch: Touch) {
        self.list.move_to_front(slot);
    }

    fn remove(&mut self, slot: Slot) -> Option<K> {
        self.list.remove(slot)
    }

    fn pop_victim(&mut self) -> Option<K> {
        self.list.pop_back()
    }

    fn peek_victim(&self) -> Option<&K> {
        self.list.back()
    }

    fn eviction_order(&self) -> Vec<&K> {
        self.list.iter_rev().collect()
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear();
    }
}
