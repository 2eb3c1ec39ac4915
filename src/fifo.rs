//! First-In-First-Out (FIFO) eviction policy.
//!
//! Keys are ordered by the time they were first inserted. Overwriting a key
//! does not move it and reads never reorder anything, so the victim is always
//! the oldest key still present.
//!
//! # Performance Characteristics
//!
//! - Insert, touch, remove, pop victim: O(1)
//! - Memory: one arena node per key (key + two slot links)

extern crate alloc;

use crate::list::{List, Slot};
use crate::policy::{CachePolicy, PolicyKind, Touch};
use alloc::vec::Vec;

/// Insertion-order index. Front is the newest key, back the oldest.
#[derive(Debug)]
pub struct FifoPolicy<K> {
    list: List<K>,
}

impl<K> FifoPolicy<K> {
    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        FifoPolicy {
            list: List::with_capacity(capacity),
        }
    }
}

impl<K> Default for FifoPolicy<K> {
    fn default() -> Self {
        FifoPolicy::with_capacity(0)
    }
}

impl<K> CachePolicy<K> for FifoPolicy<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn insert(&mut self, key: K) -> Slot {
        self.list.push_front(key)
    }

    // Insertion position is fixed for the life of the key.
    fn touch(&mut self, _slot: Slot, _touch: Touch) {}

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

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_fifo_evicts_oldest() {
        let mut policy = FifoPolicy::default();
        policy.insert("a");
        policy.insert("b");
        policy.insert("c");
        assert_eq!(policy.pop_victim(), Some("a"));
        assert_eq!(policy.pop_victim(), Some("b"));
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_fifo_ignores_touches() {
        let mut policy = FifoPolicy::default();
        let a = policy.insert("a");
        policy.insert("b");
        policy.touch(a, Touch::Get);
        policy.touch(a, Touch::Overwrite);
        assert_eq!(policy.eviction_order(), vec![&"a", &"b"]);
        assert_eq!(policy.peek_victim(), Some(&"a"));
    }

    #[test]
    fn test_fifo_remove_then_reinsert_goes_to_back_of_queue() {
        let mut policy = FifoPolicy::default();
        let a = policy.insert("a");
        policy.insert("b");
        assert_eq!(policy.remove(a), Some("a"));
        policy.insert("a");
        assert_eq!(policy.eviction_order(), vec![&"b", &"a"]);
    }
}
