//! Last-In-First-Out (LIFO) eviction policy.
//!
//! Keys are ordered by insertion, and overwriting a key re-inserts it at the
//! newest position. The victim is the newest key, so a freshly inserted entry
//! is the next to go if the cache overflows again right away. Reads never
//! reorder.

extern crate alloc;

use crate::list::{List, Slot};
use crate::policy::{CachePolicy, PolicyKind, Touch};
use alloc::vec::Vec;

/// Insertion-order index with re-insertion on overwrite. Front is the newest
/// key and the next victim.
#[derive(Debug)]
pub struct LifoPolicy<K> {
    list: List<K>,
}

impl<K> LifoPolicy<K> {
    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        LifoPolicy {
            list: List::with_capacity(capacity),
        }
    }
}

impl<K> Default for LifoPolicy<K> {
    fn default() -> Self {
        LifoPolicy::with_capacity(0)
    }
}

impl<K> CachePolicy<K> for LifoPolicy<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lifo
    }

    fn insert(&mut self, key: K) -> Slot {
        self.list.push_front(key)
    }

    fn touch(&mut self, slot: Slot, touch: Touch) {
        if touch == Touch::Overwrite {
            self.list.move_to_front(slot);
        }
    }

    fn remove(&mut self, slot: Slot) -> Option<K> {
        self.list.remove(slot)
    }

    fn pop_victim(&mut self) -> Option<K> {
        self.list.pop_front()
    }

    fn peek_victim(&self) -> Option<&K> {
        self.list.front()
    }

    fn eviction_order(&self) -> Vec<&K> {
        self.list.iter().collect()
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
    fn test_lifo_evicts_newest() {
        let mut policy = LifoPolicy::default();
        policy.insert("a");
        policy.insert("b");
        assert_eq!(policy.pop_victim(), Some("b"));
        policy.insert("c");
        assert_eq!(policy.pop_victim(), Some("c"));
        assert_eq!(policy.pop_victim(), Some("a"));
        assert_eq!(policy.pop_victim(), None);
    }

    #[test]
    fn test_lifo_overwrite_reinserts() {
        let mut policy = LifoPolicy::default();
        let a = policy.insert("a");
        policy.insert("b");
        policy.touch(a, Touch::Overwrite);
        assert_eq!(policy.eviction_order(), vec![&"a", &"b"]);
    }

    #[test]
    fn test_lifo_get_does_not_reorder() {
        let mut policy = LifoPolicy::default();
        let a = policy.insert("a");
        policy.insert("b");
        policy.touch(a, Touch::Get);
        assert_eq!(policy.peek_victim(), Some(&"b"));
    }
}
