//! Most Recently Used (MRU) eviction policy.
//!
//! Tracks recency exactly like [`LruPolicy`](crate::lru::LruPolicy): every
//! `get` hit and every `put` moves the key to the most-recent end. The victim
//! is taken from that same end. The cache evicts before it inserts, so the
//! entry being added is never its own victim.
//!
//! MRU suits cyclic scans larger than the cache, where the item just read is
//! the one least likely to be needed again soon.

extern crate alloc;

use crate::list::{List, Slot};
use crate::policy::{CachePolicy, PolicyKind, Touch};
use alloc::vec::Vec;

/// Recency index. Front is the most recently used key and the next victim.
#[derive(Debug)]
pub struct MruPolicy<K> {
    list: List<K>,
}

impl<K> MruPolicy<K> {
    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        MruPolicy {
            list: List::with_capacity(capacity),
        }
    }
}

impl<K> Default for MruPolicy<K> {
    fn default() -> Self {
        MruPolicy::with_capacity(0)
    }
}

impl<K> CachePolicy<K> for MruPolicy<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Mru
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
    fn test_mru_evicts_most_recently_touched() {
        let mut policy = MruPolicy::default();
        let a = policy.insert("a");
        policy.insert("b");
        policy.touch(a, Touch::Get);
        assert_eq!(policy.pop_victim(), Some("a"));
        assert_eq!(policy.eviction_order(), vec![&"b"]);
    }

    #[test]
    fn test_mru_overwrite_counts_as_use() {
        let mut policy = MruPolicy::default();
        let a = policy.insert("a");
        policy.insert("b");
        policy.insert("c");
        policy.touch(a, Touch::Overwrite);
        assert_eq!(policy.eviction_order(), vec![&"a", &"c", &"b"]);
    }
}
