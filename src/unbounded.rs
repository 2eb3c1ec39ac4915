//! Unbounded policy: no capacity limit, no eviction.
//!
//! The cache's own map is the only state. The policy hands out detached slots
//! and never names a victim.

extern crate alloc;

use crate::list::Slot;
use crate::policy::{CachePolicy, PolicyKind, Touch};
use alloc::vec::Vec;

/// Policy that never evicts and keeps no ordering metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnboundedPolicy;

impl UnboundedPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        UnboundedPolicy
    }
}

impl<K> CachePolicy<K> for UnboundedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Unbounded
    }

    fn is_bounded(&self) -> bool {
        false
    }

    fn insert(&mut self, _key: K) -> Slot {
        Slot::DETACHED
    }

    fn touch(&mut self, _slot: Slot, _touch: Touch) {}

    fn remove(&mut self, _slot: Slot) -> Option<K> {
        None
    }

    fn pop_victim(&mut self) -> Option<K> {
        None
    }

    fn peek_victim(&self) -> Option<&K> {
        None
    }

    fn eviction_order(&self) -> Vec<&K> {
        Vec::new()
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_names_a_victim() {
        let mut policy = UnboundedPolicy::new();
        CachePolicy::<u8>::insert(&mut policy, 1);
        CachePolicy::<u8>::insert(&mut policy, 2);
        assert!(!CachePolicy::<u8>::is_bounded(&policy));
        assert_eq!(CachePolicy::<u8>::pop_victim(&mut policy), None);
        assert!(CachePolicy::<u8>::eviction_order(&policy).is_empty());
    }
}
