//! Eviction policy abstraction.
//!
//! A policy is the cache's *order index*: it tracks the eviction-relevant
//! ordering of keys and names a victim when the cache overflows. The cache
//! façade talks to it through two hooks, "a key was touched" and "pick a
//! victim", plus bookkeeping for inserts and removals.
//!
//! Each concrete policy lives in its own module. [`AnyPolicy`] is the tagged
//! variant used when the policy is chosen at runtime from a [`PolicyKind`].

extern crate alloc;

use crate::error::CacheError;
use crate::fifo::FifoPolicy;
use crate::lfu::LfuPolicy;
use crate::lifo::LifoPolicy;
use crate::list::Slot;
use crate::lru::LruPolicy;
use crate::mru::MruPolicy;
use crate::unbounded::UnboundedPolicy;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// The kind of access that touched a present key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    /// A `get` that found the key.
    Get,
    /// A `put` that replaced the value of an existing key.
    Overwrite,
}

/// The eviction strategies a cache can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PolicyKind {
    /// No capacity limit and no eviction.
    Unbounded,
    /// Evict the earliest inserted key.
    Fifo,
    /// Evict the most recently inserted (or re-inserted) key.
    Lifo,
    /// Evict the least recently used key.
    Lru,
    /// Evict the most recently used key.
    Mru,
    /// Evict the least frequently used key, least recently touched among ties.
    Lfu,
}

impl PolicyKind {
    /// Every policy, in declaration order.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Unbounded,
        PolicyKind::Fifo,
        PolicyKind::Lifo,
        PolicyKind::Lru,
        PolicyKind::Mru,
        PolicyKind::Lfu,
    ];

    /// Lower-case configuration name, e.g. `"lru"`.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Unbounded => "unbounded",
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lifo => "lifo",
            PolicyKind::Lru => "lru",
            PolicyKind::Mru => "mru",
            PolicyKind::Lfu => "lfu",
        }
    }

    /// Name reported through [`CacheMetrics::algorithm_name`](crate::metrics::CacheMetrics::algorithm_name).
    pub fn algorithm_name(self) -> &'static str {
        match self {
            PolicyKind::Unbounded => "UNBOUNDED",
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lifo => "LIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Mru => "MRU",
            PolicyKind::Lfu => "LFU",
        }
    }

    /// Whether caches with this policy ever evict.
    pub fn is_bounded(self) -> bool {
        !matches!(self, PolicyKind::Unbounded)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    /// Parses a policy name, ignoring ASCII case and surrounding whitespace.
    /// `"basic"` is accepted as an alias for `"unbounded"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("basic") {
            return Ok(PolicyKind::Unbounded);
        }
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CacheError::UnknownPolicy(s.to_string()))
    }
}

/// Order index contract shared by every eviction policy.
///
/// The cache stores the [`Slot`] returned by [`insert`](CachePolicy::insert)
/// next to each value and hands it back on every later call for that key, so
/// implementations never need their own key lookup. The set of keys a bounded
/// policy tracks must always equal the set of keys in the cache.
pub trait CachePolicy<K> {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Whether the cache must enforce its capacity with this policy.
    fn is_bounded(&self) -> bool {
        self.kind().is_bounded()
    }

    /// Starts tracking a newly inserted key and returns its order record.
    fn insert(&mut self, key: K) -> Slot;

    /// Records a touch of a present key.
    fn touch(&mut self, slot: Slot, touch: Touch);

    /// Stops tracking a key that left the cache for a reason other than eviction.
    fn remove(&mut self, slot: Slot) -> Option<K>;

    /// Removes the current victim from the order index and returns its key.
    fn pop_victim(&mut self) -> Option<K>;

    /// The key [`pop_victim`](CachePolicy::pop_victim) would return.
    fn peek_victim(&self) -> Option<&K>;

    /// Tracked keys, next victim first.
    fn eviction_order(&self) -> Vec<&K>;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    /// Returns `true` if no key is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every key.
    fn clear(&mut self);

    /// Access frequency of the key at `slot`, for frequency-based policies.
    fn frequency(&self, _slot: Slot) -> Option<u64> {
        None
    }

    /// Adds policy-specific gauges to a metrics report.
    fn record_metrics(&self, _metrics: &mut BTreeMap<String, f64>) {}
}

/// A policy selected at runtime.
///
/// This is the default policy parameter of [`Cache`](crate::Cache), built from
/// a [`PolicyKind`] and fixed for the lifetime of the cache.
#[derive(Debug)]
pub enum AnyPolicy<K> {
    /// See [`UnboundedPolicy`].
    Unbounded(UnboundedPolicy),
    /// See [`FifoPolicy`].
    Fifo(FifoPolicy<K>),
    /// See [`LifoPolicy`].
    Lifo(LifoPolicy<K>),
    /// See [`LruPolicy`].
    Lru(LruPolicy<K>),
    /// See [`MruPolicy`].
    Mru(MruPolicy<K>),
    /// See [`LfuPolicy`].
    Lfu(LfuPolicy<K>),
}

impl<K> AnyPolicy<K> {
    /// Builds the policy for `kind`, pre-sized for `capacity` keys.
    pub fn with_capacity(kind: PolicyKind, capacity: usize) -> Self {
        match kind {
            PolicyKind::Unbounded => AnyPolicy::Unbounded(UnboundedPolicy::new()),
            PolicyKind::Fifo => AnyPolicy::Fifo(FifoPolicy::with_capacity(capacity)),
            PolicyKind::Lifo => AnyPolicy::Lifo(LifoPolicy::with_capacity(capacity)),
            PolicyKind::Lru => AnyPolicy::Lru(LruPolicy::with_capacity(capacity)),
            PolicyKind::Mru => AnyPolicy::Mru(MruPolicy::with_capacity(capacity)),
            PolicyKind::Lfu => AnyPolicy::Lfu(LfuPolicy::with_capacity(capacity)),
        }
    }
}

impl<K> From<PolicyKind> for AnyPolicy<K> {
    fn from(kind: PolicyKind) -> Self {
        AnyPolicy::with_capacity(kind, 0)
    }
}

macro_rules! dispatch {
    ($self:expr, $policy:ident => $body:expr) => {
        match $self {
            AnyPolicy::Unbounded($policy) => $body,
            AnyPolicy::Fifo($policy) => $body,
            AnyPolicy::Lifo($policy) => $body,
            AnyPolicy::Lru($policy) => $body,
            AnyPolicy::Mru($policy) => $body,
            AnyPolicy::Lfu($policy) => $body,
        }
    };
}

impl<K> CachePolicy<K> for AnyPolicy<K> {
    fn kind(&self) -> PolicyKind {
        dispatch!(self, p => CachePolicy::<K>::kind(p))
    }

    fn insert(&mut self, key: K) -> Slot {
        dispatch!(self, p => CachePolicy::<K>::insert(p, key))
    }

    fn touch(&mut self, slot: Slot, touch: Touch) {
        dispatch!(self, p => CachePolicy::<K>::touch(p, slot, touch))
    }

    fn remove(&mut self, slot: Slot) -> Option<K> {
        dispatch!(self, p => CachePolicy::<K>::remove(p, slot))
    }

    fn pop_victim(&mut self) -> Option<K> {
        dispatch!(self, p => CachePolicy::<K>::pop_victim(p))
    }

    fn peek_victim(&self) -> Option<&K> {
        dispatch!(self, p => CachePolicy::<K>::peek_victim(p))
    }

    fn eviction_order(&self) -> Vec<&K> {
        dispatch!(self, p => CachePolicy::<K>::eviction_order(p))
    }

    fn len(&self) -> usize {
        dispatch!(self, p => CachePolicy::<K>::len(p))
    }

    fn clear(&mut self) {
        dispatch!(self, p => CachePolicy::<K>::clear(p))
    }

    fn frequency(&self, slot: Slot) -> Option<u64> {
        dispatch!(self, p => CachePolicy::<K>::frequency(p, slot))
    }

    fn record_metrics(&self, metrics: &mut BTreeMap<String, f64>) {
        dispatch!(self, p => CachePolicy::<K>::record_metrics(p, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_round_trips_through_str() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.as_str().parse::<PolicyKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_policy_kind_parse_is_lenient() {
        assert_eq!(" LRU ".parse::<PolicyKind>(), Ok(PolicyKind::Lru));
        assert_eq!("Lfu".parse::<PolicyKind>(), Ok(PolicyKind::Lfu));
        assert_eq!("basic".parse::<PolicyKind>(), Ok(PolicyKind::Unbounded));
        assert_eq!(
            "arc".parse::<PolicyKind>(),
            Err(CacheError::UnknownPolicy("arc".to_string()))
        );
    }

    #[test]
    fn test_any_policy_matches_kind() {
        for kind in PolicyKind::ALL {
            let policy: AnyPolicy<u32> = AnyPolicy::with_capacity(kind, 4);
            assert_eq!(policy.kind(), kind);
            assert_eq!(policy.is_bounded(), kind != PolicyKind::Unbounded);
            assert!(policy.is_empty());
        }
    }

    #[test]
    fn test_any_policy_delegates_victim_selection() {
        let mut policy: AnyPolicy<&str> = PolicyKind::Lifo.into();
        policy.insert("a");
        policy.insert("b");
        assert_eq!(policy.peek_victim(), Some(&"b"));
        assert_eq!(policy.pop_victim(), Some("b"));
        assert_eq!(policy.eviction_order(), alloc::vec![&"a"]);
    }
}
