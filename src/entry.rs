//! Stored entry type.
//!
//! The cache's map owns the key; the entry holds the value plus the key's
//! order record, the [`Slot`] its policy assigned on insertion.

use crate::list::Slot;

/// Value and order record stored per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CacheEntry<V> {
    /// The cached value.
    pub(crate) value: V,

    /// Position of the key in the policy's order index.
    pub(crate) slot: Slot,
}

impl<V> CacheEntry<V> {
    #[inline]
    pub(crate) fn new(value: V, slot: Slot) -> Self {
        Self { value, slot }
    }
}
