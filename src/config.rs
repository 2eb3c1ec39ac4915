//! Cache Configuration Module
//!
//! A cache is configured by two values: how many entries it may hold and
//! which eviction policy it uses. Like every configuration struct in this
//! crate, [`CacheConfig`] has public fields and no builder:
//!
//! - **Simple**: just create the struct with all fields set
//! - **Validated once**: [`Cache::init`](crate::Cache::init) rejects a zero
//!   capacity before any cache exists
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::CacheConfig;
//! use policy_cache::{Cache, PolicyKind};
//!
//! let config = CacheConfig {
//!     capacity: 1000,
//!     policy: PolicyKind::Lru,
//! };
//! let cache: Cache<String, i32> = Cache::init(config).unwrap();
//! assert_eq!(cache.cap().get(), 1000);
//!
//! let policy: PolicyKind = "lfu".parse().unwrap();
//! let invalid = CacheConfig { capacity: 0, policy };
//! assert!(invalid.validate().is_err());
//! ```

use crate::error::{CacheError, Result};
use crate::policy::PolicyKind;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a [`Cache`](crate::Cache).
///
/// # Fields
///
/// - `capacity`: maximum number of entries; must be positive. The unbounded
///   policy validates it too but only uses it as a sizing hint.
/// - `policy`: the eviction policy, fixed for the cache's lifetime.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
    /// Eviction policy.
    pub policy: PolicyKind,
}

impl CacheConfig {
    /// Checks the capacity and returns it as a `NonZeroUsize`.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(CacheError::InvalidCapacity(self.capacity))
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .finish()
    }
}
