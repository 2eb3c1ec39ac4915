#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Policy Selection Guide
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                 Which Eviction Policy Should I Use?                  │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  Must nothing ever be evicted? ──Yes──▶ Unbounded                    │
//! │           │                                                          │
//! │          No                                                          │
//! │           ▼                                                          │
//! │  Recently used = likely reused? ──Yes──▶ LRU                         │
//! │           │                                                          │
//! │          No                                                          │
//! │           ▼                                                          │
//! │  Popular = likely reused? ──Yes──▶ LFU                               │
//! │           │                                                          │
//! │          No                                                          │
//! │           ▼                                                          │
//! │  Cyclic scans larger than the cache? ──Yes──▶ MRU                    │
//! │           │                                                          │
//! │          No ──▶ FIFO (oldest insert) or LIFO (newest insert)         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Policy | Victim | Touched by `get` | Touched by overwrite |
//! |--------|--------|------------------|----------------------|
//! | [`PolicyKind::Unbounded`] | none | no | no |
//! | [`PolicyKind::Fifo`] | earliest inserted | no | no |
//! | [`PolicyKind::Lifo`] | most recently inserted or overwritten | no | yes |
//! | [`PolicyKind::Lru`] | least recently used | yes | yes |
//! | [`PolicyKind::Mru`] | most recently used | yes | yes |
//! | [`PolicyKind::Lfu`] | lowest frequency, least recently touched among ties | yes | yes |
//!
//! Every bounded policy does O(1) work per operation, except LFU which is
//! O(log b) in the number of distinct frequencies.
//!
//! ## Runtime Selection
//!
//! ```rust
//! use policy_cache::{Cache, CacheConfig, PolicyKind};
//!
//! let policy: PolicyKind = "lfu".parse().unwrap();
//! let mut cache = Cache::init(CacheConfig { capacity: 2, policy }).unwrap();
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//! for _ in 0..10 {
//!     cache.get(&"popular");
//! }
//! assert_eq!(cache.put("new", 3), Some(("rare", 1)));
//! ```
//!
//! ## Compile-Time Selection
//!
//! ```rust
//! use policy_cache::FifoCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache: FifoCache<u32, &str> = FifoCache::with_capacity(NonZeroUsize::new(2).unwrap());
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1); // FIFO ignores reads
//! assert_eq!(cache.put(3, "three"), Some((1, "one")));
//! ```
//!
//! ## Eviction Notifications
//!
//! Evictions are reported twice: to the optional [`EvictionListener`] and as a
//! `tracing` event at `DEBUG` level under the `policy_cache::evict` target.
//! Explicit [`Cache::remove`] and [`Cache::clear`] are not evictions and
//! report nothing.
//!
//! ## Shared Caches
//!
//! Enable the `concurrent` feature for [`SharedCache`], a cache behind one
//! `parking_lot::Mutex` that keeps the policy's ordering global.
//!
//! ## Modules
//!
//! - [`cache`]: The cache façade and per-policy aliases
//! - [`policy`]: The order index trait, [`PolicyKind`] and [`AnyPolicy`]
//! - [`fifo`], [`lifo`], [`lru`], [`mru`], [`lfu`], [`unbounded`]: Eviction policies
//! - [`config`]: Cache configuration
//! - [`listener`]: Eviction notification hook
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - [`concurrent`]: Thread-safe cache wrapper (requires `concurrent` feature)

#![no_std]

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Slot arena and intrusive doubly linked chains.
///
/// Internal infrastructure for the order indexes. Nodes live in a `Vec` and
/// link to each other by index, so there is no unsafe code.
pub(crate) mod list;

/// Per-key record stored next to each cached value.
pub(crate) mod entry;

/// Error type for cache construction and configuration parsing.
pub mod error;

/// Cache configuration.
pub mod config;

/// Policy-specific per-key metadata.
pub mod meta;

/// Order index trait and runtime policy selection.
pub mod policy;

/// First-in-first-out eviction.
pub mod fifo;

/// Last-in-first-out eviction.
pub mod lifo;

/// Least Recently Used eviction.
pub mod lru;

/// Most Recently Used eviction.
pub mod mru;

/// Least Frequently Used eviction.
///
/// Evicts the key with the lowest access count, breaking ties by least recent
/// touch.
pub mod lfu;

/// No eviction at all.
pub mod unbounded;

/// Eviction listener hook.
pub mod listener;

/// Cache metrics system.
///
/// Provides a common counter set for every cache plus policy-specific gauges.
pub mod metrics;

/// The cache façade.
pub mod cache;

/// Thread-safe cache wrapper.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use cache::{Cache, FifoCache, LfuCache, LifoCache, LruCache, MruCache, UnboundedCache};
pub use config::CacheConfig;
pub use error::CacheError;
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lifo::LifoPolicy;
pub use list::Slot;
pub use listener::EvictionListener;
pub use lru::LruPolicy;
pub use meta::LfuMeta;
pub use metrics::CacheMetrics;
pub use mru::MruPolicy;
pub use policy::{AnyPolicy, CachePolicy, PolicyKind, Touch};
pub use unbounded::UnboundedPolicy;

#[cfg(feature = "concurrent")]
pub use concurrent::SharedCache;
