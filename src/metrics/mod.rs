//! Cache Metrics System
//!
//! Provides counters for cache activity and a uniform reporting trait. Every
//! cache reports the same core counters; policies add their own gauges on top
//! (LFU reports its frequency spread, for example).
//!
//! # Why BTreeMap over HashMap?
//!
//! Reports are returned as `BTreeMap<String, f64>`:
//! - **Deterministic ordering**: metrics always appear in consistent order
//! - **Reproducible output**: essential for tests and benchmark comparisons
//! - **Stable serialization**: exported reports have predictable key ordering

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Counters tracked by every cache regardless of policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of `get` calls that carried a key.
    pub requests: u64,

    /// Number of requests that found their key.
    pub cache_hits: u64,

    /// Number of new keys stored.
    pub insertions: u64,

    /// Number of `put` calls that replaced the value of a present key.
    pub overwrites: u64,

    /// Number of entries removed to make room or by `pop_victim`.
    pub evictions: u64,

    /// Number of entries removed explicitly with `remove`.
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Records a `get` that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a `get` that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key being stored.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an existing key's value being replaced.
    pub fn record_overwrite(&mut self) {
        self.overwrites += 1;
    }

    /// Records a victim leaving the cache.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Number of requests that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of requests that hit, or 0.0 before the first request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of requests that missed, or 0.0 before the first request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a report map.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("overwrites".to_string(), self.overwrites as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics interface implemented by every cache.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_before_any_request() {
        let metrics = CoreCacheMetrics::default();
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.miss_rate(), 0.0);
        assert!(!metrics.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_counters_feed_the_report() {
        let mut metrics = CoreCacheMetrics::default();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_insertion();
        metrics.record_insertion();
        metrics.record_eviction();
        metrics.record_overwrite();
        metrics.record_removal();

        let report = metrics.to_btreemap();
        assert_eq!(report["requests"], 4.0);
        assert_eq!(report["cache_hits"], 3.0);
        assert_eq!(report["cache_misses"], 1.0);
        assert_eq!(report["hit_rate"], 0.75);
        assert_eq!(report["miss_rate"], 0.25);
        assert_eq!(report["eviction_rate"], 0.5);
        assert_eq!(report["overwrites"], 1.0);
        assert_eq!(report["removals"], 1.0);
    }
}
