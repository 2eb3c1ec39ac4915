//! LFU Cache Metrics
//!
//! Frequency gauges specific to the LFU policy.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific counters, reported alongside the core metrics.
///
/// The frequency spread (lowest, highest, number of distinct levels) is read
/// from the policy's buckets at report time; only the increment count is
/// accumulated here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Total number of frequency increments (one per touch).
    pub total_frequency_increments: u64,
}

impl LfuCacheMetrics {
    /// Records one frequency increment.
    pub fn record_frequency_increment(&mut self) {
        self.total_frequency_increments += 1;
    }

    /// Writes the LFU gauges into `metrics`.
    ///
    /// `min_frequency` and `max_frequency` are `None` for an empty cache and
    /// reported as 0.
    pub fn report(
        &self,
        metrics: &mut BTreeMap<String, f64>,
        min_frequency: Option<u64>,
        max_frequency: Option<u64>,
        active_frequency_levels: usize,
    ) {
        let min = min_frequency.unwrap_or(0);
        let max = max_frequency.unwrap_or(0);
        metrics.insert("min_frequency".to_string(), min as f64);
        metrics.insert("max_frequency".to_string(), max as f64);
        metrics.insert("frequency_range".to_string(), max.saturating_sub(min) as f64);
        metrics.insert(
            "active_frequency_levels".to_string(),
            active_frequency_levels as f64,
        );
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_zeroed() {
        let metrics = LfuCacheMetrics::default();
        let mut report = BTreeMap::new();
        metrics.report(&mut report, None, None, 0);
        assert_eq!(report["min_frequency"], 0.0);
        assert_eq!(report["frequency_range"], 0.0);
        assert_eq!(report["active_frequency_levels"], 0.0);
    }

    #[test]
    fn test_frequency_range() {
        let mut metrics = LfuCacheMetrics::default();
        metrics.record_frequency_increment();
        let mut report = BTreeMap::new();
        metrics.report(&mut report, Some(1), Some(4), 2);
        assert_eq!(report["frequency_range"], 3.0);
        assert_eq!(report["total_frequency_increments"], 1.0);
    }
}
