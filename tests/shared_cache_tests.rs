//! Shared Cache Correctness Tests
//!
//! These tests validate that `SharedCache` keeps its policy's eviction
//! semantics while being accessed from multiple threads.
//!
//! ## Test Strategy
//!
//! - Small caches where the expected victim is predictable after the threads join
//! - Larger workloads checking that capacity and key-set invariants hold
//! - Listener counts compared with the number of keys that could not fit

#![cfg(feature = "concurrent")]

use policy_cache::metrics::CacheMetrics;
use policy_cache::{Cache, PolicyKind, SharedCache};
use scoped_threadpool::Pool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// ============================================================================
// POLICY CORRECTNESS UNDER CONCURRENCY
// ============================================================================

#[test]
fn test_shared_lru_keeps_global_order() {
    let cache: SharedCache<i32, i32> = SharedCache::new(3, PolicyKind::Lru).unwrap();

    let mut pool = Pool::new(3);
    pool.scoped(|scope| {
        for i in 1..=3 {
            let cache = &cache;
            scope.execute(move || {
                cache.put(i, i * 10);
            });
        }
    });
    assert_eq!(cache.len(), 3);

    // touch 1 and 2 from other threads, leaving 3 as least recently used
    thread::scope(|s| {
        s.spawn(|| cache.get(&1));
    });
    thread::scope(|s| {
        s.spawn(|| cache.get(&2));
    });

    assert_eq!(cache.put(4, 40), Some((3, 30)));
    assert!(!cache.contains(&3));
}

#[test]
fn test_shared_lfu_protects_hot_keys() {
    let cache: SharedCache<u32, u32> = SharedCache::new(4, PolicyKind::Lfu).unwrap();
    cache.put(0, 0);

    let mut pool = Pool::new(4);
    pool.scoped(|scope| {
        for _ in 0..4 {
            let cache = &cache;
            scope.execute(move || {
                for _ in 0..50 {
                    cache.get(&0);
                }
            });
        }
    });

    for key in 1..20 {
        cache.put(key, key);
    }
    assert_eq!(cache.get(&0), Some(0));
    assert_eq!(cache.lock().frequency(&0), Some(201));
}

// ============================================================================
// THREAD SAFETY INVARIANTS
// ============================================================================

#[test]
fn test_capacity_holds_under_contention() {
    for policy in PolicyKind::ALL {
        let cache: SharedCache<u32, u32> = SharedCache::new(32, policy).unwrap();
        let mut pool = Pool::new(8);
        pool.scoped(|scope| {
            for t in 0..8u32 {
                let cache = &cache;
                scope.execute(move || {
                    for i in 0..500u32 {
                        let key = (t * 7 + i) % 100;
                        cache.put(key, i);
                        cache.get(&((key + 1) % 100));
                        if i % 17 == 0 {
                            cache.remove(&key);
                        }
                    }
                });
            }
        });

        let guard = cache.lock();
        if policy.is_bounded() {
            assert!(guard.len() <= 32, "{policy}");
            assert_eq!(guard.eviction_order().len(), guard.len(), "{policy}");
        }
    }
}

#[test]
fn test_listener_sees_every_eviction() {
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    let cache = Cache::new(10, PolicyKind::Fifo)
        .unwrap()
        .with_eviction_listener(move |_key: &u64, _value: &u64| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
    let cache = Arc::new(SharedCache::from(cache));

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..250u64 {
                    cache.put(t * 1000 + i, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // 1000 distinct keys into 10 slots
    assert_eq!(notified.load(Ordering::Relaxed), 990);
    assert_eq!(cache.len(), 10);
    assert_eq!(cache.metrics()["evictions"], 990.0);
}

#[test]
fn test_lock_groups_operations() {
    let cache: SharedCache<&str, i32> = SharedCache::new(2, PolicyKind::Mru).unwrap();
    {
        let mut guard = cache.lock();
        guard.put("a", 1);
        guard.put("b", 2);
        guard.get(&"a");
        assert_eq!(guard.peek_victim(), Some(&"a"));
    }
    assert_eq!(cache.put("c", 3), Some(("a", 1)));
    assert_eq!(cache.algorithm_name(), "MRU");
    cache.clear();
    assert!(cache.is_empty());
}
