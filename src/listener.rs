//! Eviction notifications.
//!
//! A listener is called synchronously from inside `put` (and `pop_victim`)
//! once the victim has left the cache and before the new entry is stored.
//! Explicit `remove` and `clear` are not evictions and never notify.

/// Receives every evicted entry.
///
/// Any `FnMut(&K, &V)` closure is a listener.
///
/// # Examples
///
/// ```
/// use policy_cache::{Cache, PolicyKind};
/// use std::sync::{Arc, Mutex};
///
/// let discarded = Arc::new(Mutex::new(Vec::new()));
/// let log = Arc::clone(&discarded);
///
/// let mut cache = Cache::new(1, PolicyKind::Fifo)
///     .unwrap()
///     .with_eviction_listener(move |key: &u32, _value: &&str| {
///         log.lock().unwrap().push(*key);
///     });
///
/// cache.put(1, "one");
/// cache.put(2, "two");
/// assert_eq!(*discarded.lock().unwrap(), vec![1]);
/// ```
pub trait EvictionListener<K, V> {
    /// Called with the victim's key and value.
    fn on_evict(&mut self, key: &K, value: &V);
}

impl<K, V, F> EvictionListener<K, V> for F
where
    F: FnMut(&K, &V),
{
    fn on_evict(&mut self, key: &K, value: &V) {
        self(key, value)
    }
}
