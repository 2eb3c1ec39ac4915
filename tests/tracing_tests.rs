//! Structured log events emitted by the cache.
//!
//! A capturing `tracing_subscriber` layer records every event so the tests can
//! check which evictions were logged and with which fields.

use policy_cache::{Cache, PolicyKind};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

const EVICT_TARGET: &str = "policy_cache::evict";

#[derive(Debug, Clone)]
struct Captured {
    target: String,
    fields: BTreeMap<String, String>,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureLayer {
    fn evictions(&self) -> Vec<Captured> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.target == EVICT_TARGET)
            .cloned()
            .collect()
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.events.lock().unwrap().push(Captured {
            target: event.metadata().target().to_string(),
            fields: recorder.0,
        });
    }
}

/// Runs `f` with a capturing subscriber installed on this thread.
fn capture<F: FnOnce()>(f: F) -> CaptureLayer {
    let layer = CaptureLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer
}

#[test]
fn test_eviction_event_names_the_victim() {
    let layer = capture(|| {
        let mut cache = Cache::new(2, PolicyKind::Fifo).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
    });

    let evictions = layer.evictions();
    assert_eq!(evictions.len(), 1);
    let fields = &evictions[0].fields;
    assert_eq!(fields["key"], "\"a\"");
    assert_eq!(fields["policy"], "fifo");
    assert_eq!(fields["len"], "1");
    assert_eq!(fields["message"], "evicted entry");
}

#[test]
fn test_one_event_per_eviction() {
    let layer = capture(|| {
        let mut cache = Cache::new(1, PolicyKind::Lru).unwrap();
        for i in 0u32..4 {
            cache.put(i, i);
        }
    });

    let keys: Vec<String> = layer
        .evictions()
        .into_iter()
        .map(|event| event.fields["key"].clone())
        .collect();
    assert_eq!(keys, vec!["0", "1", "2"]);
}

#[test]
fn test_overwrite_remove_and_clear_log_no_eviction() {
    let layer = capture(|| {
        let mut cache = Cache::new(2, PolicyKind::Lfu).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);
        cache.remove(&"b");
        cache.clear();
        assert!(cache.is_empty());
    });

    assert!(layer.evictions().is_empty());
}

#[test]
fn test_unbounded_never_logs_eviction() {
    let layer = capture(|| {
        let mut cache = Cache::new(1, PolicyKind::Unbounded).unwrap();
        for i in 0u8..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 10);
    });

    assert!(layer.evictions().is_empty());
}
