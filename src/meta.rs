//! Per-entry ordering metadata.
//!
//! FIFO, LIFO, LRU and MRU need nothing beyond a key's position in a list, so
//! their order record is just a [`Slot`](crate::Slot). LFU additionally keeps
//! an access counter, defined here.
//!
//! | Policy    | Order record                    | Description |
//! |-----------|---------------------------------|-------------|
//! | Unbounded | none                            | No ordering at all |
//! | FIFO/LIFO | [`Slot`](crate::Slot)           | Position in the insertion list |
//! | LRU/MRU   | [`Slot`](crate::Slot)           | Position in the recency list |
//! | LFU       | [`Slot`](crate::Slot) + [`LfuMeta`] | Position in a frequency bucket plus an access counter |

/// Metadata for LFU (Least Frequently Used) entries.
///
/// A key starts at frequency 0 when first inserted. Each later touch (a `get`
/// hit or a `put` overwrite) adds one.
///
/// # Examples
///
/// ```
/// use policy_cache::meta::LfuMeta;
///
/// let mut meta = LfuMeta::default();
/// assert_eq!(meta.frequency, 0);
/// assert_eq!(meta.increment(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LfuMeta {
    /// Number of touches since the key was inserted.
    pub frequency: u64,
}

impl LfuMeta {
    /// Creates metadata with the given starting frequency.
    #[inline]
    pub fn new(frequency: u64) -> Self {
        Self { frequency }
    }

    /// Increments the frequency counter and returns the new value.
    #[inline]
    pub fn increment(&mut self) -> u64 {
        self.frequency = self.frequency.saturating_add(1);
        self.frequency
    }
}
