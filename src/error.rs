//! Error types for cache construction.
//!
//! Lookups and insertions never fail: a miss is `None` and an absent key or
//! value on `put_opt` is a no-op. The only failures happen while turning
//! configuration into a cache.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Errors raised while building a cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity was zero.
    #[error("cache capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// A policy name did not match any known eviction policy.
    #[error("unknown eviction policy `{0}`")]
    UnknownPolicy(String),
}

/// Convenience result type for cache construction.
pub type Result<T> = core::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidCapacity(0).to_string(),
            "cache capacity must be positive, got 0"
        );
        assert_eq!(
            CacheError::UnknownPolicy("arc".to_string()).to_string(),
            "unknown eviction policy `arc`"
        );
    }
}
