// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// A cached value together with the clock reading taken when it was stored.
///
/// Entries are replaced wholesale on every write and never mutated in place.
///
/// # Examples
///
/// ```
/// use recall_cache::CacheEntry;
///
/// let entry = CacheEntry::new("value", 1_000);
/// assert_eq!(*entry.value(), "value");
/// assert!(entry.is_fresh(1_004, 5));
/// assert!(!entry.is_fresh(1_005, 5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry<V> {
    value: V,
    cached_at: i64,
}

impl<V> CacheEntry<V> {
    /// Creates an entry stored at `cached_at`, in whole UNIX seconds.
    pub const fn new(value: V, cached_at: i64) -> Self {
        Self { value, cached_at }
    }

    /// Returns a reference to the cached value.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry and returns the cached value.
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the clock reading taken when the entry was stored.
    #[must_use]
    pub const fn cached_at(&self) -> i64 {
        self.cached_at
    }

    /// Returns whether the entry is still fresh at `now` for a TTL of `ttl_secs`.
    ///
    /// A TTL of zero means the entry never expires. Otherwise the entry is fresh while
    /// `now - cached_at < ttl_secs`.
    #[must_use]
    pub const fn is_fresh(&self, now: i64, ttl_secs: i64) -> bool {
        ttl_secs == 0 || now.saturating_sub(self.cached_at) < ttl_secs
    }
}
