// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::hash::Hash;
use std::marker::PhantomData;
use std::time::Duration;

use recall_clock::Clock;

use crate::cache::{Cache, CacheName};

pub(crate) const DEFAULT_CACHE_NAME: CacheName = "recall";

/// Builder for configuring a [`Cache`].
///
/// Obtained from [`Cache::builder`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recall_cache::Cache;
/// use recall_clock::ClockService;
///
/// let service = ClockService::start()?;
/// let cache = Cache::<u64, String>::builder(service.clock())
///     .ttl(Duration::from_secs(300))
///     .initial_capacity(64)
///     .name("profiles")
///     .build();
///
/// assert_eq!(cache.ttl(), Duration::from_secs(300));
/// assert_eq!(cache.name(), "profiles");
/// # service.stop();
/// # Ok::<(), recall_clock::Error>(())
/// ```
#[derive(Debug)]
pub struct CacheBuilder<K, V> {
    clock: Clock,
    ttl: Duration,
    initial_capacity: usize,
    name: CacheName,
    _phantom: PhantomData<fn() -> (K, V)>,
}

impl<K, V> CacheBuilder<K, V> {
    pub(crate) fn new(clock: Clock) -> Self {
        Self {
            clock,
            ttl: Duration::ZERO,
            initial_capacity: 0,
            name: DEFAULT_CACHE_NAME,
            _phantom: PhantomData,
        }
    }

    /// Sets how long entries stay fresh after they are stored.
    ///
    /// The TTL is tracked in whole seconds. A nonzero TTL shorter than one second is rounded
    /// up to one second, and fractional seconds above that are truncated. [`Duration::ZERO`],
    /// the default, means entries never expire.
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the number of entries to allocate room for up front.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the name that identifies this cache in log events. Defaults to `"recall"`.
    #[must_use]
    pub fn name(mut self, name: CacheName) -> Self {
        self.name = name;
        self
    }

    /// Builds the configured cache.
    #[must_use]
    pub fn build(self) -> Cache<K, V>
    where
        K: Hash + Eq,
    {
        Cache::from_parts(self.clock, ttl_seconds(self.ttl), self.initial_capacity, self.name)
    }
}

/// Converts a TTL to whole seconds, rounding a nonzero sub-second TTL up to one second.
pub(crate) fn ttl_seconds(ttl: Duration) -> i64 {
    if ttl.is_zero() {
        return 0;
    }

    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX).max(1)
}
