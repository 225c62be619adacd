// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::RwLock;
use recall_clock::Clock;

use crate::builder::{CacheBuilder, DEFAULT_CACHE_NAME, ttl_seconds};
use crate::entry::CacheEntry;
use crate::telemetry::{CacheActivity, record};

/// Identifies a cache in log events.
pub type CacheName = &'static str;

/// A concurrent key-value cache whose entries expire a fixed time after they are stored.
///
/// All entries live in one map guarded by one reader/writer lock. Lookups of fresh entries
/// take only the read lock. Freshness is decided at read time against the cache's [`Clock`]:
/// an entry stored at `t` is fresh while `now - t < ttl`, and a TTL of zero means entries never
/// expire. Stale entries are not swept; they stay in the map until overwritten or deleted.
///
/// # Concurrency
///
/// [`get_or_compute`](Self::get_or_compute) runs the compute function while holding the
/// cache-wide write lock. At most one computation is in flight per cache at any moment, so
/// concurrent identical requests compute exactly once. The price is that a slow computation
/// also blocks lookups and computations of unrelated keys in the same cache.
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
/// let cache = Cache::new(service.clock(), Duration::from_secs(60));
///
/// cache.set(1_u64, "one");
/// assert_eq!(cache.get(&1), Some("one"));
///
/// cache.delete(&1);
/// assert_eq!(cache.get(&1), None);
/// # service.stop();
/// # Ok::<(), recall_clock::Error>(())
/// ```
pub struct Cache<K, V> {
    name: CacheName,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl_secs: i64,
    clock: Clock,
}

impl<K, V> Cache<K, V> {
    /// Creates a builder for a cache that reads time from `clock`.
    #[must_use]
    pub fn builder(clock: Clock) -> CacheBuilder<K, V> {
        CacheBuilder::new(clock)
    }

    /// Creates a cache with the given TTL and default settings otherwise.
    ///
    /// See [`CacheBuilder::ttl`] for how the TTL is rounded.
    #[must_use]
    pub fn new(clock: Clock, ttl: Duration) -> Self
    where
        K: Hash + Eq,
    {
        Self::from_parts(clock, ttl_seconds(ttl), 0, DEFAULT_CACHE_NAME)
    }

    pub(crate) fn from_parts(clock: Clock, ttl_secs: i64, initial_capacity: usize, name: CacheName) -> Self
    where
        K: Hash + Eq,
    {
        Self {
            name,
            entries: RwLock::new(HashMap::with_capacity(initial_capacity)),
            ttl_secs,
            clock,
        }
    }

    /// Returns the TTL in effect, in whole seconds. [`Duration::ZERO`] means entries never expire.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.cast_unsigned())
    }

    /// Returns the name that identifies this cache in log events.
    #[must_use]
    pub fn name(&self) -> CacheName {
        self.name
    }

    /// Returns the clock that timestamps entries.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no entries are stored, stale or fresh.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Debug,
    V: Clone,
{
    /// Returns a clone of the value stored for `key` if it is present and fresh.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read();
        self.fresh_value(&entries, key)
    }

    /// Returns the value stored for `key` and `true` if it is present and fresh, or the
    /// default value and `false` otherwise.
    ///
    /// The returned value carries no meaning when the flag is `false`.
    #[must_use]
    pub fn get_or_zero(&self, key: &K) -> (V, bool)
    where
        V: Default,
    {
        self.get(key).map_or_else(|| (V::default(), false), |value| (value, true))
    }

    /// Returns `true` if a fresh entry is stored for `key`, without cloning its value.
    #[must_use]
    pub fn contains_fresh(&self, key: &K) -> bool {
        let now = self.clock.now();
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now, self.ttl_secs))
    }

    /// Stores `value` for `key`, timestamped with the current clock reading.
    ///
    /// Any previous entry for `key` is replaced, fresh or not.
    pub fn set(&self, key: K, value: V) {
        let cached_at = self.clock.now();
        let mut entries = self.entries.write();

        record(self.name, CacheActivity::Inserted, &key);
        entries.insert(key, CacheEntry::new(value, cached_at));
    }

    /// Removes the entry stored for `key`. Does nothing if there is none.
    pub fn delete(&self, key: &K) {
        if self.entries.write().remove(key).is_some() {
            record(self.name, CacheActivity::Invalidated, key);
        }
    }

    /// Returns the fresh value stored for `key`, or computes, stores and returns a new one.
    ///
    /// The compute function runs while the cache-wide write lock is held. Freshness is checked
    /// again once the lock is acquired, so a value stored by a concurrent caller in the
    /// meantime is returned instead of being computed a second time.
    ///
    /// If `compute` panics, the cache is left as it was and the panic propagates.
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
    /// let cache = Cache::new(service.clock(), Duration::ZERO);
    ///
    /// assert_eq!(cache.get_or_compute(2_u64, || 4_u64), 4);
    /// // Already cached, so the compute function is not called.
    /// assert_eq!(cache.get_or_compute(2_u64, || unreachable!()), 4);
    /// # service.stop();
    /// # Ok::<(), recall_clock::Error>(())
    /// ```
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let Ok(value) = self.try_get_or_compute(key, || Ok::<V, Infallible>(compute()));
        value
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but with a fallible compute function.
    ///
    /// Only successful results are stored. An error is returned to the caller unchanged and
    /// leaves the cache as it was, including any stale entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `compute`.
    pub fn try_get_or_compute<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let mut entries = self.entries.write();

        // Another caller may have stored a fresh value while we waited for the write lock.
        if let Some(entry) = entries.get(&key)
            && entry.is_fresh(self.clock.now(), self.ttl_secs)
        {
            record(self.name, CacheActivity::Hit, &key);
            return Ok(entry.value().clone());
        }

        match compute() {
            Ok(value) => {
                let cached_at = self.clock.now();
                record(self.name, CacheActivity::Inserted, &key);
                entries.insert(key, CacheEntry::new(value.clone(), cached_at));
                Ok(value)
            }
            Err(error) => {
                record(self.name, CacheActivity::ComputeFailed, &key);
                Err(error)
            }
        }
    }

    fn fresh_value(&self, entries: &HashMap<K, CacheEntry<V>>, key: &K) -> Option<V> {
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.clock.now(), self.ttl_secs) => {
                record(self.name, CacheActivity::Hit, key);
                Some(entry.value().clone())
            }
            Some(_) => {
                record(self.name, CacheActivity::Expired, key);
                None
            }
            None => {
                record(self.name, CacheActivity::Miss, key);
                None
            }
        }
    }
}

impl<K, V> Debug for Cache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.name)
            .field("ttl_secs", &self.ttl_secs)
            .field("len", &self.len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
