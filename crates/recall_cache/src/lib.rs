// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A concurrent key-value cache with time-to-live expiry, built for memoization.
//!
//! [`Cache`] keeps every entry in one map behind one reader/writer lock and stamps each entry
//! with the reading of a coarse, shared [`recall_clock::Clock`]. Freshness is evaluated lazily
//! on read: an entry stored at `t` is fresh while `now - t < ttl`. There is no background
//! sweeping and no size-based eviction; a stale entry stays in the map until it is
//! overwritten or deleted.
//!
//! The central operation is [`Cache::get_or_compute`], which returns a fresh cached value or
//! runs the compute function under the write lock and stores its result. Concurrent identical
//! requests compute exactly once.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use recall_cache::Cache;
//! use recall_clock::ClockService;
//!
//! let service = ClockService::start()?;
//! let cache = Cache::builder(service.clock())
//!     .ttl(Duration::from_secs(5))
//!     .name("lengths")
//!     .build();
//!
//! let length = cache.get_or_compute(7_u64, || "seven".len());
//! assert_eq!(length, 5);
//! assert_eq!(cache.get(&7), Some(5));
//! # service.stop();
//! # Ok::<(), recall_clock::Error>(())
//! ```
//!
//! # Logging
//!
//! Lookups emit `tracing` events at DEBUG (`cache.hit`, `cache.miss`, `cache.expired`,
//! `cache.compute_failed`) and writes at TRACE (`cache.inserted`, `cache.invalidated`), with
//! the fields `cache.name`, `cache.activity` and `cache.key`.

mod builder;
mod cache;
mod entry;
mod telemetry;

pub use builder::CacheBuilder;
pub use cache::{Cache, CacheName};
pub use entry::CacheEntry;
