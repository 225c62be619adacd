// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structured log events for cache activity.

use std::fmt::Debug;

use crate::cache::CacheName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheActivity {
    Hit,
    Miss,
    Expired,
    Inserted,
    Invalidated,
    ComputeFailed,
}

impl CacheActivity {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "cache.hit",
            Self::Miss => "cache.miss",
            Self::Expired => "cache.expired",
            Self::Inserted => "cache.inserted",
            Self::Invalidated => "cache.invalidated",
            Self::ComputeFailed => "cache.compute_failed",
        }
    }
}

/// Emits one event describing `activity` on `key` in the named cache.
///
/// Lookups log at DEBUG, writes at TRACE.
#[inline]
pub(crate) fn record<K: Debug + ?Sized>(cache_name: CacheName, activity: CacheActivity, key: &K) {
    let activity_name = activity.as_str();

    // Tracing level must be constant, so we use a macro to select the appropriate level.
    macro_rules! emit_event {
        ($level:ident) => {
            tracing::$level!(
                cache.name = cache_name,
                cache.activity = activity_name,
                cache.key = ?key,
                "cache.event"
            )
        };
    }

    match activity {
        CacheActivity::Hit | CacheActivity::Miss | CacheActivity::Expired | CacheActivity::ComputeFailed => {
            emit_event!(debug);
        }
        CacheActivity::Inserted | CacheActivity::Invalidated => emit_event!(trace),
    }
}
