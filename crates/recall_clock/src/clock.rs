// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// The shared cell every [`Clock`] handle reads from.
///
/// Only one writer exists at a time: the ticker thread of a [`ClockService`](crate::ClockService)
/// or a [`ClockControl`](crate::ClockControl).
#[derive(Debug)]
pub(crate) struct TimeCell {
    seconds: AtomicI64,
}

impl TimeCell {
    pub(crate) const fn new(seconds: i64) -> Self {
        Self {
            seconds: AtomicI64::new(seconds),
        }
    }

    #[inline]
    pub(crate) fn load(&self) -> i64 {
        self.seconds.load(Ordering::Relaxed)
    }

    /// Publishes `seconds` unless a later second has already been published.
    #[inline]
    pub(crate) fn publish(&self, seconds: i64) {
        self.seconds.fetch_max(seconds, Ordering::Relaxed);
    }

    #[cfg(any(feature = "test-util", test))]
    pub(crate) fn advance(&self, seconds: i64) {
        // The closure never rejects an update, so the result is always `Ok`.
        _ = self
            .seconds
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| Some(current.saturating_add(seconds)));
    }
}

/// Set once the pre-epoch warning has been logged for this process.
static WARNED_BEFORE_EPOCH: AtomicBool = AtomicBool::new(false);

/// Samples the operating system wall clock, in whole seconds since the UNIX epoch.
pub(crate) fn wall_clock_seconds() -> i64 {
    seconds_since_epoch(SystemTime::now(), &WARNED_BEFORE_EPOCH)
}

/// Converts `time` to whole seconds since the UNIX epoch, clamping earlier times to zero.
///
/// The ticker samples on every tick, so a clock stuck before the epoch is reported once.
fn seconds_since_epoch(time: SystemTime, warned: &AtomicBool) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(error) => {
            if warned.swap(true, Ordering::Relaxed) {
                tracing::trace!(clock.behind_epoch = ?error.duration(), "system clock reports a time before the UNIX epoch");
            } else {
                tracing::warn!(clock.behind_epoch = ?error.duration(), "system clock reports a time before the UNIX epoch");
            }
            0
        }
    }
}

/// A handle to a coarse wall clock.
///
/// `Clock` is cheap to clone; all clones observe the same time cell. Reading the time is a
/// single relaxed atomic load, so the clock can be consulted on every cache operation.
///
/// Clocks are obtained from a running [`ClockService`](crate::ClockService) or, in tests,
/// from a [`ClockControl`](crate::ClockControl).
///
/// # Examples
///
/// ```
/// use recall_clock::ClockService;
///
/// let service = ClockService::start()?;
/// let clock = service.clock();
///
/// let first = clock.now();
/// let second = clock.clone().now();
/// assert!(first <= second);
/// # service.stop();
/// # Ok::<(), recall_clock::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Clock(Arc<TimeCell>);

impl Clock {
    pub(crate) const fn from_cell(cell: Arc<TimeCell>) -> Self {
        Self(cell)
    }

    /// Creates a clock that is frozen at the given UNIX second and never moves.
    ///
    /// This is available when the `test-util` feature is enabled.
    #[cfg(any(feature = "test-util", test))]
    #[must_use]
    pub fn new_frozen_at(seconds: i64) -> Self {
        Self(Arc::new(TimeCell::new(seconds)))
    }

    /// Returns the most recently published time, in whole seconds since the UNIX epoch.
    ///
    /// This is not a live reading of the system clock. The value lags real time by at most
    /// one tick of the service that drives this clock.
    #[inline]
    #[must_use]
    pub fn now(&self) -> i64 {
        self.0.load()
    }
}
