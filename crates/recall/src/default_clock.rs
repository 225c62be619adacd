// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::OnceLock;

use recall_clock::{Clock, ClockService};

const DEFAULT_CLOCK_THREAD_NAME: &str = "recall-default-clock";

static DEFAULT_CLOCK: OnceLock<ClockService> = OnceLock::new();

/// Returns a handle to the process-wide clock, starting it on first use.
///
/// Memoizers that are not given a clock of their own read time from this clock. The
/// underlying [`ClockService`] ticks once per [`DEFAULT_TICK_INTERVAL`](recall_clock::DEFAULT_TICK_INTERVAL)
/// on a dedicated thread until [`shutdown`] is called.
///
/// # Panics
///
/// Panics if the ticker thread cannot be spawned on first use.
#[must_use]
pub fn default_clock() -> Clock {
    DEFAULT_CLOCK.get_or_init(start_default_clock).clock()
}

/// Stops the process-wide clock if it was ever started.
///
/// Memoized functions keep working afterwards, but the clock they read from no longer moves,
/// so their entries stop expiring. The clock is not restarted by later calls to
/// [`default_clock`]. Calling this more than once has no further effect.
pub fn shutdown() {
    if let Some(service) = DEFAULT_CLOCK.get() {
        service.stop();
        tracing::debug!("default clock shut down");
    }
}

#[cfg_attr(test, mutants::skip)] // Startup failure cannot be provoked in tests.
#[expect(clippy::panic, reason = "memoizers have no error channel for a missing clock")]
fn start_default_clock() -> ClockService {
    let service = ClockService::builder()
        .thread_name(DEFAULT_CLOCK_THREAD_NAME)
        .start()
        .unwrap_or_else(|error| panic!("cannot start the default clock: {error}"));

    tracing::debug!(clock.thread = DEFAULT_CLOCK_THREAD_NAME, "default clock started");
    service
}
