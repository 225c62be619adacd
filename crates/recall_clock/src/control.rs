// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, TimeCell, wall_clock_seconds};

/// Controls the flow of time in tests.
///
/// Clocks created by [`ClockControl::to_clock`] only move when [`advance`](Self::advance) or
/// [`set`](Self::set) is called, which makes TTL expiry testable without sleeping.
///
/// `ClockControl` is available when the `test-util` feature is enabled. Never enable that
/// feature for production code.
#[derive(Debug, Clone)]
pub struct ClockControl {
    cell: Arc<TimeCell>,
}

impl Default for ClockControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockControl {
    /// Creates a control whose time starts at the current wall-clock second.
    #[must_use]
    pub fn new() -> Self {
        Self::at(wall_clock_seconds())
    }

    /// Creates a control whose time starts at the given UNIX second.
    #[must_use]
    pub fn at(seconds: i64) -> Self {
        Self {
            cell: Arc::new(TimeCell::new(seconds)),
        }
    }

    /// Moves time forward by the whole seconds in `duration`. Sub-second parts are ignored.
    pub fn advance(&self, duration: Duration) {
        self.cell.advance(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX));
    }

    /// Moves time to the given UNIX second. Time never moves backwards, so earlier values
    /// are ignored.
    pub fn set(&self, seconds: i64) {
        self.cell.publish(seconds);
    }

    /// Returns the current controlled time.
    #[must_use]
    pub fn now(&self) -> i64 {
        self.cell.load()
    }

    /// Returns a clock that observes this control.
    #[must_use]
    pub fn to_clock(&self) -> Clock {
        Clock::from_cell(Arc::clone(&self.cell))
    }
}
