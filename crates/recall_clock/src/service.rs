// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::clock::{Clock, TimeCell, wall_clock_seconds};
use crate::error::{Error, Result};

/// How often a [`ClockService`] samples the wall clock unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1);

const DEFAULT_THREAD_NAME: &str = "recall-clock";

/// Owns the background thread that keeps a [`Clock`] up to date.
///
/// The service samples the wall clock once per tick and publishes the current UNIX second.
/// Any number of [`Clock`] handles can be taken from it with [`ClockService::clock`].
///
/// # Lifecycle
///
/// The ticker runs until one of the following happens:
///
/// - [`ClockService::stop`] is called. This is the explicit shutdown hook.
/// - The service and every [`Clock`] handed out by it have been dropped. Nobody can observe
///   the time anymore, so the ticker exits on its next tick.
///
/// Dropping the service alone does not stop the ticker while clocks are still alive, so caches
/// holding a clock keep receiving fresh time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recall_clock::ClockService;
///
/// let service = ClockService::builder()
///     .tick_interval(Duration::from_millis(10))
///     .thread_name("my-clock")
///     .start()?;
///
/// assert!(service.is_running());
/// service.stop();
/// assert!(!service.is_running());
/// # Ok::<(), recall_clock::Error>(())
/// ```
#[derive(Debug)]
pub struct ClockService {
    cell: Arc<TimeCell>,
    stop_requested: Arc<AtomicBool>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl ClockService {
    /// Creates a builder for configuring a clock service.
    #[must_use]
    pub fn builder() -> ClockServiceBuilder {
        ClockServiceBuilder::new()
    }

    /// Starts a clock service with the default tick interval of [`DEFAULT_TICK_INTERVAL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker thread cannot be spawned.
    pub fn start() -> Result<Self> {
        Self::builder().start()
    }

    /// Returns a handle to the clock driven by this service.
    #[must_use]
    pub fn clock(&self) -> Clock {
        Clock::from_cell(Arc::clone(&self.cell))
    }

    /// Returns the interval at which the wall clock is sampled.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Returns `true` while the ticker thread is publishing time.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.lock().as_ref().is_some_and(|ticker| !ticker.is_finished())
    }

    /// Stops the ticker thread and waits for it to exit.
    ///
    /// After this returns, clocks taken from this service keep reporting the last published
    /// second forever. Calling `stop` again is a no-op.
    pub fn stop(&self) {
        let Some(ticker) = self.ticker.lock().take() else {
            return;
        };

        self.stop_requested.store(true, Ordering::Release);
        ticker.thread().unpark();

        if ticker.join().is_err() {
            tracing::error!("clock ticker thread panicked");
        }

        tracing::debug!(clock.last_published = self.cell.load(), "clock.stopped");
    }
}

/// Builder for a [`ClockService`].
#[derive(Debug, Clone)]
pub struct ClockServiceBuilder {
    tick_interval: Duration,
    thread_name: String,
}

impl Default for ClockServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockServiceBuilder {
    /// Creates a builder with a tick interval of [`DEFAULT_TICK_INTERVAL`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }

    /// Sets how often the wall clock is sampled.
    ///
    /// Shorter intervals bound the staleness of the published time more tightly at the cost of
    /// more wakeups. The published value has whole-second resolution regardless.
    #[must_use]
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the name of the ticker thread, as shown by debuggers and profilers.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Publishes the current time and starts the ticker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick interval is zero or the ticker thread cannot be spawned.
    pub fn start(self) -> Result<ClockService> {
        if self.tick_interval.is_zero() {
            return Err(Error::zero_tick_interval());
        }

        let cell = Arc::new(TimeCell::new(wall_clock_seconds()));
        let stop_requested = Arc::new(AtomicBool::new(false));

        let ticker = {
            let cell = Arc::downgrade(&cell);
            let stop_requested = Arc::clone(&stop_requested);
            let interval = self.tick_interval;

            thread::Builder::new()
                .name(self.thread_name.clone())
                .spawn(move || run_ticker(&cell, &stop_requested, interval))
                .map_err(Error::spawn)?
        };

        tracing::debug!(
            clock.thread = %self.thread_name,
            clock.tick_interval = ?self.tick_interval,
            "clock.started"
        );

        Ok(ClockService {
            cell,
            stop_requested,
            ticker: Mutex::new(Some(ticker)),
            tick_interval: self.tick_interval,
        })
    }
}

#[cfg_attr(test, mutants::skip)] // Mutations turn this into an endless loop.
fn run_ticker(cell: &Weak<TimeCell>, stop_requested: &AtomicBool, interval: Duration) {
    loop {
        // Parking doubles as the stop signal: `stop` unparks us so we do not sleep out the tick.
        thread::park_timeout(interval);

        if stop_requested.load(Ordering::Acquire) {
            return;
        }

        let Some(cell) = cell.upgrade() else {
            tracing::debug!("all clocks dropped, ticker exiting");
            return;
        };

        cell.publish(wall_clock_seconds());
    }
}
