// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A coarse wall clock that is cheap enough to read on every cache lookup.
//!
//! Reading the system time costs a system call (or at least a vDSO round trip) and caches
//! consult the time on every hit. This crate moves that cost to a single background thread:
//! a [`ClockService`] samples the wall clock on a fixed tick and publishes the current UNIX
//! second into a shared atomic cell. Every [`Clock`] handle reads that cell with one relaxed
//! atomic load and no locking.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use recall_clock::ClockService;
//!
//! let service = ClockService::builder()
//!     .tick_interval(Duration::from_millis(5))
//!     .start()?;
//!
//! let clock = service.clock();
//! let now = clock.now();
//! assert!(now > 0);
//!
//! // Terminates the ticker; the clock keeps reporting the last published second.
//! service.stop();
//! # Ok::<(), recall_clock::Error>(())
//! ```
//!
//! # Resolution
//!
//! The published time is whole seconds and is refreshed once per tick. TTL decisions made
//! against it are therefore imprecise by up to one second plus one tick, which is the price
//! paid for never touching the OS clock on the read path.
//!
//! # Monotonicity
//!
//! A published value never decreases. If the operating system steps the wall clock
//! backwards, readers keep seeing the previous value until the wall clock catches up.
//!
//! # Testing
//!
//! With the `test-util` feature, [`ClockControl`] produces clocks whose time only moves when
//! the test says so, and [`Clock::new_frozen_at`] produces clocks that never move.
//!
//! > **Important:** Never enable the `test-util` feature for production code. Only use it in
//! > your `dev-dependencies`.

mod clock;
#[cfg(any(feature = "test-util", test))]
mod control;
mod error;
mod service;

pub use clock::Clock;
#[cfg(any(feature = "test-util", test))]
pub use control::ClockControl;
pub use error::{Error, ErrorKind, Result};
pub use service::{ClockService, ClockServiceBuilder, DEFAULT_TICK_INTERVAL};
