// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Memoizes functions of up to seven arguments, with a time-to-live.
//!
//! A memoized function returns the result of an earlier call with the same arguments while
//! that result is fresh, and runs the original function otherwise. Results expire a fixed
//! time after they were computed; a TTL of zero keeps them forever.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! let slow_square = |x: u64| {
//!     // Imagine something expensive here.
//!     x * x
//! };
//!
//! let square = recall::memoize1(slow_square, Duration::from_secs(30));
//!
//! assert_eq!(square(12), 144); // computed
//! assert_eq!(square(12), 144); // cached
//! ```
//!
//! # How It Works
//!
//! Each memoized function owns a private [`Cache`] keyed by a 64-bit fingerprint of its
//! arguments. Arguments are folded in order with FNV-1a by [`KeyHash`], so only types that
//! implement [`KeyHash`] can be arguments: integers, floats, booleans, `char`, strings, byte
//! slices and references or smart pointers to those. Implement [`KeyHash`] for your own
//! types to use them as arguments. The fingerprint is the entire key; two argument lists
//! with colliding fingerprints share one result.
//!
//! Time is read from a [`Clock`], a coarse wall clock that a background thread refreshes
//! every millisecond. Unless a memoizer is given a clock with [`Memoizer::with_clock`], it
//! uses the process-wide [`default_clock`], which is started on first use and stopped by
//! [`shutdown`].
//!
//! # Concurrency
//!
//! Memoized functions can be shared between threads. Concurrent calls with the same
//! arguments compute the result once. The compute function runs under the cache's write
//! lock, so a slow computation also delays calls with other arguments to the same memoized
//! function.
//!
//! # Variants
//!
//! For every arity from 0 to 7 there are four entry points, available as free functions that
//! use the default clock and as methods on [`Memoizer`]:
//!
//! - [`memoize2`] and friends wrap plain functions.
//! - [`memoize_ctx2`] and friends wrap functions whose first parameter is a context, such as a
//!   cancellation token. The context is passed through and is not part of the key.
//! - [`try_memoize2`] and friends wrap functions returning `Result`. Errors are not cached.
//! - [`try_memoize_ctx2`] and friends combine the two.
//!
//! [`memoize_dyn`] accepts arguments as a run-time list of [`KeyValue`]s instead.
//!
//! ```
//! use std::time::Duration;
//!
//! #[derive(Debug, PartialEq)]
//! struct NotFound;
//!
//! let lookup = recall::try_memoize1(
//!     |id: u32| if id == 7 { Ok("seven") } else { Err(NotFound) },
//!     Duration::from_secs(10),
//! );
//!
//! assert_eq!(lookup(7), Ok("seven"));
//! assert_eq!(lookup(8), Err(NotFound));
//! ```

mod default_clock;
mod dynamic;
mod memoizer;

pub use default_clock::{default_clock, shutdown};
pub use dynamic::{DynMemoized, memoize_dyn};
pub use memoizer::*;
pub use recall_cache::{Cache, CacheBuilder};
#[cfg(any(feature = "test-util", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub use recall_clock::ClockControl;
pub use recall_clock::{Clock, ClockService};
pub use recall_hash::{Fingerprint, KeyHash, KeyValue};
