// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unpublished crate containing testing utilities for use within this repo.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, mpsc};
use std::thread;
use std::time::Duration;

mod log;

pub use log::*;

/// If something (whatever) does not happen in a test within this time, the test will fail.
///
/// This is only meant to break out of deadlocks, not to bound anything a test expects.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Counts how many times a compute function actually ran.
///
/// Clones share the same count, so a clone can be moved into the function under test while
/// the original stays with the test for assertions.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation and returns the count including it.
    pub fn hit(&self) -> usize {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[must_use]
    pub fn get(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

/// Runs `f` on `threads` threads at once and returns every result, in thread order.
///
/// All threads wait on a barrier before calling `f`, which maximizes the overlap between
/// the calls.
///
/// # Panics
///
/// Panics if any invocation of `f` panics.
#[cfg_attr(test, mutants::skip)] // This is test logic - pointless to mutate.
pub fn run_concurrently<F, R>(threads: usize, f: F) -> Vec<R>
where
    F: Fn() -> R + Sync,
    R: Send,
{
    let barrier = Barrier::new(threads);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    f()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect()
    })
}

/// Executes a thread-safe function on a background thread and abandons it if it does not
/// complete within [`TEST_TIMEOUT`].
///
/// Returns `None` if the function timed out or panicked.
#[cfg_attr(test, mutants::skip)] // This is test logic - pointless to mutate.
#[must_use]
pub fn execute_or_abandon<F, R>(f: F) -> Option<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    // A panic drops the sender without sending, which ends the wait early.
    thread::spawn(move || {
        _ = sender.send(f());
    });

    receiver.recv_timeout(TEST_TIMEOUT).ok()
}

/// Runs `f`, expects it to panic, and returns the panic message.
///
/// # Panics
///
/// Panics if `f` returns normally or panics with a payload that is not a string.
#[cfg_attr(test, mutants::skip)] // This is test logic - pointless to mutate.
pub fn panic_message<F, R>(f: F) -> String
where
    F: FnOnce() -> R,
{
    // We assert unwind safety here because #[should_panic] does not make us worry about it either.
    let Err(payload) = catch_unwind(AssertUnwindSafe(f)) else {
        panic!("expected the function to panic");
    };

    payload_to_string(payload.as_ref())
}

fn payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return (*message).to_owned();
    }

    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }

    panic!("panic payload is not a string");
}
