// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::fmt::Debug;
use std::time::Duration;

use recall_cache::Cache;
use recall_hash::{KeyValue, hash_values};

use crate::memoizer::Memoizer;

/// A memoized function whose argument list is only known at run time.
///
/// Created by [`memoize_dyn`] or [`Memoizer::memoize_dyn`]. Arguments are passed as a slice of
/// [`KeyValue`]s, between one and [`MAX_ARITY`](recall_hash::MAX_ARITY) of them, and fingerprint
/// exactly like the typed memoizers would fingerprint the same values.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recall::{KeyValue, memoize_dyn};
///
/// let describe = memoize_dyn(
///     |args: &[KeyValue<'_>]| format!("{} args", args.len()),
///     Duration::from_secs(60),
/// );
///
/// assert_eq!(describe.call(&[KeyValue::from(1_i32), KeyValue::from("two")]), "2 args");
/// ```
pub struct DynMemoized<V, F> {
    cache: Cache<u64, V>,
    compute: F,
}

impl<V, F> DynMemoized<V, F>
where
    V: Clone,
    F: Fn(&[KeyValue<'_>]) -> V,
{
    /// Returns the cached result for `args`, computing it if needed.
    ///
    /// # Panics
    ///
    /// Panics if `args` holds no values or more than [`MAX_ARITY`](recall_hash::MAX_ARITY).
    pub fn call(&self, args: &[KeyValue<'_>]) -> V {
        let key = hash_values(args);
        self.cache.get_or_compute(key, || (self.compute)(args))
    }

    /// Like [`call`](Self::call), but inspects the run-time type of every argument first.
    ///
    /// # Panics
    ///
    /// Panics if an argument has a type that cannot be part of a cache key, or if the number
    /// of arguments is unsupported.
    pub fn call_any(&self, args: &[&dyn Any]) -> V {
        let values: Vec<KeyValue<'_>> = args.iter().map(|arg| KeyValue::from_any(*arg)).collect();
        self.call(&values)
    }
}

impl<V, F> Debug for DynMemoized<V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynMemoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Memoizer {
    /// Memoizes a function whose arguments are supplied at run time as [`KeyValue`]s.
    ///
    /// Prefer the typed `memoizeN` methods; this variant pays for a run-time arity check on
    /// every call.
    #[must_use]
    pub fn memoize_dyn<V, F>(&self, compute: F) -> DynMemoized<V, F>
    where
        V: Clone,
        F: Fn(&[KeyValue<'_>]) -> V,
    {
        DynMemoized {
            cache: self.build_cache(),
            compute,
        }
    }
}

/// Memoizes a function whose arguments are supplied at run time, reading time from the
/// [`default_clock`](crate::default_clock).
///
/// Shorthand for `Memoizer::new(ttl).memoize_dyn(compute)`.
#[must_use]
pub fn memoize_dyn<V, F>(compute: F, ttl: Duration) -> DynMemoized<V, F>
where
    V: Clone,
    F: Fn(&[KeyValue<'_>]) -> V,
{
    Memoizer::new(ttl).memoize_dyn(compute)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use recall_clock::ClockControl;
    use testing_aids::{CallCounter, panic_message};

    use super::*;

    fn memoizer() -> Memoizer {
        Memoizer::new(Duration::ZERO).with_clock(ClockControl::at(100).to_clock())
    }

    #[test]
    fn repeated_call_computes_once() {
        let counter = CallCounter::new();
        let memoized = memoizer().memoize_dyn(|args: &[KeyValue<'_>]| {
            counter.hit();
            args.len()
        });

        let args = [KeyValue::from(1_u8), KeyValue::from(true)];
        assert_eq!(memoized.call(&args), 2);
        assert_eq!(memoized.call(&args), 2);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn call_any_matches_call() {
        let counter = CallCounter::new();
        let memoized = memoizer().memoize_dyn(|_: &[KeyValue<'_>]| counter.hit());

        let name = String::from("n");
        let first = memoized.call(&[KeyValue::from(5_i64), KeyValue::from(&name)]);
        let second = memoized.call_any(&[&5_i64, &name]);

        assert_eq!(first, second);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn arity_is_checked() {
        let memoized = memoizer().memoize_dyn(|args: &[KeyValue<'_>]| args.len());

        assert_eq!(
            panic_message(|| memoized.call(&[])),
            "unsupported number of arguments: 0"
        );
        assert_eq!(
            panic_message(|| memoized.call(&[KeyValue::Bool(true); 8])),
            "unsupported number of arguments: 8"
        );
    }

    #[test]
    fn unsupported_type_panics() {
        let memoized = memoizer().memoize_dyn(|args: &[KeyValue<'_>]| args.len());

        let message = panic_message(|| memoized.call_any(&[&vec![1.5_f64]]));
        assert!(message.starts_with("unsupported key type for caching"), "{message}");
    }

    #[test]
    fn debug_output() {
        let memoized = memoizer().memoize_dyn(|args: &[KeyValue<'_>]| args.len());
        assert!(format!("{memoized:?}").starts_with("DynMemoized"));
    }
}
