// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use recall_cache::{Cache, CacheName};
use recall_clock::Clock;
use recall_hash::{Fingerprint, KeyHash};

use crate::default_clock::default_clock;

const DEFAULT_NAME: CacheName = "recall.memoize";

/// Configuration shared by the functions a memoizer wraps.
///
/// Every call to one of the `memoize*` methods creates a fresh, private cache for the wrapped
/// function, configured from this memoizer. Arguments are reduced to a 64-bit fingerprint
/// with [`recall_hash`], and that fingerprint is the only cache key: two argument lists whose
/// fingerprints collide share one cache entry.
///
/// There is one method per arity from 0 to 7, in four flavors:
///
/// - `memoizeN` wraps `Fn(A1, .., AN) -> V`.
/// - `memoize_ctxN` wraps `Fn(&C, A1, .., AN) -> V`. The leading context is passed through to
///   the compute function untouched and is not part of the cache key.
/// - `try_memoizeN` wraps `Fn(A1, .., AN) -> Result<V, E>`. Only `Ok` values are cached;
///   errors are returned unchanged and leave the cache as it was.
/// - `try_memoize_ctxN` combines the two.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recall::{Memoizer, default_clock};
///
/// let memoizer = Memoizer::new(Duration::from_secs(60))
///     .with_clock(default_clock())
///     .with_name("area");
///
/// let area = memoizer.memoize2(|width: u32, height: u32| width * height);
/// assert_eq!(area(3, 4), 12);
/// assert_eq!(area(3, 4), 12);
/// ```
#[derive(Debug, Clone)]
pub struct Memoizer {
    ttl: Duration,
    clock: Option<Clock>,
    name: CacheName,
    initial_capacity: usize,
}

impl Memoizer {
    /// Creates a memoizer whose caches keep results fresh for `ttl`.
    ///
    /// TTLs are tracked in whole seconds and sub-second TTLs round up to one second.
    /// [`Duration::ZERO`] means results never expire.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            clock: None,
            name: DEFAULT_NAME,
            initial_capacity: 0,
        }
    }

    /// Reads time from `clock` instead of the process-wide [`default_clock`].
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Names the caches in log events.
    #[must_use]
    pub fn with_name(mut self, name: CacheName) -> Self {
        self.name = name;
        self
    }

    /// Preallocates room for `capacity` results in each cache.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Returns the TTL as configured, before rounding to whole seconds.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn build_cache<V>(&self) -> Cache<u64, V> {
        let clock = self.clock.clone().unwrap_or_else(default_clock);

        Cache::builder(clock)
            .ttl(self.ttl)
            .initial_capacity(self.initial_capacity)
            .name(self.name)
            .build()
    }
}

macro_rules! memoize_arity {
    (
        arity: $arity:literal,
        plain: $plain:ident,
        ctx: $ctx:ident,
        fallible: $fallible:ident,
        fallible_ctx: $fallible_ctx:ident,
        args: ($($arg:ident: $ty:ident),*)
    ) => {
        impl Memoizer {
            #[doc = concat!("Memoizes a function of arity ", $arity, ".")]
            ///
            /// The returned function has the same signature as `compute` and returns a clone of
            /// the cached result while it is fresh.
            #[must_use]
            pub fn $plain<$($ty,)* V, F>(&self, compute: F) -> impl Fn($($ty),*) -> V + use<$($ty,)* V, F>
            where
                $($ty: KeyHash,)*
                V: Clone,
                F: Fn($($ty),*) -> V,
            {
                let cache = self.build_cache();

                move |$($arg: $ty),*| {
                    let key = ($(&$arg,)*).fingerprint();
                    cache.get_or_compute(key, || compute($($arg),*))
                }
            }

            #[doc = concat!("Memoizes a function of a context plus arity ", $arity, ".")]
            ///
            /// The context is passed through to `compute` and is not part of the cache key.
            #[must_use]
            pub fn $ctx<C, $($ty,)* V, F>(&self, compute: F) -> impl Fn(&C $(, $ty)*) -> V + use<C, $($ty,)* V, F>
            where
                C: ?Sized,
                $($ty: KeyHash,)*
                V: Clone,
                F: Fn(&C $(, $ty)*) -> V,
            {
                let cache = self.build_cache();

                move |ctx: &C $(, $arg: $ty)*| {
                    let key = ($(&$arg,)*).fingerprint();
                    cache.get_or_compute(key, || compute(ctx $(, $arg)*))
                }
            }

            #[doc = concat!("Memoizes a fallible function of arity ", $arity, ".")]
            ///
            /// Only `Ok` results are cached. An `Err` is returned unchanged and the next call
            /// with the same arguments computes again.
            #[must_use]
            pub fn $fallible<$($ty,)* V, E, F>(&self, compute: F) -> impl Fn($($ty),*) -> Result<V, E> + use<$($ty,)* V, E, F>
            where
                $($ty: KeyHash,)*
                V: Clone,
                F: Fn($($ty),*) -> Result<V, E>,
            {
                let cache = self.build_cache();

                move |$($arg: $ty),*| {
                    let key = ($(&$arg,)*).fingerprint();
                    cache.try_get_or_compute(key, || compute($($arg),*))
                }
            }

            #[doc = concat!("Memoizes a fallible function of a context plus arity ", $arity, ".")]
            ///
            /// The context is passed through to `compute` and is not part of the cache key. Only
            /// `Ok` results are cached.
            #[must_use]
            pub fn $fallible_ctx<C, $($ty,)* V, E, F>(
                &self,
                compute: F,
            ) -> impl Fn(&C $(, $ty)*) -> Result<V, E> + use<C, $($ty,)* V, E, F>
            where
                C: ?Sized,
                $($ty: KeyHash,)*
                V: Clone,
                F: Fn(&C $(, $ty)*) -> Result<V, E>,
            {
                let cache = self.build_cache();

                move |ctx: &C $(, $arg: $ty)*| {
                    let key = ($(&$arg,)*).fingerprint();
                    cache.try_get_or_compute(key, || compute(ctx $(, $arg)*))
                }
            }
        }

        #[doc = concat!("Memoizes a function of arity ", $arity, ", reading time from the [`default_clock`].")]
        ///
        #[doc = concat!("Shorthand for `Memoizer::new(ttl).", stringify!($plain), "(compute)`.")]
        #[must_use]
        pub fn $plain<$($ty,)* V, F>(compute: F, ttl: Duration) -> impl Fn($($ty),*) -> V + use<$($ty,)* V, F>
        where
            $($ty: KeyHash,)*
            V: Clone,
            F: Fn($($ty),*) -> V,
        {
            Memoizer::new(ttl).$plain(compute)
        }

        #[doc = concat!("Memoizes a function of a context plus arity ", $arity, ", reading time from the [`default_clock`].")]
        ///
        #[doc = concat!("Shorthand for `Memoizer::new(ttl).", stringify!($ctx), "(compute)`.")]
        #[must_use]
        pub fn $ctx<C, $($ty,)* V, F>(compute: F, ttl: Duration) -> impl Fn(&C $(, $ty)*) -> V + use<C, $($ty,)* V, F>
        where
            C: ?Sized,
            $($ty: KeyHash,)*
            V: Clone,
            F: Fn(&C $(, $ty)*) -> V,
        {
            Memoizer::new(ttl).$ctx(compute)
        }

        #[doc = concat!("Memoizes a fallible function of arity ", $arity, ", reading time from the [`default_clock`].")]
        ///
        #[doc = concat!("Shorthand for `Memoizer::new(ttl).", stringify!($fallible), "(compute)`.")]
        #[must_use]
        pub fn $fallible<$($ty,)* V, E, F>(compute: F, ttl: Duration) -> impl Fn($($ty),*) -> Result<V, E> + use<$($ty,)* V, E, F>
        where
            $($ty: KeyHash,)*
            V: Clone,
            F: Fn($($ty),*) -> Result<V, E>,
        {
            Memoizer::new(ttl).$fallible(compute)
        }

        #[doc = concat!("Memoizes a fallible function of a context plus arity ", $arity, ", reading time from the [`default_clock`].")]
        ///
        #[doc = concat!("Shorthand for `Memoizer::new(ttl).", stringify!($fallible_ctx), "(compute)`.")]
        #[must_use]
        pub fn $fallible_ctx<C, $($ty,)* V, E, F>(
            compute: F,
            ttl: Duration,
        ) -> impl Fn(&C $(, $ty)*) -> Result<V, E> + use<C, $($ty,)* V, E, F>
        where
            C: ?Sized,
            $($ty: KeyHash,)*
            V: Clone,
            F: Fn(&C $(, $ty)*) -> Result<V, E>,
        {
            Memoizer::new(ttl).$fallible_ctx(compute)
        }
    };
}

memoize_arity! {
    arity: 0, plain: memoize0, ctx: memoize_ctx0, fallible: try_memoize0, fallible_ctx: try_memoize_ctx0,
    args: ()
}

memoize_arity! {
    arity: 1, plain: memoize1, ctx: memoize_ctx1, fallible: try_memoize1, fallible_ctx: try_memoize_ctx1,
    args: (a1: A1)
}

memoize_arity! {
    arity: 2, plain: memoize2, ctx: memoize_ctx2, fallible: try_memoize2, fallible_ctx: try_memoize_ctx2,
    args: (a1: A1, a2: A2)
}

memoize_arity! {
    arity: 3, plain: memoize3, ctx: memoize_ctx3, fallible: try_memoize3, fallible_ctx: try_memoize_ctx3,
    args: (a1: A1, a2: A2, a3: A3)
}

memoize_arity! {
    arity: 4, plain: memoize4, ctx: memoize_ctx4, fallible: try_memoize4, fallible_ctx: try_memoize_ctx4,
    args: (a1: A1, a2: A2, a3: A3, a4: A4)
}

memoize_arity! {
    arity: 5, plain: memoize5, ctx: memoize_ctx5, fallible: try_memoize5, fallible_ctx: try_memoize_ctx5,
    args: (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5)
}

memoize_arity! {
    arity: 6, plain: memoize6, ctx: memoize_ctx6, fallible: try_memoize6, fallible_ctx: try_memoize_ctx6,
    args: (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6)
}

memoize_arity! {
    arity: 7, plain: memoize7, ctx: memoize_ctx7, fallible: try_memoize7, fallible_ctx: try_memoize_ctx7,
    args: (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7)
}
