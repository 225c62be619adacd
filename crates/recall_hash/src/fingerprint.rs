// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::fnv::OFFSET_BASIS;
use crate::key::KeyHash;

/// Folds one key into the accumulator.
#[inline]
#[must_use]
pub fn fold<K: KeyHash + ?Sized>(acc: u64, key: &K) -> u64 {
    key.fold_into(acc)
}

/// Fingerprints a single key.
#[inline]
#[must_use]
pub fn hash1<A>(a: &A) -> u64
where
    A: KeyHash + ?Sized,
{
    fold(OFFSET_BASIS, a)
}

/// Fingerprints two keys, in order.
#[inline]
#[must_use]
pub fn hash2<A, B>(a: &A, b: &B) -> u64
where
    A: KeyHash + ?Sized,
    B: KeyHash + ?Sized,
{
    fold(hash1(a), b)
}

/// Fingerprints three keys, in order.
#[inline]
#[must_use]
pub fn hash3<A, B, C>(a: &A, b: &B, c: &C) -> u64
where
    A: KeyHash + ?Sized,
    B: KeyHash + ?Sized,
    C: KeyHash + ?Sized,
{
    fold(hash2(a, b), c)
}

/// Fingerprints four keys, in order.
#[inline]
#[must_use]
pub fn hash4<A, B, C, D>(a: &A, b: &B, c: &C, d: &D) -> u64
where
    A: KeyHash + ?Sized,
    B: KeyHash + ?Sized,
    C: KeyHash + ?Sized,
    D: KeyHash + ?Sized,
{
    fold(hash3(a, b, c), d)
}

/// Fingerprints five keys, in order.
#[inline]
#[must_use]
pub fn hash5<A, B, C, D, E>(a: &A, b: &B, c: &C, d: &D, e: &E) -> u64
where
    A: KeyHash + ?Sized,
    B: KeyHash + ?Sized,
    C: KeyHash + ?Sized,
    D: KeyHash + ?Sized,
    E: KeyHash + ?Sized,
{
    fold(hash4(a, b, c, d), e)
}

/// Fingerprints six keys, in order.
#[inline]
#[must_use]
pub fn hash6<A, B, C, D, E, F>(a: &A, b: &B, c: &C, d: &D, e: &E, f: &F) -> u64
where
    A: KeyHash + ?Sized,
    B: KeyHash + ?Sized,
    C: KeyHash + ?Sized,
    D: KeyHash + ?Sized,
    E: KeyHash + ?Sized,
    F: KeyHash + ?Sized,
{
    fold(hash5(a, b, c, d, e), f)
}

/// Fingerprints seven keys, in order.
#[inline]
#[must_use]
pub fn hash7<A, B, C, D, E, F, G>(a: &A, b: &B, c: &C, d: &D, e: &E, f: &F, g: &G) -> u64
where
    A: KeyHash + ?Sized,
    B: KeyHash + ?Sized,
    C: KeyHash + ?Sized,
    D: KeyHash + ?Sized,
    E: KeyHash + ?Sized,
    F: KeyHash + ?Sized,
    G: KeyHash + ?Sized,
{
    fold(hash6(a, b, c, d, e, f), g)
}

/// A tuple of keys that can be reduced to a single fingerprint.
///
/// Implemented for tuples of up to seven [`KeyHash`] elements. Elements are folded left to
/// right starting from [`OFFSET_BASIS`], so `(a, b).fingerprint()` equals `hash2(&a, &b)`.
/// The empty tuple fingerprints to [`OFFSET_BASIS`] itself.
///
/// # Examples
///
/// ```
/// use recall_hash::{Fingerprint, OFFSET_BASIS, hash2};
///
/// assert_eq!(().fingerprint(), OFFSET_BASIS);
/// assert_eq!((1_u8, "x").fingerprint(), hash2(&1_u8, &"x"));
/// ```
pub trait Fingerprint {
    /// Returns the fingerprint of all elements, folded in order.
    fn fingerprint(&self) -> u64;
}

macro_rules! impl_fingerprint {
    ($($idx:tt: $ty:ident),*) => {
        impl<$($ty: KeyHash),*> Fingerprint for ($($ty,)*) {
            #[inline]
            fn fingerprint(&self) -> u64 {
                let acc = OFFSET_BASIS;
                $(let acc = self.$idx.fold_into(acc);)*
                acc
            }
        }
    };
}

impl_fingerprint!();
impl_fingerprint!(0: A);
impl_fingerprint!(0: A, 1: B);
impl_fingerprint!(0: A, 1: B, 2: C);
impl_fingerprint!(0: A, 1: B, 2: C, 3: D);
impl_fingerprint!(0: A, 1: B, 2: C, 3: D, 4: E);
impl_fingerprint!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F);
impl_fingerprint!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G);
