// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;

use crate::fnv::OFFSET_BASIS;
use crate::key::KeyHash;

/// The largest number of keys [`hash_values`] accepts.
pub const MAX_ARITY: usize = 7;

/// A key whose concrete type is only known at run time.
///
/// `KeyValue` is the tagged form of every supported primitive. It folds exactly like the typed
/// value it was created from, so a fingerprint computed from `KeyValue`s matches the one
/// computed by the typed `hashN` functions for the same arguments.
///
/// # Examples
///
/// ```
/// use recall_hash::{KeyValue, hash2, hash_values};
///
/// let args = [KeyValue::from(10_i32), KeyValue::from("ten")];
/// assert_eq!(hash_values(&args), hash2(&10_i32, &"ten"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyValue<'a> {
    /// A signed integer of any width, sign-extended.
    Int(i64),
    /// An unsigned integer of any width or a `char`, zero-extended.
    Uint(u64),
    /// A 32-bit float.
    Float32(f32),
    /// A 64-bit float.
    Float64(f64),
    /// A boolean.
    Bool(bool),
    /// Text.
    Str(&'a str),
    /// Raw bytes.
    Bytes(&'a [u8]),
}

impl<'a> KeyValue<'a> {
    /// Inspects the run-time type of `value` and converts it to a `KeyValue`.
    ///
    /// Returns `None` when the type has no hashing rule.
    #[must_use]
    pub fn try_from_any(value: &'a dyn Any) -> Option<Self> {
        macro_rules! downcast_copy {
            ($($ty:ty),*) => {
                $(
                    if let Some(v) = value.downcast_ref::<$ty>() {
                        return Some(Self::from(*v));
                    }
                )*
            };
        }

        downcast_copy!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, char, f32, f64, bool, &'static str);

        if let Some(v) = value.downcast_ref::<String>() {
            return Some(Self::Str(v));
        }

        if let Some(v) = value.downcast_ref::<Vec<u8>>() {
            return Some(Self::Bytes(v));
        }

        if let Some(v) = value.downcast_ref::<&'static [u8]>() {
            return Some(Self::Bytes(v));
        }

        None
    }

    /// Inspects the run-time type of `value` and converts it to a `KeyValue`.
    ///
    /// # Panics
    ///
    /// Panics if the type has no hashing rule. Hashing such a value anyway would make unrelated
    /// calls share cache entries, so this is treated as a programming error.
    #[must_use]
    #[expect(clippy::panic, reason = "unsupported key types are programming errors that must not be cached")]
    pub fn from_any(value: &'a dyn Any) -> Self {
        match Self::try_from_any(value) {
            Some(key) => key,
            None => panic!("unsupported key type for caching: {:?}", value.type_id()),
        }
    }
}

impl KeyHash for KeyValue<'_> {
    fn fold_into(&self, acc: u64) -> u64 {
        match *self {
            Self::Int(v) => v.fold_into(acc),
            Self::Uint(v) => v.fold_into(acc),
            Self::Float32(v) => v.fold_into(acc),
            Self::Float64(v) => v.fold_into(acc),
            Self::Bool(v) => v.fold_into(acc),
            Self::Str(v) => v.fold_into(acc),
            Self::Bytes(v) => v.fold_into(acc),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident($target:ty) <= $($ty:ty),*) => {
        $(
            impl From<$ty> for KeyValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from!(Int(i64) <= i8, i16, i32, i64);
impl_from!(Uint(u64) <= u8, u16, u32, u64);
impl_from!(Float32(f32) <= f32);
impl_from!(Float64(f64) <= f64);
impl_from!(Bool(bool) <= bool);

impl From<isize> for KeyValue<'_> {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for KeyValue<'_> {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<char> for KeyValue<'_> {
    fn from(value: char) -> Self {
        Self::Uint(u64::from(u32::from(value)))
    }
}

impl<'a> From<&'a str> for KeyValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for KeyValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a [u8]> for KeyValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for KeyValue<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Fingerprints a run-time list of keys, in order.
///
/// # Panics
///
/// Panics unless `values` holds between 1 and [`MAX_ARITY`] keys.
#[must_use]
pub fn hash_values(values: &[KeyValue<'_>]) -> u64 {
    assert!(
        (1..=MAX_ARITY).contains(&values.len()),
        "unsupported number of arguments: {}",
        values.len()
    );

    values.iter().fold(OFFSET_BASIS, |acc, value| value.fold_into(acc))
}
