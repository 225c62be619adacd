// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::rc::Rc;
use std::sync::Arc;

use crate::fnv::{FALSE_WORD, TRUE_WORD, fold_bytes, fold_word};

/// A value that can take part in a cache fingerprint.
///
/// Implementors fold themselves into an FNV-1a accumulator. Implementations must be
/// deterministic: equal values must always fold to the same result, in every process.
///
/// # Examples
///
/// Custom key types fold their fields in a fixed order:
///
/// ```
/// use recall_hash::{KeyHash, hash1};
///
/// struct Coordinate {
///     x: i32,
///     y: i32,
/// }
///
/// impl KeyHash for Coordinate {
///     fn fold_into(&self, acc: u64) -> u64 {
///         self.y.fold_into(self.x.fold_into(acc))
///     }
/// }
///
/// assert_eq!(hash1(&Coordinate { x: 1, y: 2 }), hash1(&Coordinate { x: 1, y: 2 }));
/// assert_ne!(hash1(&Coordinate { x: 1, y: 2 }), hash1(&Coordinate { x: 2, y: 1 }));
/// ```
pub trait KeyHash {
    /// Folds this value into `acc` and returns the new accumulator.
    fn fold_into(&self, acc: u64) -> u64;
}

macro_rules! impl_key_hash_word {
    ($($ty:ty => |$value:ident| $word:expr),* $(,)?) => {
        $(
            impl KeyHash for $ty {
                #[inline]
                fn fold_into(&self, acc: u64) -> u64 {
                    let $value = *self;
                    fold_word(acc, $word)
                }
            }
        )*
    };
}

impl_key_hash_word! {
    i8 => |v| i64::from(v).cast_unsigned(),
    i16 => |v| i64::from(v).cast_unsigned(),
    i32 => |v| i64::from(v).cast_unsigned(),
    i64 => |v| v.cast_unsigned(),
    isize => |v| (v as i64).cast_unsigned(),
    u8 => |v| u64::from(v),
    u16 => |v| u64::from(v),
    u32 => |v| u64::from(v),
    u64 => |v| v,
    usize => |v| v as u64,
    char => |v| u64::from(u32::from(v)),
    f32 => |v| f64::from(v).to_bits(),
    f64 => |v| v.to_bits(),
    bool => |v| if v { TRUE_WORD } else { FALSE_WORD },
}

impl KeyHash for str {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        fold_bytes(acc, self.as_bytes())
    }
}

impl KeyHash for String {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        self.as_str().fold_into(acc)
    }
}

impl KeyHash for [u8] {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        fold_bytes(acc, self)
    }
}

impl KeyHash for Vec<u8> {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        self.as_slice().fold_into(acc)
    }
}

impl<T: KeyHash + ?Sized> KeyHash for &T {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        (**self).fold_into(acc)
    }
}

impl<T: KeyHash + ?Sized> KeyHash for Box<T> {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        (**self).fold_into(acc)
    }
}

impl<T: KeyHash + ?Sized> KeyHash for Arc<T> {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        (**self).fold_into(acc)
    }
}

impl<T: KeyHash + ?Sized> KeyHash for Rc<T> {
    #[inline]
    fn fold_into(&self, acc: u64) -> u64 {
        (**self).fold_into(acc)
    }
}
