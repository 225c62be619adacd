// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Deterministic fingerprints for tuples of primitive cache keys.
//!
//! A memoizing cache does not store the arguments of a call. It stores a 64-bit fingerprint
//! obtained by folding every argument, in order, into an FNV-1a accumulator that starts at
//! [`OFFSET_BASIS`]. This crate provides that fold.
//!
//! # Quick Start
//!
//! ```
//! use recall_hash::{Fingerprint, OFFSET_BASIS, fold, hash3};
//!
//! let key = hash3(&"orders", &2024_i32, &true);
//!
//! // The same value computed by hand, one argument at a time.
//! let manual = fold(fold(fold(OFFSET_BASIS, "orders"), &2024_i32), &true);
//! assert_eq!(key, manual);
//!
//! // Tuples fingerprint exactly like the matching `hashN` function.
//! assert_eq!(key, ("orders", 2024_i32, true).fingerprint());
//! ```
//!
//! # Supported Keys
//!
//! The [`KeyHash`] trait is implemented for:
//!
//! - signed integers of every standard width, sign-extended to 64 bits,
//! - unsigned integers of every standard width and `char`, zero-extended to 64 bits,
//! - `f32` (widened to `f64`) and `f64`, hashed by their raw bit pattern, so `0.0` and `-0.0`
//!   differ and so do NaNs with different payloads,
//! - `bool`, folded as one of two fixed words,
//! - text and byte sequences (`str`, `String`, `[u8]`, `Vec<u8>`), folded byte by byte,
//! - references, boxes and `Arc`s of any of the above.
//!
//! Any other key type is rejected at compile time. The dynamic [`KeyValue`] path performs the
//! same check at run time and panics on unsupported values, since hashing something without a
//! defined rule would silently corrupt cache lookups.
//!
//! # Determinism
//!
//! Fingerprints are never seeded: the same logical value produces the same fingerprint in
//! every process on every platform. This is what makes them usable as cache keys, and it is
//! also why they must never be used where an adversary chooses the input.
//!
//! # Collisions
//!
//! Two distinct argument tuples can produce the same fingerprint. A cache keyed by fingerprints
//! treats them as the same entry.
//!
//! Text and byte arguments are folded byte by byte with no length or terminator, so adjacent
//! text or byte arguments that concatenate to the same bytes always collide:
//! `("ab", "c")`, `("a", "bc")` and `("abc",)` share one fingerprint. A function memoized with
//! two `&str` parameters therefore returns the cached result of `f("ab", "c")` for
//! `f("a", "bc")`. Put a separator into the arguments, or join them into one, when such splits
//! must be told apart.
//!
//! Apart from this, collisions between 64-bit fingerprints are rare for ordinary workloads, but
//! not impossible.

mod fingerprint;
mod fnv;
mod key;
mod value;

pub use fingerprint::{Fingerprint, fold, hash1, hash2, hash3, hash4, hash5, hash6, hash7};
pub use fnv::{FALSE_WORD, OFFSET_BASIS, PRIME, TRUE_WORD, fold_bytes, fold_word};
pub use key::KeyHash;
pub use value::{KeyValue, MAX_ARITY, hash_values};
