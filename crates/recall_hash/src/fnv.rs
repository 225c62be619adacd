// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The 64-bit FNV offset basis. Every fingerprint fold starts here.
pub const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// The 64-bit FNV prime.
pub const PRIME: u64 = 0x0000_0100_0000_01b3;

/// The word folded into the accumulator for `true`.
pub const TRUE_WORD: u64 = OFFSET_BASIS ^ PRIME;

/// The word folded into the accumulator for `false`.
pub const FALSE_WORD: u64 = OFFSET_BASIS;

/// Folds one 64-bit word into the accumulator: `(acc ^ word) * PRIME`, wrapping.
///
/// Fixed-width keys (integers, floats, booleans) are folded as a single word.
#[inline]
#[must_use]
pub const fn fold_word(acc: u64, word: u64) -> u64 {
    (acc ^ word).wrapping_mul(PRIME)
}

/// Folds a byte sequence into the accumulator, one byte at a time.
///
/// This is plain FNV-1a; starting from [`OFFSET_BASIS`] it yields the standard FNV-1a 64-bit
/// hash of `bytes`.
///
/// # Examples
///
/// ```
/// use recall_hash::{OFFSET_BASIS, fold_bytes};
///
/// assert_eq!(fold_bytes(OFFSET_BASIS, b"a"), 0xaf63_dc4c_8601_ec8c);
/// ```
#[must_use]
pub fn fold_bytes(mut acc: u64, bytes: &[u8]) -> u64 {
    let (chunks, tail) = bytes.as_chunks::<4>();

    for &[a, b, c, d] in chunks {
        acc = fold_word(acc, u64::from(a));
        acc = fold_word(acc, u64::from(b));
        acc = fold_word(acc, u64::from(c));
        acc = fold_word(acc, u64::from(d));
    }

    for &byte in tail {
        acc = fold_word(acc, u64::from(byte));
    }

    acc
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    fn fold_bytes_plain(acc: u64, bytes: &[u8]) -> u64 {
        bytes.iter().fold(acc, |acc, &byte| fold_word(acc, u64::from(byte)))
    }

    #[test]
    fn constants_match_fnv_parameters() {
        assert_eq!(OFFSET_BASIS, 14_695_981_039_346_656_037);
        assert_eq!(PRIME, 1_099_511_628_211);
    }

    #[test]
    fn boolean_words_differ() {
        assert_ne!(TRUE_WORD, FALSE_WORD);
    }

    #[test]
    fn reference_vectors() {
        assert_eq!(fold_bytes(OFFSET_BASIS, b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fold_bytes(OFFSET_BASIS, b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fold_bytes(OFFSET_BASIS, b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn unrolled_loop_matches_plain_loop() {
        let data: Vec<u8> = (0..=u8::MAX).collect();

        // Cover every tail length, including the empty input.
        for len in 0..data.len() {
            let slice = &data[..len];
            assert_eq!(fold_bytes(OFFSET_BASIS, slice), fold_bytes_plain(OFFSET_BASIS, slice), "length {len}");
        }
    }

    #[test]
    fn fold_word_wraps() {
        assert_eq!(fold_word(0, u64::MAX), u64::MAX.wrapping_mul(PRIME));
    }
}
