// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Benchmarks for memoized function calls.
//!
//! Run with: cargo bench -p recall

#![allow(missing_docs, reason = "benchmark code")]

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use recall::{Fingerprint, KeyValue, Memoizer};

static KEY_COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_key() -> u64 {
    KEY_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A fresh cached result: one fingerprint and one read lock.
fn bench_hit(c: &mut Criterion) {
    let add = Memoizer::new(Duration::ZERO).memoize2(|a: u64, b: &str| a + b.len() as u64);
    _ = add(7, "warm");

    c.bench_function("hit_two_args", |b| b.iter(|| add(black_box(7), black_box("warm"))));
}

/// A new key on every call: the write lock, the compute function and an insert.
fn bench_miss(c: &mut Criterion) {
    let add = Memoizer::new(Duration::ZERO).memoize2(|a: u64, b: &str| a + b.len() as u64);

    c.bench_function("miss_two_args", |b| b.iter(|| add(unique_key(), black_box("cold"))));
}

fn bench_dynamic_hit(c: &mut Criterion) {
    let add = Memoizer::new(Duration::ZERO).memoize_dyn(|args: &[KeyValue<'_>]| args.len());
    let args = [KeyValue::from(7_u64), KeyValue::from("warm")];
    _ = add.call(&args);

    c.bench_function("hit_dynamic_two_args", |b| b.iter(|| add.call(black_box(&args))));
}

fn bench_fingerprint(c: &mut Criterion) {
    c.bench_function("fingerprint_text_64b", |b| {
        let text = "x".repeat(64);
        b.iter(|| (black_box(text.as_str()), black_box(1_u64)).fingerprint());
    });
}

criterion_group!(benches, bench_hit, bench_miss, bench_dynamic_hit, bench_fingerprint);
criterion_main!(benches);
