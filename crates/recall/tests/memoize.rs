// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the memoizing entry points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use recall::{KeyValue, Memoizer};
use recall_clock::ClockControl;
use testing_aids::{CallCounter, execute_or_abandon, panic_message, run_concurrently};

const ONE_SECOND: Duration = Duration::from_secs(1);

fn controlled(ttl: Duration) -> (ClockControl, Memoizer) {
    let control = ClockControl::at(1_000);
    let memoizer = Memoizer::new(ttl).with_clock(control.to_clock());
    (control, memoizer)
}

/// Calls twice inside the TTL window, then once after it has passed.
fn assert_expires_after_ttl(control: &ClockControl, counter: &CallCounter, call: impl Fn()) {
    call();
    call();
    assert_eq!(counter.get(), 1, "second call inside the window must hit the cache");

    control.advance(ONE_SECOND);

    call();
    assert_eq!(counter.get(), 2, "call after the window must compute again");
}

#[test]
fn zero_arity_computes_once() {
    let counter = CallCounter::new();
    let answer = recall::memoize0(
        || {
            counter.hit();
            42
        },
        Duration::from_secs(60),
    );

    assert_eq!(answer(), 42);
    assert_eq!(answer(), 42);
    assert_eq!(counter.get(), 1);
}

#[test]
fn distinct_arguments_get_distinct_entries() {
    let counter = CallCounter::new();
    let sum = recall::memoize4(
        |a: i32, b: i32, c: i32, d: i32| {
            counter.hit();
            a + b + c + d
        },
        Duration::from_secs(60),
    );

    assert_eq!(sum(10, 10, 10, 12), 42);
    assert_eq!(sum(10, 11, 10, 12), 43);
    assert_eq!(counter.get(), 2);

    assert_eq!(sum(10, 10, 10, 12), 42);
    assert_eq!(counter.get(), 2);
}

#[test]
fn argument_order_is_part_of_the_key() {
    let counter = CallCounter::new();
    let pair = recall::memoize2(
        |a: u8, b: u8| {
            counter.hit();
            (a, b)
        },
        Duration::ZERO,
    );

    assert_eq!(pair(1, 2), (1, 2));
    assert_eq!(pair(2, 1), (2, 1));
    assert_eq!(counter.get(), 2);
}

#[test]
fn every_arity_expires_after_ttl() {
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize0(|| counter.hit());
        assert_expires_after_ttl(&control, &counter, || _ = f());
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize1(|a: i64| {
            counter.hit();
            a
        });
        assert_expires_after_ttl(&control, &counter, || assert_eq!(f(-1), -1));
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize2(|a: u16, b: &str| {
            counter.hit();
            format!("{a}{b}")
        });
        assert_expires_after_ttl(&control, &counter, || assert_eq!(f(1, "b"), "1b"));
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize3(|a: bool, b: f64, c: char| {
            counter.hit();
            format!("{a}{b}{c}")
        });
        assert_expires_after_ttl(&control, &counter, || assert_eq!(f(true, 0.5, 'c'), "true0.5c"));
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize4(|a: u8, b: u16, c: u32, d: u64| {
            counter.hit();
            u64::from(a) + u64::from(b) + u64::from(c) + d
        });
        assert_expires_after_ttl(&control, &counter, || assert_eq!(f(1, 2, 3, 4), 10));
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize5(|a: i8, b: i16, c: i32, d: i64, e: isize| {
            counter.hit();
            i64::from(a) + i64::from(b) + i64::from(c) + d + e as i64
        });
        assert_expires_after_ttl(&control, &counter, || assert_eq!(f(1, 2, 3, 4, 5), 15));
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize6(|a: usize, b: usize, c: usize, d: usize, e: usize, g: usize| {
            counter.hit();
            a + b + c + d + e + g
        });
        assert_expires_after_ttl(&control, &counter, || assert_eq!(f(1, 2, 3, 4, 5, 6), 21));
    }
    {
        let (control, memoizer) = controlled(ONE_SECOND);
        let counter = CallCounter::new();
        let f = memoizer.memoize7(
            |a: String, b: &str, c: Vec<u8>, d: f32, e: bool, g: char, h: user_key::UserKey| {
                counter.hit();
                format!("{a}{b}{}{d}{e}{g}{}", c.len(), h.0)
            },
        );
        assert_expires_after_ttl(&control, &counter, || {
            assert_eq!(
                f("a".to_owned(), "b", vec![1, 2], 1.5, false, 'g', user_key::UserKey(9)),
                "ab21.5falseg9"
            );
        });
    }
}

/// A user-defined key type.
mod user_key {
    pub struct UserKey(pub u64);

    impl recall::KeyHash for UserKey {
        fn fold_into(&self, acc: u64) -> u64 {
            self.0.fold_into(acc)
        }
    }
}

#[test]
fn zero_ttl_never_expires() {
    let (control, memoizer) = controlled(Duration::ZERO);
    let counter = CallCounter::new();
    let double = memoizer.memoize1(|x: u32| {
        counter.hit();
        x * 2
    });

    for _ in 0..5 {
        assert_eq!(double(21), 42);
        control.advance(Duration::from_secs(86_400 * 365));
    }

    assert_eq!(counter.get(), 1);
}

#[test]
fn sub_second_ttl_expires_after_one_second() {
    let (control, memoizer) = controlled(Duration::from_millis(10));
    let counter = CallCounter::new();
    let f = memoizer.memoize1(|x: u8| {
        counter.hit();
        x
    });

    assert_expires_after_ttl(&control, &counter, || _ = f(1));
}

#[test]
fn results_expire_in_real_time() {
    let counter = CallCounter::new();
    let f = recall::memoize1(
        |x: u32| {
            counter.hit();
            x
        },
        ONE_SECOND,
    );

    assert_eq!(f(5), 5);
    assert_eq!(f(5), 5);
    // Two calls may straddle a second boundary, so this is as strict as a real clock allows.
    assert!(counter.get() <= 2);

    thread::sleep(Duration::from_millis(2_100));

    let before = counter.get();
    assert_eq!(f(5), 5);
    assert_eq!(counter.get(), before + 1);
}

#[test]
fn concurrent_callers_compute_once() {
    let counter = CallCounter::new();
    let slow = recall::memoize2(
        |a: u64, b: u64| {
            counter.hit();
            thread::sleep(Duration::from_millis(50));
            a * b
        },
        Duration::from_secs(60),
    );

    let results = run_concurrently(32, || slow(6, 7));

    assert!(results.iter().all(|&value| value == 42));
    assert_eq!(counter.get(), 1);
}

#[test]
fn context_is_passed_through_but_not_hashed() {
    let (_control, memoizer) = controlled(Duration::ZERO);
    let counter = CallCounter::new();
    let greet = memoizer.memoize_ctx1(|ctx: &str, n: u32| {
        counter.hit();
        format!("{ctx}:{n}")
    });

    assert_eq!(greet("first", 1), "first:1");
    // The context does not take part in the key, so this is a hit.
    assert_eq!(greet("second", 1), "first:1");
    assert_eq!(greet("second", 2), "second:2");
    assert_eq!(counter.get(), 2);
}

#[test]
fn context_errors_are_not_cached() {
    struct Cancellation(AtomicBool);

    let cancellation = Cancellation(AtomicBool::new(false));
    let counter = CallCounter::new();
    let fetch = recall::try_memoize_ctx1(
        |ctx: &Cancellation, id: u32| {
            counter.hit();
            if ctx.0.load(Ordering::Relaxed) {
                Err("cancelled")
            } else {
                Ok(id * 10)
            }
        },
        Duration::from_secs(60),
    );

    cancellation.0.store(true, Ordering::Relaxed);
    assert_eq!(fetch(&cancellation, 1), Err("cancelled"));

    cancellation.0.store(false, Ordering::Relaxed);
    assert_eq!(fetch(&cancellation, 1), Ok(10));
    assert_eq!(fetch(&cancellation, 1), Ok(10));
    assert_eq!(counter.get(), 2);
}

#[test]
fn zero_arity_context_variant() {
    let counter = CallCounter::new();
    let f = recall::memoize_ctx0(
        |ctx: &[u8]| {
            counter.hit();
            ctx.len()
        },
        Duration::from_secs(60),
    );

    let long: &[u8] = &[1, 2, 3];
    let empty: &[u8] = &[];

    assert_eq!(f(long), 3);
    assert_eq!(f(empty), 3);
    assert_eq!(counter.get(), 1);
}

#[test]
fn errors_are_not_cached() {
    let (_control, memoizer) = controlled(Duration::ZERO);
    let counter = CallCounter::new();
    let flaky = memoizer.try_memoize1(|x: u32| {
        if counter.hit() == 1 { Err("transient") } else { Ok(x + 1) }
    });

    assert_eq!(flaky(1), Err("transient"));
    assert_eq!(flaky(1), Ok(2));
    assert_eq!(flaky(1), Ok(2));
    assert_eq!(counter.get(), 2);
}

#[test]
fn failed_refresh_is_retried() {
    let (control, memoizer) = controlled(ONE_SECOND);
    let counter = CallCounter::new();
    let f = memoizer.try_memoize2(|a: u8, b: u8| match counter.hit() {
        1 => Ok(a + b),
        2 => Err(()),
        _ => Ok(a * b),
    });

    assert_eq!(f(2, 3), Ok(5));

    control.advance(ONE_SECOND);
    assert_eq!(f(2, 3), Err(()));
    assert_eq!(f(2, 3), Ok(6));
    assert_eq!(f(2, 3), Ok(6));
    assert_eq!(counter.get(), 3);
}

#[test]
fn zero_arity_fallible_variant() {
    let counter = CallCounter::new();
    let f = recall::try_memoize0(
        || {
            counter.hit();
            "config".parse::<u8>()
        },
        Duration::from_secs(60),
    );

    assert!(f().is_err());
    assert!(f().is_err());
    assert_eq!(counter.get(), 2);
}

#[test]
fn panicking_compute_can_be_retried() {
    let (_control, memoizer) = controlled(Duration::ZERO);
    let counter = CallCounter::new();
    let f = memoizer.memoize1(|x: u32| {
        assert!(counter.hit() != 1, "first call fails");
        x
    });

    assert_eq!(panic_message(|| f(3)), "first call fails");
    assert_eq!(f(3), 3);
    assert_eq!(f(3), 3);
    assert_eq!(counter.get(), 2);
}

#[test]
fn owned_and_borrowed_text_share_entries() {
    let owned = String::from("hello");
    let (_control, memoizer) = controlled(Duration::ZERO);
    let counter = CallCounter::new();
    let len = memoizer.memoize1(|s: &str| {
        counter.hit();
        s.len()
    });

    assert_eq!(len(&owned), 5);
    assert_eq!(len("hello"), 5);
    assert_eq!(counter.get(), 1);
}

#[test]
fn adjacent_text_arguments_that_concatenate_alike_share_an_entry() {
    let (_control, memoizer) = controlled(Duration::ZERO);
    let counter = CallCounter::new();
    let join = memoizer.memoize2(|a: &str, b: &str| {
        counter.hit();
        format!("{a}|{b}")
    });

    assert_eq!(join("ab", "c"), "ab|c");
    assert_eq!(join("a", "bc"), "ab|c");
    assert_eq!(counter.get(), 1);

    // A separator inside the arguments keeps the splits apart.
    assert_eq!(join("a/", "bc"), "a/|bc");
    assert_eq!(counter.get(), 2);
}

#[test]
fn memoized_functions_can_move_to_other_threads() {
    let (_control, memoizer) = controlled(Duration::ZERO);
    let triple = memoizer.memoize1(|x: u64| x * 3);

    assert_eq!(execute_or_abandon(move || triple(3)), Some(9));
}

#[test]
fn dynamic_arguments() {
    let counter = CallCounter::new();
    let join = recall::memoize_dyn(
        |args: &[KeyValue<'_>]| {
            counter.hit();
            format!("{args:?}")
        },
        Duration::from_secs(60),
    );

    let first = join.call(&[KeyValue::from(1_i32), KeyValue::from("x")]);
    let second = join.call_any(&[&1_i32, &"x"]);

    assert_eq!(first, second);
    assert_eq!(counter.get(), 1);

    let message = panic_message(|| join.call(&[KeyValue::Int(0); 8]));
    assert_eq!(message, "unsupported number of arguments: 8");
}
