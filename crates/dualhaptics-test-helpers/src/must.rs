//! Unwrap helpers with good error messages.
//!
//! These replace `unwrap()` and `expect()` in test code. `#[track_caller]`
//! keeps the panic location at the call site.

use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Unwrap a `Result`, panicking with the error value.
///
/// ```rust
/// use dualhaptics_test_helpers::must;
///
/// let result: Result<i32, &str> = Ok(42);
/// assert_eq!(must(result), 42);
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with `msg` if `None`.
///
/// ```rust
/// use dualhaptics_test_helpers::must_some;
///
/// assert_eq!(must_some(Some(7), "expected a value"), 7);
/// ```
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap a `Result` with a context message.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Poll `condition` every millisecond until it holds or `timeout` elapses.
///
/// Returns whether the condition was met. Used to wait on producer threads
/// without fixed sleeps.
///
/// ```rust
/// use std::time::Duration;
/// use dualhaptics_test_helpers::wait_until;
///
/// let mut calls = 0;
/// assert!(wait_until(Duration::from_secs(1), || {
///     calls += 1;
///     calls > 3
/// }));
/// ```
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// [`wait_until`] that panics on timeout.
#[track_caller]
pub fn must_wait_until(timeout: Duration, what: &str, condition: impl FnMut() -> bool) {
    if !wait_until(timeout, condition) {
        panic!("must_wait_until: timed out after {timeout:?} waiting for {what}");
    }
}
