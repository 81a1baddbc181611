//! Time calculation utilities
//!
//! Pure functions over caller-supplied timestamps. The whole engine is
//! driven by the `now` its frame loop receives, so nothing in here reads
//! the clock itself.

use std::time::{Duration, Instant};

/// Progress in [0, 1] of an animation started at `start`, as of `now`
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = match now.checked_duration_since(start) {
        Some(elapsed) => elapsed,
        None => return 0.0,
    };
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whether an animation started at `start` has run its full duration
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.checked_duration_since(start)
        .is_some_and(|elapsed| elapsed >= duration)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
