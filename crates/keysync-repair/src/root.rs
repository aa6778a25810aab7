//! Bisection search for the time at which a channel reaches a value.

use keysync_anim::{Channel, EPSILON};

/// Number of bisection steps taken by [`find_time`].
pub const ROOT_ITERATIONS: usize = 64;

/// Finds the time in `[time_low, time_high]` at which `channel` evaluates
/// to `target`.
///
/// The channel must be monotonic over the interval; the direction is read
/// off the values at both bounds. Always runs [`ROOT_ITERATIONS`] steps and
/// returns the final midpoint. If `target` lies outside the interval's
/// range the result converges onto a bound, so callers must reject results
/// equal to either bound.
pub fn find_time(channel: &Channel, target: f64, time_low: f64, time_high: f64) -> f64 {
    let rising = channel.evaluate(time_low) <= channel.evaluate(time_high);
    let mut low = time_low;
    let mut high = time_high;
    let mut mid = (low + high) / 2.0;

    for _ in 0..ROOT_ITERATIONS {
        let below = channel.evaluate(mid) < target - EPSILON;
        if below == rising {
            low = mid;
        } else {
            high = mid;
        }
        mid = (low + high) / 2.0;
    }
    mid
}
