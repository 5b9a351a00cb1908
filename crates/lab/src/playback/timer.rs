use std::time::Duration;

/// Interval between ticks at 1x.
pub const BASE_INTERVAL: Duration = Duration::from_millis(180);

/// Shortest interval between ticks, whatever the rate.
pub const MIN_INTERVAL: Duration = Duration::from_millis(30);

/// Rate multiplier a new controller starts with.
pub const DEFAULT_RATE: f64 = 0.25;

/// Identifies one start of the playback timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub(super) u64);

/// The controller's single live timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Token to pass back to [`Playback::tick`](super::Playback::tick).
    pub token: TimerToken,

    /// How long the driver waits between ticks.
    pub interval: Duration,
}

/// Returns `rate` if it is positive and finite, otherwise `1.0`.
#[must_use]
pub fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        1.0
    }
}

/// Returns the tick interval for a rate, `max(MIN_INTERVAL, BASE_INTERVAL / rate)`.
#[must_use]
pub fn interval(rate: f64) -> Duration {
    #[allow(clippy::cast_precision_loss)]
    let base = BASE_INTERVAL.as_nanos() as f64;
    let nanos = (base / sanitize_rate(rate)).round();

    #[allow(clippy::cast_precision_loss)]
    let limit = u64::MAX as f64;
    if nanos >= limit {
        return Duration::MAX;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = Duration::from_nanos(nanos as u64);
    scaled.max(MIN_INTERVAL)
}
