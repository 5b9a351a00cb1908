//! Step planning for fixed-step integration.
//!
//! A requested step size rarely divides the interval evenly. Rather than take
//! a short final step, the planner picks the step count implied by the request
//! and then stretches the step so that `steps * step_size` covers the interval
//! exactly:
//!
//! ```text
//! n = max(1, floor((tf - t0) / h + ε))
//! h = (tf - t0) / n
//! ```
//!
//! The `ε` guards exact divisions against floating-point truncation: a request
//! of `h = 0.2` over `[0, 2]` must give ten steps, not nine.
//!
//! The step count is capped at [`MAX_STEPS`]; a request finer than that
//! allows is stretched to `(tf - t0) / MAX_STEPS`.

/// Tolerance added before flooring the implied step count.
pub const FLOOR_EPSILON: f64 = 1e-9;

/// Largest number of steps a plan will take.
pub const MAX_STEPS: usize = 1_000_000;

/// A reconciled step count and step size covering `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    start: f64,
    end: f64,
    steps: usize,
    step_size: f64,
}

/// Plans a fixed-step integration over `[t0, tf]`.
///
/// Expects `tf >= t0` and a positive `requested` step; callers sort the
/// interval and clamp the step beforehand. The planner itself never fails:
///
/// - An empty interval (`tf == t0`) yields one step of size zero.
/// - A requested step that is not a positive finite number also yields a
///   single step spanning the whole interval.
/// - A step count above [`MAX_STEPS`] is capped, widening the step.
#[must_use]
pub fn plan(t0: f64, tf: f64, requested: f64) -> Plan {
    let span = tf - t0;

    if span.is_nan() || span <= 0.0 {
        return Plan {
            start: t0,
            end: tf,
            steps: 1,
            step_size: 0.0,
        };
    }

    let steps = if requested.is_finite() && requested > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let implied = (span / requested + FLOOR_EPSILON).floor() as usize;
        implied.clamp(1, MAX_STEPS)
    } else {
        1
    };

    #[allow(clippy::cast_precision_loss)]
    let step_size = span / steps as f64;

    Plan {
        start: t0,
        end: tf,
        steps,
        step_size,
    }
}

impl Plan {
    /// Returns the start of the interval, `t0`.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the end of the interval, `tf`.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the number of steps, always at least one.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the adjusted step size.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the number of samples a trajectory over this plan holds.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.steps.saturating_add(1)
    }

    /// Returns the time of sample `k`.
    ///
    /// Computed as `t0 + k * h` rather than by accumulating `h`, so replaying
    /// or re-planning never drifts the time axis. The final sample is pinned
    /// to `tf`.
    #[must_use]
    pub fn time(&self, k: usize) -> f64 {
        if k == self.steps {
            self.end
        } else {
            #[allow(clippy::cast_precision_loss)]
            let k = k as f64;
            self.start + k * self.step_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn exact_division_is_not_truncated() {
        let plan = plan(0.0, 2.0, 0.2);
        assert_eq!(plan.steps(), 10);
        assert_relative_eq!(plan.step_size(), 0.2);
    }

    #[test]
    fn uneven_request_stretches_the_step() {
        // 1.0 / 0.3 = 3.33..., so three steps of 1/3.
        let plan = plan(0.0, 1.0, 0.3);
        assert_eq!(plan.steps(), 3);
        assert_relative_eq!(plan.step_size(), 1.0 / 3.0);
    }

    #[test]
    fn steps_cover_the_interval() {
        let cases = [
            (0.0, 2.0, 0.2),
            (0.0, 6.28318, 0.1),
            (-3.0, 7.5, 0.37),
            (1.0, 1.5, 0.05),
            (0.0, 10.0, 0.2),
            (2.0, 2.001, 0.0004),
        ];
        for (t0, tf, h) in cases {
            let plan = plan(t0, tf, h);
            assert!(plan.steps() >= 1);
            #[allow(clippy::cast_precision_loss)]
            let covered = plan.steps() as f64 * plan.step_size();
            assert!(
                (covered - (tf - t0)).abs() <= 1e-9,
                "[{t0}, {tf}] with h={h}: covered {covered}"
            );
        }
    }

    #[test]
    fn step_larger_than_interval_gives_one_step() {
        let plan = plan(0.0, 1.0, 5.0);
        assert_eq!(plan.steps(), 1);
        assert_relative_eq!(plan.step_size(), 1.0);
    }

    #[test]
    fn empty_interval_gives_one_zero_step() {
        let plan = plan(3.0, 3.0, 0.1);
        assert_eq!(plan.steps(), 1);
        assert_eq!(plan.step_size(), 0.0);
        assert_eq!(plan.time(0), 3.0);
        assert_eq!(plan.time(1), 3.0);
    }

    #[test]
    fn invalid_request_gives_one_step() {
        for requested in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let plan = plan(0.0, 2.0, requested);
            assert_eq!(plan.steps(), 1);
            assert_relative_eq!(plan.step_size(), 2.0);
        }
    }

    #[test]
    fn step_count_is_capped() {
        let huge = plan(0.0, 1e14, 1e-6);
        assert_eq!(huge.steps(), MAX_STEPS);
        assert_eq!(huge.samples(), MAX_STEPS + 1);
        assert_relative_eq!(huge.step_size(), 1e8);
        assert_eq!(huge.time(MAX_STEPS), 1e14);

        let long = plan(0.0, 1e6, 1e-6);
        assert_eq!(long.steps(), MAX_STEPS);
        assert_relative_eq!(long.step_size(), 1.0);
    }

    #[test]
    fn times_start_at_t0_and_end_at_tf() {
        let plan = plan(0.1, 0.7, 0.1);
        assert_eq!(plan.samples(), plan.steps() + 1);
        assert_eq!(plan.time(0), 0.1);
        assert_eq!(plan.time(plan.steps()), 0.7);
        assert_relative_eq!(plan.time(3), 0.1 + 3.0 * plan.step_size());
    }
}
