//! Explicit midpoint Runge-Kutta integrator (RK2).
//!
//! Takes a half Euler step to estimate the slope at the middle of the step,
//! then uses that slope for the full step:
//!
//! ```text
//! k1      = f(t_k, y_k)
//! k2      = f(t_k + h/2, y_k + (h/2) k1)
//! y_{k+1} = y_k + h k2
//! ```
//!
//! This is the midpoint member of the RK2 family. Heun's method, which
//! averages the slopes at both ends of the step, is also second order but
//! gives different values after a handful of steps.

use twostep_core::{Observer, Rhs};

use crate::Plan;

use super::{Action, Event, Solution, march::march};

/// Evaluations of `f` per midpoint step.
const EVALUATIONS_PER_STEP: usize = 2;

/// Integrates `rhs` over `plan` using the explicit midpoint method.
///
/// The observer receives an [`Event`] for the initial condition and after each
/// step, and may return [`Action::StopEarly`] to terminate.
#[must_use]
pub fn solve<R, Obs>(rhs: &R, plan: &Plan, y0: f64, observer: Obs) -> Solution
where
    R: Rhs + ?Sized,
    Obs: Observer<Event, Action>,
{
    let h = plan.step_size();
    let half = 0.5 * h;
    march(plan, y0, observer, EVALUATIONS_PER_STEP, |t, y| {
        let k1 = rhs.slope(t, y);
        let k2 = rhs.slope(t + half, y + half * k1);
        y + h * k2
    })
}

/// Integrates `rhs` over `plan` using the midpoint method without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
#[must_use]
pub fn solve_unobserved<R>(rhs: &R, plan: &Plan, y0: f64) -> Solution
where
    R: Rhs + ?Sized,
{
    solve(rhs, plan, y0, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};

    use approx::assert_relative_eq;

    use crate::{plan, transient::Status};

    #[test]
    fn linear_in_time_slope_is_exact() {
        // y' = 2t integrates to t² with no error for any second-order method.
        let plan = plan(0.0, 5.0, 0.2);
        let solution = solve_unobserved(&|t: f64, _y: f64| 2.0 * t, &plan, 0.0);

        for (t, y) in solution.trajectory.iter() {
            assert_relative_eq!(y, t * t, epsilon = 1e-10);
        }
    }

    #[test]
    fn single_step_matches_hand_computation() {
        // y' = y, h = 0.2: y1 = 1 + 0.2 (1 + 0.1) = 1.22
        let solution = solve_unobserved(&|_t: f64, y: f64| y, &plan(0.0, 0.2, 0.2), 1.0);
        let values = solution.trajectory.values();
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[1], 1.22, epsilon = 1e-15);
    }

    #[test]
    fn evaluates_slope_at_the_midpoint() {
        let times = RefCell::new(Vec::new());
        let rhs = |t: f64, _y: f64| {
            times.borrow_mut().push(t);
            0.0
        };

        let _ = solve_unobserved(&rhs, &plan(0.0, 1.0, 0.5), 0.0);

        assert_eq!(*times.borrow(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn evaluates_rhs_twice_per_step() {
        let calls = Cell::new(0_usize);
        let rhs = |_t: f64, y: f64| {
            calls.set(calls.get() + 1);
            y
        };

        let solution = solve_unobserved(&rhs, &plan(0.0, 2.0, 0.2), 1.0);

        assert_eq!(calls.get(), 20);
        assert_eq!(solution.evaluations, 20);
        assert_eq!(solution.status, Status::Complete);
    }

    #[test]
    fn observer_sees_every_sample() {
        let mut values = Vec::new();
        let solution = solve(
            &|_t: f64, y: f64| -2.0 * y,
            &plan(0.0, 2.0, 0.2),
            1.0,
            |event: &Event| {
                values.push(event.y);
                None
            },
        );

        assert_eq!(values, solution.trajectory.values());
    }
}
