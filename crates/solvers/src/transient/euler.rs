//! Explicit (forward) Euler integrator.
//!
//! Steps a scalar IVP forward using only the slope at the current sample:
//!
//! ```text
//! y_{k+1} = y_k + h * f(t_k, y_k)
//! ```
//!
//! # Example
//!
//! ```
//! use twostep_solvers::{plan, transient::euler};
//!
//! let plan = plan(0.0, 1.0, 0.25);
//! let solution = euler::solve_unobserved(&|_t: f64, y: f64| y, &plan, 1.0);
//!
//! assert_eq!(solution.trajectory.len(), 5);
//! ```

use twostep_core::{Observer, Rhs};

use crate::Plan;

use super::{Action, Event, Solution, march::march};

/// Evaluations of `f` per Euler step.
const EVALUATIONS_PER_STEP: usize = 1;

/// Integrates `rhs` over `plan` using explicit Euler.
///
/// # Algorithm
///
/// 1. Record the initial sample `(t0, y0)` and emit step 0.
/// 2. For each step `k` in `0..n`:
///    - Evaluate the slope `f(t_k, y_k)` with `t_k = t0 + k*h`.
///    - Step the value forward: `y_k + h * slope`.
///    - Record the sample and emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full trajectory.
#[must_use]
pub fn solve<R, Obs>(rhs: &R, plan: &Plan, y0: f64, observer: Obs) -> Solution
where
    R: Rhs + ?Sized,
    Obs: Observer<Event, Action>,
{
    let h = plan.step_size();
    march(plan, y0, observer, EVALUATIONS_PER_STEP, |t, y| {
        y + h * rhs.slope(t, y)
    })
}

/// Integrates `rhs` over `plan` using explicit Euler without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
#[must_use]
pub fn solve_unobserved<R>(rhs: &R, plan: &Plan, y0: f64) -> Solution
where
    R: Rhs + ?Sized,
{
    solve(rhs, plan, y0, ())
}
