//! Fixed-step integrators for scalar initial-value problems `y' = f(t, y)`.
//!
//! # Integrators
//!
//! - [`euler`] — explicit (forward) Euler, first order, one evaluation of `f`
//!   per step
//! - [`midpoint`] — explicit midpoint Runge-Kutta, second order, two
//!   evaluations of `f` per step
//!
//! Both integrators march over a [`Plan`], produce `steps + 1` samples, and
//! never fail: a non-finite slope propagates through every later sample.
//!
//! # Observer Events
//!
//! Each integrator emits one [`Event`] per sample, starting with step 0 for
//! the initial condition. Observers can return [`Action::StopEarly`] to halt
//! immediately; the solution then reports [`Status::StoppedByObserver`].

mod action;
mod event;
mod march;
mod solution;

pub mod euler;
pub mod midpoint;

pub use action::Action;
pub use event::Event;
pub use solution::{Solution, Status};

use twostep_core::{Rhs, Trajectory};

use crate::Plan;

/// The integrators available for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Explicit Euler: `y_{k+1} = y_k + h f(t_k, y_k)`.
    Euler,

    /// Explicit midpoint RK2: `y_{k+1} = y_k + h f(t_k + h/2, y_k + h/2 k1)`.
    Midpoint,
}

impl Method {
    /// Every method, in display order.
    pub const ALL: [Method; 2] = [Method::Euler, Method::Midpoint];

    /// Returns the short label used in read-outs and chart legends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Method::Euler => "Euler",
            Method::Midpoint => "RK2",
        }
    }

    /// Returns the global order of accuracy.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Method::Euler => 1,
            Method::Midpoint => 2,
        }
    }

    /// Returns how many times the method evaluates `f` per step.
    #[must_use]
    pub fn evaluations_per_step(self) -> usize {
        match self {
            Method::Euler => 1,
            Method::Midpoint => 2,
        }
    }

    /// Integrates `rhs` over `plan` from `y0` and returns the full trajectory.
    #[must_use]
    pub fn integrate<R>(self, rhs: &R, plan: &Plan, y0: f64) -> Trajectory
    where
        R: Rhs + ?Sized,
    {
        let solution = match self {
            Method::Euler => euler::solve_unobserved(rhs, plan, y0),
            Method::Midpoint => midpoint::solve_unobserved(rhs, plan, y0),
        };
        solution.trajectory
    }
}
