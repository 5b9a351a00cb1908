//! Fixed-step integrators and error analysis for scalar initial-value problems.
//!
//! # Modules
//!
//! - [`plan`] — reconciles an interval and a requested step size into a
//!   [`Plan`] whose steps land exactly on the end of the interval
//! - [`transient`] — explicit Euler and explicit midpoint (RK2) integrators
//! - [`analysis`] — exact-solution sampling, error metrics, and the display
//!   rounding rule shared by every read-out

pub mod analysis;
pub mod plan;
pub mod transient;

pub use plan::{Plan, plan};
pub use transient::Method;
