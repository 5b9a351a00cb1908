//! Core traits and types for the twostep workspace.
//!
//! This crate defines the shared abstractions that the integrators, the error
//! analyzer, and the playback layer build on:
//!
//! - [`Rhs`] — the right-hand side `f(t, y)` of a scalar initial-value problem
//! - [`Exact`] — a closed-form solution `y(t)` seeded by an [`InitialCondition`]
//! - [`Trajectory`] — the ordered `(t, y)` samples produced by an integrator
//! - [`Observer`] — receives events and optionally returns control actions

mod observer;
mod problem;
mod trajectory;

pub use observer::Observer;
pub use problem::{Exact, InitialCondition, Rhs};
pub use trajectory::Trajectory;
