//! Comparing numerical trajectories against closed-form solutions.
//!
//! - [`sample_exact`] evaluates an exact solution on a trajectory's time axis.
//! - [`analyze`] reduces numeric/exact pairs to an [`ErrorSummary`] (max and
//!   RMS absolute error), and [`abs_errors`] exposes the pointwise errors for
//!   error-over-time plots.
//! - [`round6`] and [`Metric`] implement the display rule used by every
//!   read-out. Rounding is presentation only; analysis runs at full precision.

mod display;
mod error;
mod exact;

pub use display::{Metric, NOISE_FLOOR, round6};
pub use error::{ErrorSummary, abs_errors, analyze};
pub use exact::sample_exact;
