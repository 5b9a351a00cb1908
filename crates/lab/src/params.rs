use serde::Serialize;
use twostep_core::InitialCondition;
use twostep_solvers::{Plan, plan};

/// Smallest step magnitude handed to the planner.
pub const MIN_STEP: f64 = 1e-6;

/// Sanitized parameters of a single run.
///
/// Built fresh for every run from raw user input; construction never fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunParams {
    /// Start of the interval, the smaller of the two endpoints.
    pub t0: f64,

    /// End of the interval, the larger of the two endpoints.
    pub tf: f64,

    /// Initial value `y(t0)`.
    pub y0: f64,

    /// Requested step after sanitizing, before the planner adjusts it.
    pub h: f64,
}

impl RunParams {
    /// Sanitizes raw input.
    ///
    /// The endpoints are reordered so `t0 <= tf`. A zero or non-finite step
    /// falls back to `default_h`; the step is then made positive and raised
    /// to at least [`MIN_STEP`].
    #[must_use]
    pub fn new(t0: f64, tf: f64, y0: f64, h: f64, default_h: f64) -> Self {
        let (t0, tf) = if tf < t0 { (tf, t0) } else { (t0, tf) };
        let h = if h.is_finite() && h != 0.0 {
            h.abs()
        } else {
            default_h.abs()
        };
        Self {
            t0,
            tf,
            y0,
            h: h.max(MIN_STEP),
        }
    }

    /// Returns the initial condition `y(t0) = y0`.
    #[must_use]
    pub fn initial(&self) -> InitialCondition {
        InitialCondition::new(self.t0, self.y0)
    }

    /// Plans the run.
    #[must_use]
    pub fn plan(&self) -> Plan {
        plan(self.t0, self.tf, self.h)
    }
}
