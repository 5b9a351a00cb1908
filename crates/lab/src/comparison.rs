//! The run pipeline: plan, integrate with both methods, sample the exact
//! solution on the shared time axis.

use serde::Serialize;
use tracing::debug;
use twostep_core::{Exact, Rhs, Trajectory};
use twostep_solvers::{
    Method, Plan,
    analysis::{ErrorSummary, abs_errors, analyze, sample_exact},
    transient::{euler, midpoint},
};

use crate::params::RunParams;

/// Right-hand-side evaluations spent by each method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cost {
    pub steps: usize,
    pub euler: usize,
    pub midpoint: usize,
}

/// Both numerical trajectories of one run, with the exact values if known.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub params: RunParams,
    pub plan: Plan,
    pub euler: Trajectory,
    pub midpoint: Trajectory,
    pub exact: Option<Vec<f64>>,
    pub cost: Cost,
}

/// Runs both integrators over `params` and samples `exact` on their times.
///
/// The result is a pure function of its inputs.
#[must_use]
pub fn compare<R, E>(rhs: &R, exact: Option<&E>, params: RunParams) -> Comparison
where
    R: Rhs + ?Sized,
    E: Exact + ?Sized,
{
    let plan = params.plan();
    debug!(
        t0 = plan.start(),
        tf = plan.end(),
        steps = plan.steps(),
        h = plan.step_size(),
        "planned run"
    );

    let euler = euler::solve_unobserved(rhs, &plan, params.y0);
    let midpoint = midpoint::solve_unobserved(rhs, &plan, params.y0);
    let exact = sample_exact(exact, euler.trajectory.times(), params.initial());

    Comparison {
        params,
        plan,
        cost: Cost {
            steps: plan.steps(),
            euler: euler.evaluations,
            midpoint: midpoint.evaluations,
        },
        euler: euler.trajectory,
        midpoint: midpoint.trajectory,
        exact,
    }
}

impl Comparison {
    /// Returns the shared time axis.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.euler.times()
    }

    /// Returns the number of samples per trajectory, `steps + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.euler.len()
    }

    /// Always `false`; a comparison holds at least the initial sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.euler.is_empty()
    }

    /// Returns the trajectory produced by `method`.
    #[must_use]
    pub fn trajectory(&self, method: Method) -> &Trajectory {
        match method {
            Method::Euler => &self.euler,
            Method::Midpoint => &self.midpoint,
        }
    }

    /// Summarizes the error of `method` over the first `prefix` samples.
    #[must_use]
    pub fn summary(&self, method: Method, prefix: usize) -> Option<ErrorSummary> {
        let values = self.trajectory(method).values();
        analyze(&values[..prefix.min(values.len())], self.exact.as_deref())
    }

    /// Returns the pointwise absolute error of `method` over the first
    /// `prefix` samples.
    #[must_use]
    pub fn pointwise(&self, method: Method, prefix: usize) -> Option<Vec<f64>> {
        let values = self.trajectory(method).values();
        let exact = self.exact.as_deref()?;
        Some(abs_errors(&values[..prefix.min(values.len())], exact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use twostep_core::InitialCondition;

    fn growth(_t: f64, y: f64) -> f64 {
        y
    }

    fn growth_exact(t: f64, ic: InitialCondition) -> f64 {
        ic.y0 * (t - ic.t0).exp()
    }

    fn growth_run() -> Comparison {
        let params = RunParams::new(0.0, 2.0, 1.0, 0.2, 0.2);
        compare(&growth, Some(&growth_exact), params)
    }

    #[test]
    fn trajectories_share_the_time_axis() {
        let run = growth_run();
        assert_eq!(run.len(), 11);
        assert_eq!(run.euler.times(), run.midpoint.times());
        assert_eq!(run.exact.as_ref().map(Vec::len), Some(11));
        assert_eq!(run.times()[10], 2.0);
    }

    #[test]
    fn reports_evaluation_cost() {
        let run = growth_run();
        assert_eq!(
            run.cost,
            Cost {
                steps: 10,
                euler: 10,
                midpoint: 20
            }
        );
    }

    #[test]
    fn midpoint_has_smaller_error() {
        let run = growth_run();
        let euler = run.summary(Method::Euler, run.len()).expect("exact known");
        let midpoint = run.summary(Method::Midpoint, run.len()).expect("exact known");
        assert!(midpoint.max < euler.max);
        assert!(midpoint.rms < euler.rms);
        assert_relative_eq!(euler.max, 2.0_f64.exp() - 1.2_f64.powi(10), epsilon = 1e-12);
    }

    #[test]
    fn prefix_summary_grows_with_the_prefix() {
        let run = growth_run();
        let first = run.summary(Method::Euler, 1).expect("exact known");
        assert_eq!(first, ErrorSummary { max: 0.0, rms: 0.0 });

        let half = run.summary(Method::Euler, 6).expect("exact known");
        let full = run.summary(Method::Euler, 11).expect("exact known");
        assert!(half.max < full.max);

        // Prefixes past the end clamp to the full run.
        assert_eq!(run.summary(Method::Euler, 99), Some(full));
        assert_eq!(run.pointwise(Method::Euler, 3).map(|e| e.len()), Some(3));
    }

    #[test]
    fn no_exact_means_no_metrics() {
        let none: Option<&fn(f64, InitialCondition) -> f64> = None;
        let run = compare(&growth, none, RunParams::new(0.0, 1.0, 1.0, 0.1, 0.1));
        assert_eq!(run.exact, None);
        assert_eq!(run.summary(Method::Midpoint, run.len()), None);
        assert_eq!(run.pointwise(Method::Euler, run.len()), None);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        assert_eq!(growth_run(), growth_run());
    }
}
