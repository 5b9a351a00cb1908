//! Text read-outs of a frame: the metrics panel and a per-sample table.
//!
//! Every number goes through the display rounding; an unavailable metric is
//! shown as `—`.

use std::fmt;

use serde::Serialize;
use twostep_solvers::{
    Method,
    analysis::{Metric, round6},
};

use crate::playback::Frame;

/// Error and cost of one method over a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodMetrics {
    pub max: Option<f64>,
    pub rms: Option<f64>,
    pub evaluations: usize,
}

/// The metrics panel for one frame.
///
/// `steps` counts the revealed steps, so during playback the step count and
/// evaluation costs grow with the animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub steps: usize,
    pub h: f64,
    pub euler: MethodMetrics,
    pub midpoint: MethodMetrics,
}

impl Metrics {
    #[must_use]
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        let steps = frame.steps();
        let method = |method: Method| {
            let summary = frame.summary(method);
            MethodMetrics {
                max: summary.map(|s| s.max),
                rms: summary.map(|s| s.rms),
                evaluations: steps * method.evaluations_per_step(),
            }
        };
        Self {
            steps,
            h: frame.comparison().plan.step_size(),
            euler: method(Method::Euler),
            midpoint: method(Method::Midpoint),
        }
    }

    /// Returns the metrics of `method`.
    #[must_use]
    pub fn method(&self, method: Method) -> &MethodMetrics {
        match method {
            Method::Euler => &self.euler,
            Method::Midpoint => &self.midpoint,
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps: {} | effective h: {}", self.steps, round6(self.h))?;
        writeln!(
            f,
            "{:<8}{:>14}{:>14}{:>13}",
            "method", "max error", "rms error", "evaluations"
        )?;
        for method in Method::ALL {
            let m = self.method(method);
            writeln!(
                f,
                "{:<8}{:>14}{:>14}{:>13}",
                method.label(),
                Metric(m.max).to_string(),
                Metric(m.rms).to_string(),
                m.evaluations
            )?;
        }
        Ok(())
    }
}

/// A per-sample table of a frame: time, exact value, both methods, and their
/// absolute errors.
pub struct SampleTable<'a> {
    frame: Frame<'a>,
}

impl<'a> SampleTable<'a> {
    #[must_use]
    pub fn new(frame: Frame<'a>) -> Self {
        Self { frame }
    }
}

impl fmt::Display for SampleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = &self.frame;
        let exact = frame.exact();
        let euler = frame.values(Method::Euler);
        let midpoint = frame.values(Method::Midpoint);

        writeln!(
            f,
            "{:>12}{:>14}{:>14}{:>14}{:>14}{:>14}",
            "t", "exact", "Euler", "RK2", "|err Euler|", "|err RK2|"
        )?;
        for (k, &t) in frame.times().iter().enumerate() {
            let y = exact.map(|e| e[k]);
            let err = |value: f64| y.map(|y| (value - y).abs());
            writeln!(
                f,
                "{:>12}{:>14}{:>14}{:>14}{:>14}{:>14}",
                round6(t),
                Metric(y).to_string(),
                Metric::from(euler[k]).to_string(),
                Metric::from(midpoint[k]).to_string(),
                Metric(err(euler[k])).to_string(),
                Metric(err(midpoint[k])).to_string(),
            )?;
        }
        Ok(())
    }
}
