use twostep_solvers::{Method, analysis::ErrorSummary};

use crate::comparison::Comparison;

/// A revealed prefix of a comparison, with its error re-analyzed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    comparison: &'a Comparison,
    revealed: usize,
    euler: Option<ErrorSummary>,
    midpoint: Option<ErrorSummary>,
}

impl<'a> Frame<'a> {
    /// Builds the frame for the first `revealed` samples, clamped to the
    /// comparison's length.
    #[must_use]
    pub fn new(comparison: &'a Comparison, revealed: usize) -> Self {
        let revealed = revealed.min(comparison.len());
        Self {
            comparison,
            revealed,
            euler: comparison.summary(Method::Euler, revealed),
            midpoint: comparison.summary(Method::Midpoint, revealed),
        }
    }

    /// Builds the frame showing the whole comparison.
    #[must_use]
    pub fn full(comparison: &'a Comparison) -> Self {
        Self::new(comparison, comparison.len())
    }

    /// Returns the comparison this frame is drawn from.
    #[must_use]
    pub fn comparison(&self) -> &'a Comparison {
        self.comparison
    }

    /// Returns the number of revealed samples.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Returns the number of revealed steps, one less than the samples.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.revealed.saturating_sub(1)
    }

    /// Returns `true` once every sample is revealed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.revealed == self.comparison.len()
    }

    /// Returns the revealed times.
    #[must_use]
    pub fn times(&self) -> &'a [f64] {
        &self.comparison.times()[..self.revealed]
    }

    /// Returns the revealed values of `method`.
    #[must_use]
    pub fn values(&self, method: Method) -> &'a [f64] {
        &self.comparison.trajectory(method).values()[..self.revealed]
    }

    /// Returns the revealed exact values, if an exact solution is known.
    #[must_use]
    pub fn exact(&self) -> Option<&'a [f64]> {
        self.comparison
            .exact
            .as_deref()
            .map(|exact| &exact[..self.revealed])
    }

    /// Returns the error summary of `method` over the revealed prefix.
    #[must_use]
    pub fn summary(&self, method: Method) -> Option<ErrorSummary> {
        match method {
            Method::Euler => self.euler,
            Method::Midpoint => self.midpoint,
        }
    }

    /// Returns the pointwise absolute error of `method` over the revealed
    /// prefix.
    #[must_use]
    pub fn pointwise(&self, method: Method) -> Option<Vec<f64>> {
        self.comparison.pointwise(method, self.revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use twostep_core::InitialCondition;

    use crate::{comparison::compare, params::RunParams};

    fn decay() -> Comparison {
        let exact = |t: f64, ic: InitialCondition| ic.y0 * (-2.0 * (t - ic.t0)).exp();
        compare(
            &|_t: f64, y: f64| -2.0 * y,
            Some(&exact),
            RunParams::new(0.0, 2.0, 1.0, 0.2, 0.2),
        )
    }

    #[test]
    fn prefix_views_are_aligned() {
        let run = decay();
        let frame = Frame::new(&run, 4);
        assert_eq!(frame.revealed(), 4);
        assert_eq!(frame.steps(), 3);
        assert_eq!(frame.times().len(), 4);
        assert_eq!(frame.values(Method::Euler).len(), 4);
        assert_eq!(frame.values(Method::Midpoint).len(), 4);
        assert_eq!(frame.exact().map(<[f64]>::len), Some(4));
        assert_eq!(frame.pointwise(Method::Euler).map(|e| e.len()), Some(4));
        assert!(!frame.is_complete());
    }

    #[test]
    fn summaries_cover_only_the_prefix() {
        let run = decay();
        let first = Frame::new(&run, 1);
        assert_eq!(
            first.summary(Method::Euler),
            Some(ErrorSummary { max: 0.0, rms: 0.0 })
        );

        let full = Frame::full(&run);
        assert!(full.is_complete());
        assert_eq!(full.steps(), 10);
        assert_eq!(
            full.summary(Method::Midpoint),
            run.summary(Method::Midpoint, run.len())
        );
    }

    #[test]
    fn oversized_prefix_is_clamped() {
        let run = decay();
        assert_eq!(Frame::new(&run, 500), Frame::full(&run));
    }
}
