/// Aggregate absolute error of a numerical trajectory against the exact one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    /// Largest pointwise absolute error.
    pub max: f64,

    /// Root-mean-square of the pointwise absolute errors.
    pub rms: f64,
}

/// Computes the max and RMS absolute error of `numeric` against `exact`.
///
/// Only the first `min(numeric.len(), exact.len())` samples are compared, so a
/// revealed prefix of a trajectory can be analyzed against the full exact
/// sequence. Returns `None` when no exact sequence is available or nothing
/// overlaps.
///
/// A non-finite pointwise error (an infinite or NaN sample on either side)
/// makes both `max` and `rms` infinite, so a blow-up is never masked.
#[must_use]
pub fn analyze(numeric: &[f64], exact: Option<&[f64]>) -> Option<ErrorSummary> {
    let exact = exact?;
    let n = numeric.len().min(exact.len());
    if n == 0 {
        return None;
    }

    let mut max = 0.0_f64;
    let mut sum_sq = 0.0;
    for (a, b) in numeric.iter().zip(exact) {
        let err = (a - b).abs();
        let err = if err.is_nan() { f64::INFINITY } else { err };
        max = max.max(err);
        sum_sq += err * err;
    }

    #[allow(clippy::cast_precision_loss)]
    let rms = (sum_sq / n as f64).sqrt();

    Some(ErrorSummary { max, rms })
}

/// Returns the pointwise absolute errors `|numeric[i] - exact[i]|`.
///
/// The result has `min(numeric.len(), exact.len())` entries. Non-finite
/// errors are reported unchanged.
#[must_use]
pub fn abs_errors(numeric: &[f64], exact: &[f64]) -> Vec<f64> {
    numeric
        .iter()
        .zip(exact)
        .map(|(a, b)| (a - b).abs())
        .collect()
}
