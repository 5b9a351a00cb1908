use twostep_core::{Exact, InitialCondition};

/// Evaluates `exact` at every time in `times`.
///
/// Returns `None` when no exact solution is available. The same initial
/// condition that seeded the integrators must be passed so the curves agree at
/// `t0`. Non-finite values are returned as-is.
#[must_use]
pub fn sample_exact<E>(
    exact: Option<&E>,
    times: &[f64],
    initial: InitialCondition,
) -> Option<Vec<f64>>
where
    E: Exact + ?Sized,
{
    let exact = exact?;
    Some(times.iter().map(|&t| exact.value(t, initial)).collect())
}
