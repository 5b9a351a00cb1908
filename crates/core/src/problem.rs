/// The starting point `(t0, y0)` of an initial-value problem.
///
/// Closed-form solutions are parameterized by the same initial condition that
/// seeds the integrators, so changing `t0` or `y0` moves the exact curve too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialCondition {
    pub t0: f64,
    pub y0: f64,
}

impl InitialCondition {
    /// Creates an initial condition `y(t0) = y0`.
    #[must_use]
    pub fn new(t0: f64, y0: f64) -> Self {
        Self { t0, y0 }
    }
}

/// The right-hand side of a scalar ODE `y' = f(t, y)`.
///
/// Implementations must be deterministic. They are total: a value outside the
/// function's numeric domain is reported as a non-finite `f64`, which the
/// integrators propagate rather than reject.
///
/// Closures and function pointers of the form `Fn(f64, f64) -> f64`
/// implement this trait automatically.
pub trait Rhs {
    /// Returns the slope `f(t, y)`.
    fn slope(&self, t: f64, y: f64) -> f64;
}

impl<F> Rhs for F
where
    F: Fn(f64, f64) -> f64,
{
    fn slope(&self, t: f64, y: f64) -> f64 {
        self(t, y)
    }
}

/// A closed-form solution `y(t)` of an initial-value problem.
///
/// Like [`Rhs`], evaluation is total; a formula that leaves its domain (for
/// example a division by `y0 = 0`) yields a non-finite value.
///
/// Closures of the form `Fn(f64, InitialCondition) -> f64` implement this
/// trait automatically.
pub trait Exact {
    /// Returns `y(t)` for the solution passing through `initial`.
    fn value(&self, t: f64, initial: InitialCondition) -> f64;
}

impl<F> Exact for F
where
    F: Fn(f64, InitialCondition) -> f64,
{
    fn value(&self, t: f64, initial: InitialCondition) -> f64 {
        self(t, initial)
    }
}
