use twostep_core::{Exact, InitialCondition, Rhs};

use crate::expr::{CompiledExact, CompiledRhs};

/// A right-hand side from the catalog or compiled from user text.
#[derive(Debug, Clone)]
pub enum RhsFunction {
    Catalog(fn(f64, f64) -> f64),
    Custom(CompiledRhs),
}

impl Rhs for RhsFunction {
    fn slope(&self, t: f64, y: f64) -> f64 {
        match self {
            RhsFunction::Catalog(f) => f(t, y),
            RhsFunction::Custom(f) => f.slope(t, y),
        }
    }
}

/// An exact solution from the catalog or compiled from user text.
#[derive(Debug, Clone)]
pub enum ExactFunction {
    Catalog(fn(f64, InitialCondition) -> f64),
    Custom(CompiledExact),
}

impl Exact for ExactFunction {
    fn value(&self, t: f64, initial: InitialCondition) -> f64 {
        match self {
            ExactFunction::Catalog(f) => f(t, initial),
            ExactFunction::Custom(f) => f.value(t, initial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn both_variants_agree() {
        let catalog = RhsFunction::Catalog(|t, y| t + y);
        let custom = RhsFunction::Custom(CompiledRhs::compile("t + y").expect("compiles"));
        for (t, y) in [(0.0, 1.0), (0.5, -2.0), (3.0, 0.25)] {
            assert_relative_eq!(catalog.slope(t, y), custom.slope(t, y));
        }

        let ic = InitialCondition::new(0.5, 2.0);
        let catalog = ExactFunction::Catalog(|t, ic| ic.y0 * (t - ic.t0).exp());
        let custom = ExactFunction::Custom(
            CompiledExact::compile("y0 * exp(t - t0)")
                .expect("compiles")
                .expect("not blank"),
        );
        for t in [0.5, 1.0, 2.0] {
            assert_relative_eq!(catalog.value(t, ic), custom.value(t, ic));
        }
    }
}
