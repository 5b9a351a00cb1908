//! The built-in initial-value problems.
//!
//! Every exact solution is parameterized by the run's initial condition, so
//! moving `t0` or `y0` moves the exact curve along with the numerical ones.

use serde::Serialize;
use twostep_core::InitialCondition;

/// Selector id for a user-defined problem.
pub const CUSTOM_ID: &str = "custom";

/// Defaults applied when a user-defined problem is selected.
pub const CUSTOM_DEFAULTS: Defaults = Defaults {
    t0: 0.0,
    tf: 2.0,
    y0: 1.0,
    h: 0.2,
};

/// Default run parameters of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Defaults {
    pub t0: f64,
    pub tf: f64,
    pub y0: f64,
    pub h: f64,
}

/// A named initial-value problem `y' = f(t, y)`, `y(t0) = y0`.
#[derive(Debug, Clone, Copy)]
pub struct Problem {
    pub id: &'static str,
    pub name: &'static str,
    pub rhs: fn(f64, f64) -> f64,
    pub exact: Option<fn(f64, InitialCondition) -> f64>,
    pub defaults: Defaults,
    pub description: &'static str,
}

/// Returns every built-in problem in display order.
#[must_use]
pub fn all() -> &'static [Problem] {
    &PROBLEMS
}

/// Looks up a built-in problem by id.
#[must_use]
pub fn get(id: &str) -> Option<&'static Problem> {
    PROBLEMS.iter().find(|p| p.id == id)
}

/// Returns the defaults for a selector id, including [`CUSTOM_ID`].
#[must_use]
pub fn defaults(id: &str) -> Option<Defaults> {
    if id == CUSTOM_ID {
        Some(CUSTOM_DEFAULTS)
    } else {
        get(id).map(|p| p.defaults)
    }
}

const TAU_APPROX: f64 = 6.28318;

static PROBLEMS: [Problem; 9] = [
    Problem {
        id: "exp",
        name: "y' = y, y(0) = 1",
        rhs: |_t, y| y,
        exact: Some(|t: f64, ic: InitialCondition| ic.y0 * (t - ic.t0).exp()),
        defaults: Defaults {
            t0: 0.0,
            tf: 2.0,
            y0: 1.0,
            h: 0.2,
        },
        description: "Exponential growth. Exact: y(t) = y0 e^(t - t0).",
    },
    Problem {
        id: "decay",
        name: "y' = -2y, y(0) = 1",
        rhs: |_t, y| -2.0 * y,
        exact: Some(|t: f64, ic: InitialCondition| ic.y0 * (-2.0 * (t - ic.t0)).exp()),
        defaults: Defaults {
            t0: 0.0,
            tf: 2.0,
            y0: 1.0,
            h: 0.2,
        },
        description: "Exponential decay. Exact: y(t) = y0 e^(-2(t - t0)).",
    },
    Problem {
        id: "t_plus_y",
        name: "y' = t + y, y(0) = 1",
        rhs: |t, y| t + y,
        exact: Some(|t: f64, ic: InitialCondition| {
            let c = (ic.y0 + ic.t0 + 1.0) * (-ic.t0).exp();
            -t - 1.0 + c * t.exp()
        }),
        defaults: Defaults {
            t0: 0.0,
            tf: 2.0,
            y0: 1.0,
            h: 0.2,
        },
        description: "Linear, non-homogeneous. Exact: y(t) = -t - 1 + (y0 + t0 + 1) e^(t - t0).",
    },
    Problem {
        id: "sin_forced",
        name: "y' = -sin(t) + y, y(0) = 0",
        rhs: |t, y| -t.sin() + y,
        exact: Some(|t: f64, ic: InitialCondition| {
            let c = (ic.y0 - 0.5 * (ic.t0.sin() - ic.t0.cos())) * (-ic.t0).exp();
            0.5 * (t.sin() - t.cos()) + c * t.exp()
        }),
        defaults: Defaults {
            t0: 0.0,
            tf: TAU_APPROX,
            y0: 0.0,
            h: 0.1,
        },
        description: "Sinusoidal forcing. Exact: y(t) = (sin t - cos t) / 2 + C e^t.",
    },
    Problem {
        id: "logistic",
        name: "y' = y(1 - y), y(0) = 0.2",
        rhs: |_t, y| y * (1.0 - y),
        exact: Some(|t: f64, ic: InitialCondition| {
            let a = (1.0 - ic.y0) / ic.y0;
            1.0 / (1.0 + a * (-(t - ic.t0)).exp())
        }),
        defaults: Defaults {
            t0: 0.0,
            tf: 10.0,
            y0: 0.2,
            h: 0.2,
        },
        description: "Logistic growth. Exact: y(t) = 1 / (1 + A e^-(t - t0)) with A = (1 - y0) / y0.",
    },
    Problem {
        id: "poly2t",
        name: "y' = 2t, y(0) = 0",
        rhs: |t, _y| 2.0 * t,
        exact: Some(|t: f64, ic: InitialCondition| ic.y0 + (t - ic.t0) * (t + ic.t0)),
        defaults: Defaults {
            t0: 0.0,
            tf: 5.0,
            y0: 0.0,
            h: 0.2,
        },
        description: "Polynomial slope field. Exact: y(t) = y0 + t^2 - t0^2.",
    },
    Problem {
        id: "ysq",
        name: "y' = y^2, y(0) = 0.5",
        rhs: |_t, y| y * y,
        exact: Some(|t: f64, ic: InitialCondition| ic.y0 / (1.0 - ic.y0 * (t - ic.t0))),
        defaults: Defaults {
            t0: 0.0,
            tf: 1.5,
            y0: 0.5,
            h: 0.05,
        },
        description: "Nonlinear with possible blow-up. Exact: y(t) = y0 / (1 - y0 (t - t0)).",
    },
    Problem {
        id: "lin_3y_2t",
        name: "y' = 3y + 2t, y(0) = 1",
        rhs: |t, y| 3.0 * y + 2.0 * t,
        exact: Some(|t: f64, ic: InitialCondition| {
            let c = (ic.y0 + (2.0 / 3.0) * ic.t0 + 2.0 / 9.0) * (-3.0 * ic.t0).exp();
            c * (3.0 * t).exp() - (2.0 / 3.0) * t - 2.0 / 9.0
        }),
        defaults: Defaults {
            t0: 0.0,
            tf: 2.0,
            y0: 1.0,
            h: 0.1,
        },
        description: "Linear with a term in t. Exact: y(t) = C e^(3t) - 2t/3 - 2/9.",
    },
    Problem {
        id: "cos_minus_y",
        name: "y' = cos t - y, y(0) = 0",
        rhs: |t, y| t.cos() - y,
        exact: Some(|t: f64, ic: InitialCondition| {
            let c = (ic.y0 - 0.5 * (ic.t0.sin() + ic.t0.cos())) * ic.t0.exp();
            0.5 * (t.sin() + t.cos()) + c * (-t).exp()
        }),
        defaults: Defaults {
            t0: 0.0,
            tf: TAU_APPROX,
            y0: 0.0,
            h: 0.1,
        },
        description: "Stable linear with cosine forcing. Exact: y(t) = (sin t + cos t) / 2 + C e^-t.",
    },
];
