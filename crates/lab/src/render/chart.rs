use serde::{Deserialize, Serialize};
use twostep_solvers::{Method, analysis::round6};

use crate::playback::Frame;

const EXACT_LABEL: &str = "Exact";

/// One named series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub values: Vec<f64>,
}

impl Dataset {
    fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Labels for the x axis and the series plotted against them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub labels: Vec<f64>,
    pub datasets: Vec<Dataset>,
}

impl Chart {
    /// Returns the dataset with the given name.
    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Returns the dataset names in drawing order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }
}

/// Which series are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visibility {
    pub exact: bool,
    pub euler: bool,
    pub midpoint: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            exact: true,
            euler: true,
            midpoint: true,
        }
    }
}

impl Visibility {
    /// Returns whether `method`'s series are drawn.
    #[must_use]
    pub fn shows(&self, method: Method) -> bool {
        match method {
            Method::Euler => self.euler,
            Method::Midpoint => self.midpoint,
        }
    }
}

/// Both charts for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub trajectory: Chart,
    pub error: Option<Chart>,
}

impl Charts {
    /// Builds the charts for the revealed prefix of `frame`.
    #[must_use]
    pub fn from_frame(frame: &Frame<'_>, visibility: Visibility) -> Self {
        let labels: Vec<f64> = frame.times().iter().copied().map(round6).collect();

        let mut datasets = Vec::with_capacity(3);
        if let Some(exact) = frame.exact().filter(|_| visibility.exact) {
            datasets.push(Dataset::new(EXACT_LABEL, exact.to_vec()));
        }
        for method in Method::ALL.into_iter().filter(|m| visibility.shows(*m)) {
            datasets.push(Dataset::new(method.label(), frame.values(method).to_vec()));
        }

        let error = frame.exact().map(|_| Chart {
            labels: labels.clone(),
            datasets: Method::ALL
                .into_iter()
                .filter(|m| visibility.shows(*m))
                .filter_map(|m| {
                    let errors = frame.pointwise(m)?;
                    Some(Dataset::new(format!("Error {}", m.label()), errors))
                })
                .collect(),
        });

        Self {
            trajectory: Chart { labels, datasets },
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use twostep_core::InitialCondition;

    use crate::{
        comparison::{Comparison, compare},
        params::RunParams,
    };

    fn growth(with_exact: bool) -> Comparison {
        let exact = |t: f64, ic: InitialCondition| ic.y0 * (t - ic.t0).exp();
        let params = RunParams::new(0.0, 1.0, 1.0, 0.1, 0.1);
        compare(
            &|_t: f64, y: f64| y,
            with_exact.then_some(&exact),
            params,
        )
    }

    #[test]
    fn datasets_in_drawing_order() {
        let run = growth(true);
        let charts = Charts::from_frame(&Frame::full(&run), Visibility::default());

        assert_eq!(charts.trajectory.names(), ["Exact", "Euler", "RK2"]);
        let error = charts.error.expect("exact is known");
        assert_eq!(error.names(), ["Error Euler", "Error RK2"]);
        assert_eq!(error.labels, charts.trajectory.labels);
    }

    #[test]
    fn labels_are_rounded_times() {
        let run = growth(true);
        let charts = Charts::from_frame(&Frame::full(&run), Visibility::default());
        let labels = &charts.trajectory.labels;

        assert_eq!(labels.len(), 11);
        assert_eq!(labels[3], 0.3);
        assert_eq!(labels[10], 1.0);
    }

    #[test]
    fn prefix_frames_are_truncated() {
        let run = growth(true);
        let charts = Charts::from_frame(&Frame::new(&run, 3), Visibility::default());
        for dataset in &charts.trajectory.datasets {
            assert_eq!(dataset.values.len(), 3);
        }
        let error = charts.error.expect("exact is known");
        let euler = error.dataset("Error Euler").expect("visible");
        assert_eq!(euler.values[0], 0.0);
        assert_relative_eq!(euler.values[1], 0.1_f64.exp() - 1.1, epsilon = 1e-12);
    }

    #[test]
    fn no_exact_means_no_error_chart() {
        let run = growth(false);
        let charts = Charts::from_frame(&Frame::full(&run), Visibility::default());
        assert_eq!(charts.trajectory.names(), ["Euler", "RK2"]);
        assert!(charts.error.is_none());
    }

    #[test]
    fn hidden_series_are_omitted() {
        let run = growth(true);
        let visibility = Visibility {
            exact: false,
            euler: true,
            midpoint: false,
        };
        let charts = Charts::from_frame(&Frame::full(&run), visibility);
        assert_eq!(charts.trajectory.names(), ["Euler"]);
        assert_eq!(
            charts.error.map(|c| c.datasets.len()),
            Some(1),
        );
    }
}
