//! Chart data built from playback frames, and the observers that consume it.
//!
//! Every frame becomes two charts: the trajectories (exact, Euler, RK2) and
//! the pointwise absolute error of each method. The error chart exists only
//! when an exact solution is known. Time labels go through the display
//! rounding; plotted values do not.
//!
//! # Features
//!
//! - `plot` — enables [`show`], a live egui window with playback controls.
//!   This feature adds dependencies on `eframe` and `egui_plot`.

mod chart;
mod recorder;

#[cfg(feature = "plot")]
mod plot;

pub use chart::{Chart, Charts, Dataset, Visibility};
pub use recorder::ChartRecorder;

#[cfg(feature = "plot")]
pub use plot::{ShowConfig, show};
