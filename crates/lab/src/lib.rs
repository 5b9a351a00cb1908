//! Side-by-side comparison of Euler and RK2 against exact solutions.
//!
//! This crate turns the integrators in [`twostep_solvers`] into an
//! explorable comparison:
//!
//! - [`catalog`] — the built-in initial-value problems
//! - [`expr`] — a sandboxed compiler for user-defined `f(t, y)` and `y(t)`
//! - [`params`] and [`comparison`] — sanitize a run and compute it
//! - [`playback`] — reveal a comparison one sample at a time
//! - [`render`] and [`report`] — chart data and text read-outs of a frame
//! - [`config`] and [`session`] — settings in, a loaded playback out
//!
//! # Example
//!
//! ```
//! use twostep_lab::{config::Settings, render::ChartRecorder, session::Session};
//!
//! let mut session = Session::default();
//! let mut recorder = ChartRecorder::default();
//! session.run(&Settings::default(), &mut recorder)?;
//!
//! let playback = session.playback_mut();
//! playback.play();
//! while let Some(timer) = playback.timer() {
//!     // A real driver sleeps for `timer.interval` here.
//!     playback.tick(timer.token, &mut recorder);
//! }
//!
//! // One full render from the run, then one frame per revealed sample.
//! assert_eq!(recorder.frames().len(), 11);
//! # Ok::<(), twostep_lab::session::RunError>(())
//! ```
//!
//! # Features
//!
//! - `plot` — enables [`render::show`], a live egui window.

pub mod catalog;
pub mod comparison;
pub mod config;
pub mod expr;
pub mod function;
pub mod params;
pub mod playback;
pub mod render;
pub mod report;
pub mod session;
