//! A live egui window that drives a [`Playback`].
//!
//! See [`show`] and [`ShowConfig`].

use std::time::Instant;

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use twostep_core::Observer;

use crate::{
    playback::{Action, Frame, Playback},
    report::Metrics,
};

use super::{Chart, Charts, Visibility};

/// Slowest rate the speed slider offers.
const MIN_SLIDER_RATE: f64 = 0.25;

/// Fastest rate the speed slider offers.
const MAX_SLIDER_RATE: f64 = 4.0;

/// Configuration for the playback window.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
pub struct ShowConfig {
    title: Option<String>,
    visibility: Visibility,
    autoplay: bool,
}

impl ShowConfig {
    /// Creates a config with no title, every series visible, and playback
    /// waiting for the play button.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            visibility: Visibility::default(),
            autoplay: false,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets which series are drawn.
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Starts playback as soon as the window opens.
    #[must_use]
    pub fn autoplay(mut self) -> Self {
        self.autoplay = true;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens a blocking egui window that replays `playback`.
///
/// The window starts by showing the full comparison, then steps through it
/// with play, pause, reset, and a speed slider. Blocks until the window is
/// closed by the user.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(mut playback: Playback, config: ShowConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    let title = config.title.unwrap_or_default();

    let mut latest = Latest::new(config.visibility);
    if let Some(comparison) = playback.comparison() {
        latest.record(&Frame::full(comparison));
    }
    if config.autoplay {
        playback.play();
    }
    let rate = playback.state().rate;

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PlotApp {
                playback,
                latest,
                rate,
                last_tick: Instant::now(),
            }))
        }),
    )
}

/// Keeps only the most recent frame's charts and metrics.
struct Latest {
    visibility: Visibility,
    charts: Option<Charts>,
    metrics: Option<Metrics>,
}

impl Latest {
    fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            charts: None,
            metrics: None,
        }
    }

    fn record(&mut self, frame: &Frame<'_>) {
        self.charts = Some(Charts::from_frame(frame, self.visibility));
        self.metrics = Some(Metrics::from_frame(frame));
    }
}

impl Observer<Frame<'_>, Action> for Latest {
    fn observe(&mut self, event: &Frame<'_>) -> Option<Action> {
        self.record(event);
        None
    }
}

/// The egui [`eframe::App`] that renders the charts and playback controls.
struct PlotApp {
    playback: Playback,
    latest: Latest,
    rate: f64,
    last_tick: Instant,
}

impl PlotApp {
    fn drive_timer(&mut self, ctx: &egui::Context) {
        let Some(timer) = self.playback.timer() else {
            return;
        };
        if self.last_tick.elapsed() >= timer.interval {
            self.last_tick = Instant::now();
            self.playback.tick(timer.token, &mut self.latest);
        }
        if let Some(timer) = self.playback.timer() {
            ctx.request_repaint_after(timer.interval);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Play").clicked() {
                self.last_tick = Instant::now();
                self.playback.play();
            }
            if ui.button("Pause").clicked() {
                self.playback.pause();
            }
            if ui.button("Reset").clicked() {
                self.playback.reset(&mut self.latest);
            }
            let slider = egui::Slider::new(&mut self.rate, MIN_SLIDER_RATE..=MAX_SLIDER_RATE)
                .text("speed");
            if ui.add(slider).changed() {
                self.playback.set_rate(self.rate);
            }
        });
        if let Some(metrics) = &self.latest.metrics {
            ui.monospace(metrics.to_string());
        }
    }
}

fn draw(ui: &mut egui::Ui, id: &str, chart: &Chart, y_label: &str, height: f32) {
    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label("t")
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            for dataset in &chart.datasets {
                let points: PlotPoints = chart
                    .labels
                    .iter()
                    .zip(&dataset.values)
                    .filter(|(_, y)| y.is_finite())
                    .map(|(&t, &y)| [t, y])
                    .collect();
                plot_ui.line(Line::new(points).name(&dataset.name));
            }
        });
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_timer(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(charts) = &self.latest.charts else {
                ui.label("Nothing to show.");
                return;
            };
            let height = match &charts.error {
                Some(_) => ui.available_height() / 2.0,
                None => ui.available_height(),
            };
            draw(ui, "trajectory", &charts.trajectory, "y(t)", height);
            if let Some(error) = &charts.error {
                draw(ui, "error", error, "|error|", height);
            }
        });
    }
}
