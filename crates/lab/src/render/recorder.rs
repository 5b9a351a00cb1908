use serde::Serialize;
use twostep_core::Observer;

use crate::playback::{Action, Frame};

use super::{Charts, Visibility};

/// An observer that keeps the charts of every frame it sees.
///
/// Pass `&mut ChartRecorder` to [`Playback::tick`](crate::playback::Playback::tick)
/// or [`Playback::reset`](crate::playback::Playback::reset), or feed it frames
/// directly with [`record`](Self::record).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartRecorder {
    #[serde(skip)]
    visibility: Visibility,
    frames: Vec<Charts>,
}

impl ChartRecorder {
    /// Creates an empty recorder that draws the given series.
    #[must_use]
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            frames: Vec::new(),
        }
    }

    /// Records the charts for `frame`.
    pub fn record(&mut self, frame: &Frame<'_>) {
        self.frames.push(Charts::from_frame(frame, self.visibility));
    }

    /// Returns every recorded frame, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Charts] {
        &self.frames
    }

    /// Returns the most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&Charts> {
        self.frames.last()
    }

    /// Consumes the recorder and returns its frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<Charts> {
        self.frames
    }
}

impl Observer<Frame<'_>, Action> for ChartRecorder {
    fn observe(&mut self, event: &Frame<'_>) -> Option<Action> {
        self.record(event);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use twostep_core::InitialCondition;

    use crate::{
        comparison::compare,
        params::RunParams,
        playback::{Phase, Playback},
    };

    fn loaded() -> Playback {
        let exact = |t: f64, ic: InitialCondition| ic.y0 * (-2.0 * (t - ic.t0)).exp();
        let mut playback = Playback::new(1.0);
        playback.load(compare(
            &|_t: f64, y: f64| -2.0 * y,
            Some(&exact),
            RunParams::new(0.0, 1.0, 1.0, 0.25, 0.25),
        ));
        playback
    }

    #[test]
    fn records_one_frame_per_tick() {
        let mut playback = loaded();
        let mut recorder = ChartRecorder::default();

        playback.play();
        while let Some(timer) = playback.timer() {
            playback.tick(timer.token, &mut recorder);
        }

        let lengths: Vec<usize> = recorder
            .frames()
            .iter()
            .map(|c| c.trajectory.labels.len())
            .collect();
        assert_eq!(lengths, vec![2, 3, 4, 5]);
        assert_eq!(playback.state().phase, Phase::Ready);
    }

    #[test]
    fn never_requests_an_action() {
        let playback = loaded();
        let frame = playback.frame().expect("loaded");
        let mut recorder = ChartRecorder::new(Visibility::default());
        assert_eq!(recorder.observe(&frame), None);
        assert_eq!(recorder.last().map(|c| c.trajectory.labels.len()), Some(1));
    }

    #[test]
    fn serializes_frames_as_json() {
        let playback = loaded();
        let mut recorder = ChartRecorder::default();
        recorder.record(&playback.frame().expect("loaded"));

        let json = serde_json::to_value(&recorder).expect("serializable");
        let datasets = &json["frames"][0]["trajectory"]["datasets"];
        assert_eq!(datasets[0]["name"], "Exact");
        assert_eq!(datasets[1]["values"][0], 1.0);
        assert!(json.get("visibility").is_none());
    }
}
