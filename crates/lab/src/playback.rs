//! Prefix-by-prefix replay of a comparison.
//!
//! The controller reveals one more sample per timer tick, re-analyzes the
//! revealed prefix, and hands the resulting [`Frame`] to an observer (usually
//! a renderer).
//!
//! # Timing
//!
//! The controller never sleeps. It publishes at most one live [`Timer`] with
//! the interval the driver should wait between ticks. Every start or restart
//! mints a fresh [`TimerToken`]; [`Playback::tick`] ignores any other token,
//! so a tick scheduled before a pause, a rate change, or a new run can never
//! advance the animation.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --load--> Ready --play--> Running --pause--> Paused --play--> Running
//!                  ^                |                  |
//!                  +--- full/reset -+------ reset -----+
//! ```

mod frame;
mod state;
mod timer;

pub use frame::Frame;
pub use state::{AnimationState, Phase};
pub use timer::{
    BASE_INTERVAL, DEFAULT_RATE, MIN_INTERVAL, Timer, TimerToken, interval, sanitize_rate,
};

use tracing::{debug, trace};
use twostep_core::Observer;

use crate::comparison::Comparison;

/// Control actions an observer can request from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause playback after this frame.
    Pause,
}

/// What a call to [`Playback::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The token was not the live timer's; nothing happened.
    Stale,

    /// One more sample was revealed and rendered.
    Advanced,

    /// The full trajectory is revealed and the timer has stopped.
    Finished,
}

/// Replays a [`Comparison`] one sample at a time.
#[derive(Debug)]
pub struct Playback {
    comparison: Option<Comparison>,
    state: AnimationState,
    timer: Option<Timer>,
    issued: u64,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl Playback {
    /// Creates an idle controller with the given rate multiplier.
    ///
    /// An invalid rate falls back to 1x.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            comparison: None,
            state: AnimationState {
                revealed: 0,
                rate: sanitize_rate(rate),
                phase: Phase::Idle,
            },
            timer: None,
            issued: 0,
        }
    }

    /// Returns a snapshot of the animation state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Returns the live timer, if playback is running.
    #[must_use]
    pub fn timer(&self) -> Option<Timer> {
        self.timer
    }

    /// Returns the loaded comparison.
    #[must_use]
    pub fn comparison(&self) -> Option<&Comparison> {
        self.comparison.as_ref()
    }

    /// Returns the frame for the currently revealed prefix.
    #[must_use]
    pub fn frame(&self) -> Option<Frame<'_>> {
        let comparison = self.comparison.as_ref()?;
        Some(Frame::new(comparison, self.state.revealed))
    }

    /// Replaces the comparison being replayed.
    ///
    /// Any running timer is cancelled and the controller waits in
    /// [`Phase::Ready`] with only the initial sample revealed.
    pub fn load(&mut self, comparison: Comparison) {
        self.cancel_timer();
        debug!(samples = comparison.len(), "loaded comparison");
        self.comparison = Some(comparison);
        self.state.revealed = 1;
        self.state.phase = Phase::Ready;
    }

    /// Starts or resumes playback.
    ///
    /// Does nothing while already running or when nothing is loaded.
    /// Returns the live timer.
    pub fn play(&mut self) -> Option<Timer> {
        match self.state.phase {
            Phase::Idle => None,
            Phase::Running => self.timer,
            Phase::Ready | Phase::Paused => {
                self.state.phase = Phase::Running;
                Some(self.start_timer())
            }
        }
    }

    /// Stops the timer and keeps the revealed prefix.
    pub fn pause(&mut self) {
        if self.state.phase == Phase::Running {
            self.cancel_timer();
            self.state.phase = Phase::Paused;
            debug!(revealed = self.state.revealed, "paused");
        }
    }

    /// Stops the timer, rewinds to the initial sample, and renders it.
    pub fn reset<O>(&mut self, observer: &mut O)
    where
        O: for<'f> Observer<Frame<'f>, Action>,
    {
        if self.state.phase == Phase::Idle {
            return;
        }
        self.cancel_timer();
        self.state.revealed = 1;
        self.state.phase = Phase::Ready;
        self.render(observer);
    }

    /// Sets the rate multiplier.
    ///
    /// A non-finite or non-positive rate falls back to 1x. A running timer is
    /// restarted at the new interval.
    pub fn set_rate(&mut self, rate: f64) {
        self.state.rate = sanitize_rate(rate);
        if self.state.phase == Phase::Running {
            self.start_timer();
        }
    }

    /// Handles a timer tick.
    ///
    /// Reveals one more sample, renders the new prefix, and stops once the
    /// full trajectory is visible. Ticks carrying anything but the live
    /// timer's token are ignored.
    pub fn tick<O>(&mut self, token: TimerToken, observer: &mut O) -> Tick
    where
        O: for<'f> Observer<Frame<'f>, Action>,
    {
        if self.timer.map(|timer| timer.token) != Some(token) {
            trace!(?token, "ignored stale tick");
            return Tick::Stale;
        }
        let Some(len) = self.comparison.as_ref().map(Comparison::len) else {
            return Tick::Stale;
        };

        self.state.revealed = (self.state.revealed + 1).min(len);
        let finished = self.state.revealed >= len;
        if finished {
            self.cancel_timer();
            self.state.phase = Phase::Ready;
        }
        trace!(revealed = self.state.revealed, finished, "tick");

        self.render(observer);

        if finished { Tick::Finished } else { Tick::Advanced }
    }

    /// Renders the current prefix and applies the observer's action.
    fn render<O>(&mut self, observer: &mut O)
    where
        O: for<'f> Observer<Frame<'f>, Action>,
    {
        let action = match self.frame() {
            Some(frame) => observer.observe(&frame),
            None => None,
        };
        if action == Some(Action::Pause) {
            self.pause();
        }
    }

    fn start_timer(&mut self) -> Timer {
        self.issued += 1;
        let timer = Timer {
            token: TimerToken(self.issued),
            interval: interval(self.state.rate),
        };
        self.timer = Some(timer);
        debug!(token = ?timer.token, interval = ?timer.interval, "timer started");
        timer
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }
}
