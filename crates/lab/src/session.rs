//! One user's session: settings in, a loaded playback and a rendered frame out.

use thiserror::Error;
use tracing::{debug, warn};
use twostep_core::Observer;

use crate::{
    catalog::{self, CUSTOM_ID},
    comparison::compare,
    config::{ConfigError, Settings},
    expr::{CompiledExact, CompiledRhs, ExprError},
    function::{ExactFunction, RhsFunction},
    playback::{Action, Frame, Playback},
};

/// Reasons a run is refused.
///
/// A refused run leaves the previous comparison and playback state untouched.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid right-hand side: {0}")]
    Rhs(#[source] ExprError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What a successful run reports besides the loaded comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    /// Why a custom exact solution was dropped, if it was.
    pub exact_error: Option<ExprError>,
}

/// Owns the playback controller and recomputes it from settings.
#[derive(Debug, Default)]
pub struct Session {
    playback: Playback,
}

impl Session {
    /// Creates a session whose playback starts at `rate`.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            playback: Playback::new(rate),
        }
    }

    /// Returns the playback controller.
    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Returns the playback controller for play, pause, and ticks.
    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// Consumes the session and hands its playback to a driver.
    #[must_use]
    pub fn into_playback(self) -> Playback {
        self.playback
    }

    /// Recomputes the comparison described by `settings`.
    ///
    /// On success the new comparison replaces the old one, playback waits at
    /// the initial sample, and `observer` receives the full comparison once.
    /// An invalid custom exact solution does not stop the run; it is dropped
    /// and reported in the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the problem is unknown or a custom right-hand side
    /// does not compile. Nothing is changed in that case.
    pub fn run<O>(&mut self, settings: &Settings, observer: &mut O) -> Result<RunOutcome, RunError>
    where
        O: for<'f> Observer<Frame<'f>, Action>,
    {
        let mut outcome = RunOutcome::default();

        let (rhs, exact) = if settings.problem == CUSTOM_ID {
            let source = settings.rhs.as_deref().unwrap_or_default();
            let rhs = CompiledRhs::compile(source).map_err(|error| {
                warn!(%error, source, "rejected right-hand side");
                RunError::Rhs(error)
            })?;

            let source = settings.exact.as_deref().unwrap_or_default();
            let exact = match CompiledExact::compile(source) {
                Ok(exact) => exact.map(ExactFunction::Custom),
                Err(error) => {
                    warn!(%error, source, "dropped exact solution");
                    outcome.exact_error = Some(error);
                    None
                }
            };
            (RhsFunction::Custom(rhs), exact)
        } else {
            let problem = catalog::get(&settings.problem)
                .ok_or_else(|| ConfigError::UnknownProblem(settings.problem.clone()))?;
            (
                RhsFunction::Catalog(problem.rhs),
                problem.exact.map(ExactFunction::Catalog),
            )
        };

        let params = settings.params()?;
        debug!(problem = %settings.problem, ?params, "run");

        self.playback.load(compare(&rhs, exact.as_ref(), params));
        // Playback is stopped after a load, so there is nothing to pause.
        if let Some(comparison) = self.playback.comparison() {
            if let Some(action) = observer.observe(&Frame::full(comparison)) {
                debug!(?action, "ignored action on a stopped playback");
            }
        }

        Ok(outcome)
    }
}
