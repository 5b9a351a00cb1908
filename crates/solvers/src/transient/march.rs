use twostep_core::{Observer, Trajectory};

use crate::Plan;

use super::{Action, Event, Solution, Status};

/// Marches a one-step method across `plan`.
///
/// `advance(t_k, y_k)` returns `y_{k+1}`; it is called once per step with the
/// planned time of the current sample. The loop never inspects the values, so
/// a non-finite `y` simply flows into every later sample.
pub(super) fn march<Obs, S>(
    plan: &Plan,
    y0: f64,
    mut observer: Obs,
    evaluations_per_step: usize,
    mut advance: S,
) -> Solution
where
    Obs: Observer<Event, Action>,
    S: FnMut(f64, f64) -> f64,
{
    let mut trajectory = Trajectory::with_capacity(plan.samples());
    let t0 = plan.start();
    trajectory.push(t0, y0);

    // Emit initial event.
    let event = Event {
        step: 0,
        t: t0,
        y: y0,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Solution {
            status: Status::StoppedByObserver,
            trajectory,
            steps: 0,
            evaluations: 0,
        };
    }

    let mut y = y0;

    for step in 1..=plan.steps() {
        y = advance(plan.time(step - 1), y);
        let t = plan.time(step);
        trajectory.push(t, y);

        let event = Event { step, t, y };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Solution {
                status: Status::StoppedByObserver,
                trajectory,
                steps: step,
                evaluations: step * evaluations_per_step,
            };
        }
    }

    Solution {
        status: Status::Complete,
        trajectory,
        steps: plan.steps(),
        evaluations: plan.steps() * evaluations_per_step,
    }
}
