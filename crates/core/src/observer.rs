/// Receives events and decides how the caller should proceed.
///
/// Observers let callers monitor or steer an integrator or the playback
/// controller without changing its API, enabling rendering, logging, early
/// stopping, or custom control policies.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// caller-specific action and `None` lets the caller continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
    }

    fn drive<O: Observer<usize, Action>>(observer: &mut O, events: usize) -> usize {
        for event in 0..events {
            if observer.observe(&event) == Some(Action::Stop) {
                return event;
            }
        }
        events
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive(&mut (), 5), 5);
    }

    #[test]
    fn closure_observer_can_stop() {
        let mut seen = Vec::new();
        let mut observer = |event: &usize| {
            seen.push(*event);
            (*event == 2).then_some(Action::Stop)
        };

        assert_eq!(drive(&mut observer, 5), 2);
        assert_eq!(seen, vec![0, 1, 2]);
    }
}
