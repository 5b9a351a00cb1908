/// Event emitted by an integrator for each sample.
///
/// Step 0 is the initial condition before any integration.
/// Steps 1..N are emitted after each integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The step number (0 for initial, 1..N for integration steps).
    pub step: usize,

    /// The sample time.
    pub t: f64,

    /// The sample value.
    pub y: f64,
}
