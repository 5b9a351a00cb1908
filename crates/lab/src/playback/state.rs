/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been loaded.
    Idle,

    /// A comparison is loaded and no timer is running.
    Ready,

    /// The timer is running.
    Running,

    /// Stopped mid-way with the revealed prefix kept.
    Paused,
}

/// A snapshot of the controller's animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Number of revealed samples, `1..=len` once loaded and `0` while idle.
    pub revealed: usize,

    /// Playback speed multiplier, always positive and finite.
    pub rate: f64,

    /// Where the controller is in its lifecycle.
    pub phase: Phase,
}

impl AnimationState {
    /// Returns `true` while the timer is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
