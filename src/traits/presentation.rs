use crate::score::ScoreSnapshot;

/// One-way notification boundary for overlays, HUD and screen flow.
/// The session never reads back through this interface; presentation code
/// owns all visual/audio feedback and may take arbitrarily long.
pub trait SessionListener: Send + Sync {
    /// Pause committed. Carries the restart count for overlay display.
    fn on_paused(&self, _restart_count: u32) {}

    /// Resume committed, clock running again.
    fn on_resumed(&self) {}

    /// Fail committed (sticky). Carries the restart count.
    fn on_failed(&self, _restart_count: u32) {}

    /// Completion hand-off (fires exactly once per session).
    fn on_completed(&self, _snapshot: &ScoreSnapshot) {}

    /// The lead-in skip affordance became available.
    fn on_skip_available(&self) {}

    /// The skip affordance was invoked and is now disabled.
    fn on_skip_consumed(&self) {}
}

/// Listener that ignores every notification.
pub struct NullListener;

impl SessionListener for NullListener {}
