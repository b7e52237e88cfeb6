use std::sync::Arc;

use parking_lot::Mutex;

/// Abstraction over the adjustable position source backing the gameplay
/// clock: in production an audio track, in tests a published position.
///
/// `position_us` must be safe to call from the update loop while another
/// execution context advances the source; callers treat the value as a
/// monotonically-nondecreasing snapshot.
pub trait AdjustableSource: Send + Sync {
    /// Coarse position in microseconds.
    fn position_us(&self) -> i64;

    /// Begin advancing. No-op if already running.
    fn start(&self);

    /// Freeze the position. No-op if already stopped.
    fn stop(&self);

    /// Jump to the given position without changing running state.
    fn seek(&self, time_us: i64);

    /// Change the playback rate.
    fn set_rate(&self, _rate: f64) {}
}

#[derive(Debug)]
struct PositionState {
    position_us: i64,
    running: bool,
    rate: f64,
}

/// Shared coarse position cell.
///
/// The audio context publishes its playback position here on every buffer
/// update; the gameplay clock reads it from the update loop. The lock is
/// held only for the copy, never across work.
pub struct SharedPosition {
    state: Mutex<PositionState>,
}

impl SharedPosition {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(PositionState {
                position_us: 0,
                running: false,
                rate: 1.0,
            }),
        })
    }

    /// Publish a coarse position update (called from the audio context).
    /// Ignored while stopped so a late buffer callback cannot thaw a
    /// frozen position.
    pub fn publish(&self, position_us: i64) {
        let mut state = self.state.lock();
        if state.running {
            state.position_us = position_us;
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn rate(&self) -> f64 {
        self.state.lock().rate
    }
}

impl AdjustableSource for SharedPosition {
    fn position_us(&self) -> i64 {
        self.state.lock().position_us
    }

    fn start(&self) {
        self.state.lock().running = true;
    }

    fn stop(&self) {
        self.state.lock().running = false;
    }

    fn seek(&self, time_us: i64) {
        self.state.lock().position_us = time_us;
    }

    fn set_rate(&self, rate: f64) {
        self.state.lock().rate = rate;
    }
}
