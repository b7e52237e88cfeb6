use std::cell::Cell;
use std::sync::Arc;

use crate::clock::source::AdjustableSource;
use crate::traits::time::TimeProvider;

/// Interpolated, pausable, seekable gameplay clock.
///
/// The underlying source only updates coarsely (per audio buffer), so
/// `current_time_us` smooths readings by adding the wall-clock elapsed
/// since the last coarse change, scaled by the playback rate. Without a
/// source the clock degrades to a free-running stopwatch over the same
/// interface.
///
/// Invariants: time does not advance while stopped; while running,
/// reported time is non-decreasing except across an explicit `seek`.
pub struct GameplayClock {
    source: Option<Arc<dyn AdjustableSource>>,
    wall: Arc<dyn TimeProvider>,
    running: bool,
    rate: f64,
    /// Clock time at the last anchor point.
    base_us: Cell<i64>,
    /// Wall time of the last anchor point.
    anchor_wall_us: Cell<i64>,
    /// Last coarse position observed from the source.
    last_coarse_us: Cell<i64>,
    /// Last value handed out, for the monotonic clamp.
    last_reported_us: Cell<i64>,
}

impl GameplayClock {
    pub fn new(source: Option<Arc<dyn AdjustableSource>>, wall: Arc<dyn TimeProvider>) -> Self {
        let initial = source.as_ref().map(|s| s.position_us()).unwrap_or(0);
        let anchor = wall.now_us();
        Self {
            source,
            wall,
            running: false,
            rate: 1.0,
            base_us: Cell::new(initial),
            anchor_wall_us: Cell::new(anchor),
            last_coarse_us: Cell::new(initial),
            last_reported_us: Cell::new(initial),
        }
    }

    /// Stopwatch clock with no backing source.
    pub fn stopwatch(wall: Arc<dyn TimeProvider>) -> Self {
        Self::new(None, wall)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Begin advancing time. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.anchor_wall_us.set(self.wall.now_us());
        if let Some(source) = &self.source {
            source.start();
            self.last_coarse_us.set(source.position_us());
        }
        self.running = true;
    }

    /// Freeze time. Subsequent reads return the frozen value.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        let frozen = self.current_time_us();
        if let Some(source) = &self.source {
            source.stop();
        }
        self.base_us.set(frozen);
        self.running = false;
    }

    /// Jump to `time_us` regardless of running state. Does not implicitly
    /// start or stop, and resets the monotonic clamp so backwards seeks
    /// take effect.
    pub fn seek(&mut self, time_us: i64) {
        if let Some(source) = &self.source {
            source.seek(time_us);
        }
        self.base_us.set(time_us);
        self.anchor_wall_us.set(self.wall.now_us());
        self.last_coarse_us.set(time_us);
        self.last_reported_us.set(time_us);
    }

    /// Change the playback rate, re-anchoring so already-elapsed time is
    /// unaffected.
    pub fn set_rate(&mut self, rate: f64) {
        let now = self.current_time_us();
        self.base_us.set(now);
        self.anchor_wall_us.set(self.wall.now_us());
        self.rate = rate;
        if let Some(source) = &self.source {
            source.set_rate(rate);
        }
    }

    /// Interpolated current time in microseconds.
    pub fn current_time_us(&self) -> i64 {
        if !self.running {
            return self.base_us.get();
        }

        if let Some(source) = &self.source {
            let coarse = source.position_us();
            if coarse != self.last_coarse_us.get() {
                // Re-anchor on every coarse update rather than assuming
                // continuous ownership of the source.
                self.last_coarse_us.set(coarse);
                self.base_us.set(coarse);
                self.anchor_wall_us.set(self.wall.now_us());
            }
        }

        let elapsed_wall = self.wall.now_us() - self.anchor_wall_us.get();
        let interpolated = self.base_us.get() + (elapsed_wall as f64 * self.rate) as i64;
        let clamped = interpolated.max(self.last_reported_us.get());
        self.last_reported_us.set(clamped);
        clamped
    }
}
