/// A discrete keypress-equivalent event.
/// The engine is agnostic to device and key identity; routing is purely
/// time-based (earliest eligible unjudged hit event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Timestamp in microseconds on the gameplay clock.
    pub time_us: i64,
}

impl InputEvent {
    pub fn at(time_us: i64) -> Self {
        Self { time_us }
    }
}

/// Abstraction over input sources.
/// Implementations: a live device bridge (embedder-side), ScriptedInput (testing/autoplay).
pub trait InputSource {
    /// Drain input events that occurred at or before `now_us`.
    fn poll_events(&mut self, now_us: i64) -> Vec<InputEvent>;
}

/// Pre-programmed input feed for deterministic tests and autoplay.
pub struct ScriptedInput {
    events: Vec<InputEvent>,
    cursor: usize,
}

impl ScriptedInput {
    /// Build a scripted feed. Events are sorted by timestamp.
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by_key(|e| e.time_us);
        Self { events, cursor: 0 }
    }

    /// A feed that presses exactly at each scheduled time.
    pub fn from_times(times_us: &[i64]) -> Self {
        Self::new(times_us.iter().map(|&t| InputEvent::at(t)).collect())
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self, now_us: i64) -> Vec<InputEvent> {
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].time_us <= now_us {
            self.cursor += 1;
        }
        self.events[start..self.cursor].to_vec()
    }
}
