use std::collections::VecDeque;

/// A deferred session request. Requests are posted from anywhere during a
/// frame and processed on the next update tick, after that tick's
/// judgement mutations have settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Pause,
    Resume,
    Exit,
    Skip,
    Restart,
}

/// FIFO queue of deferred actions. Each entry carries everything it needs;
/// nothing captures mutable session state.
#[derive(Debug, Default)]
pub struct ActionQueue {
    queue: VecDeque<SessionAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, action: SessionAction) {
        self.queue.push_back(action);
    }

    /// Take all pending actions in arrival order.
    pub fn drain(&mut self) -> Vec<SessionAction> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
