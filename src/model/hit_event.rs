use serde::{Deserialize, Serialize};

/// Closed set of judgeable hit-object kinds. Each kind supplies its own
/// tolerance window and grading, dispatched by `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    /// A regular note with graded timing (Great inside the inner window,
    /// Ok anywhere else inside the tolerance).
    Note,
    /// A drum-roll tick: loose single-grade hit, no timing tiers.
    DrumRollTick,
}

/// Widest tolerance across all kinds, for early-exit scans over a
/// schedule sorted by time.
pub const MAX_TOLERANCE_US: i64 = 50_000;

impl HitKind {
    /// Half-width of the hit window in microseconds.
    pub fn tolerance_us(self) -> i64 {
        match self {
            HitKind::Note => 50_000,
            HitKind::DrumRollTick => 25_000,
        }
    }

    /// Grade for an in-window offset (`input - scheduled`, signed).
    pub fn grade_for_offset(self, offset_us: i64) -> Grade {
        match self {
            HitKind::Note => {
                if offset_us.abs() < 20_000 {
                    Grade::Great
                } else {
                    Grade::Ok
                }
            }
            HitKind::DrumRollTick => Grade::Tick,
        }
    }
}

/// Qualitative tier of a hit, derived from timing closeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Great,
    Ok,
    Tick,
}

/// Terminal outcome of a hit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    Hit(Grade),
    Miss,
}

impl HitOutcome {
    pub fn is_hit(self) -> bool {
        matches!(self, HitOutcome::Hit(_))
    }
}

/// A scheduled moment the player must respond to.
///
/// The outcome transitions unset -> {hit, miss} exactly once and never
/// reverses; `armed` is set at load and cleared on judgement.
#[derive(Debug, Clone)]
pub struct HitEvent {
    scheduled_us: i64,
    kind: HitKind,
    armed: bool,
    outcome: Option<HitOutcome>,
}

impl HitEvent {
    pub fn new(scheduled_us: i64, kind: HitKind) -> Self {
        Self {
            scheduled_us,
            kind,
            armed: true,
            outcome: None,
        }
    }

    pub fn scheduled_us(&self) -> i64 {
        self.scheduled_us
    }

    pub fn kind(&self) -> HitKind {
        self.kind
    }

    pub fn tolerance_us(&self) -> i64 {
        self.kind.tolerance_us()
    }

    /// Whether the event is still awaiting judgement.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn outcome(&self) -> Option<HitOutcome> {
        self.outcome
    }

    /// Commit the terminal outcome. No-op if already judged.
    pub(crate) fn resolve(&mut self, outcome: HitOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.armed = false;
    }
}
