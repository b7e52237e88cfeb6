//! Score aggregation boundary.
//!
//! The session reports every judgement synchronously, in schedule order,
//! and polls the latched fail signal once per tick. The scoring formula
//! itself lives behind the trait; `TallyAggregator` is a small reference
//! implementation so the engine is usable stand-alone.

use serde::{Deserialize, Serialize};

use crate::model::hit_event::{Grade, HitKind, HitOutcome};

/// Point-in-time view of the running score, handed to presentation and
/// persistence boundaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub great: u32,
    pub ok: u32,
    pub tick: u32,
    pub miss: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub failed: bool,
}

impl ScoreSnapshot {
    pub fn judged_total(&self) -> u32 {
        self.great + self.ok + self.tick + self.miss
    }
}

/// Consumer of judgement outcomes.
pub trait ScoreAggregator {
    /// Record one judgement. Called synchronously after the evaluator
    /// commits the outcome.
    fn record(&mut self, kind: HitKind, outcome: HitOutcome, offset_us: i64);

    /// Latched fail signal: once true, stays true.
    fn is_failed(&self) -> bool;

    /// Current score snapshot.
    fn snapshot(&self) -> ScoreSnapshot;
}

/// Health-gauge reference aggregator: hits refill, misses drain, and the
/// fail signal latches when the gauge depletes.
#[derive(Debug, Clone)]
pub struct TallyAggregator {
    counts: ScoreSnapshot,
    health: f64,
    failed: bool,
}

impl TallyAggregator {
    const INITIAL_HEALTH: f64 = 0.5;
    const GREAT_GAIN: f64 = 0.02;
    const OK_GAIN: f64 = 0.01;
    const TICK_GAIN: f64 = 0.005;
    const MISS_DRAIN: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            counts: ScoreSnapshot::default(),
            health: Self::INITIAL_HEALTH,
            failed: false,
        }
    }

    pub fn health(&self) -> f64 {
        self.health
    }
}

impl Default for TallyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreAggregator for TallyAggregator {
    fn record(&mut self, _kind: HitKind, outcome: HitOutcome, _offset_us: i64) {
        match outcome {
            HitOutcome::Hit(grade) => {
                let gain = match grade {
                    Grade::Great => {
                        self.counts.great += 1;
                        Self::GREAT_GAIN
                    }
                    Grade::Ok => {
                        self.counts.ok += 1;
                        Self::OK_GAIN
                    }
                    Grade::Tick => {
                        self.counts.tick += 1;
                        Self::TICK_GAIN
                    }
                };
                self.counts.combo += 1;
                self.counts.max_combo = self.counts.max_combo.max(self.counts.combo);
                self.health = (self.health + gain).min(1.0);
            }
            HitOutcome::Miss => {
                self.counts.miss += 1;
                self.counts.combo = 0;
                self.health = (self.health - Self::MISS_DRAIN).max(0.0);
                if self.health <= 0.0 {
                    self.failed = true;
                }
            }
        }
    }

    fn is_failed(&self) -> bool {
        self.failed
    }

    fn snapshot(&self) -> ScoreSnapshot {
        let mut snapshot = self.counts.clone();
        snapshot.failed = self.failed;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(agg: &mut TallyAggregator, grade: Grade) {
        agg.record(HitKind::Note, HitOutcome::Hit(grade), 0);
    }

    fn miss(agg: &mut TallyAggregator) {
        agg.record(HitKind::Note, HitOutcome::Miss, 60_000);
    }

    #[test]
    fn counts_and_combo() {
        let mut agg = TallyAggregator::new();
        hit(&mut agg, Grade::Great);
        hit(&mut agg, Grade::Ok);
        hit(&mut agg, Grade::Great);
        miss(&mut agg);
        hit(&mut agg, Grade::Ok);

        let snapshot = agg.snapshot();
        assert_eq!(snapshot.great, 2);
        assert_eq!(snapshot.ok, 2);
        assert_eq!(snapshot.miss, 1);
        assert_eq!(snapshot.combo, 1);
        assert_eq!(snapshot.max_combo, 3);
        assert_eq!(snapshot.judged_total(), 5);
    }

    #[test]
    fn fail_latches_on_depleted_gauge() {
        let mut agg = TallyAggregator::new();
        // 0.5 initial health, 0.1 drain per miss.
        for _ in 0..5 {
            miss(&mut agg);
        }
        assert!(agg.is_failed());

        // A later hit refills health but never clears the latch.
        hit(&mut agg, Grade::Great);
        assert!(agg.is_failed());
        assert!(agg.snapshot().failed);
    }

    #[test]
    fn health_is_clamped() {
        let mut agg = TallyAggregator::new();
        for _ in 0..100 {
            hit(&mut agg, Grade::Great);
        }
        assert_eq!(agg.health(), 1.0);
        assert!(!agg.is_failed());
    }

    #[test]
    fn snapshot_serializes() {
        let mut agg = TallyAggregator::new();
        hit(&mut agg, Grade::Great);
        let json = serde_json::to_string(&agg.snapshot()).unwrap();
        let back: ScoreSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, agg.snapshot());
    }
}
