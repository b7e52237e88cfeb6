use crate::model::hit_event::{HitEvent, HitKind};

/// A hit event as supplied by the loading boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledHit {
    pub time_us: i64,
    pub kind: HitKind,
}

impl ScheduledHit {
    pub fn note(time_us: i64) -> Self {
        Self {
            time_us,
            kind: HitKind::Note,
        }
    }

    pub fn tick(time_us: i64) -> Self {
        Self {
            time_us,
            kind: HitKind::DrumRollTick,
        }
    }
}

/// The session's hit-event schedule, sorted by scheduled time.
///
/// Exclusively owned and mutated by the judgement evaluator under the
/// session's single-threaded tick. The cursor tracks the judged prefix so
/// timeout sweeps stay incremental.
#[derive(Debug, Clone)]
pub struct Schedule {
    events: Vec<HitEvent>,
    cursor: usize,
}

impl Schedule {
    pub fn new(mut hits: Vec<ScheduledHit>) -> Self {
        hits.sort_by_key(|h| h.time_us);
        let events = hits
            .into_iter()
            .map(|h| HitEvent::new(h.time_us, h.kind))
            .collect();
        Self { events, cursor: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[HitEvent] {
        &self.events
    }

    pub(crate) fn events_mut(&mut self) -> &mut [HitEvent] {
        &mut self.events
    }

    /// Scheduled time of the earliest event, if any.
    pub fn first_event_us(&self) -> Option<i64> {
        self.events.first().map(|e| e.scheduled_us())
    }

    pub fn judged_count(&self) -> usize {
        self.events.iter().filter(|e| !e.is_armed()).count()
    }

    pub fn all_judged(&self) -> bool {
        self.events.iter().all(|e| !e.is_armed())
    }

    /// Index of the first event in the unjudged suffix.
    pub(crate) fn unjudged_start(&self) -> usize {
        self.cursor
    }

    /// Advance the cursor past the fully-judged prefix.
    pub(crate) fn advance_cursor(&mut self) {
        while self.cursor < self.events.len() && !self.events[self.cursor].is_armed() {
            self.cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hit_event::HitOutcome;

    #[test]
    fn schedule_sorts_by_time() {
        let schedule = Schedule::new(vec![
            ScheduledHit::note(3_000_000),
            ScheduledHit::note(1_000_000),
            ScheduledHit::tick(2_000_000),
        ]);
        let times: Vec<i64> = schedule.events().iter().map(|e| e.scheduled_us()).collect();
        assert_eq!(times, vec![1_000_000, 2_000_000, 3_000_000]);
        assert_eq!(schedule.first_event_us(), Some(1_000_000));
    }

    #[test]
    fn empty_schedule() {
        let schedule = Schedule::new(vec![]);
        assert!(schedule.is_empty());
        assert_eq!(schedule.first_event_us(), None);
        assert!(schedule.all_judged());
    }

    #[test]
    fn cursor_skips_judged_prefix() {
        let mut schedule = Schedule::new(vec![
            ScheduledHit::note(1_000_000),
            ScheduledHit::note(2_000_000),
            ScheduledHit::note(3_000_000),
        ]);
        assert_eq!(schedule.unjudged_start(), 0);

        schedule.events_mut()[0].resolve(HitOutcome::Miss);
        schedule.advance_cursor();
        assert_eq!(schedule.unjudged_start(), 1);
        assert_eq!(schedule.judged_count(), 1);
        assert!(!schedule.all_judged());

        // Out-of-order judgement does not move the cursor past an armed event.
        schedule.events_mut()[2].resolve(HitOutcome::Miss);
        schedule.advance_cursor();
        assert_eq!(schedule.unjudged_start(), 1);

        schedule.events_mut()[1].resolve(HitOutcome::Miss);
        schedule.advance_cursor();
        assert_eq!(schedule.unjudged_start(), 3);
        assert!(schedule.all_judged());
    }
}
