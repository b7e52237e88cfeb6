//! Per-event judgement: deciding hit/miss outcomes from player input and
//! the passage of time.
//!
//! Both entry points are idempotent no-ops once an event is judged, so a
//! terminal outcome is produced exactly once per event no matter how many
//! input or tick callbacks arrive afterwards.

use crate::model::hit_event::{HitEvent, HitKind, HitOutcome, MAX_TOLERANCE_US};
use crate::model::schedule::Schedule;

/// A single judgement produced by the evaluator, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgement {
    /// Index of the event in the schedule.
    pub index: usize,
    pub kind: HitKind,
    pub outcome: HitOutcome,
    /// `input - scheduled` for hits, `now - scheduled` for misses.
    pub offset_us: i64,
}

/// Apply a player input to one event. Returns whether the event consumed
/// the input (outcome becomes hit); an input outside the tolerance leaves
/// the event untouched.
pub fn on_input(event: &mut HitEvent, input_us: i64) -> bool {
    if !event.is_armed() {
        return false;
    }
    let offset = input_us - event.scheduled_us();
    if offset.abs() < event.tolerance_us() {
        let grade = event.kind().grade_for_offset(offset);
        event.resolve(HitOutcome::Hit(grade));
        true
    } else {
        false
    }
}

/// Apply the passage of time to one event. Returns whether the event was
/// judged a miss on this call. An event never triggered in time is always
/// a miss, never silently dropped.
pub fn on_time_advance(event: &mut HitEvent, now_us: i64) -> bool {
    if !event.is_armed() {
        return false;
    }
    if now_us > event.scheduled_us() + event.tolerance_us() {
        event.resolve(HitOutcome::Miss);
        true
    } else {
        false
    }
}

/// Route an input to the earliest armed event whose window contains it.
pub fn apply_input(schedule: &mut Schedule, input_us: i64) -> Option<Judgement> {
    schedule.advance_cursor();
    let start = schedule.unjudged_start();
    for index in start..schedule.len() {
        let event = &mut schedule.events_mut()[index];
        // Sorted schedule: nothing past this point can be in range.
        if event.scheduled_us() - input_us >= MAX_TOLERANCE_US {
            break;
        }
        if on_input(event, input_us) {
            let judgement = Judgement {
                index,
                kind: event.kind(),
                outcome: event.outcome().unwrap_or(HitOutcome::Miss),
                offset_us: input_us - event.scheduled_us(),
            };
            schedule.advance_cursor();
            return Some(judgement);
        }
    }
    None
}

/// Sweep the schedule for events whose window has expired, judging each a
/// miss. Returns the misses in schedule order.
pub fn expire_overdue(schedule: &mut Schedule, now_us: i64) -> Vec<Judgement> {
    let mut misses = Vec::new();
    schedule.advance_cursor();
    let start = schedule.unjudged_start();
    for index in start..schedule.len() {
        let event = &mut schedule.events_mut()[index];
        // Sorted schedule: once an armed event is still in the future by
        // more than the widest window, the rest are too.
        if event.scheduled_us() - now_us > MAX_TOLERANCE_US {
            break;
        }
        if on_time_advance(event, now_us) {
            misses.push(Judgement {
                index,
                kind: event.kind(),
                outcome: HitOutcome::Miss,
                offset_us: now_us - event.scheduled_us(),
            });
        }
    }
    schedule.advance_cursor();
    misses
}
