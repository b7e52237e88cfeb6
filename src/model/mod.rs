pub mod hit_event;
pub mod schedule;

pub use hit_event::{Grade, HitEvent, HitKind, HitOutcome};
pub use schedule::{Schedule, ScheduledHit};
