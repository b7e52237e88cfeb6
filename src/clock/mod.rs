pub mod gameplay_clock;
pub mod source;

pub use gameplay_clock::GameplayClock;
pub use source::{AdjustableSource, SharedPosition};
