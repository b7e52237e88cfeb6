pub mod input;
pub mod presentation;
pub mod time;

pub use input::{InputEvent, InputSource, ScriptedInput};
pub use presentation::{NullListener, SessionListener};
pub use time::{ManualTimeProvider, SystemTimeProvider, TimeProvider};
