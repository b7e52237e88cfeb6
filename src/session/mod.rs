pub mod actions;
pub mod session;
pub mod skip;

pub use actions::{ActionQueue, SessionAction};
pub use session::{GameplaySession, SessionSeed, SessionStatus, StateTransition};
pub use skip::SkipController;
