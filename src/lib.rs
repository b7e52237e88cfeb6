pub mod clock;
pub mod config;
pub mod judge;
pub mod model;
pub mod score;
pub mod session;
pub mod traits;
