pub mod config;
pub mod error;
pub mod types;

pub use error::{Result, SkirmishError};
pub use types::{Side, Tick, UnitId, Vec2};
