//! Decision engine for one side of the skirmish
//!
//! Architecture: read-only context in, actions out
//! - DecisionContext gives a side's view of the roster and route cache
//! - AiCommander owns the strategy state machine and the seeded RNG
//! - AiProfile holds TOML-loaded chances and dispatch tables
//! - The caller applies returned actions through the shared primitives

pub mod commander;
pub mod context;
pub mod profile;
pub mod spellcaster;
pub mod strategy;
pub mod tactics;

pub use commander::AiCommander;
pub use context::DecisionContext;
pub use profile::{load_profile, load_profile_or_default, AiProfile};
pub use strategy::{choose_strategy, side_power, unit_power, SideAnalysis, Strategy};
pub use tactics::{DispatchTable, Tactic, TroopSizing};
