//! The skirmish: battlefield state, the per-frame coordinator, player input
//! and scenario loading

pub mod actions;
pub mod events;
pub mod input;
pub mod scenario;
pub mod state;

pub use actions::Action;
pub use events::{EventLog, GameEvent, GameEventType};
pub use input::PlayerInput;
pub use scenario::{load_scenario, load_scenario_from, load_scenario_or_default, Scenario, UnitSpec};
pub use state::{Battlefield, GameState, Outcome, Selection};
