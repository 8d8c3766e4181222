//! Troops in transit: movement, tower fire and arrival
//!
//! Troops hold handles to their endpoints. A handle that no longer resolves
//! means the endpoint was replaced or removed, and the troop is dropped
//! without effect when it lands.

pub mod arrival;
pub mod tower_fire;
pub mod troop;

pub use arrival::{resolve_arrival, ArrivalOutcome};
pub use tower_fire::{age_effects, fire_towers, AttackEffect};
pub use troop::{catmull_rom, Troop};
