//! Battle units: Baby, Warrior, Tower, Wizard
//!
//! Kinds form a closed set (`UnitKind`); kind-specific state lives in
//! `Role`. The `Roster` owns every unit and hands out generational handles.

pub mod kind;
pub mod roster;
pub mod unit;

pub use kind::{KindStats, UnitKind, UpgradeStep};
pub use roster::Roster;
pub use unit::{Role, Unit};
