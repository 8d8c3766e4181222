//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Frame counter (one per coordinator update)
pub type Tick = u64;

/// Stable handle into the unit roster
///
/// The generation distinguishes a slot's current occupant from whatever
/// lived there before, so a handle held across a replacement resolves to
/// nothing instead of to the new unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId {
    pub index: u32,
    pub generation: u32,
}

impl UnitId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Faction affiliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
    #[default]
    Neutral,
}

impl Side {
    /// The faction this side fights against (neutral has no opponent)
    pub fn opponent(self) -> Option<Side> {
        match self {
            Side::Player => Some(Side::Enemy),
            Side::Enemy => Some(Side::Player),
            Side::Neutral => None,
        }
    }

    pub fn is_neutral(self) -> bool {
        matches!(self, Side::Neutral)
    }
}

/// Convert a coordinator delta (milliseconds) to seconds
pub fn ms_to_seconds(dt_ms: f32) -> f32 {
    dt_ms / 1000.0
}
