//! Unit kinds and their default properties
//!
//! The set of kinds is closed: everything kind-specific is a `match` here,
//! so adding a kind is a compile error everywhere it matters.

use serde::{Deserialize, Serialize};

/// Type of battle unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Baby,    // Unevolved, can become any of the others
    Warrior, // Heals fast, sends troops
    Tower,   // Stationary, shoots passing troops
    Wizard,  // Casts spells
}

/// Starting stats for a freshly created unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindStats {
    pub size: f32,
    pub max_health: i32,
    pub healing_speed: f32,
    pub attacking_speed: i32,
    pub defense: f32,
    pub level: u8,
}

/// What one level-up costs and grants
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpgradeStep {
    pub cost: i32,
    pub max_health_gain: i32,
    pub healing_gain: f32,
    pub defense_gain: f32,
    pub attack_speed_gain: i32,
    /// Shortens the tower attack interval
    pub interval_reduction: f32,
}

impl UnitKind {
    /// Kinds a Baby may evolve into, cheapest first
    pub const EVOLUTIONS: [UnitKind; 3] = [UnitKind::Warrior, UnitKind::Tower, UnitKind::Wizard];

    pub fn base_stats(self) -> KindStats {
        match self {
            UnitKind::Baby => KindStats {
                size: 0.4,
                max_health: 10,
                healing_speed: 0.3,
                attacking_speed: 50,
                defense: 1.0,
                level: 0,
            },
            UnitKind::Warrior => KindStats {
                size: 0.5,
                max_health: 100,
                healing_speed: 10.0,
                attacking_speed: 50,
                defense: 1.0,
                level: 1,
            },
            UnitKind::Tower => KindStats {
                size: 1.0,
                max_health: 20,
                healing_speed: 0.0,
                attacking_speed: 30,
                defense: 2.0,
                level: 1,
            },
            UnitKind::Wizard => KindStats {
                size: 1.2,
                max_health: 50,
                healing_speed: 0.0,
                attacking_speed: 75,
                defense: 1.0,
                level: 1,
            },
        }
    }

    /// Highest level this kind can reach through upgrades
    pub fn max_level(self) -> u8 {
        match self {
            UnitKind::Baby => 0,
            UnitKind::Warrior | UnitKind::Tower => 5,
            UnitKind::Wizard => 3,
        }
    }

    /// The upgrade taking a unit of this kind from `level` to `level + 1`
    pub fn upgrade_step(self, level: u8) -> Option<UpgradeStep> {
        if level >= self.max_level() {
            return None;
        }

        match (self, level) {
            (UnitKind::Warrior, 1..=4) => Some(UpgradeStep {
                cost: [5, 10, 20, 30][usize::from(level - 1)],
                max_health_gain: 10,
                healing_gain: 0.4,
                ..UpgradeStep::default()
            }),
            (UnitKind::Tower, 1..=4) => Some(UpgradeStep {
                cost: [10, 15, 20, 25][usize::from(level - 1)],
                max_health_gain: 20,
                defense_gain: 0.5,
                interval_reduction: crate::core::config::TOWER_INTERVAL_STEP,
                ..UpgradeStep::default()
            }),
            (UnitKind::Wizard, 1) => Some(UpgradeStep {
                cost: 15,
                max_health_gain: 50,
                attack_speed_gain: 35,
                ..UpgradeStep::default()
            }),
            (UnitKind::Wizard, 2) => Some(UpgradeStep {
                cost: 20,
                max_health_gain: 50,
                attack_speed_gain: 40,
                ..UpgradeStep::default()
            }),
            _ => None,
        }
    }

    /// Health a Baby pays to evolve into this kind
    pub fn evolution_cost(self) -> Option<i32> {
        match self {
            UnitKind::Baby => None,
            UnitKind::Warrior => Some(5),
            UnitKind::Tower | UnitKind::Wizard => Some(10),
        }
    }

    /// Weight of this kind in side-strength analysis
    pub fn power_multiplier(self) -> i32 {
        match self {
            UnitKind::Wizard => 3,
            UnitKind::Tower | UnitKind::Warrior => 2,
            UnitKind::Baby => 1,
        }
    }

    /// Base attractiveness as an attack objective
    pub fn strategic_value(self) -> f32 {
        match self {
            UnitKind::Wizard => 100.0,
            UnitKind::Tower => 80.0,
            UnitKind::Warrior => 60.0,
            UnitKind::Baby => 40.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitKind::Baby => "Baby",
            UnitKind::Warrior => "Warrior",
            UnitKind::Tower => "Tower",
            UnitKind::Wizard => "Wizard",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
