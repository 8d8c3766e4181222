//! Starting layouts loaded from TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::AiProfile;
use crate::core::config::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, Vec2};
use crate::units::{Unit, UnitKind};
use crate::world::state::GameState;

/// One unit placed at the start of a skirmish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub kind: UnitKind,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    #[serde(default)]
    pub side: Side,
}

impl UnitSpec {
    pub fn new(kind: UnitKind, x: f32, y: f32, health: i32, side: Side) -> Self {
        Self {
            kind,
            x,
            y,
            health,
            side,
        }
    }

    fn build(&self) -> Unit {
        Unit::new(self.kind, Vec2::new(self.x, self.y), self.health, self.side)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub units: Vec<UnitSpec>,
}

impl Scenario {
    /// Stock layout used when no scenario file can be read
    pub fn opening() -> Self {
        use Side::*;
        use UnitKind::*;

        let units = vec![
            UnitSpec::new(Warrior, 3.5, 3.0, 200, Player),
            UnitSpec::new(Baby, 1.5, 3.5, 10, Neutral),
            UnitSpec::new(Baby, 3.5, 1.0, 10, Neutral),
            UnitSpec::new(Warrior, 1.5, 1.5, 10, Neutral),
            UnitSpec::new(Tower, 10.0, 2.5, 10, Neutral),
            UnitSpec::new(Tower, 6.0, 5.5, 10, Neutral),
            UnitSpec::new(Warrior, 12.5, 5.0, 10, Enemy),
            UnitSpec::new(Baby, 14.5, 4.5, 10, Neutral),
            UnitSpec::new(Baby, 12.5, 7.0, 10, Neutral),
            UnitSpec::new(Warrior, 14.5, 6.5, 10, Neutral),
        ];
        Self {
            name: "opening".to_string(),
            description: "A lone warrior faces a weak mirror across two neutral towers"
                .to_string(),
            units,
        }
    }

    /// Reject layouts the simulation cannot start from
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| {
            Err(SkirmishError::InvalidScenario(format!("{}: {}", self.name, reason)))
        };

        if !self.units.iter().any(|u| u.side == Side::Player) {
            return invalid("no player units".to_string());
        }
        for (i, unit) in self.units.iter().enumerate() {
            if unit.health < 0 {
                return invalid(format!("unit {i} has negative health {}", unit.health));
            }
            if !(0.0..=ARENA_WIDTH).contains(&unit.x) || !(0.0..=ARENA_HEIGHT).contains(&unit.y) {
                return invalid(format!("unit {i} at ({}, {}) is off the arena", unit.x, unit.y));
            }
        }
        Ok(())
    }
}

/// Load a scenario by name from `data/scenarios/`
pub fn load_scenario(name: &str) -> Result<Scenario> {
    load_scenario_from(&scenario_path(name))
}

/// Load and validate a scenario from an explicit path
pub fn load_scenario_from(path: &Path) -> Result<Scenario> {
    let contents = fs::read_to_string(path)?;
    let scenario: Scenario = toml::from_str(&contents)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Scenario by name, or the stock opening if it cannot be loaded
pub fn load_scenario_or_default(name: &str) -> Scenario {
    match load_scenario(name) {
        Ok(scenario) => scenario,
        Err(err) => {
            tracing::warn!(scenario = name, error = %err, "falling back to the opening scenario");
            Scenario::opening()
        }
    }
}

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from("data/scenarios").join(format!("{}.toml", name))
}

impl GameState {
    /// Fresh simulation laid out as `scenario`, every pair of units linked
    pub fn from_scenario(scenario: &Scenario, enemy: AiProfile, seed: u64) -> Result<Self> {
        scenario.validate()?;

        let mut state = GameState::with_profile(enemy, seed);
        for spec in &scenario.units {
            state.field.roster.insert(spec.build());
        }
        state.field.connect_all();

        tracing::info!(
            scenario = %scenario.name,
            units = state.field.roster.len(),
            routes = state.field.graph.route_count(),
            "scenario loaded"
        );
        Ok(state)
    }
}
