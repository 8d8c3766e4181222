//! Strategy selection from side strength
//!
//! Each decision cycle classifies the battlefield from scratch. There is no
//! hysteresis: the previous strategy has no influence on the next one.

use serde::{Deserialize, Serialize};

use crate::spells::SpellKind;
use crate::units::Unit;

/// Overall stance for one decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Aggressive,
    Defensive,
    Expansive,
    Mixed,
    /// Opening stance; never chosen by `choose_strategy`
    #[default]
    Adaptive,
}

impl Strategy {
    pub fn aggression(self) -> f32 {
        match self {
            Strategy::Aggressive => 0.7,
            Strategy::Defensive => 0.3,
            Strategy::Expansive => 0.4,
            Strategy::Mixed | Strategy::Adaptive => 0.5,
        }
    }

    /// Spell a wizard reaches for first under this stance
    pub fn preferred_spell(self) -> Option<SpellKind> {
        match self {
            Strategy::Aggressive => Some(SpellKind::Sickness),
            Strategy::Defensive => Some(SpellKind::Freeze),
            Strategy::Expansive => Some(SpellKind::Convert),
            Strategy::Mixed | Strategy::Adaptive => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Defensive => "defensive",
            Strategy::Expansive => "expansive",
            Strategy::Mixed => "mixed",
            Strategy::Adaptive => "adaptive",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Weighted strength of one unit
pub fn unit_power(unit: &Unit) -> i32 {
    let base = unit.health * unit.kind().power_multiplier();
    (base as f32 * (1.0 + f32::from(unit.level) * 0.2)) as i32
}

/// Sum of `unit_power` over a side
pub fn side_power<'a>(units: impl IntoIterator<Item = &'a Unit>) -> i32 {
    units.into_iter().map(unit_power).sum()
}

/// Counts and power for the deciding side, its opponent and the neutrals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideAnalysis {
    pub own_count: usize,
    pub opponent_count: usize,
    pub neutral_count: usize,
    pub own_power: i32,
    pub opponent_power: i32,
}

/// Pick the stance for this cycle; first matching rule wins
pub fn choose_strategy(analysis: &SideAnalysis) -> Strategy {
    let SideAnalysis {
        own_count,
        opponent_count,
        neutral_count,
        own_power,
        opponent_power,
    } = *analysis;

    if opponent_count > own_count + 2 || opponent_power > own_power * 2 {
        Strategy::Defensive
    } else if neutral_count > opponent_count && neutral_count > own_count {
        Strategy::Expansive
    } else if own_count > opponent_count && own_power > opponent_power {
        Strategy::Aggressive
    } else {
        Strategy::Mixed
    }
}
