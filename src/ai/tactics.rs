//! Per-unit tactical choices: dispatch table, target picking, troop sizing
//!
//! Target finders scan in roster order and keep the first best match, so
//! ties always resolve to the lowest slot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::strategy::Strategy;
use crate::core::types::UnitId;
use crate::units::{Unit, UnitKind};

/// What a unit does when it is not upgrading early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    AttackWeakest,
    AttackStrategic,
    ConvertNeutral,
    /// Level up; for a Baby this means evolving
    Upgrade,
}

/// Pick `tactic` when the 0..100 roll is below `below`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRule {
    pub below: u32,
    pub tactic: Tactic,
}

impl DispatchRule {
    pub const fn new(below: u32, tactic: Tactic) -> Self {
        Self { below, tactic }
    }
}

/// Rules for Warriors and Babies under one strategy; other kinds get none
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyDispatch {
    pub warrior: Vec<DispatchRule>,
    pub baby: Vec<DispatchRule>,
}

/// Weighted random dispatch, one row per strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchTable {
    pub aggressive: StrategyDispatch,
    pub defensive: StrategyDispatch,
    pub expansive: StrategyDispatch,
    pub mixed: StrategyDispatch,
    pub adaptive: StrategyDispatch,
}

impl Default for DispatchTable {
    fn default() -> Self {
        use self::Tactic::*;

        fn rules(list: &[(u32, Tactic)]) -> Vec<DispatchRule> {
            list.iter()
                .map(|&(below, tactic)| DispatchRule::new(below, tactic))
                .collect()
        }

        Self {
            aggressive: StrategyDispatch {
                warrior: rules(&[(80, AttackWeakest), (95, AttackStrategic)]),
                baby: rules(&[(60, ConvertNeutral), (90, Upgrade)]),
            },
            defensive: StrategyDispatch {
                warrior: rules(&[(50, AttackWeakest), (70, ConvertNeutral)]),
                baby: rules(&[(40, ConvertNeutral), (80, Upgrade)]),
            },
            expansive: StrategyDispatch {
                warrior: rules(&[(80, ConvertNeutral), (95, AttackWeakest)]),
                baby: rules(&[(80, ConvertNeutral), (95, AttackWeakest)]),
            },
            mixed: StrategyDispatch {
                warrior: rules(&[(60, AttackWeakest), (85, ConvertNeutral), (100, AttackStrategic)]),
                baby: rules(&[(50, ConvertNeutral), (85, Upgrade)]),
            },
            adaptive: StrategyDispatch {
                warrior: rules(&[(70, AttackWeakest), (90, ConvertNeutral), (100, AttackStrategic)]),
                baby: rules(&[(60, ConvertNeutral), (90, Upgrade)]),
            },
        }
    }
}

impl DispatchTable {
    pub fn row(&self, strategy: Strategy) -> &StrategyDispatch {
        match strategy {
            Strategy::Aggressive => &self.aggressive,
            Strategy::Defensive => &self.defensive,
            Strategy::Expansive => &self.expansive,
            Strategy::Mixed => &self.mixed,
            Strategy::Adaptive => &self.adaptive,
        }
    }

    /// Tactic for a unit of `kind` given a 0..100 `roll`; `None` means idle
    pub fn pick(&self, strategy: Strategy, kind: UnitKind, roll: u32) -> Option<Tactic> {
        let row = self.row(strategy);
        let rules = match kind {
            UnitKind::Warrior => &row.warrior,
            UnitKind::Baby => &row.baby,
            UnitKind::Tower | UnitKind::Wizard => return None,
        };
        rules.iter().find(|rule| roll < rule.below).map(|rule| rule.tactic)
    }
}

/// Lowest-health unit; first in order on ties
pub fn find_weakest(candidates: &[(UnitId, &Unit)]) -> Option<UnitId> {
    let mut best: Option<(UnitId, i32)> = None;
    for &(id, unit) in candidates {
        if best.map_or(true, |(_, health)| unit.health < health) {
            best = Some((id, unit.health));
        }
    }
    best.map(|(id, _)| id)
}

/// Attractiveness of a unit as an attack objective
pub fn strategic_score(unit: &Unit) -> f32 {
    unit.kind().strategic_value() + (100.0 - unit.health as f32) + f32::from(unit.level) * 10.0
}

/// Highest `strategic_score`; first in order on ties
pub fn find_strategic(candidates: &[(UnitId, &Unit)]) -> Option<UnitId> {
    let mut best: Option<(UnitId, f32)> = None;
    for &(id, unit) in candidates {
        let score = strategic_score(unit);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Closest candidate to `from` by squared distance
pub fn find_nearest(from: &Unit, candidates: &[(UnitId, &Unit)]) -> Option<UnitId> {
    let mut best: Option<(UnitId, f32)> = None;
    for &(id, unit) in candidates {
        let dist = from.position.distance_squared(unit.position);
        if best.map_or(true, |(_, nearest)| dist < nearest) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Sizing bounds for AI troop sends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TroopSizing {
    pub min_send: i32,
    pub max_send: i32,
    /// Share of the sender's health that may go out at once
    pub send_fraction: f32,
}

impl Default for TroopSizing {
    fn default() -> Self {
        use crate::core::config::{TROOP_MAX_SEND, TROOP_MIN_SEND, TROOP_SEND_FRACTION};
        Self {
            min_send: TROOP_MIN_SEND,
            max_send: TROOP_MAX_SEND,
            send_fraction: TROOP_SEND_FRACTION,
        }
    }
}

impl TroopSizing {
    /// Random send amount for a unit with `health`, or 0 when too weak to send
    pub fn optimal_troop_size<R: Rng>(&self, health: i32, rng: &mut R) -> i32 {
        let ceiling = (health as f32 * self.send_fraction) as i32;
        if ceiling < self.min_send {
            return 0;
        }
        let upper = ceiling.min(self.max_send);
        if upper < self.min_send {
            return self.min_send;
        }
        rng.gen_range(self.min_send..=upper)
    }
}

/// Evolution target for a Baby under `strategy`
///
/// Falls back to the first affordable kind when the preferred one is not.
pub fn evolution_choice(strategy: Strategy, baby: &Unit) -> Option<UnitKind> {
    let preferred = match strategy {
        Strategy::Aggressive | Strategy::Expansive => UnitKind::Warrior,
        Strategy::Defensive => UnitKind::Tower,
        Strategy::Mixed | Strategy::Adaptive => UnitKind::Wizard,
    };
    if baby.can_evolve(preferred) {
        return Some(preferred);
    }
    UnitKind::EVOLUTIONS
        .into_iter()
        .find(|&kind| baby.can_evolve(kind))
}
