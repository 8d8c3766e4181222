//! What happens when a troop reaches its target

use serde::{Deserialize, Serialize};

use crate::core::types::Side;
use crate::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArrivalOutcome {
    /// Same side: health added, uncapped
    Reinforced { amount: i32 },
    /// Cross side: damage taken, target held
    Damaged { damage: i32 },
    /// Cross side overkill: target switched to the attacker's side
    Captured { damage: i32, new_health: i32 },
}

/// Apply a troop of `side` carrying `amount` health to `target`
///
/// Reinforcement is not clamped to max health; the excess bleeds off in the
/// unit's passive update.
pub fn resolve_arrival(target: &mut Unit, side: Side, amount: i32) -> ArrivalOutcome {
    if target.side == side {
        target.health += amount;
        return ArrivalOutcome::Reinforced { amount };
    }

    let damage = (amount - target.defense as i32).max(1);
    target.health -= damage;

    if target.health < 0 {
        let new_health = target.health.abs();
        target.set_side(side);
        target.health = new_health;
        return ArrivalOutcome::Captured { damage, new_health };
    }

    ArrivalOutcome::Damaged { damage }
}
