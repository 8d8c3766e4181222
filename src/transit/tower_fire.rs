//! Tower shots at passing troops

use serde::{Deserialize, Serialize};

use crate::core::config::{ATTACK_EFFECT_DURATION, TOWER_ATTACK_RADIUS, TOWER_DAMAGE};
use crate::core::types::{Side, UnitId, Vec2};
use crate::transit::troop::Troop;
use crate::units::{Role, Roster};

/// A shot in flight from a tower to a troop, kept for replay and display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackEffect {
    pub tower: UnitId,
    pub side: Side,
    pub start: Vec2,
    pub end: Vec2,
    pub duration: f32,
    pub elapsed: f32,
}

impl AttackEffect {
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current projectile position, lerped from tower to impact point
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, (self.elapsed / self.duration).min(1.0))
    }
}

/// Let every tower whose timer has run out shoot the closest hostile troop
///
/// A ready tower resets its timer whether or not anything is in range.
/// Returns the number of shots fired.
pub fn fire_towers(
    roster: &mut Roster,
    troops: &mut [Troop],
    effects: &mut Vec<AttackEffect>,
) -> usize {
    let mut shots = 0;

    for (tower_id, unit) in roster.iter_mut() {
        let Role::Tower {
            attack_timer,
            attack_interval,
        } = &mut unit.role
        else {
            continue;
        };
        if *attack_timer < *attack_interval {
            continue;
        }
        *attack_timer = 0.0;

        let origin = unit.position;
        let tower_side = unit.side;

        let closest = troops
            .iter_mut()
            .filter(|t| t.is_active() && t.side != tower_side)
            .map(|t| (t.position.distance(origin), t))
            .filter(|(dist, _)| *dist < TOWER_ATTACK_RADIUS)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        if let Some((_, troop)) = closest {
            troop.reduce_health(TOWER_DAMAGE);
            effects.push(AttackEffect {
                tower: tower_id,
                side: tower_side,
                start: origin,
                end: troop.position,
                duration: ATTACK_EFFECT_DURATION,
                elapsed: 0.0,
            });
            shots += 1;
        }
    }

    shots
}

/// Advance every effect and drop the finished ones
pub fn age_effects(effects: &mut Vec<AttackEffect>, dt_seconds: f32) {
    for effect in effects.iter_mut() {
        effect.elapsed += dt_seconds;
    }
    effects.retain(|e| !e.is_finished());
}
