//! Battle unit state and its per-frame passive rules
//!
//! Health is an integer pool that doubles as ammunition: units spend it on
//! troops, upgrades and spells. Healing, sickness drain and overflow decay
//! all run off one per-second accumulator.

use serde::{Deserialize, Serialize};

use crate::core::config::{
    OVERFLOW_DECAY_PER_SECOND, SICKNESS_DRAIN_PER_SECOND, TOWER_ATTACK_INTERVAL_BASE,
    UNIT_TIMER_START,
};
use crate::core::types::{Side, Vec2};
use crate::spells::SpellBook;
use crate::units::kind::UnitKind;

/// Kind tag plus the state only that kind carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Baby,
    Warrior,
    Tower {
        attack_timer: f32,
        attack_interval: f32,
    },
    Wizard {
        spells: SpellBook,
    },
}

impl Role {
    fn for_kind(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Baby => Role::Baby,
            UnitKind::Warrior => Role::Warrior,
            UnitKind::Tower => Role::Tower {
                attack_timer: 0.0,
                attack_interval: TOWER_ATTACK_INTERVAL_BASE,
            },
            UnitKind::Wizard => Role::Wizard {
                spells: SpellBook::new(),
            },
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            Role::Baby => UnitKind::Baby,
            Role::Warrior => UnitKind::Warrior,
            Role::Tower { .. } => UnitKind::Tower,
            Role::Wizard { .. } => UnitKind::Wizard,
        }
    }
}

/// A unit on the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub position: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub level: u8,
    pub side: Side,
    pub size: f32, // Collision radius
    pub healing_speed: f32,
    pub attacking_speed: i32,
    pub defense: f32,
    pub is_sick: bool,
    /// Max health to restore when sickness is cured
    pub original_max_health: i32,
    pub role: Role,
    timer: f32,
}

impl Unit {
    pub fn new(kind: UnitKind, position: Vec2, health: i32, side: Side) -> Self {
        let stats = kind.base_stats();
        Self {
            position,
            health,
            max_health: stats.max_health,
            level: stats.level,
            side,
            size: stats.size,
            healing_speed: stats.healing_speed,
            attacking_speed: stats.attacking_speed,
            defense: stats.defense,
            is_sick: false,
            original_max_health: stats.max_health,
            role: Role::for_kind(kind),
            timer: UNIT_TIMER_START,
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.role.kind()
    }

    pub fn is_kind(&self, kind: UnitKind) -> bool {
        self.kind() == kind
    }

    /// Point-in-circle hit test
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.size * self.size
    }

    /// Advance passive state by `dt_seconds`
    pub fn update(&mut self, dt_seconds: f32) {
        self.update_health(dt_seconds);

        match &mut self.role {
            Role::Tower { attack_timer, .. } => *attack_timer += dt_seconds,
            Role::Wizard { spells } => spells.tick(dt_seconds),
            Role::Baby | Role::Warrior => {}
        }
    }

    fn update_health(&mut self, dt_seconds: f32) {
        let active = !self.side.is_neutral();

        if self.is_sick && active {
            self.timer += dt_seconds;
            if self.timer >= 1.0 {
                self.health = (self.health - SICKNESS_DRAIN_PER_SECOND).max(0);
                self.timer -= 1.0;
            }
        } else if active && self.health < self.max_health && self.healing_speed > 0.0 {
            self.timer += dt_seconds;
            let hp_to_add = (self.healing_speed * self.timer) as i32;
            if hp_to_add > 0 {
                self.health += hp_to_add;
                self.timer -= hp_to_add as f32 / self.healing_speed;

                if self.health > self.max_health {
                    self.health = self.max_health;
                    self.timer = 0.0;
                }
            }
        }

        // Reinforcements may push health past the cap; bleed it back off
        if self.health > self.max_health && !self.is_sick {
            self.timer += dt_seconds;
            if self.timer >= 1.0 {
                self.health -= OVERFLOW_DECAY_PER_SECOND;
                self.timer -= 1.0;
            }
        }
    }

    /// Change allegiance; turning neutral cures sickness
    pub fn set_side(&mut self, side: Side) {
        self.side = side;
        if self.is_sick && side.is_neutral() {
            self.cure();
        }
    }

    /// Returns false if the unit was already sick
    pub fn make_sick(&mut self) -> bool {
        if self.is_sick {
            return false;
        }
        self.is_sick = true;
        self.original_max_health = self.max_health;
        self.max_health = 0;
        true
    }

    pub fn cure(&mut self) {
        if self.is_sick {
            self.is_sick = false;
            self.max_health = self.original_max_health;
        }
    }

    /// Health price of the next level, if there is one
    pub fn upgrade_cost(&self) -> Option<i32> {
        self.kind().upgrade_step(self.level).map(|step| step.cost)
    }

    pub fn can_upgrade(&self) -> bool {
        self.upgrade_cost()
            .is_some_and(|cost| self.health >= cost)
    }

    /// Pay for and apply the next level. Returns false if unaffordable or maxed.
    pub fn perform_upgrade(&mut self) -> bool {
        let Some(step) = self.kind().upgrade_step(self.level) else {
            return false;
        };
        if self.health < step.cost {
            return false;
        }

        self.health -= step.cost;
        if self.is_sick {
            self.original_max_health += step.max_health_gain;
        } else {
            self.max_health += step.max_health_gain;
        }
        self.healing_speed += step.healing_gain;
        self.defense += step.defense_gain;
        self.attacking_speed += step.attack_speed_gain;
        if let Role::Tower {
            attack_interval, ..
        } = &mut self.role
        {
            *attack_interval -= step.interval_reduction;
        }
        self.level += 1;
        true
    }

    /// Whether a Baby has the health to become `into`
    pub fn can_evolve(&self, into: UnitKind) -> bool {
        self.is_kind(UnitKind::Baby)
            && into
                .evolution_cost()
                .is_some_and(|cost| self.health >= cost)
    }

    /// Build the unit this Baby would become, keeping position, side and leftover health
    pub fn evolved(&self, into: UnitKind) -> Option<Unit> {
        if !self.can_evolve(into) {
            return None;
        }
        let cost = into.evolution_cost()?;
        Some(Unit::new(into, self.position, self.health - cost, self.side))
    }

    /// Spell cooldowns, for wizards
    pub fn spell_book(&self) -> Option<&SpellBook> {
        match &self.role {
            Role::Wizard { spells } => Some(spells),
            _ => None,
        }
    }

    pub fn spell_book_mut(&mut self) -> Option<&mut SpellBook> {
        match &mut self.role {
            Role::Wizard { spells } => Some(spells),
            _ => None,
        }
    }

    /// Tower attack interval, for towers
    pub fn attack_interval(&self) -> Option<f32> {
        match self.role {
            Role::Tower {
                attack_interval, ..
            } => Some(attack_interval),
            _ => None,
        }
    }
}
