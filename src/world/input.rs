//! Player input
//!
//! Clicks select, send and target; menu choices upgrade, evolve and prepare
//! spells. Everything lands in the same mutation primitives the AI uses.

use serde::{Deserialize, Serialize};

use crate::core::config::PLAYER_SEND_FRACTION_DIVISOR;
use crate::core::types::{Side, UnitId, Vec2};
use crate::spells::SpellKind;
use crate::units::UnitKind;
use crate::world::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum PlayerInput {
    Click { x: f32, y: f32 },
    Upgrade { unit: UnitId },
    Evolve { unit: UnitId, into: UnitKind },
    PrepareSpell { caster: UnitId, spell: SpellKind },
}

impl GameState {
    /// Apply one input; returns whether the battlefield changed
    pub fn handle_input(&mut self, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Click { x, y } => self.click(Vec2::new(x, y)),
            PlayerInput::Upgrade { unit } => {
                self.owns(unit) && self.field.upgrade_unit(unit)
            }
            PlayerInput::Evolve { unit, into } => {
                self.owns(unit) && self.field.evolve_unit(unit, into).is_some()
            }
            PlayerInput::PrepareSpell { caster, spell } => self.prepare_spell(caster, spell),
        }
    }

    fn owns(&self, id: UnitId) -> bool {
        self.field
            .roster
            .get(id)
            .is_some_and(|u| u.side == Side::Player)
    }

    fn click(&mut self, point: Vec2) -> bool {
        if self.spells.targeting().is_some() {
            return self.click_spell_target(point);
        }

        let clicked = self.field.roster.unit_at(point);

        if let Some(wizard) = clicked {
            if self.spells.begin_targeting(wizard).is_some() {
                return false;
            }
        }

        let Some(target) = clicked else {
            self.selection.unit = None;
            return false;
        };

        match self.selection.unit {
            Some(selected) if selected != target => {
                self.selection.unit = None;
                self.send_half(selected, target)
            }
            _ => {
                self.selection.unit = self.owns(target).then_some(target);
                false
            }
        }
    }

    /// Drag-to-send: half the selected unit's health, no reserve kept
    fn send_half(&mut self, from: UnitId, to: UnitId) -> bool {
        if !self.owns(from) {
            return false;
        }
        let Some(health) = self.field.roster.get(from).map(|u| u.health) else {
            return false;
        };
        let amount = health / PLAYER_SEND_FRACTION_DIVISOR;
        amount > 0 && self.field.spawn_troop(from, to, amount)
    }

    /// Resolve the spell awaiting a target; a bad pick puts it back as ready
    fn click_spell_target(&mut self, point: Vec2) -> bool {
        let Some((caster, spell)) = self.spells.take_targeting() else {
            return false;
        };

        let target = self
            .field
            .roster
            .unit_at(point)
            .filter(|&target| target != caster);

        let cast = match target {
            Some(target) => self.field.cast_prepared_spell(caster, spell, target),
            None => false,
        };
        if !cast {
            self.spells.return_ready(caster, spell);
        }
        cast
    }
}
