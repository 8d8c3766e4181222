//! Player spell preparation queue
//!
//! A spell is queued when its wizard starts preparing it, becomes ready after
//! a fixed preparation time, and then waits for the player to pick a target.
//! Records whose wizard is gone or has changed side are discarded on the
//! next update.

use serde::{Deserialize, Serialize};

use crate::core::config::SPELL_PREPARATION;
use crate::core::types::UnitId;
use crate::spells::book::SpellKind;

/// A spell being prepared or waiting for a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadySpell {
    pub caster: UnitId,
    pub spell: SpellKind,
    pub prep_time: f32,
    pub is_ready: bool,
}

impl ReadySpell {
    pub fn preparing(caster: UnitId, spell: SpellKind) -> Self {
        Self {
            caster,
            spell,
            prep_time: 0.0,
            is_ready: false,
        }
    }

    pub fn ready(caster: UnitId, spell: SpellKind) -> Self {
        Self {
            caster,
            spell,
            prep_time: SPELL_PREPARATION,
            is_ready: true,
        }
    }

    /// Fraction of preparation done, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        (self.prep_time / SPELL_PREPARATION).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpellQueue {
    pub spells: Vec<ReadySpell>,
    /// Spell lifted out of the queue while the player picks a target
    targeting: Option<(UnitId, SpellKind)>,
}

impl SpellQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, caster: UnitId, spell: SpellKind) -> bool {
        self.spells
            .iter()
            .any(|s| s.caster == caster && s.spell == spell)
    }

    /// Queue a new preparation. Returns false if this wizard already has it queued.
    pub fn prepare(&mut self, caster: UnitId, spell: SpellKind) -> bool {
        if self.contains(caster, spell) || self.targeting == Some((caster, spell)) {
            return false;
        }
        self.spells.push(ReadySpell::preparing(caster, spell));
        true
    }

    /// Advance preparation and drop records whose caster fails `is_valid`
    pub fn update(&mut self, dt_seconds: f32, is_valid: impl Fn(UnitId) -> bool) {
        for spell in self.spells.iter_mut().filter(|s| !s.is_ready) {
            spell.prep_time += dt_seconds;
            if spell.prep_time >= SPELL_PREPARATION {
                spell.prep_time = SPELL_PREPARATION;
                spell.is_ready = true;
            }
        }

        self.spells.retain(|s| is_valid(s.caster));
        if self.targeting.is_some_and(|(caster, _)| !is_valid(caster)) {
            self.targeting = None;
        }
    }

    /// First ready spell held by `caster`
    pub fn ready_for(&self, caster: UnitId) -> Option<SpellKind> {
        self.spells
            .iter()
            .find(|s| s.is_ready && s.caster == caster)
            .map(|s| s.spell)
    }

    /// Lift `caster`'s ready spell out of the queue and await a target
    pub fn begin_targeting(&mut self, caster: UnitId) -> Option<SpellKind> {
        let spell = self.ready_for(caster)?;
        self.spells
            .retain(|s| !(s.caster == caster && s.spell == spell));
        self.targeting = Some((caster, spell));
        Some(spell)
    }

    pub fn targeting(&self) -> Option<(UnitId, SpellKind)> {
        self.targeting
    }

    pub fn take_targeting(&mut self) -> Option<(UnitId, SpellKind)> {
        self.targeting.take()
    }

    /// Put a spell back as ready (target selection was abandoned)
    pub fn return_ready(&mut self, caster: UnitId, spell: SpellKind) {
        if !self.contains(caster, spell) {
            self.spells.push(ReadySpell::ready(caster, spell));
        }
    }

    pub fn clear(&mut self) {
        self.spells.clear();
        self.targeting = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> UnitId {
        UnitId::new(index, 0)
    }

    #[test]
    fn test_preparation_takes_two_seconds() {
        let mut queue = SpellQueue::new();
        assert!(queue.prepare(id(1), SpellKind::Freeze));
        assert!(!queue.prepare(id(1), SpellKind::Freeze));

        queue.update(1.5, |_| true);
        assert!(queue.ready_for(id(1)).is_none());
        assert!((queue.spells[0].progress() - 0.75).abs() < 1e-6);

        queue.update(0.6, |_| true);
        assert_eq!(queue.ready_for(id(1)), Some(SpellKind::Freeze));
        assert_eq!(queue.spells[0].prep_time, SPELL_PREPARATION);
    }

    #[test]
    fn test_invalid_caster_dropped() {
        let mut queue = SpellQueue::new();
        queue.prepare(id(1), SpellKind::Freeze);
        queue.prepare(id(2), SpellKind::Sickness);

        queue.update(0.1, |caster| caster != id(1));
        assert_eq!(queue.spells.len(), 1);
        assert_eq!(queue.spells[0].caster, id(2));
    }

    #[test]
    fn test_targeting_round_trip() {
        let mut queue = SpellQueue::new();
        queue.prepare(id(4), SpellKind::Convert);
        assert!(queue.begin_targeting(id(4)).is_none());

        queue.update(2.0, |_| true);
        assert_eq!(queue.begin_targeting(id(4)), Some(SpellKind::Convert));
        assert!(queue.spells.is_empty());
        assert!(!queue.prepare(id(4), SpellKind::Convert));

        let (caster, spell) = queue.take_targeting().unwrap();
        queue.return_ready(caster, spell);
        assert_eq!(queue.ready_for(id(4)), Some(SpellKind::Convert));
    }

    #[test]
    fn test_targeting_cleared_when_caster_invalid() {
        let mut queue = SpellQueue::new();
        queue.spells.push(ReadySpell::ready(id(7), SpellKind::Freeze));
        queue.begin_targeting(id(7));
        queue.update(0.016, |_| false);
        assert!(queue.targeting().is_none());
    }
}
