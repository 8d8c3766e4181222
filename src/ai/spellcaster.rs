//! Wizard spell choice and target valuation

use rand::Rng;

use crate::ai::strategy::Strategy;
use crate::core::types::UnitId;
use crate::spells::{can_cast, SpellKind};
use crate::units::{Unit, UnitKind};

/// How much casting `spell` on `target` is worth under `strategy`
pub fn spell_value(spell: SpellKind, target: &Unit, strategy: Strategy) -> f32 {
    let kind = target.kind();
    let multiplier = match (spell, kind) {
        (SpellKind::Freeze, UnitKind::Wizard) => 3.0,
        (SpellKind::Freeze, UnitKind::Tower) => 2.0,
        (SpellKind::Freeze, UnitKind::Warrior) => 1.5,
        (SpellKind::Sickness, UnitKind::Wizard) => 4.0,
        (SpellKind::Sickness, UnitKind::Warrior) if target.level > 2 => 3.0,
        (SpellKind::Sickness, UnitKind::Tower) => 2.0,
        (SpellKind::Convert, UnitKind::Wizard) => 5.0,
        (SpellKind::Convert, UnitKind::Tower) => 4.0,
        (SpellKind::Convert, UnitKind::Warrior) => 2.0,
        _ => 1.0,
    };

    let bonus = match (strategy, spell) {
        (Strategy::Aggressive, SpellKind::Sickness) => 1.5,
        (Strategy::Defensive, SpellKind::Freeze) => 1.5,
        (Strategy::Expansive, SpellKind::Convert) => 2.0,
        _ => 1.0,
    };

    target.health as f32 * multiplier * bonus
}

/// Spell `wizard` should try: the stance's favourite, else a random one,
/// falling back to the first castable spell
pub fn choose_spell<R: Rng>(wizard: &Unit, strategy: Strategy, rng: &mut R) -> Option<SpellKind> {
    let wanted = strategy
        .preferred_spell()
        .unwrap_or_else(|| SpellKind::ALL[rng.gen_range(0..SpellKind::ALL.len())]);

    if can_cast(wizard, wanted) {
        return Some(wanted);
    }
    SpellKind::ALL
        .into_iter()
        .find(|&spell| can_cast(wizard, spell))
}

/// Best target among `candidates`, if its value clears `threshold`
pub fn best_target(
    spell: SpellKind,
    candidates: &[(UnitId, &Unit)],
    strategy: Strategy,
    threshold: f32,
) -> Option<(UnitId, f32)> {
    let mut best: Option<(UnitId, f32)> = None;
    for &(id, unit) in candidates {
        let value = spell_value(spell, unit, strategy);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((id, value));
        }
    }
    best.filter(|&(_, value)| value > threshold)
}
