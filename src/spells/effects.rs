//! Spell eligibility and effect application
//!
//! Affordability is always checked before anything is mutated: a refused
//! cast leaves caster and target untouched.

use crate::core::types::Side;
use crate::spells::book::SpellKind;
use crate::units::Unit;

/// Can `caster` cast `spell` right now?
///
/// Requires a Wizard, the spell off cooldown, enough health to pay and the
/// level gate met.
pub fn can_cast(caster: &Unit, spell: SpellKind) -> bool {
    let Some(book) = caster.spell_book() else {
        return false;
    };

    book.is_off_cooldown(spell)
        && caster.health >= spell.cost()
        && caster.level >= spell.required_level()
}

/// Apply the effect of `spell`, cast by a unit of `caster_side`, to `target`
pub fn apply_effect(spell: SpellKind, caster_side: Side, target: &mut Unit) {
    match spell {
        SpellKind::Freeze => target.set_side(Side::Neutral),
        SpellKind::Sickness => {
            // Already sick: the cast still counts, it just changes nothing
            target.make_sick();
        }
        SpellKind::Convert => target.set_side(caster_side),
    }
}

/// Full immediate cast: check, pay, start cooldown, apply
///
/// Own-side targets are refused. Returns whether the cast happened.
pub fn cast_spell(caster: &mut Unit, spell: SpellKind, target: &mut Unit) -> bool {
    if !can_cast(caster, spell) || target.side == caster.side {
        return false;
    }

    caster.health -= spell.cost();
    if let Some(book) = caster.spell_book_mut() {
        book.start_cooldown(spell);
    }
    apply_effect(spell, caster.side, target);

    tracing::debug!(
        spell = spell.name(),
        caster_side = ?caster.side,
        target_kind = target.kind().name(),
        "spell cast"
    );
    true
}

/// Resolve a prepared spell: the cooldown already ran at preparation, so only
/// the health cost is paid here
pub fn pay_and_apply(caster: &mut Unit, spell: SpellKind, target: &mut Unit) -> bool {
    if caster.health < spell.cost() || target.side == caster.side {
        return false;
    }

    caster.health -= spell.cost();
    apply_effect(spell, caster.side, target);
    true
}
