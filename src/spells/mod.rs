//! Wizard spells: Freeze, Sickness and Convert
//!
//! Each spell costs the caster health, needs a minimum caster level and puts
//! that spell on cooldown. Player casts go through a preparation queue
//! before a target is picked; AI casts resolve immediately.

pub mod book;
pub mod effects;
pub mod ready;

pub use book::{SpellBook, SpellKind};
pub use effects::{apply_effect, can_cast, cast_spell, pay_and_apply};
pub use ready::{ReadySpell, SpellQueue};
