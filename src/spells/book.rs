//! Spell identities and per-wizard cooldown tracking

use serde::{Deserialize, Serialize};

use crate::core::config::SPELL_COOLDOWN;

/// Spell identifier (ids 0, 1, 2 on the input surface)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellKind {
    Freeze,   // Target becomes neutral
    Sickness, // Target's max health drops to zero until cured
    Convert,  // Target joins the caster's side
}

impl SpellKind {
    pub const ALL: [SpellKind; 3] = [SpellKind::Freeze, SpellKind::Sickness, SpellKind::Convert];

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(SpellKind::Freeze),
            1 => Some(SpellKind::Sickness),
            2 => Some(SpellKind::Convert),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            SpellKind::Freeze => 0,
            SpellKind::Sickness => 1,
            SpellKind::Convert => 2,
        }
    }

    /// Health paid by the caster
    pub fn cost(self) -> i32 {
        match self {
            SpellKind::Freeze => 25,
            SpellKind::Sickness => 30,
            SpellKind::Convert => 50,
        }
    }

    /// Minimum wizard level
    pub fn required_level(self) -> u8 {
        match self {
            SpellKind::Freeze => 1,
            SpellKind::Sickness => 2,
            SpellKind::Convert => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpellKind::Freeze => "Freeze",
            SpellKind::Sickness => "Sickness",
            SpellKind::Convert => "Convert",
        }
    }
}

impl std::fmt::Display for SpellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaining cooldown per spell, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellBook {
    cooldowns: [f32; 3],
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cooldown(&self, spell: SpellKind) -> f32 {
        self.cooldowns[usize::from(spell.id())]
    }

    pub fn is_off_cooldown(&self, spell: SpellKind) -> bool {
        self.cooldown(spell) <= 0.0
    }

    /// Put a spell on its full cooldown
    pub fn start_cooldown(&mut self, spell: SpellKind) {
        self.cooldowns[usize::from(spell.id())] = SPELL_COOLDOWN;
    }

    /// Count all cooldowns down, never below zero
    pub fn tick(&mut self, dt_seconds: f32) {
        for cooldown in &mut self.cooldowns {
            if *cooldown > 0.0 {
                *cooldown = (*cooldown - dt_seconds).max(0.0);
            }
        }
    }
}
