//! AI commander tuning loaded from TOML
//!
//! Every section has a default matching the stock skirmish AI, so a
//! profile file only needs the knobs it changes. Decision tempo and troop
//! sizing are fixed in `core::config`; a profile naming them is rejected.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::tactics::DispatchTable;
use crate::core::config::{
    AI_CAST_CHANCE_PER_FRAME, AI_CAST_THRESHOLD, AI_EARLY_EVOLVE_CHANCE,
    AI_EARLY_UPGRADE_CHANCE, AI_EARLY_UPGRADE_HEALTH_RATIO,
};
use crate::core::error::Result;

/// Opportunistic upgrades checked before the dispatch roll
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Health as a fraction of max health needed to consider upgrading
    pub health_ratio: f32,
    pub upgrade_chance: f32,
    /// Used instead of `upgrade_chance` for Babies
    pub evolve_chance: f32,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            health_ratio: AI_EARLY_UPGRADE_HEALTH_RATIO,
            upgrade_chance: AI_EARLY_UPGRADE_CHANCE,
            evolve_chance: AI_EARLY_EVOLVE_CHANCE,
        }
    }
}

/// Wizard casting behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Chance per frame that each wizard tries to cast
    pub cast_chance: f32,
    /// Minimum target value worth a cast
    pub cast_threshold: f32,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            cast_chance: AI_CAST_CHANCE_PER_FRAME,
            cast_threshold: AI_CAST_THRESHOLD,
        }
    }
}

/// Complete AI profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiProfile {
    /// Name of this profile (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub upgrades: UpgradeConfig,
    #[serde(default)]
    pub spells: SpellConfig,
    #[serde(default)]
    pub dispatch: DispatchTable,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            upgrades: UpgradeConfig::default(),
            spells: SpellConfig::default(),
            dispatch: DispatchTable::default(),
        }
    }
}

/// Load profile from `data/ai_profiles/{name}.toml`
pub fn load_profile(name: &str) -> Result<AiProfile> {
    let mut profile = load_profile_from(&profile_path(name))?;
    profile.name = name.to_string();
    Ok(profile)
}

/// Load a profile from an explicit path
pub fn load_profile_from(path: &Path) -> Result<AiProfile> {
    let contents = fs::read_to_string(path)?;
    let mut profile: AiProfile = toml::from_str(&contents)?;
    if profile.name.is_empty() {
        profile.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(profile)
}

/// Profile by name, or the stock profile if the file is missing or malformed
pub fn load_profile_or_default(name: &str) -> AiProfile {
    match load_profile(name) {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(profile = name, error = %err, "falling back to default AI profile");
            AiProfile::default()
        }
    }
}

fn profile_path(name: &str) -> PathBuf {
    PathBuf::from("data/ai_profiles").join(format!("{}.toml", name))
}
