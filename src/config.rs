//! Game configuration
//!
//! Layered with figment, later layers winning:
//! - Built-in defaults
//! - Optional TOML file
//! - `DICECRAWL_` environment variables (`__` separates nested keys,
//!   e.g. `DICECRAWL_COMBAT__FLEE_CHANCE=0.25`)

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::dice::CharacterClass;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DICECRAWL_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Player defaults for a new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub class: CharacterClass,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Adventurer".to_string(),
            class: CharacterClass::Warrior,
        }
    }
}

/// Combat tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Number of log entries shown as the recent log
    pub log_view: usize,
    /// Chance to escape when fleeing
    pub flee_chance: f64,
    /// Damage range taken on a failed escape
    pub flee_damage_min: i32,
    pub flee_damage_max: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            log_view: 5,
            flee_chance: 0.5,
            flee_damage_min: 5,
            flee_damage_max: 15,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub debug: bool,
    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
    pub player: PlayerConfig,
    pub combat: CombatConfig,
}

impl GameConfig {
    /// Load defaults, then the TOML file at `path` (if given), then env vars
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(GameConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: GameConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let combat = &self.combat;
        if !(0.0..=1.0).contains(&combat.flee_chance) {
            return Err(ConfigError::Invalid(format!(
                "combat.flee_chance must be within [0, 1], got {}",
                combat.flee_chance
            )));
        }
        if combat.flee_damage_min < 0 || combat.flee_damage_min > combat.flee_damage_max {
            return Err(ConfigError::Invalid(format!(
                "combat flee damage range {}..={} is invalid",
                combat.flee_damage_min, combat.flee_damage_max
            )));
        }
        if combat.log_view == 0 {
            return Err(ConfigError::Invalid(
                "combat.log_view must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
