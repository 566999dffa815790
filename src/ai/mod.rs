//! Enemy AI
//!
//! Chooses which of an enemy's dice to roll each turn:
//! - Built-in strategies: random, aggressive, defensive, tactical, boss
//! - A registry owned by the combat session maps enemies to strategies
//! - Callers can register their own strategies, including plain closures

mod behaviors;
mod boss;

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

pub use behaviors::{
    AggressiveBehavior, DefensiveBehavior, FnBehavior, RandomBehavior, TacticalBehavior,
};
pub use boss::{BossBehavior, BossState};

use crate::character::Character;
use crate::dice::{AvailableDie, DiceType};
use crate::enemy::{Enemy, EnemyType};
use crate::rng::RandomSource;

pub const RANDOM: &str = "random";
pub const AGGRESSIVE: &str = "aggressive";
pub const DEFENSIVE: &str = "defensive";
pub const TACTICAL: &str = "tactical";
pub const BOSS: &str = "boss";

/// Name fragments that mark an enemy as a boss
pub const BOSS_MARKERS: &[&str] = &["Boss", "Lord", "King"];

/// Named bosses from the dungeon roster
pub const NAMED_BOSSES: &[&str] = &["Grubnosh", "Bonecrusher", "Grimfang", "Flamescale"];

/// AI registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("unknown behavior: {0}")]
    UnknownBehavior(String),
}

/// The die an enemy decided to roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceChoice {
    pub dice_type: DiceType,
    pub index: usize,
}

impl DiceChoice {
    pub fn new(dice_type: DiceType, index: usize) -> Self {
        Self { dice_type, index }
    }
}

impl Default for DiceChoice {
    fn default() -> Self {
        Self::new(DiceType::Combat, 0)
    }
}

impl From<&AvailableDie<'_>> for DiceChoice {
    fn from(die: &AvailableDie<'_>) -> Self {
        Self::new(die.dice_type, die.index)
    }
}

/// Answer for an enemy with nothing to roll
pub(crate) fn no_dice(enemy: &Enemy) -> DiceChoice {
    warn!(enemy = %enemy.name, "enemy has no available dice");
    DiceChoice::default()
}

/// A strategy for picking an enemy's die
pub trait Behavior {
    /// Pick one of `dice` (every die not on cooldown).
    ///
    /// Given an empty list, implementations log a warning and return
    /// `(COMBAT, 0)`.
    fn decide_action(
        &mut self,
        enemy: &Enemy,
        player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice;

    /// Forget any per-fight state
    fn reset(&mut self) {}
}

/// Registry of behaviors and the rules for assigning them to enemies
pub struct EnemyAi {
    behaviors: HashMap<String, Box<dyn Behavior>>,
    type_defaults: HashMap<EnemyType, String>,
    name_overrides: HashMap<String, String>,
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyAi {
    /// Create a registry with the built-in behaviors and type defaults
    pub fn new() -> Self {
        let mut ai = Self {
            behaviors: HashMap::new(),
            type_defaults: HashMap::new(),
            name_overrides: HashMap::new(),
        };
        ai.register_builtin_behaviors();
        ai.type_defaults = Self::builtin_type_defaults();
        ai
    }

    fn register_builtin_behaviors(&mut self) {
        self.register_behavior(RANDOM, RandomBehavior);
        self.register_behavior(AGGRESSIVE, AggressiveBehavior);
        self.register_behavior(DEFENSIVE, DefensiveBehavior);
        self.register_behavior(TACTICAL, TacticalBehavior);
        self.register_behavior(BOSS, BossBehavior::new());
    }

    /// Default behavior key per enemy type
    pub fn builtin_type_defaults() -> HashMap<EnemyType, String> {
        [
            (EnemyType::Goblin, AGGRESSIVE),
            (EnemyType::Skeleton, RANDOM),
            (EnemyType::Orc, AGGRESSIVE),
            (EnemyType::Zombie, DEFENSIVE),
            (EnemyType::Ghost, TACTICAL),
            (EnemyType::Slime, DEFENSIVE),
            (EnemyType::Minotaur, AGGRESSIVE),
            (EnemyType::Dragon, BOSS),
        ]
        .into_iter()
        .map(|(t, k)| (t, k.to_string()))
        .collect()
    }

    /// Register (or replace) a behavior under `key`
    pub fn register_behavior(&mut self, key: &str, behavior: impl Behavior + 'static) {
        self.behaviors.insert(key.to_string(), Box::new(behavior));
    }

    /// Register a closure as a behavior
    pub fn register_fn<F>(&mut self, key: &str, decide: F)
    where
        F: FnMut(&Enemy, &Character, &[AvailableDie<'_>], &mut dyn RandomSource) -> DiceChoice
            + 'static,
    {
        self.register_behavior(key, FnBehavior::new(decide));
    }

    /// Whether a behavior is registered under `key`
    pub fn has_behavior(&self, key: &str) -> bool {
        self.behaviors.contains_key(key)
    }

    fn check_key(&self, key: &str) -> Result<(), AiError> {
        if self.has_behavior(key) {
            Ok(())
        } else {
            warn!(key, "invalid behavior key");
            Err(AiError::UnknownBehavior(key.to_string()))
        }
    }

    /// Pin a specific enemy (by name) to a behavior
    pub fn set_custom_behavior(&mut self, enemy_name: &str, key: &str) -> Result<(), AiError> {
        self.check_key(key)?;
        self.name_overrides
            .insert(enemy_name.to_string(), key.to_string());
        Ok(())
    }

    /// Change the default behavior of an enemy type
    pub fn set_enemy_type_behavior(
        &mut self,
        enemy_type: EnemyType,
        key: &str,
    ) -> Result<(), AiError> {
        self.check_key(key)?;
        self.type_defaults.insert(enemy_type, key.to_string());
        Ok(())
    }

    /// Replace the whole type table. Nothing changes if any key is unknown.
    pub fn set_type_defaults(
        &mut self,
        defaults: HashMap<EnemyType, String>,
    ) -> Result<(), AiError> {
        for key in defaults.values() {
            self.check_key(key)?;
        }
        self.type_defaults = defaults;
        Ok(())
    }

    /// Replace the whole name override table. Nothing changes if any key is unknown.
    pub fn set_name_overrides(
        &mut self,
        overrides: HashMap<String, String>,
    ) -> Result<(), AiError> {
        for key in overrides.values() {
            self.check_key(key)?;
        }
        self.name_overrides = overrides;
        Ok(())
    }

    /// Whether an enemy's name marks it as a boss
    pub fn is_boss_name(name: &str) -> bool {
        BOSS_MARKERS
            .iter()
            .chain(NAMED_BOSSES.iter())
            .any(|marker| name.contains(marker))
    }

    /// Behavior key used for an enemy: name override, then boss naming,
    /// then the type default, then random
    pub fn behavior_key_for(&self, enemy: &Enemy) -> String {
        if let Some(key) = self.name_overrides.get(&enemy.name) {
            return key.clone();
        }
        if Self::is_boss_name(&enemy.name) {
            return BOSS.to_string();
        }
        self.type_defaults
            .get(&enemy.enemy_type)
            .cloned()
            .unwrap_or_else(|| RANDOM.to_string())
    }

    /// Decide which die an enemy rolls this turn
    /// Clear per-fight state in every registered behavior
    pub fn reset_state(&mut self) {
        for behavior in self.behaviors.values_mut() {
            behavior.reset();
        }
    }

    pub fn decide_action(
        &mut self,
        enemy: &Enemy,
        player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice {
        if dice.is_empty() {
            return no_dice(enemy);
        }

        let mut key = self.behavior_key_for(enemy);
        if !self.behaviors.contains_key(&key) {
            warn!(key = %key, enemy = %enemy.name, "behavior missing, using random");
            key = RANDOM.to_string();
        }

        let choice = match self.behaviors.get_mut(&key) {
            Some(behavior) => behavior.decide_action(enemy, player, dice, rng),
            None => RandomBehavior.decide_action(enemy, player, dice, rng),
        };
        debug!(
            enemy = %enemy.name,
            behavior = %key,
            dice_type = %choice.dice_type,
            index = choice.index,
            "enemy chose die"
        );
        choice
    }
}
