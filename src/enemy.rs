//! Enemies
//!
//! The combat core only reads an enemy's stats and rewards and mutates its
//! health and status effects. [`Enemy::for_floor`] and [`Enemy::boss_for_floor`]
//! build encounter-ready enemies scaled by dungeon floor.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::combat::StatusEffects;
use crate::dice::{enemy_dice, DiceSet};
use crate::rng::RandomSource;

/// Kinds of enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyType {
    Goblin,
    Skeleton,
    Orc,
    Zombie,
    Ghost,
    Slime,
    Minotaur,
    Dragon,
}

impl EnemyType {
    /// All enemy types
    pub fn all() -> &'static [EnemyType] {
        &[
            EnemyType::Goblin,
            EnemyType::Skeleton,
            EnemyType::Orc,
            EnemyType::Zombie,
            EnemyType::Ghost,
            EnemyType::Slime,
            EnemyType::Minotaur,
            EnemyType::Dragon,
        ]
    }
}

impl FromStr for EnemyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "goblin" => Ok(EnemyType::Goblin),
            "skeleton" => Ok(EnemyType::Skeleton),
            "orc" => Ok(EnemyType::Orc),
            "zombie" => Ok(EnemyType::Zombie),
            "ghost" => Ok(EnemyType::Ghost),
            "slime" => Ok(EnemyType::Slime),
            "minotaur" => Ok(EnemyType::Minotaur),
            "dragon" => Ok(EnemyType::Dragon),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for EnemyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnemyType::Goblin => "Goblin",
            EnemyType::Skeleton => "Skeleton",
            EnemyType::Orc => "Orc",
            EnemyType::Zombie => "Zombie",
            EnemyType::Ghost => "Ghost",
            EnemyType::Slime => "Slime",
            EnemyType::Minotaur => "Minotaur",
            EnemyType::Dragon => "Dragon",
        };
        write!(f, "{}", s)
    }
}

/// Fresh unique enemy id
pub fn new_enemy_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// An enemy in a combat roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique per enemy, so look-alikes keep separate AI state
    #[serde(default = "new_enemy_id")]
    pub id: String,
    pub name: String,
    pub enemy_type: EnemyType,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub gold_reward: u32,
    pub xp_reward: u32,
    #[serde(default)]
    pub status_effects: StatusEffects,
    /// Dice the AI may choose from (empty for plain attackers)
    #[serde(default)]
    pub dice: DiceSet,
}

impl Enemy {
    /// Create an enemy at full health with no dice
    pub fn new(
        name: &str,
        enemy_type: EnemyType,
        level: u32,
        max_health: i32,
        damage: i32,
        gold_reward: u32,
        xp_reward: u32,
    ) -> Self {
        Self {
            id: new_enemy_id(),
            name: name.to_string(),
            enemy_type,
            level,
            health: max_health,
            max_health,
            damage,
            gold_reward,
            xp_reward,
            status_effects: StatusEffects::new(),
            dice: DiceSet::new(),
        }
    }

    /// A regular enemy scaled to `floor`, armed with its stock dice
    pub fn for_floor(enemy_type: EnemyType, floor: u32, rng: &mut dyn RandomSource) -> Self {
        let floor = floor.max(1);
        let health = 40 + floor as i32 * 15;
        let damage = 3 + floor as i32;
        let gold = rng.range_inclusive(5, 10) as u32 * floor;
        Self::new(
            &enemy_type.to_string(),
            enemy_type,
            floor,
            health,
            damage,
            gold,
            10 * floor,
        )
        .with_dice(enemy_dice(enemy_type, false))
    }

    /// The boss guarding `floor`
    pub fn boss_for_floor(floor: u32, rng: &mut dyn RandomSource) -> Self {
        let floor = floor.max(1);
        let (name, enemy_type) = match floor {
            1..=3 => ("Grubnosh the Goblin King", EnemyType::Goblin),
            4..=6 => ("Bonecrusher the Skeleton Lord", EnemyType::Skeleton),
            7..=9 => ("Grimfang the Minotaur Berserker", EnemyType::Minotaur),
            _ => ("Flamescale the Ancient Dragon", EnemyType::Dragon),
        };
        let gold = rng.range_inclusive(80, 150) as u32 * floor;
        Self::new(
            name,
            enemy_type,
            floor + 3,
            200 + floor as i32 * 30,
            10 + floor as i32 * 2,
            gold,
            floor * 50,
        )
        .with_dice(enemy_dice(enemy_type, true))
    }

    /// Give the enemy a set of dice
    pub fn with_dice(mut self, dice: DiceSet) -> Self {
        self.dice = dice;
        self
    }

    /// Check if the enemy is still alive
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Current health as a fraction of max health
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    /// Subtract damage, clamping at zero. Returns true if this defeated the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = self.health.saturating_sub(amount).max(0);
        self.health == 0
    }

    /// Heal (cannot exceed max health). Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        self.health - before
    }
}
