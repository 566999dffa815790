//! Player character and stats
//!
//! Handles the character side of combat:
//! - Numeric attributes mutated by trait faces and combat
//! - Status effects ticking each round
//! - Player level progression
//! - Rolling owned dice by `(dice_type, index)`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::combat::{StatusEffects, StatusTick};
use crate::dice::{
    starter_dice, CharacterClass, DiceSet, DiceType, FaceCategory, RollOutcome,
    BASE_XP_TO_NEXT_LEVEL,
};
use crate::rng::RandomSource;

/// How many recently rolled face names a character remembers
pub const ACTIVE_FACE_HISTORY: usize = 10;

/// Dodge change per point of an agility-style trait
const DODGE_PER_POINT: f64 = 0.02;

fn default_resistances() -> BTreeMap<String, f64> {
    ["physical", "magic", "fire", "ice", "poison"]
        .iter()
        .map(|k| (k.to_string(), 0.0))
        .collect()
}

fn direction(value: i32) -> &'static str {
    if value > 0 {
        "increased"
    } else {
        "decreased"
    }
}

/// Numeric attributes of a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub physical_damage: i32,
    pub magic_damage: i32,
    pub speed: i32,
    /// Chance in `[0, 1]` to avoid an enemy attack
    pub dodge: f64,
    /// Chance in `[0, 1]` to land a critical hit
    pub crit_chance: f64,
    /// Damage multiplier on a critical hit
    pub crit_damage: f64,
    pub resistances: BTreeMap<String, f64>,
    pub status_effects: StatusEffects,
    pub passive_bonuses: BTreeMap<String, f64>,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            health: 100,
            max_health: 100,
            mana: 50,
            max_mana: 50,
            physical_damage: 10,
            magic_damage: 10,
            speed: 5,
            dodge: 0.1,
            crit_chance: 0.05,
            crit_damage: 1.5,
            resistances: default_resistances(),
            status_effects: StatusEffects::new(),
            passive_bonuses: BTreeMap::new(),
        }
    }
}

impl CharacterStats {
    /// Apply a trait face and describe the change
    pub fn apply_trait(&mut self, name: &str, value: i32) -> String {
        match name {
            "Strength" => {
                self.physical_damage += value;
                format!("Physical damage {} by {}", direction(value), value.abs())
            }
            "Intelligence" => {
                self.magic_damage += value;
                format!("Magic damage {} by {}", direction(value), value.abs())
            }
            "Vitality" => {
                let percent = value * 10;
                let change = self.percent_of_max_health(percent);
                self.max_health += change;
                self.health += change;
                format!("Max health {} by {}%", direction(value), percent.abs())
            }
            "Agility" => {
                self.speed += value;
                self.dodge += value as f64 * DODGE_PER_POINT;
                format!("Speed {} by {}", direction(value), value.abs())
            }
            "Weakness" => {
                self.physical_damage = (self.physical_damage + value).max(1);
                format!("Physical damage decreased by {}", value.abs())
            }
            "Frailty" => {
                let percent = value * 10;
                let change = self.percent_of_max_health(percent);
                self.max_health = (self.max_health + change).max(1);
                self.health = self.health.min(self.max_health);
                format!("Max health decreased by {}%", percent.abs())
            }
            "Slowness" => {
                self.speed = (self.speed + value).max(1);
                self.dodge = (self.dodge + value as f64 * DODGE_PER_POINT).max(0.0);
                format!("Speed decreased by {}", value.abs())
            }
            "Stupidity" => {
                self.magic_damage = (self.magic_damage + value).max(1);
                format!("Magic damage decreased by {}", value.abs())
            }
            _ => {
                if self.adjust_named_stat(&name.to_lowercase(), value) {
                    format!("{} {} by {}", name, direction(value), value.abs())
                } else {
                    self.passive_bonuses.insert(name.to_string(), value as f64);
                    format!("Added {} ({}) as a passive bonus", name, value)
                }
            }
        }
    }

    fn percent_of_max_health(&self, percent: i32) -> i32 {
        (self.max_health as f64 * percent as f64 / 100.0) as i32
    }

    /// Add `value` to a numeric stat by field name
    fn adjust_named_stat(&mut self, stat: &str, value: i32) -> bool {
        match stat {
            "health" => self.health += value,
            "max_health" => self.max_health += value,
            "mana" => self.mana += value,
            "max_mana" => self.max_mana += value,
            "physical_damage" => self.physical_damage += value,
            "magic_damage" => self.magic_damage += value,
            "speed" => self.speed += value,
            "dodge" => self.dodge += value as f64,
            "crit_chance" => self.crit_chance += value as f64,
            "crit_damage" => self.crit_damage += value as f64,
            _ => return false,
        }
        true
    }

    /// Apply a status effect, extending to the longer duration
    pub fn apply_status_effect(&mut self, name: &str, duration: u32) {
        self.status_effects.apply(name, duration);
    }

    /// Process status effects for one turn, applying their damage
    pub fn process_status_effects(&mut self) -> Vec<String> {
        let StatusTick { damage, messages } = self.status_effects.tick(self.max_health);
        if damage > 0 {
            self.take_damage(damage);
        }
        messages
    }

    /// Heal (cannot exceed max health). Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Subtract damage, clamping at zero. Returns true if health reached zero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = self.health.saturating_sub(amount).max(0);
        self.health == 0
    }

    /// Check if the character is still alive
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
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub stats: CharacterStats,
    #[serde(default)]
    pub dice_set: DiceSet,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    /// Most recently rolled face names, oldest first
    #[serde(default)]
    pub active_faces: Vec<String>,
    #[serde(default)]
    pub character_class: CharacterClass,
}

impl Character {
    /// Create a level 1 character with the class's starter dice
    pub fn new(name: &str, class: CharacterClass) -> Self {
        Self {
            name: name.to_string(),
            stats: CharacterStats::default(),
            dice_set: starter_dice(class),
            level: 1,
            xp: 0,
            xp_to_next_level: BASE_XP_TO_NEXT_LEVEL,
            active_faces: Vec::new(),
            character_class: class,
        }
    }

    /// Replace the character's dice
    pub fn with_dice(mut self, dice_set: DiceSet) -> Self {
        self.dice_set = dice_set;
        self
    }

    /// Add xp, leveling up as many times as the total covers.
    /// Returns one message per level gained.
    pub fn add_xp(&mut self, amount: u32) -> Vec<String> {
        self.xp += amount;
        let mut messages = Vec::new();
        while self.xp_to_next_level > 0 && self.xp >= self.xp_to_next_level {
            messages.push(self.level_up());
        }
        messages
    }

    /// Level up, improving stats
    pub fn level_up(&mut self) -> String {
        self.level += 1;
        self.xp = self.xp.saturating_sub(self.xp_to_next_level);
        self.xp_to_next_level = (self.xp_to_next_level as f64 * 1.5) as u32;

        let health_increase = self.level as i32 * 5;
        self.stats.max_health += health_increase;
        self.stats.health += health_increase;

        self.stats.max_mana += self.level as i32 * 2;
        self.stats.mana = self.stats.max_mana;

        self.stats.physical_damage += 1;
        self.stats.magic_damage += 1;

        if self.level % 3 == 0 {
            self.stats.speed += 1;
        }

        info!(character = %self.name, level = self.level, "character leveled up");
        format!(
            "Reached level {}! Health +{}, damage +1",
            self.level, health_increase
        )
    }

    /// Roll one of the character's dice.
    ///
    /// Trait faces are applied to the character's stats immediately; every
    /// rolled face is remembered in `active_faces`.
    pub fn roll_die(
        &mut self,
        dice_type: DiceType,
        index: usize,
        rng: &mut dyn RandomSource,
    ) -> RollOutcome {
        let Some(die) = self.dice_set.get_mut(dice_type, index) else {
            return RollOutcome {
                face: None,
                message: "Invalid die selection".to_string(),
                effects: Vec::new(),
            };
        };

        let mut outcome = die.roll(rng);
        let Some(face) = outcome.face.as_ref() else {
            return outcome;
        };

        if face.category == FaceCategory::Trait {
            let effect_message = self.stats.apply_trait(&face.name, face.value);
            debug!(character = %self.name, face = %face.name, "applied trait");
            outcome.message = format!("{} {}", outcome.message, effect_message);
        }

        self.active_faces.push(face.name.clone());
        if self.active_faces.len() > ACTIVE_FACE_HISTORY {
            let excess = self.active_faces.len() - ACTIVE_FACE_HISTORY;
            self.active_faces.drain(..excess);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Dice, DiceFace};
    use crate::rng::ScriptedRng;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.health, 100);
        assert_eq!(stats.crit_damage, 1.5);
        assert_eq!(stats.resistances.len(), 5);
        assert_eq!(stats.resistances["fire"], 0.0);
    }

    #[test]
    fn test_apply_named_traits() {
        let mut stats = CharacterStats::default();

        assert_eq!(stats.apply_trait("Strength", 2), "Physical damage increased by 2");
        assert_eq!(stats.physical_damage, 12);

        assert_eq!(stats.apply_trait("Vitality", 1), "Max health increased by 10%");
        assert_eq!(stats.max_health, 110);
        assert_eq!(stats.health, 110);

        stats.apply_trait("Agility", 2);
        assert_eq!(stats.speed, 7);
        assert!((stats.dodge - 0.14).abs() < 1e-9);
    }

    #[test]
    fn test_negative_traits_have_floors() {
        let mut stats = CharacterStats::default();
        stats.physical_damage = 1;
        stats.apply_trait("Weakness", -1);
        assert_eq!(stats.physical_damage, 1);

        stats.speed = 2;
        stats.dodge = 0.01;
        stats.apply_trait("Slowness", -2);
        assert_eq!(stats.speed, 1);
        assert_eq!(stats.dodge, 0.0);

        stats.apply_trait("Frailty", -1);
        assert_eq!(stats.max_health, 90);
        assert_eq!(stats.health, 90);
    }

    #[test]
    fn test_generic_and_passive_traits() {
        let mut stats = CharacterStats::default();
        assert_eq!(stats.apply_trait("Speed", 3), "Speed increased by 3");
        assert_eq!(stats.speed, 8);

        let msg = stats.apply_trait("Battle Sense", 1);
        assert_eq!(msg, "Added Battle Sense (1) as a passive bonus");
        assert_eq!(stats.passive_bonuses["Battle Sense"], 1.0);
    }

    #[test]
    fn test_heal_and_damage() {
        let mut stats = CharacterStats::default();
        assert!(!stats.take_damage(30));
        assert_eq!(stats.heal(50), 30);
        assert!(stats.take_damage(500));
        assert_eq!(stats.health, 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_status_processing_damages() {
        let mut stats = CharacterStats::default();
        stats.apply_status_effect("Burning", 1);
        let messages = stats.process_status_effects();
        assert_eq!(stats.health, 93);
        assert_eq!(messages.len(), 2);
        assert!(stats.status_effects.is_empty());
    }

    #[test]
    fn test_level_up_stats() {
        let mut hero = Character::new("Hero", CharacterClass::Warrior);
        let messages = hero.add_xp(100);
        assert_eq!(messages, vec!["Reached level 2! Health +10, damage +1".to_string()]);
        assert_eq!(hero.level, 2);
        assert_eq!(hero.xp, 0);
        assert_eq!(hero.xp_to_next_level, 150);
        assert_eq!(hero.stats.max_health, 110);
        assert_eq!(hero.stats.health, 110);
        assert_eq!(hero.stats.max_mana, 54);
        assert_eq!(hero.stats.mana, 54);
        assert_eq!(hero.stats.physical_damage, 11);
        assert_eq!(hero.stats.speed, 5);

        // 150 to level 3, which also grants speed
        hero.add_xp(150);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.stats.speed, 6);
        assert_eq!(hero.stats.max_health, 125);
    }

    #[test]
    fn test_roll_die_invalid_index() {
        let mut hero = Character::new("Hero", CharacterClass::Warrior);
        let mut rng = ScriptedRng::new();
        let outcome = hero.roll_die(DiceType::Fate, 0, &mut rng);
        assert!(outcome.face.is_none());
        assert_eq!(outcome.message, "Invalid die selection");
    }

    #[test]
    fn test_roll_trait_face_applies() {
        let mut hero = Character::new("Hero", CharacterClass::Warrior);
        let mut rng = ScriptedRng::new().with_indices([0]);
        let outcome = hero.roll_die(DiceType::Character, 0, &mut rng);
        assert_eq!(outcome.face.unwrap().name, "Strength");
        assert_eq!(outcome.message, "Normal roll. Physical damage increased by 2");
        assert_eq!(hero.stats.physical_damage, 12);
        assert_eq!(hero.active_faces, vec!["Strength".to_string()]);
    }

    #[test]
    fn test_active_face_history_bounded() {
        let mut set = DiceSet::new();
        let mut die = Dice::new("Plain", DiceType::Combat, 1);
        die.add_face(DiceFace::new("Jab", 0, FaceCategory::Combat, ""))
            .unwrap();
        set.add(die);
        let mut hero = Character::new("Hero", CharacterClass::Rogue).with_dice(set);
        let mut rng = ScriptedRng::new();
        for _ in 0..15 {
            hero.roll_die(DiceType::Combat, 0, &mut rng);
        }
        assert_eq!(hero.active_faces.len(), ACTIVE_FACE_HISTORY);
    }
}
