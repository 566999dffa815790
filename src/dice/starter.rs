//! Starter dice for new characters and stock dice for enemies

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use super::die::{Dice, DiceType};
use super::face::{DiceFace, FaceCategory};
use super::set::DiceSet;
use crate::enemy::EnemyType;

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    #[default]
    Warrior,
    Mage,
    Rogue,
}

impl FromStr for CharacterClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warrior" => Ok(CharacterClass::Warrior),
            "mage" => Ok(CharacterClass::Mage),
            "rogue" => Ok(CharacterClass::Rogue),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
        };
        write!(f, "{}", s)
    }
}

fn build(mut die: Dice, faces: Vec<DiceFace>) -> Dice {
    for face in faces {
        if let Err(e) = die.add_face(face) {
            warn!("Dropping starter face: {}", e);
        }
    }
    die
}

fn trait_face(name: &str, value: i32, text: &str) -> DiceFace {
    DiceFace::new(name, value, FaceCategory::Trait, text)
}

fn combat_face(name: &str, value: i32, text: &str) -> DiceFace {
    DiceFace::new(name, value, FaceCategory::Combat, text)
}

fn effect_face(name: &str, value: i32, text: &str) -> DiceFace {
    DiceFace::new(name, value, FaceCategory::Effect, text)
}

/// Character, combat and encounter dice for a new character
pub fn starter_dice(class: CharacterClass) -> DiceSet {
    let mut set = DiceSet::new();
    set.add(character_die(class));
    set.add(combat_die(class));
    set.add(encounter_die());
    set
}

/// Balanced trait die for a class
pub fn character_die(class: CharacterClass) -> Dice {
    match class {
        CharacterClass::Warrior => build(
            Dice::new("Warrior's Soul", DiceType::Character, 6)
                .with_description("A balanced character die representing a warrior's core attributes."),
            vec![
                trait_face("Strength", 2, "Increases physical damage by 2"),
                trait_face("Vitality", 1, "Increases max health by 10%"),
                trait_face("Battle Sense", 1, "Increases dodge by 5% and crit chance by 5%"),
                trait_face("Weakness", -1, "Decreases physical damage by 1"),
                trait_face("Slowness", -2, "Decreases speed by 2 and dodge by 4%"),
                trait_face("Battle Focus", -1, "Decreases magic damage by 1"),
            ],
        ),
        CharacterClass::Mage => build(
            Dice::new("Arcane Mind", DiceType::Character, 6)
                .with_description("A balanced character die representing a mage's core attributes."),
            vec![
                trait_face("Intelligence", 2, "Increases magic damage by 2"),
                trait_face("Mana Affinity", 1, "Increases max mana by 10%"),
                trait_face("Arcane Insight", 1, "Increases spell critical chance by 5%"),
                trait_face("Physical Frailty", -1, "Decreases max health by 5%"),
                trait_face("Clumsy", -2, "Decreases dodge by 8%"),
                trait_face("Magically Focused", -1, "Decreases physical damage by 1"),
            ],
        ),
        CharacterClass::Rogue => build(
            Dice::new("Shadow Step", DiceType::Character, 6)
                .with_description("A balanced character die representing a rogue's core attributes."),
            vec![
                trait_face("Agility", 2, "Increases dodge by 8% and speed by 1"),
                trait_face("Precision", 1, "Increases critical chance by 7%"),
                trait_face("Stealth", 1, "Increases dodge by 5% and crit damage by 10%"),
                trait_face("Frail Frame", -1, "Decreases max health by 5%"),
                trait_face("Impulsive", -2, "Decreases resistances by 10%"),
                trait_face("Untrained Magic", -1, "Decreases magic damage by 1"),
            ],
        ),
    }
}

/// Basic combat die for a class
pub fn combat_die(class: CharacterClass) -> Dice {
    match class {
        CharacterClass::Warrior => build(
            Dice::new("Warrior's Blade", DiceType::Combat, 6)
                .with_description("A basic combat die for warriors."),
            vec![
                combat_face("Strike", 1, "A basic attack"),
                combat_face("Heavy Strike", 2, "A powerful attack that deals extra damage"),
                combat_face("Block", -1, "Reduce incoming damage"),
                effect_face("Taunt", 0, "Force enemies to attack you"),
                effect_face("Minor Heal", 1, "Restore a small amount of health"),
                combat_face("Cleave", 1, "Attack all enemies for reduced damage"),
            ],
        ),
        CharacterClass::Mage => build(
            Dice::new("Arcane Staff", DiceType::Combat, 6)
                .with_description("A basic combat die for mages."),
            vec![
                combat_face("Magic Bolt", 1, "A basic magical attack"),
                combat_face("Fireball", 2, "A powerful area attack"),
                combat_face("Arcane Barrier", -1, "Create a barrier that reduces incoming damage"),
                effect_face("Frost Nova", 0, "Slow all enemies"),
                effect_face("Mana Surge", 1, "Restore a small amount of mana"),
                combat_face("Magic Missile", 1, "Attack a single target with multiple small hits"),
            ],
        ),
        CharacterClass::Rogue => build(
            Dice::new("Rogue's Daggers", DiceType::Combat, 6)
                .with_description("A basic combat die for rogues."),
            vec![
                combat_face("Quick Strike", 1, "A fast attack with high crit chance"),
                combat_face("Backstab", 2, "A powerful attack with very high crit chance"),
                combat_face("Dodge", -1, "Greatly increase dodge chance for one turn"),
                effect_face("Poison Blade", 0, "Apply poison to the target"),
                effect_face("Shadow Step", 1, "Increase dodge and crit chance"),
                combat_face("Fan of Knives", 1, "Attack all enemies for small damage"),
            ],
        ),
    }
}

/// Shared encounter die
pub fn encounter_die() -> Dice {
    let utility = |name: &str, text: &str| DiceFace::new(name, 1, FaceCategory::Utility, text);
    build(
        Dice::new("Adventurer's Luck", DiceType::Encounter, 4)
            .with_description("A die for handling encounters and events."),
        vec![
            utility("Perception", "Notice hidden details or traps"),
            utility("Diplomacy", "Convince or persuade others"),
            utility("Lore", "Recall useful knowledge"),
            utility("Luck", "Improve chances of favorable outcomes"),
        ],
    )
}

/// Stock dice handed to enemies so the AI has something to choose from
pub fn enemy_dice(enemy_type: EnemyType, is_boss: bool) -> DiceSet {
    let mut set = DiceSet::new();

    let combat = match enemy_type {
        EnemyType::Zombie | EnemyType::Slime => build(
            Dice::new("Shambling Die", DiceType::Combat, 4),
            vec![
                combat_face("Slam Attack", 1, "A clumsy blow"),
                combat_face("Block", -1, "Absorb the next hit"),
                effect_face("Regrowth Heal", 1, "Knit flesh back together"),
                combat_face("Grab", 0, "Hold the target in place"),
            ],
        ),
        EnemyType::Ghost => build(
            Dice::new("Spectral Die", DiceType::Combat, 4),
            vec![
                combat_face("Chill Attack", 1, "A freezing touch"),
                effect_face("Wail Stun", 0, "A piercing wail"),
                effect_face("Drain Poison", 0, "Sap the target's strength"),
                combat_face("Fade", -1, "Drift out of reach"),
            ],
        ),
        _ => build(
            Dice::new("Brute Die", DiceType::Combat, 4),
            vec![
                combat_face("Claw Attack", 2, "A vicious swipe"),
                combat_face("Bite Attack", 1, "A snapping bite"),
                combat_face("Block", -1, "Raise a guard"),
                combat_face("Snarl", -2, "Posture menacingly"),
            ],
        ),
    };
    set.add(combat);

    if is_boss || enemy_type == EnemyType::Dragon {
        set.add(build(
            Dice::new("Tyrant's Die", DiceType::Special, 4),
            vec![
                combat_face("Ultimate Devastation", 5, "A finishing blow"),
                effect_face("Major Heal", 2, "Draw on hidden reserves"),
                combat_face("Crushing Attack", 2, "A heavy strike"),
                combat_face("Roar", -3, "Gather strength"),
            ],
        ));
    }

    set
}
