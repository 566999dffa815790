//! Common test fixtures

#![allow(dead_code)]

use dicecrawl::combat::{CombatSession, CombatSystem};
use dicecrawl::config::CombatConfig;
use dicecrawl::dice::{CharacterClass, Dice, DiceFace, DiceSet, DiceType, FaceCategory};
use dicecrawl::enemy::{Enemy, EnemyType};
use dicecrawl::{Character, EnemyAi, ScriptedRng};

/// A face with no description
pub fn face(name: &str, value: i32, category: FaceCategory) -> DiceFace {
    DiceFace::new(name, value, category, "")
}

/// A die sized exactly to its faces
pub fn die(name: &str, dice_type: DiceType, faces: Vec<DiceFace>) -> Dice {
    let size = faces.len();
    Dice::with_faces(name, dice_type, size, faces).expect("faces fit")
}

/// A warrior whose only die is one COMBAT die holding `faces`
pub fn hero_with(faces: Vec<DiceFace>) -> Character {
    let mut set = DiceSet::new();
    set.add(die("Test Blade", DiceType::Combat, faces));
    Character::new("Hero", CharacterClass::Warrior).with_dice(set)
}

/// A diceless enemy
pub fn grunt(name: &str, health: i32, damage: i32) -> Enemy {
    Enemy::new(name, EnemyType::Goblin, 1, health, damage, 10, 25)
}

/// A session with default tuning over a scripted random source
pub fn session(rng: ScriptedRng) -> CombatSession {
    CombatSession::new(
        CombatSystem::new(Box::new(rng)),
        EnemyAi::new(),
        CombatConfig::default(),
    )
}
