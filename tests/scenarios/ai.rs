//! AI scenario tests
//!
//! Tests behavior selection, boss phases and caller-supplied strategies

use std::cell::Cell;
use std::rc::Rc;

use crate::common::{face, grunt, hero_with, session};
use dicecrawl::ai::{AiError, DiceChoice, EnemyAi, BOSS, DEFENSIVE};
use dicecrawl::dice::{enemy_dice, CharacterClass, DiceType, FaceCategory};
use dicecrawl::enemy::{Enemy, EnemyType};
use dicecrawl::{Character, ScriptedRng};

fn goblin_king(health: i32) -> Enemy {
    let mut king = Enemy::new("Grubnosh the Goblin King", EnemyType::Goblin, 4, 200, 12, 100, 50)
        .with_dice(enemy_dice(EnemyType::Goblin, true));
    king.health = health;
    king
}

/// Test: a phase-3 boss uses its ultimate once per phase
#[test]
fn test_boss_ultimate_once_per_phase() {
    let mut ai = EnemyAi::new();
    let player = Character::new("Hero", CharacterClass::Mage);
    let king = goblin_king(50);
    assert_eq!(ai.behavior_key_for(&king), BOSS);

    let available = king.dice.available();
    let mut rng = ScriptedRng::new();

    let first = ai.decide_action(&king, &player, &available, &mut rng);
    assert_eq!(first, DiceChoice::new(DiceType::Special, 0));
    let ultimate = king.dice.get(first.dice_type, first.index).unwrap();
    assert!(ultimate.faces().iter().any(|f| f.name == "Ultimate Devastation" && f.value == 5));

    // still phase 3, ultimate spent: falls back to guarding
    let second = ai.decide_action(&king, &player, &available, &mut rng);
    assert_eq!(second, DiceChoice::new(DiceType::Combat, 0));
}

/// Test: a registered closure drives an enemy through a whole session
#[test]
fn test_closure_behavior_in_session() {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();

    let mut fight = session(ScriptedRng::new());
    fight.ai_mut().register_fn("counting", move |_, _, dice, _| {
        seen.set(seen.get() + 1);
        DiceChoice::from(&dice[0])
    });
    fight
        .ai_mut()
        .set_enemy_type_behavior(EnemyType::Orc, "counting")
        .unwrap();

    let mut hero = hero_with(vec![face("Strike", 1, FaceCategory::Combat)]);
    let orc = Enemy::new("Orc", EnemyType::Orc, 1, 200, 3, 5, 5)
        .with_dice(enemy_dice(EnemyType::Orc, false));
    fight.start(&hero, vec![orc]);

    for _ in 0..3 {
        fight.take_turn(&mut hero, DiceType::Combat, 0, 0);
    }
    assert_eq!(calls.get(), 3);
}

/// Test: diceless enemies never consult the AI
#[test]
fn test_diceless_enemy_attacks_plainly() {
    let mut fight = session(ScriptedRng::new());
    fight.ai_mut().register_fn("never", |_, _, _, _| {
        panic!("diceless enemies should not ask the AI")
    });
    fight
        .ai_mut()
        .set_enemy_type_behavior(EnemyType::Goblin, "never")
        .unwrap();

    let mut hero = hero_with(vec![face("Strike", 1, FaceCategory::Combat)]);
    fight.start(&hero, vec![grunt("Goblin", 100, 6)]);
    let report = fight.take_turn(&mut hero, DiceType::Combat, 0, 0);
    assert_eq!(report.enemies[0].1.damage_dealt, 6);
}

/// Test: overrides are validated and take precedence over boss naming
#[test]
fn test_override_precedence_and_validation() {
    let mut ai = EnemyAi::new();
    let king = goblin_king(200);

    assert_eq!(
        ai.set_custom_behavior(&king.name, "sleepy"),
        Err(AiError::UnknownBehavior("sleepy".to_string()))
    );
    assert_eq!(ai.behavior_key_for(&king), BOSS);

    ai.set_custom_behavior(&king.name, DEFENSIVE).unwrap();
    assert_eq!(ai.behavior_key_for(&king), DEFENSIVE);
}
