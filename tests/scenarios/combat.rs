//! Combat scenario tests
//!
//! Tests attacks, healing, status effects, fleeing and full fights

use crate::common::{face, grunt, hero_with, session};
use dicecrawl::combat::{CombatOutcome, CombatSystem, StatusKind};
use dicecrawl::dice::{CharacterClass, DiceType, FaceCategory};
use dicecrawl::enemy::{Enemy, EnemyType};
use dicecrawl::{Character, GameRng, ScriptedRng};

/// Test: Heavy Strike at physical damage 10 deals 17
#[test]
fn test_heavy_strike_scenario() {
    let mut hero = hero_with(vec![face("Heavy Strike", 2, FaceCategory::Combat)]);
    let mut enemies = vec![grunt("Goblin", 40, 5)];
    let mut combat = CombatSystem::new(Box::new(ScriptedRng::new()));

    let result = combat.player_turn(&mut hero, &mut enemies, DiceType::Combat, 0, 0);
    assert_eq!(result.damage_dealt, 17);
    assert_eq!(enemies[0].health, 23);
}

/// Test: damage follows floor(base * multiplier) + value, crit or not
#[test]
fn test_damage_formula_across_stats() {
    for physical in [1, 7, 10, 23] {
        for (name, multiplier) in [("Heavy Blow", 1.5), ("Quick Jab", 0.8), ("Punch", 1.0)] {
            let base = (physical as f64 * multiplier).floor() as i32 + 3;

            let mut hero = hero_with(vec![face(name, 3, FaceCategory::Combat)]);
            hero.stats.physical_damage = physical;
            let mut enemies = vec![grunt("Dummy", 1000, 0)];

            let mut plain = CombatSystem::new(Box::new(ScriptedRng::new()));
            let result = plain.player_turn(&mut hero, &mut enemies, DiceType::Combat, 0, 0);
            assert_eq!(result.damage_dealt, base, "{} at {}", name, physical);

            let mut lucky = CombatSystem::new(Box::new(ScriptedRng::new().with_floats([0.0])));
            let result = lucky.player_turn(&mut hero, &mut enemies, DiceType::Combat, 0, 0);
            assert!(result.critical);
            assert_eq!(result.damage_dealt, (base as f64 * 1.5).floor() as i32);
        }
    }
}

/// Test: a forced dodge deals nothing and changes nothing
#[test]
fn test_forced_dodge() {
    let mut hero = Character::new("Hero", CharacterClass::Rogue);
    let before = hero.clone();
    let enemy = grunt("Brute", 30, 10);
    let mut combat = CombatSystem::new(Box::new(ScriptedRng::new().with_floats([0.5, 0.05])));

    let result = combat.enemy_turn(&enemy, &mut hero);
    assert!(!result.success);
    assert_eq!(result.damage_dealt, 0);
    assert_eq!(hero, before);
}

/// Test: healing never overshoots and reports the clamped amount
#[test]
fn test_healing_is_clamped() {
    for missing in [0, 5, 16, 40] {
        let mut hero = hero_with(vec![face("Minor Heal", 1, FaceCategory::Effect)]);
        hero.stats.health = hero.stats.max_health - missing;
        let mut enemies = vec![grunt("Goblin", 40, 5)];
        let mut combat = CombatSystem::new(Box::new(ScriptedRng::new()));

        let result = combat.player_turn(&mut hero, &mut enemies, DiceType::Combat, 0, 0);
        assert_eq!(result.healing_done, missing.min(16));
        assert!(hero.stats.health <= hero.stats.max_health);
    }
}

/// Test: a stun face stops the target's next attack, then wears off
#[test]
fn test_stun_skips_enemy_turn() {
    // stun on the first roll, strike on the second
    let mut fight = session(ScriptedRng::new().with_indices([0, 1]));
    let mut hero = hero_with(vec![
        face("Shield Stun", 0, FaceCategory::Effect),
        face("Strike", 1, FaceCategory::Combat),
    ]);
    fight.start(&hero, vec![grunt("Goblin", 40, 8)]);

    let report = fight.take_turn(&mut hero, DiceType::Combat, 0, 0);
    assert_eq!(report.player.status_applied, Some(StatusKind::Stunned));
    let (_, attack) = &report.enemies[0];
    assert!(!attack.success);
    assert_eq!(hero.stats.health, 100);
    assert!(report
        .status_messages
        .contains(&"Goblin: Stunned effect has worn off".to_string()));

    // next round the goblin hits again
    fight.take_turn(&mut hero, DiceType::Combat, 0, 0);
    assert_eq!(hero.stats.health, 92);
}

/// Test: poison ticks down the target over several rounds
#[test]
fn test_poison_damage_over_time() {
    let mut fight = session(ScriptedRng::new());
    let mut hero = hero_with(vec![face("Poison Dart", 0, FaceCategory::Effect)]);
    fight.start(&hero, vec![grunt("Goblin", 100, 1)]);

    for _ in 0..3 {
        fight.take_turn(&mut hero, DiceType::Combat, 0, 0);
    }
    // 3 per round, re-applied each turn
    assert_eq!(fight.enemies()[0].health, 91);
    assert_eq!(
        fight.enemies()[0].status_effects.remaining("Poisoned"),
        Some(2)
    );
}

/// Test: health never drops below zero across seeded full fights
#[test]
fn test_seeded_fights_terminate_cleanly() {
    for seed in 0..20u64 {
        let mut rng = GameRng::new(seed);
        let roster = vec![
            Enemy::for_floor(EnemyType::Goblin, 2, &mut rng),
            Enemy::for_floor(EnemyType::Ghost, 2, &mut rng),
        ];
        let mut fight = dicecrawl::combat::CombatSession::new(
            CombatSystem::new(Box::new(rng)),
            dicecrawl::EnemyAi::new(),
            Default::default(),
        );
        let mut hero = Character::new("Hero", CharacterClass::Warrior);
        fight.start(&hero, roster);

        let mut outcome = CombatOutcome::Ongoing;
        for _ in 0..200 {
            outcome = fight.take_turn(&mut hero, DiceType::Combat, 0, 0).outcome;
            assert!(hero.stats.health >= 0);
            assert!(fight.enemies().iter().all(|e| e.health >= 0));
            if outcome.is_over() {
                break;
            }
        }

        match outcome {
            CombatOutcome::Victory { gold, xp } => {
                assert!(fight.enemies().is_empty());
                assert_eq!(fight.defeated().len(), 2);
                assert_eq!(xp, 40);
                assert!(gold >= 20);
            }
            CombatOutcome::Defeat => assert_eq!(hero.stats.health, 0),
            other => panic!("seed {} ended with {:?}", seed, other),
        }
        assert!(!fight.is_active());
    }
}

/// Test: a failed escape can finish the player off
#[test]
fn test_flee_failure_can_defeat() {
    let mut fight = session(ScriptedRng::new().with_floats([0.99]).with_indices([0]));
    let mut hero = hero_with(vec![face("Strike", 1, FaceCategory::Combat)]);
    hero.stats.health = 5;
    fight.start(&hero, vec![grunt("Goblin", 40, 8)]);

    let report = fight.flee(&mut hero);
    assert_eq!(report.outcome, CombatOutcome::Defeat);
    assert_eq!(hero.stats.health, 0);
    assert!(report.player.message.ends_with("Hero is defeated!"));
}
