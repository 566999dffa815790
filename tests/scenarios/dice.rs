//! Dice scenario tests
//!
//! Balance bookkeeping and leveling driven through real rolls

use crate::common::{die, face};
use dicecrawl::dice::{Dice, DiceType, FaceCategory, ImbalanceEffect, ROLL_XP};
use dicecrawl::{GameRng, RandomSource};

/// Test: a balanced character die turns unstable after one face edit
#[test]
fn test_balanced_die_becomes_unstable() {
    let faces = [2, 1, 1, -1, -2, -1]
        .iter()
        .enumerate()
        .map(|(i, v)| face(&format!("Trait {}", i), *v, FaceCategory::Trait))
        .collect();
    let mut die = die("Soul", DiceType::Character, faces);
    assert_eq!(die.balance_value(), 0);
    assert_eq!(die.imbalance_effect(), ImbalanceEffect::None);

    die.replace_face(3, face("Curse", -3, FaceCategory::Trait))
        .expect("index in range");
    assert_eq!(die.balance_value(), -2);
    assert_eq!(die.imbalance_effect(), ImbalanceEffect::Unstable);
    assert!((die.imbalance_severity() - 0.1667).abs() < 1e-3);
}

/// Test: balance tracks the face sum through a random edit sequence
#[test]
fn test_balance_tracks_random_edits() {
    let mut rng = GameRng::new(1234);
    let mut die = Dice::new("Forge", DiceType::Special, 8);

    for step in 0..500 {
        let value = rng.range_inclusive(-5, 5);
        let new_face = face(&format!("F{}", step), value, FaceCategory::Combat);
        match rng.below(3) {
            0 => {
                let _ = die.add_face(new_face);
            }
            1 => {
                if let Some(i) = rng.pick_index(die.faces().len()) {
                    die.remove_face(i).expect("index in range");
                }
            }
            _ => {
                if let Some(i) = rng.pick_index(die.faces().len()) {
                    die.replace_face(i, new_face).expect("index in range");
                }
            }
        }

        assert!(die.faces().len() <= die.size());
        let sum: i32 = die.faces().iter().map(|f| f.value).sum();
        assert_eq!(die.balance_value(), sum);
        let (effect, severity) = dicecrawl::dice::imbalance_for(sum, die.size());
        assert_eq!(die.imbalance_effect(), effect);
        assert_eq!(die.imbalance_severity(), severity);
    }
}

/// Test: many seeded rolls on a stable die level it up predictably
#[test]
fn test_rolling_levels_die() {
    let mut rng = GameRng::new(99);
    let mut die = die(
        "Steady",
        DiceType::Combat,
        vec![
            face("Strike", 1, FaceCategory::Combat),
            face("Parry", -1, FaceCategory::Combat),
        ],
    );

    let mut last_level = die.level();
    for _ in 0..100 {
        let outcome = die.roll(&mut rng);
        assert!(outcome.face.is_some());
        assert!(die.level() == last_level || die.level() == last_level + 1);
        assert!(die.xp() < die.xp_to_next_level());
        last_level = die.level();
    }

    // 1000 xp: 100 + 150 + 225 + 337 = 812 spent over four levels
    assert_eq!(die.level(), 5);
    assert_eq!(die.xp(), 100 * ROLL_XP - 812);
}

/// Test: a fully unstable die double rolls every time and never earns xp
#[test]
fn test_fully_unstable_die_always_double_rolls() {
    let mut rng = GameRng::new(7);
    let mut die = die(
        "Cursed",
        DiceType::Fate,
        vec![
            face("Doom", -3, FaceCategory::Meta),
            face("Gloom", -1, FaceCategory::Meta),
        ],
    );
    assert_eq!(die.imbalance_severity(), 1.0);

    for _ in 0..50 {
        let outcome = die.roll(&mut rng);
        assert_eq!(outcome.effects.len(), 1);
        assert!(outcome.message.starts_with("UNSTABLE"));
    }
    assert_eq!(die.xp(), 0);
}
