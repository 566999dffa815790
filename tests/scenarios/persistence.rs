//! Persistence scenario tests
//!
//! Tests keyed-map round trips of game entities

use serde_json::json;

use crate::common::{face, grunt};
use dicecrawl::codec::{self, CodecError};
use dicecrawl::combat::StatusKind;
use dicecrawl::dice::{
    starter_dice, CharacterClass, Dice, DiceType, FaceCategory, FaceTag, ImbalanceEffect,
};
use dicecrawl::{Character, ScriptedRng};

/// Test: a played character survives a round trip unchanged
#[test]
fn test_character_round_trip() {
    let mut hero = Character::new("Hero", CharacterClass::Mage);
    let mut rng = ScriptedRng::new().with_indices([0, 3, 1]);
    for _ in 0..3 {
        hero.roll_die(DiceType::Character, 0, &mut rng);
    }
    hero.stats.apply_status_effect("Burning", 2);
    hero.add_xp(130);

    let map = codec::encode(&hero).unwrap();
    assert_eq!(map["character_class"], json!("mage"));
    assert_eq!(map["stats"]["status_effects"], json!({ "Burning": 2 }));

    let restored: Character = codec::decode(map).unwrap();
    assert_eq!(restored, hero);
}

/// Test: enums are encoded by name inside nested entities
#[test]
fn test_nested_enum_names() {
    let set = starter_dice(CharacterClass::Warrior);
    let map = codec::encode(&set).unwrap();
    let combat = &map["combat_dice"][0];
    assert_eq!(combat["dice_type"], json!("COMBAT"));
    assert_eq!(combat["faces"][0]["category"], json!("COMBAT"));
    assert_eq!(combat["faces"][1]["tags"], json!(["HEAVY"]));
    assert_eq!(combat["imbalance_effect"], json!("OVERLOADED"));
}

/// Test: stored balance fields are ignored and rebuilt from the faces
#[test]
fn test_decode_rebuilds_balance() {
    let die = Dice::with_faces(
        "Edge",
        DiceType::Combat,
        3,
        vec![
            face("Slash", 2, FaceCategory::Combat),
            face("Stumble", -3, FaceCategory::Combat),
        ],
    )
    .unwrap();

    let mut map = codec::encode(&die).unwrap();
    map.insert("balance_value".to_string(), json!(99));
    map.insert("imbalance_effect".to_string(), json!("OVERLOADED"));

    let restored: Dice = codec::decode(map).unwrap();
    assert_eq!(restored.balance_value(), -1);
    assert_eq!(restored.imbalance_effect(), ImbalanceEffect::Unstable);
    assert_eq!(restored, die);
}

/// Test: a die claiming more faces than its size is rejected
#[test]
fn test_decode_rejects_overfull_die() {
    let data = json!({
        "name": "Greedy",
        "dice_type": "FATE",
        "size": 1,
        "faces": [
            { "name": "One", "value": 1, "category": "META" },
            { "name": "Two", "value": 2, "category": "META" }
        ]
    });
    let serde_json::Value::Object(map) = data else {
        unreachable!()
    };
    let err = codec::decode::<Dice>(map).unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
}

/// Test: faces authored without tags get them from their names
#[test]
fn test_untagged_faces_infer_tags() {
    let text = r#"{
        "name": "Old Blade",
        "dice_type": "COMBAT",
        "size": 2,
        "faces": [
            { "name": "Heavy Swing", "value": 2, "category": "COMBAT" },
            { "name": "Odd Heal", "value": 0, "category": "EFFECT", "tags": [] }
        ]
    }"#;
    let die: Dice = codec::from_json(text).unwrap();
    assert!(die.faces()[0].has_tag(FaceTag::Heavy));
    // explicit empty tags win over the name
    assert!(!die.faces()[1].has_tag(FaceTag::Heal));
    assert_eq!(die.level(), 1);
    assert_eq!(die.xp_to_next_level(), 100);
}

/// Test: enemies keep their status effects
#[test]
fn test_enemy_round_trip() {
    let mut enemy = grunt("Goblin", 40, 5);
    enemy.status_effects.apply_kind(StatusKind::Poisoned, 3);
    enemy.take_damage(12);

    let map = codec::encode(&enemy).unwrap();
    assert_eq!(map["enemy_type"], json!("GOBLIN"));
    let restored: dicecrawl::Enemy = codec::decode(map).unwrap();
    assert_eq!(restored, enemy);
}
