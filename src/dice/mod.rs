//! Dice system
//!
//! Customizable dice built from individual faces:
//! - Faces carry a signed value, a category and behavior tags
//! - Dice derive a balance value and imbalance effect from their faces
//! - Rolling honors cooldowns and unstable double rolls
//! - Dice level up as they are rolled

mod die;
mod face;
mod set;
mod starter;

pub use die::{
    imbalance_for, Dice, DiceError, DiceType, ImbalanceEffect, RollOutcome, BASE_XP_TO_NEXT_LEVEL,
    ROLL_XP, UNSTABLE_DOUBLE_ROLL,
};
pub use face::{DiceFace, FaceCategory, FaceTag, Rarity};
pub use set::{AvailableDie, DiceSet};
pub use starter::{
    character_die, combat_die, encounter_die, enemy_dice, starter_dice, CharacterClass,
};
