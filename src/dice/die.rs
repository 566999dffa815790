//! Dice: balance model and roll resolution
//!
//! A die's balance value is the sum of its face values. A negative balance
//! makes the die UNSTABLE (it may roll twice and keep the worse face), a
//! positive one OVERLOADED. Severity scales with `|balance| / (2 * size)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use super::face::{DiceFace, Rarity};
use crate::rng::RandomSource;

/// XP granted to a die for each standard roll
pub const ROLL_XP: u32 = 10;

/// XP needed for a fresh die to reach level 2
pub const BASE_XP_TO_NEXT_LEVEL: u32 = 100;

/// Threshold growth factor applied on every level-up
pub const LEVEL_THRESHOLD_GROWTH: f64 = 1.5;

/// Effect tag attached to rolls resolved by an unstable double roll
pub const UNSTABLE_DOUBLE_ROLL: &str = "Unstable: Double Roll";

/// Which collection a die belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiceType {
    Character,
    Combat,
    Encounter,
    Special,
    Fate,
}

impl DiceType {
    /// All dice types in collection order
    pub fn all() -> &'static [DiceType] {
        &[
            DiceType::Character,
            DiceType::Combat,
            DiceType::Encounter,
            DiceType::Special,
            DiceType::Fate,
        ]
    }

    /// Stable name used at the serialization boundary
    pub fn name(&self) -> &'static str {
        match self {
            DiceType::Character => "CHARACTER",
            DiceType::Combat => "COMBAT",
            DiceType::Encounter => "ENCOUNTER",
            DiceType::Special => "SPECIAL",
            DiceType::Fate => "FATE",
        }
    }
}

impl FromStr for DiceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CHARACTER" => Ok(DiceType::Character),
            "COMBAT" => Ok(DiceType::Combat),
            "ENCOUNTER" => Ok(DiceType::Encounter),
            "SPECIAL" => Ok(DiceType::Special),
            "FATE" => Ok(DiceType::Fate),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for DiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Derived effect of a die's balance value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImbalanceEffect {
    /// Balanced (sum of values is zero)
    #[default]
    None,
    /// Negative balance - may double roll and keep the worse face
    Unstable,
    /// Positive balance
    Overloaded,
}

/// Compute `(effect, severity)` for a balance value on a die of `size` faces
pub fn imbalance_for(balance_value: i32, size: usize) -> (ImbalanceEffect, f64) {
    if balance_value == 0 {
        return (ImbalanceEffect::None, 0.0);
    }
    let severity = (balance_value.unsigned_abs() as f64 / (2 * size) as f64).min(1.0);
    if balance_value < 0 {
        (ImbalanceEffect::Unstable, severity)
    } else {
        (ImbalanceEffect::Overloaded, severity)
    }
}

/// Errors from face management and decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("{name} already has {size} faces")]
    Full { name: String, size: usize },

    #[error("face index {index} out of range (die has {len} faces)")]
    FaceIndexOutOfRange { index: usize, len: usize },

    #[error("{faces} faces do not fit on a die of size {size}")]
    TooManyFaces { faces: usize, size: usize },
}

/// Result of rolling a die
#[derive(Debug, Clone, PartialEq)]
pub struct RollOutcome {
    /// The face rolled, if any
    pub face: Option<DiceFace>,
    /// Human-readable description
    pub message: String,
    /// Imbalance effect markers (e.g. "Unstable: Double Roll")
    pub effects: Vec<String>,
}

impl RollOutcome {
    fn empty(message: String) -> Self {
        Self {
            face: None,
            message,
            effects: Vec::new(),
        }
    }
}

/// A die with an ordered set of faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiceRecord")]
pub struct Dice {
    pub name: String,
    pub dice_type: DiceType,
    size: usize,
    pub rarity: Rarity,
    pub description: String,
    faces: Vec<DiceFace>,
    level: u32,
    xp: u32,
    xp_to_next_level: u32,
    /// Turns until the die can be rolled again
    pub cooldown: u32,
    balance_value: i32,
    imbalance_effect: ImbalanceEffect,
    imbalance_severity: f64,
    /// Free-form numeric modifiers
    pub modifiers: BTreeMap<String, f64>,
}

impl Dice {
    /// Create an empty die with capacity for `size` faces
    pub fn new(name: &str, dice_type: DiceType, size: usize) -> Self {
        Self {
            name: name.to_string(),
            dice_type,
            size,
            rarity: Rarity::Common,
            description: String::new(),
            faces: Vec::new(),
            level: 1,
            xp: 0,
            xp_to_next_level: BASE_XP_TO_NEXT_LEVEL,
            cooldown: 0,
            balance_value: 0,
            imbalance_effect: ImbalanceEffect::None,
            imbalance_severity: 0.0,
            modifiers: BTreeMap::new(),
        }
    }

    /// Create a die already holding `faces`
    pub fn with_faces(
        name: &str,
        dice_type: DiceType,
        size: usize,
        faces: Vec<DiceFace>,
    ) -> Result<Self, DiceError> {
        if faces.len() > size {
            return Err(DiceError::TooManyFaces {
                faces: faces.len(),
                size,
            });
        }
        let mut die = Self::new(name, dice_type, size);
        die.faces = faces;
        die.recalculate_balance();
        Ok(die)
    }

    /// Set the rarity
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Maximum number of faces
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn faces(&self) -> &[DiceFace] {
        &self.faces
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.xp_to_next_level
    }

    /// Sum of all face values
    pub fn balance_value(&self) -> i32 {
        self.balance_value
    }

    pub fn imbalance_effect(&self) -> ImbalanceEffect {
        self.imbalance_effect
    }

    /// Normalized imbalance magnitude in `[0, 1]`
    pub fn imbalance_severity(&self) -> f64 {
        self.imbalance_severity
    }

    /// Whether the die is waiting out a cooldown
    pub fn on_cooldown(&self) -> bool {
        self.cooldown > 0
    }

    /// Whether every slot holds a face
    pub fn is_full(&self) -> bool {
        self.faces.len() >= self.size
    }

    /// Add a face if there is room
    pub fn add_face(&mut self, face: DiceFace) -> Result<(), DiceError> {
        if self.is_full() {
            return Err(DiceError::Full {
                name: self.name.clone(),
                size: self.size,
            });
        }
        self.faces.push(face);
        self.recalculate_balance();
        Ok(())
    }

    /// Remove and return the face at `index`
    pub fn remove_face(&mut self, index: usize) -> Result<DiceFace, DiceError> {
        if index >= self.faces.len() {
            return Err(DiceError::FaceIndexOutOfRange {
                index,
                len: self.faces.len(),
            });
        }
        let face = self.faces.remove(index);
        self.recalculate_balance();
        Ok(face)
    }

    /// Replace the face at `index`, returning the old one
    pub fn replace_face(&mut self, index: usize, face: DiceFace) -> Result<DiceFace, DiceError> {
        let len = self.faces.len();
        let slot = self
            .faces
            .get_mut(index)
            .ok_or(DiceError::FaceIndexOutOfRange { index, len })?;
        let old = std::mem::replace(slot, face);
        self.recalculate_balance();
        Ok(old)
    }

    fn recalculate_balance(&mut self) {
        self.balance_value = self
            .faces
            .iter()
            .fold(0i32, |sum, f| sum.saturating_add(f.value));
        let (effect, severity) = imbalance_for(self.balance_value, self.size);
        self.imbalance_effect = effect;
        self.imbalance_severity = severity;
    }

    /// Roll the die.
    ///
    /// A die on cooldown spends this roll counting down instead of producing
    /// a face. An unstable die may draw two faces and keep the lower value;
    /// only the standard path grants xp.
    pub fn roll(&mut self, rng: &mut dyn RandomSource) -> RollOutcome {
        if self.faces.is_empty() {
            return RollOutcome::empty(format!("{} has no faces!", self.name));
        }

        if self.cooldown > 0 {
            let remaining = self.cooldown;
            self.cooldown -= 1;
            return RollOutcome::empty(format!(
                "{} is on cooldown for {} more turns.",
                self.name, remaining
            ));
        }

        if self.imbalance_effect == ImbalanceEffect::Unstable
            && rng.chance(self.imbalance_severity)
        {
            let first = &self.faces[rng.below(self.faces.len())];
            let second = &self.faces[rng.below(self.faces.len())];
            let chosen = if second.value < first.value {
                second
            } else {
                first
            };
            let message = format!(
                "UNSTABLE: Rolled {} and {}, took worse result {}.",
                first.name, second.name, chosen.name
            );
            debug!(die = %self.name, face = %chosen.name, "unstable double roll");
            return RollOutcome {
                face: Some(chosen.clone()),
                message,
                effects: vec![UNSTABLE_DOUBLE_ROLL.to_string()],
            };
        }

        let face = self.faces[rng.below(self.faces.len())].clone();
        debug!(die = %self.name, face = %face.name, "rolled");
        self.add_xp(ROLL_XP);

        RollOutcome {
            face: Some(face),
            message: "Normal roll.".to_string(),
            effects: Vec::new(),
        }
    }

    /// Add xp, applying as many level-ups as the total covers.
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp_to_next_level > 0 && self.xp >= self.xp_to_next_level {
            self.level += 1;
            self.xp -= self.xp_to_next_level;
            self.xp_to_next_level =
                (self.xp_to_next_level as f64 * LEVEL_THRESHOLD_GROWTH) as u32;
            gained += 1;
        }
        if gained > 0 {
            debug!(die = %self.name, level = self.level, "die leveled up");
        }
        gained
    }
}

/// Wire shape of a die. Balance fields are ignored and rebuilt from faces.
#[derive(Deserialize)]
struct DiceRecord {
    name: String,
    dice_type: DiceType,
    size: usize,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default)]
    description: String,
    #[serde(default)]
    faces: Vec<DiceFace>,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default)]
    xp: u32,
    #[serde(default = "default_xp_to_next_level")]
    xp_to_next_level: u32,
    #[serde(default)]
    cooldown: u32,
    #[serde(default)]
    modifiers: BTreeMap<String, f64>,
}

fn default_level() -> u32 {
    1
}

fn default_xp_to_next_level() -> u32 {
    BASE_XP_TO_NEXT_LEVEL
}

impl TryFrom<DiceRecord> for Dice {
    type Error = DiceError;

    fn try_from(record: DiceRecord) -> Result<Self, Self::Error> {
        let mut die = Dice::with_faces(&record.name, record.dice_type, record.size, record.faces)?;
        die.rarity = record.rarity;
        die.description = record.description;
        die.level = record.level;
        die.xp = record.xp;
        die.xp_to_next_level = record.xp_to_next_level;
        die.cooldown = record.cooldown;
        die.modifiers = record.modifiers;
        Ok(die)
    }
}
