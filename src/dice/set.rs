//! Dice collections grouped by type

use serde::{Deserialize, Serialize};

use super::die::{Dice, DiceType};

/// A die that can be rolled this turn, addressed by `(dice_type, index)`
#[derive(Debug, Clone, Copy)]
pub struct AvailableDie<'a> {
    pub dice_type: DiceType,
    pub index: usize,
    pub dice: &'a Dice,
}

/// All dice owned by a character or enemy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiceSet {
    #[serde(default)]
    pub character_dice: Vec<Dice>,
    #[serde(default)]
    pub combat_dice: Vec<Dice>,
    #[serde(default)]
    pub encounter_dice: Vec<Dice>,
    #[serde(default)]
    pub special_dice: Vec<Dice>,
    #[serde(default)]
    pub fate_dice: Vec<Dice>,
}

impl DiceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a die to the collection matching its type
    pub fn add(&mut self, dice: Dice) {
        self.list_mut(dice.dice_type).push(dice);
    }

    /// Dice of one type
    pub fn list(&self, dice_type: DiceType) -> &[Dice] {
        match dice_type {
            DiceType::Character => &self.character_dice,
            DiceType::Combat => &self.combat_dice,
            DiceType::Encounter => &self.encounter_dice,
            DiceType::Special => &self.special_dice,
            DiceType::Fate => &self.fate_dice,
        }
    }

    fn list_mut(&mut self, dice_type: DiceType) -> &mut Vec<Dice> {
        match dice_type {
            DiceType::Character => &mut self.character_dice,
            DiceType::Combat => &mut self.combat_dice,
            DiceType::Encounter => &mut self.encounter_dice,
            DiceType::Special => &mut self.special_dice,
            DiceType::Fate => &mut self.fate_dice,
        }
    }

    /// Look up a die by type and index
    pub fn get(&self, dice_type: DiceType, index: usize) -> Option<&Dice> {
        self.list(dice_type).get(index)
    }

    /// Look up a die mutably by type and index
    pub fn get_mut(&mut self, dice_type: DiceType, index: usize) -> Option<&mut Dice> {
        self.list_mut(dice_type).get_mut(index)
    }

    /// Total number of dice
    pub fn len(&self) -> usize {
        DiceType::all().iter().map(|t| self.list(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every die not on cooldown, in type order then index order
    pub fn available(&self) -> Vec<AvailableDie<'_>> {
        DiceType::all()
            .iter()
            .flat_map(|dice_type| {
                self.list(*dice_type)
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| !d.on_cooldown())
                    .map(move |(index, dice)| AvailableDie {
                        dice_type: *dice_type,
                        index,
                        dice,
                    })
            })
            .collect()
    }
}
