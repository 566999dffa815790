//! Built-in enemy strategies

use super::{no_dice, Behavior, DiceChoice};
use crate::character::Character;
use crate::dice::{AvailableDie, DiceType, FaceCategory, FaceTag};
use crate::enemy::Enemy;
use crate::rng::RandomSource;

/// Health fraction below which defensive enemies look for heals and blocks
pub const LOW_HEALTH: f64 = 0.3;
/// Health fraction below which defensive enemies stick to combat dice
pub const MODERATE_HEALTH: f64 = 0.6;
/// Health gap that makes a tactical enemy commit to attack or defense
pub const TACTICAL_MARGIN: f64 = 0.3;
/// Chance a tactical enemy reaches for an effect die in an even fight
pub const TACTICAL_EFFECT_CHANCE: f64 = 0.6;

fn first_combat_die(dice: &[AvailableDie<'_>]) -> Option<DiceChoice> {
    dice.iter()
        .find(|d| d.dice_type == DiceType::Combat)
        .map(DiceChoice::from)
}

fn random_pick(dice: &[AvailableDie<'_>], rng: &mut dyn RandomSource) -> Option<DiceChoice> {
    rng.pick_index(dice.len()).map(|i| DiceChoice::from(&dice[i]))
}

/// Uniformly random pick
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl Behavior for RandomBehavior {
    fn decide_action(
        &mut self,
        enemy: &Enemy,
        _player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice {
        random_pick(dice, rng).unwrap_or_else(|| no_dice(enemy))
    }
}

/// Prefers the combat die with the strongest attack faces
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveBehavior;

impl AggressiveBehavior {
    /// Sum of positive values of COMBAT faces tagged Attack, or None if
    /// the die has no such face
    fn attack_score(die: &AvailableDie<'_>) -> Option<i32> {
        let mut attacks = die
            .dice
            .faces()
            .iter()
            .filter(|f| f.category == FaceCategory::Combat && f.has_tag(FaceTag::Attack))
            .peekable();
        attacks.peek()?;
        Some(attacks.map(|f| f.value).filter(|v| *v > 0).sum())
    }
}

impl Behavior for AggressiveBehavior {
    fn decide_action(
        &mut self,
        enemy: &Enemy,
        _player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice {
        if dice.is_empty() {
            return no_dice(enemy);
        }

        let mut best: Option<(i32, DiceChoice)> = None;
        for die in dice.iter().filter(|d| d.dice_type == DiceType::Combat) {
            let Some(score) = Self::attack_score(die) else {
                continue;
            };
            // strictly greater keeps the first die on ties
            match best {
                Some((top, _)) if score <= top => {}
                _ => best = Some((score, DiceChoice::from(die))),
            }
        }

        best.map(|(_, choice)| choice)
            .or_else(|| first_combat_die(dice))
            .or_else(|| random_pick(dice, rng))
            .unwrap_or_else(|| no_dice(enemy))
    }
}

/// Guards itself when hurt, otherwise attacks
#[derive(Debug, Clone, Copy, Default)]
pub struct DefensiveBehavior;

impl Behavior for DefensiveBehavior {
    fn decide_action(
        &mut self,
        enemy: &Enemy,
        player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice {
        if dice.is_empty() {
            return no_dice(enemy);
        }

        let health = enemy.health_fraction();
        let pick = if health < LOW_HEALTH {
            dice.iter()
                .find(|d| {
                    d.dice.faces().iter().any(|f| {
                        f.has_tag(FaceTag::Heal)
                            || f.has_tag(FaceTag::Defense)
                            || f.has_tag(FaceTag::Block)
                    })
                })
                .map(DiceChoice::from)
        } else if health < MODERATE_HEALTH {
            first_combat_die(dice)
        } else {
            None
        };

        pick.unwrap_or_else(|| AggressiveBehavior.decide_action(enemy, player, dice, rng))
    }
}

/// Compares health with the player and adapts
#[derive(Debug, Clone, Copy, Default)]
pub struct TacticalBehavior;

impl Behavior for TacticalBehavior {
    fn decide_action(
        &mut self,
        enemy: &Enemy,
        player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice {
        if dice.is_empty() {
            return no_dice(enemy);
        }

        let ours = enemy.health_fraction();
        let theirs = player.stats.health_fraction();

        if ours > theirs + TACTICAL_MARGIN {
            return AggressiveBehavior.decide_action(enemy, player, dice, rng);
        }
        if ours < theirs - TACTICAL_MARGIN {
            return DefensiveBehavior.decide_action(enemy, player, dice, rng);
        }

        let effect_dice: Vec<DiceChoice> = dice
            .iter()
            .filter(|d| {
                d.dice
                    .faces()
                    .iter()
                    .any(|f| f.category == FaceCategory::Effect)
            })
            .map(DiceChoice::from)
            .collect();

        if !effect_dice.is_empty() && rng.chance(TACTICAL_EFFECT_CHANCE) {
            if let Some(i) = rng.pick_index(effect_dice.len()) {
                return effect_dice[i];
            }
        }

        if rng.below(2) == 0 {
            AggressiveBehavior.decide_action(enemy, player, dice, rng)
        } else {
            DefensiveBehavior.decide_action(enemy, player, dice, rng)
        }
    }
}

/// Adapts a closure into a [`Behavior`]
pub struct FnBehavior<F> {
    decide: F,
}

impl<F> FnBehavior<F>
where
    F: FnMut(&Enemy, &Character, &[AvailableDie<'_>], &mut dyn RandomSource) -> DiceChoice,
{
    pub fn new(decide: F) -> Self {
        Self { decide }
    }
}

impl<F> Behavior for FnBehavior<F>
where
    F: FnMut(&Enemy, &Character, &[AvailableDie<'_>], &mut dyn RandomSource) -> DiceChoice,
{
    fn decide_action(
        &mut self,
        enemy: &Enemy,
        player: &Character,
        dice: &[AvailableDie<'_>],
        rng: &mut dyn RandomSource,
    ) -> DiceChoice {
        (self.decide)(enemy, player, dice, rng)
    }
}
