//! Boss strategy
//!
//! Bosses fight in phases driven by their health:
//! - Phase 1 (>= 60%): tactical play
//! - Phase 2 (30-60%): one heal per phase
//! - Phase 3 (< 30%): each ultimate die once per phase
//!
//! Every third turn a boss reaches for a SPECIAL die. State is tracked per
//! enemy id so several bosses can share one behavior instance.

use std::collections::{HashMap, HashSet};
use tracing::info;

use super::behaviors::TacticalBehavior;
use super::{no_dice, Behavior, DiceChoice};
use crate::character::Character;
use crate::dice::{AvailableDie, DiceType, FaceTag};
use crate::enemy::Enemy;
use crate::rng::RandomSource;

/// Minimum face value that counts as an ultimate ability
pub const ULTIMATE_MIN_VALUE: i32 = 4;

const PHASE2_HEAL: &str = "phase2_heal";

/// Phase tracking for one boss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossState {
    pub turn_count: u32,
    pub phase: u8,
    /// Abilities spent in the current phase
    pub used: HashSet<String>,
}

impl Default for BossState {
    fn default() -> Self {
        Self {
            turn_count: 0,
            phase: 1,
            used: HashSet::new(),
        }
    }
}

/// Phase for a health fraction
pub fn phase_for(health_fraction: f64) -> u8 {
    if health_fraction < 0.3 {
        3
    } else if health_fraction < 0.6 {
        2
    } else {
        1
    }
}

/// Multi-phase boss behavior
#[derive(Debug, Clone, Default)]
pub struct BossBehavior {
    states: HashMap<String, BossState>,
}

impl BossBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracked state for a boss, if it has acted
    pub fn state(&self, enemy_id: &str) -> Option<&BossState> {
        self.states.get(enemy_id)
    }

    fn ultimate(state: &mut BossState, dice: &[AvailableDie<'_>]) -> Option<DiceChoice> {
        for die in dice {
            let has_ultimate = die
                .dice
                .faces()
                .iter()
                .any(|f| f.has_tag(FaceTag::Ultimate) && f.value >= ULTIMATE_MIN_VALUE);
            if !has_ultimate {
                continue;
            }
            let key = format!("{}_{}_ultimate", die.dice_type, die.index);
            if state.used.insert(key) {
                return Some(DiceChoice::from(die));
            }
        }
        None
    }

    fn heal(state: &mut BossState, dice: &[AvailableDie<'_>]) -> Option<DiceChoice> {
        if state.used.contains(PHASE2_HEAL) {
            return None;
        }
        let die = dice
            .iter()
            .find(|d| d.dice.faces().iter().any(|f| f.has_tag(FaceTag::Heal)))?;
        state.used.insert(PHASE2_HEAL.to_string());
        Some(DiceChoice::from(die))
    }
}

impl Behavior for BossBehavior {
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

        let state = self.states.entry(enemy.id.clone()).or_default();
        state.turn_count += 1;

        let phase = phase_for(enemy.health_fraction());
        if phase != state.phase {
            state.phase = phase;
            state.used.clear();
            info!(enemy = %enemy.name, phase, "boss enters new phase");
        }

        let special = match state.phase {
            3 => Self::ultimate(state, dice),
            2 => Self::heal(state, dice),
            _ => None,
        };
        if let Some(choice) = special {
            return choice;
        }

        if state.turn_count % 3 == 0 {
            if let Some(die) = dice.iter().find(|d| d.dice_type == DiceType::Special) {
                return DiceChoice::from(die);
            }
        }

        TacticalBehavior.decide_action(enemy, player, dice, rng)
    }

    fn reset(&mut self) {
        self.states.clear();
    }
}
