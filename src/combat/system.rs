//! Turn resolution
//!
//! Resolves one side of a combat turn at a time:
//! - Player rolls a die and the face is applied to a target
//! - Enemy attacks with damage variance and a dodge check
//! - Rewards for defeated enemies
//!
//! Every resolution appends a line to the combat log.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::effects::StatusKind;
use crate::character::Character;
use crate::dice::{DiceFace, DiceType, FaceCategory, FaceTag};
use crate::enemy::Enemy;
use crate::rng::RandomSource;

/// Damage multiplier for faces tagged Heavy
pub const HEAVY_MULTIPLIER: f64 = 1.5;
/// Damage multiplier for faces tagged Quick
pub const QUICK_MULTIPLIER: f64 = 0.8;
/// Enemy damage variance bounds
pub const ENEMY_VARIANCE: (f64, f64) = (0.8, 1.2);

/// Outcome of a single combat action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub damage_dealt: i32,
    #[serde(default)]
    pub healing_done: i32,
    #[serde(default)]
    pub status_applied: Option<StatusKind>,
    #[serde(default)]
    pub target_defeated: bool,
    #[serde(default)]
    pub critical: bool,
}

impl CombatResult {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            ..Default::default()
        }
    }

    fn succeeded(message: String) -> Self {
        Self {
            success: true,
            message,
            ..Default::default()
        }
    }
}

/// Append-only log of combat messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// The last `count` entries, oldest first
    pub fn last(&self, count: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Nominal healing for a heal face
pub fn heal_amount(face: &DiceFace) -> i32 {
    if face.has_tag(FaceTag::Major) {
        30 + face.value * 2
    } else {
        15 + face.value
    }
}

/// Status effect carried by an effect face, if any
pub fn status_for(face: &DiceFace) -> Option<StatusKind> {
    if face.has_tag(FaceTag::Bleed) {
        Some(StatusKind::Bleeding)
    } else if face.has_tag(FaceTag::Poison) {
        Some(StatusKind::Poisoned)
    } else if face.has_tag(FaceTag::Stun) {
        Some(StatusKind::Stunned)
    } else {
        None
    }
}

/// Handles combat mechanics between the player and enemies
pub struct CombatSystem {
    log: CombatLog,
    rng: Box<dyn RandomSource>,
}

impl CombatSystem {
    /// Create a combat system drawing randomness from `rng`
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self {
            log: CombatLog::new(),
            rng,
        }
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut CombatLog {
        &mut self.log
    }

    /// The random source shared by everything in this fight
    pub fn rng_mut(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Reset the log and record the roster
    pub fn start_combat(&mut self, player: &Character, enemies: &[Enemy]) {
        self.log.clear();
        self.log
            .add(format!("Combat started against {} enemies!", enemies.len()));
        for enemy in enemies {
            self.log.add(format!(
                "- {} (Level {}) with {} health",
                enemy.name, enemy.level, enemy.health
            ));
        }
        info!(player = %player.name, enemies = enemies.len(), "combat started");
    }

    /// Execute the player's turn: roll the chosen die and apply the face
    pub fn player_turn(
        &mut self,
        player: &mut Character,
        enemies: &mut [Enemy],
        dice_type: DiceType,
        dice_index: usize,
        target_index: usize,
    ) -> CombatResult {
        if target_index >= enemies.len() {
            warn!(target_index, enemies = enemies.len(), "invalid combat target");
            return CombatResult::failed("Invalid target!".to_string());
        }

        let outcome = player.roll_die(dice_type, dice_index, self.rng.as_mut());
        let Some(face) = outcome.face else {
            self.log
                .add(format!("Player rolled but got no result: {}", outcome.message));
            return CombatResult::failed(outcome.message);
        };

        let target = &mut enemies[target_index];
        match face.category {
            FaceCategory::Combat => self.resolve_attack(player, target, &face),
            FaceCategory::Effect => self.resolve_effect(player, target, &face),
            _ => {
                self.log.add(format!(
                    "Player used {}: {}",
                    face.name, face.effect_description
                ));
                CombatResult::succeeded(format!("Used {}", face.name))
            }
        }
    }

    fn resolve_attack(
        &mut self,
        player: &Character,
        target: &mut Enemy,
        face: &DiceFace,
    ) -> CombatResult {
        let multiplier = if face.has_tag(FaceTag::Heavy) {
            HEAVY_MULTIPLIER
        } else if face.has_tag(FaceTag::Quick) {
            QUICK_MULTIPLIER
        } else {
            1.0
        };

        // float-to-int casts saturate, so only the face value can overflow
        let mut damage = ((player.stats.physical_damage as f64 * multiplier).floor() as i32)
            .saturating_add(face.value);

        let critical = self.rng.chance(player.stats.crit_chance);
        if critical {
            damage = (damage as f64 * player.stats.crit_damage).floor() as i32;
        }

        let defeated = target.take_damage(damage.max(0));
        debug!(face = %face.name, damage, critical, target = %target.name, "player attack");

        let mut message = if critical {
            format!("CRITICAL HIT! {} deals {} damage to {}!", face.name, damage, target.name)
        } else {
            format!("{} deals {} damage to {}!", face.name, damage, target.name)
        };
        if defeated {
            message.push_str(&format!(" {} is defeated!", target.name));
        }
        self.log.add(message.clone());

        CombatResult {
            success: true,
            message,
            damage_dealt: damage,
            target_defeated: defeated,
            critical,
            ..Default::default()
        }
    }

    fn resolve_effect(
        &mut self,
        player: &mut Character,
        target: &mut Enemy,
        face: &DiceFace,
    ) -> CombatResult {
        if face.has_tag(FaceTag::Heal) {
            let healed = player.stats.heal(heal_amount(face));
            let message = format!("{} restores {} health", face.name, healed);
            self.log.add(message.clone());
            return CombatResult {
                healing_done: healed,
                ..CombatResult::succeeded(message)
            };
        }

        if let Some(kind) = status_for(face) {
            let duration = kind.default_duration();
            target.status_effects.apply_kind(kind, duration);
            let message = format!(
                "{} applies {} to {} for {} turns",
                face.name, kind, target.name, duration
            );
            self.log.add(message.clone());
            return CombatResult {
                status_applied: Some(kind),
                ..CombatResult::succeeded(message)
            };
        }

        self.log.add(format!("Player used {} effect", face.name));
        CombatResult::succeeded(format!("Used {} effect", face.name))
    }

    /// Execute a basic enemy attack against the player
    pub fn enemy_turn(&mut self, enemy: &Enemy, player: &mut Character) -> CombatResult {
        if !enemy.status_effects.can_act() {
            let message = format!("{} is stunned and cannot act!", enemy.name);
            self.log.add(message.clone());
            return CombatResult::failed(message);
        }

        let (low, high) = ENEMY_VARIANCE;
        let damage = (enemy.damage as f64 * self.rng.uniform(low, high)) as i32;

        if self.rng.chance(player.stats.dodge) {
            let message = format!("{} attacks but {} dodges!", enemy.name, player.name);
            self.log.add(message.clone());
            return CombatResult::failed(message);
        }

        let defeated = player.stats.take_damage(damage.max(0));
        let mut message = format!("{} attacks for {} damage!", enemy.name, damage);
        if defeated {
            message.push_str(&format!(" {} is defeated!", player.name));
        }
        self.log.add(message.clone());

        CombatResult {
            success: true,
            message,
            damage_dealt: damage,
            target_defeated: defeated,
            ..Default::default()
        }
    }

    /// Sum rewards from defeated enemies and apply the xp.
    /// Returns `(gold, xp)`.
    pub fn process_combat_rewards(
        &mut self,
        player: &mut Character,
        defeated: &[Enemy],
    ) -> (u32, u32) {
        let gold: u32 = defeated.iter().map(|e| e.gold_reward).sum();
        let xp: u32 = defeated.iter().map(|e| e.xp_reward).sum();

        for message in player.add_xp(xp) {
            self.log.add(message);
        }
        self.log
            .add(format!("Combat rewards: {} gold and {} XP", gold, xp));
        info!(gold, xp, "combat rewards");
        (gold, xp)
    }
}
