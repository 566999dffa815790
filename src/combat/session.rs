//! Combat session
//!
//! Owns one fight from start to finish. A round is:
//! 1. the player's action
//! 2. each remaining enemy in roster order (AI-chosen die, heal or attack)
//! 3. status effects ticking on everyone
//!
//! The session owns its [`EnemyAi`] registry; nothing is process-wide.

use tracing::{debug, info};

use super::effects::StatusTick;
use super::system::{heal_amount, CombatResult, CombatSystem};
use crate::ai::EnemyAi;
use crate::character::Character;
use crate::config::CombatConfig;
use crate::dice::{DiceType, FaceTag};
use crate::enemy::Enemy;

/// Where the fight stands after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// No fight in progress
    Inactive,
    Ongoing,
    Victory { gold: u32, xp: u32 },
    Defeat,
    Fled,
}

impl CombatOutcome {
    /// Whether the fight ended with this outcome
    pub fn is_over(&self) -> bool {
        !matches!(self, CombatOutcome::Ongoing)
    }
}

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub player: CombatResult,
    /// `(enemy name, result)` per enemy that acted
    pub enemies: Vec<(String, CombatResult)>,
    pub status_messages: Vec<String>,
    pub outcome: CombatOutcome,
}

impl RoundReport {
    fn new(player: CombatResult) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            status_messages: Vec::new(),
            outcome: CombatOutcome::Ongoing,
        }
    }
}

/// A fight between the player and a roster of enemies
pub struct CombatSession {
    enemies: Vec<Enemy>,
    defeated: Vec<Enemy>,
    active: bool,
    system: CombatSystem,
    ai: EnemyAi,
    config: CombatConfig,
    /// Rewards granted so far this fight
    gold_earned: u32,
    xp_earned: u32,
}

impl CombatSession {
    pub fn new(system: CombatSystem, ai: EnemyAi, config: CombatConfig) -> Self {
        Self {
            enemies: Vec::new(),
            defeated: Vec::new(),
            active: false,
            system,
            ai,
            config,
            gold_earned: 0,
            xp_earned: 0,
        }
    }

    /// Begin a fight against `enemies`
    pub fn start(&mut self, player: &Character, enemies: Vec<Enemy>) {
        self.system.start_combat(player, &enemies);
        self.ai.reset_state();
        self.enemies = enemies;
        self.defeated.clear();
        self.gold_earned = 0;
        self.xp_earned = 0;
        self.active = !self.enemies.is_empty();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enemies still standing
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn defeated(&self) -> &[Enemy] {
        &self.defeated
    }

    pub fn system(&self) -> &CombatSystem {
        &self.system
    }

    /// `(gold, xp)` granted for kills so far this fight
    pub fn earned(&self) -> (u32, u32) {
        (self.gold_earned, self.xp_earned)
    }

    pub fn ai_mut(&mut self) -> &mut EnemyAi {
        &mut self.ai
    }

    /// The configured number of most recent log entries
    pub fn recent_log(&self) -> &[String] {
        self.system.log().last(self.config.log_view)
    }

    /// Play one round with the player rolling `(dice_type, dice_index)`
    /// against the enemy at `target_index`
    pub fn take_turn(
        &mut self,
        player: &mut Character,
        dice_type: DiceType,
        dice_index: usize,
        target_index: usize,
    ) -> RoundReport {
        if !self.active {
            let mut report = RoundReport::new(CombatResult {
                success: false,
                message: "No combat in progress".to_string(),
                ..Default::default()
            });
            report.outcome = CombatOutcome::Inactive;
            return report;
        }

        let result =
            self.system
                .player_turn(player, &mut self.enemies, dice_type, dice_index, target_index);
        let target_down = result.target_defeated;
        let mut report = RoundReport::new(result);

        if target_down && target_index < self.enemies.len() {
            let enemy = self.enemies.remove(target_index);
            debug!(enemy = %enemy.name, "enemy defeated");
            self.claim_rewards(player, std::slice::from_ref(&enemy));
            self.defeated.push(enemy);
        }
        if self.enemies.is_empty() {
            report.outcome = self.finish_victory(player);
            return report;
        }

        for i in 0..self.enemies.len() {
            let result = self.enemy_action(i, player);
            let player_down = result.target_defeated;
            report
                .enemies
                .push((self.enemies[i].name.clone(), result));
            if player_down {
                report.outcome = self.finish_defeat(player);
                return report;
            }
        }

        report.status_messages = self.tick_status_effects(player);
        if !player.stats.is_alive() {
            report.outcome = self.finish_defeat(player);
        } else if self.enemies.is_empty() {
            report.outcome = self.finish_victory(player);
        }
        report
    }

    /// One enemy's action: roll an AI-chosen die if it owns any, heal on a
    /// heal face, otherwise attack
    fn enemy_action(&mut self, index: usize, player: &mut Character) -> CombatResult {
        let enemy = &mut self.enemies[index];
        if enemy.dice.is_empty() || !enemy.status_effects.can_act() {
            return self.system.enemy_turn(enemy, player);
        }

        let available = enemy.dice.available();
        if available.is_empty() {
            return self.system.enemy_turn(enemy, player);
        }
        let choice = self
            .ai
            .decide_action(enemy, player, &available, self.system.rng_mut());

        let rolled = match enemy.dice.get_mut(choice.dice_type, choice.index) {
            Some(die) => die.roll(self.system.rng_mut()).face,
            None => None,
        };

        if let Some(face) = rolled.filter(|f| f.has_tag(FaceTag::Heal)) {
            let healed = enemy.heal(heal_amount(&face));
            let message = format!("{} uses {} and recovers {} health", enemy.name, face.name, healed);
            self.system.log_mut().add(message.clone());
            return CombatResult {
                success: true,
                message,
                healing_done: healed,
                ..Default::default()
            };
        }

        self.system.enemy_turn(enemy, player)
    }

    /// Apply one turn of status effects to every combatant. Enemies killed
    /// by damage-over-time join the defeated list.
    fn tick_status_effects(&mut self, player: &mut Character) -> Vec<String> {
        let mut messages = Vec::new();

        for enemy in self.enemies.iter_mut() {
            let StatusTick { damage, messages: lines } =
                enemy.status_effects.tick(enemy.max_health);
            if damage > 0 {
                enemy.take_damage(damage);
            }
            messages.extend(lines.into_iter().map(|m| format!("{}: {}", enemy.name, m)));
            if !enemy.is_alive() {
                messages.push(format!("{} succumbs to its wounds!", enemy.name));
            }
        }

        let (alive, dead): (Vec<Enemy>, Vec<Enemy>) =
            self.enemies.drain(..).partition(|e| e.is_alive());
        self.enemies = alive;
        self.claim_rewards(player, &dead);
        self.defeated.extend(dead);

        messages.extend(
            player
                .stats
                .process_status_effects()
                .into_iter()
                .map(|m| format!("{}: {}", player.name, m)),
        );

        for message in &messages {
            self.system.log_mut().add(message.clone());
        }
        messages
    }

    /// Try to run away
    pub fn flee(&mut self, player: &mut Character) -> RoundReport {
        if !self.active {
            let mut report = RoundReport::new(CombatResult {
                success: false,
                message: "No combat in progress".to_string(),
                ..Default::default()
            });
            report.outcome = CombatOutcome::Inactive;
            return report;
        }

        let rng = self.system.rng_mut();
        if rng.chance(self.config.flee_chance) {
            let message = format!("{} escapes from combat!", player.name);
            self.system.log_mut().add(message.clone());
            self.active = false;
            info!(player = %player.name, "fled combat");
            let mut report = RoundReport::new(CombatResult {
                success: true,
                message,
                ..Default::default()
            });
            report.outcome = CombatOutcome::Fled;
            return report;
        }

        let damage = rng.range_inclusive(self.config.flee_damage_min, self.config.flee_damage_max);
        let defeated = player.stats.take_damage(damage);
        let mut message = format!("{} failed to escape and took {} damage!", player.name, damage);
        if defeated {
            message.push_str(&format!(" {} is defeated!", player.name));
        }
        self.system.log_mut().add(message.clone());

        let mut report = RoundReport::new(CombatResult {
            success: false,
            message,
            damage_dealt: damage,
            target_defeated: defeated,
            ..Default::default()
        });
        if defeated {
            report.outcome = self.finish_defeat(player);
        }
        report
    }

    /// Grant gold and xp for enemies as they fall, so a later flee or
    /// defeat keeps them
    fn claim_rewards(&mut self, player: &mut Character, fallen: &[Enemy]) {
        if fallen.is_empty() {
            return;
        }
        let (gold, xp) = self.system.process_combat_rewards(player, fallen);
        self.gold_earned = self.gold_earned.saturating_add(gold);
        self.xp_earned = self.xp_earned.saturating_add(xp);
    }

    fn finish_victory(&mut self, player: &Character) -> CombatOutcome {
        self.active = false;
        let (gold, xp) = self.earned();
        info!(player = %player.name, gold, xp, "combat won");
        CombatOutcome::Victory { gold, xp }
    }

    fn finish_defeat(&mut self, player: &Character) -> CombatOutcome {
        self.active = false;
        info!(player = %player.name, "player defeated");
        CombatOutcome::Defeat
    }
}
