//! Combat system module
//!
//! Implements dice-driven combat with:
//! - Player actions resolved from rolled faces
//! - Enemy attacks with variance and dodge
//! - Status effects (bleeding, poisoned, stunned, etc.)
//! - Rewards and player level progression
//! - A session driving full rounds, including fleeing

mod effects;
mod session;
mod system;

pub use effects::{StatusEffects, StatusKind, StatusTick};
pub use session::{CombatOutcome, CombatSession, RoundReport};
pub use system::{
    heal_amount, status_for, CombatLog, CombatResult, CombatSystem, ENEMY_VARIANCE,
    HEAVY_MULTIPLIER, QUICK_MULTIPLIER,
};
