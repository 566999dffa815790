//! dicecrawl - dice-driven roguelike combat engine
//!
//! Players and enemies fight by rolling customizable dice. Each die's faces
//! decide what a roll does, and the sum of face values decides how stable
//! the die is.

pub mod ai;
pub mod character;
pub mod codec;
pub mod combat;
pub mod config;
pub mod dice;
pub mod enemy;
pub mod rng;

pub use ai::{Behavior, DiceChoice, EnemyAi};
pub use character::{Character, CharacterStats};
pub use combat::{CombatOutcome, CombatResult, CombatSession, CombatSystem};
pub use config::GameConfig;
pub use dice::{CharacterClass, Dice, DiceFace, DiceSet, DiceType, FaceCategory};
pub use enemy::{Enemy, EnemyType};
pub use rng::{GameRng, RandomSource, ScriptedRng};
