//! Scenario tests for dicecrawl
//!
//! Play scenarios covering:
//! - Dice: balance, instability and leveling through real rolls
//! - Combat: full rounds, status effects, fleeing and rewards
//! - AI: behavior selection and custom strategies
//! - Persistence: keyed-map round trips
//! - Config: layered loading from files and the environment

pub mod ai;
pub mod combat;
pub mod config;
pub mod dice;
pub mod persistence;
