//! Status effects
//!
//! Turn-based effects tracked by name with a remaining-turn count:
//! - Bleeding, Poisoned and Burning deal a share of max health each turn
//! - Stunned prevents acting
//! - Unknown names are tracked and counted down without side effects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Known status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// 5% of max health per turn
    Bleeding,
    /// 3% of max health per turn
    Poisoned,
    /// 7% of max health per turn
    Burning,
    /// Cannot act
    Stunned,
}

impl FromStr for StatusKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bleeding" | "bleed" => Ok(StatusKind::Bleeding),
            "poisoned" | "poison" => Ok(StatusKind::Poisoned),
            "burning" | "burn" => Ok(StatusKind::Burning),
            "stunned" | "stun" => Ok(StatusKind::Stunned),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusKind::Bleeding => "Bleeding",
            StatusKind::Poisoned => "Poisoned",
            StatusKind::Burning => "Burning",
            StatusKind::Stunned => "Stunned",
        };
        write!(f, "{}", s)
    }
}

impl StatusKind {
    /// Turns applied by a combat face
    pub fn default_duration(&self) -> u32 {
        match self {
            StatusKind::Bleeding | StatusKind::Poisoned | StatusKind::Burning => 3,
            StatusKind::Stunned => 1,
        }
    }

    /// Whether this effect prevents actions
    pub fn prevents_action(&self) -> bool {
        matches!(self, StatusKind::Stunned)
    }

    /// Fraction of max health lost per turn
    fn damage_fraction(&self) -> Option<f64> {
        match self {
            StatusKind::Bleeding => Some(0.05),
            StatusKind::Poisoned => Some(0.03),
            StatusKind::Burning => Some(0.07),
            StatusKind::Stunned => None,
        }
    }

    fn damage_noun(&self) -> &'static str {
        match self {
            StatusKind::Bleeding => "bleeding",
            StatusKind::Poisoned => "poison",
            StatusKind::Burning => "burning",
            StatusKind::Stunned => "stun",
        }
    }
}

/// Outcome of processing one turn of status effects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Total damage dealt by damage-over-time effects
    pub damage: i32,
    /// One line per effect that did something or wore off
    pub messages: Vec<String>,
}

/// Effects on a single entity: name -> remaining turns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusEffects {
    effects: BTreeMap<String, u32>,
}

impl StatusEffects {
    /// Create new empty effects
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an effect, keeping the longer of the old and new durations.
    /// A zero duration is ignored.
    pub fn apply(&mut self, name: &str, duration: u32) {
        if duration == 0 {
            return;
        }
        let remaining = self.effects.entry(name.to_string()).or_insert(0);
        *remaining = (*remaining).max(duration);
    }

    /// Apply a known effect
    pub fn apply_kind(&mut self, kind: StatusKind, duration: u32) {
        self.apply(&kind.to_string(), duration);
    }

    /// Remove an effect by name
    pub fn remove(&mut self, name: &str) {
        self.effects.remove(name);
    }

    /// Remaining turns for an effect
    pub fn remaining(&self, name: &str) -> Option<u32> {
        self.effects.get(name).copied()
    }

    /// Check if entity has a known effect
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.get(&kind.to_string()).is_some_and(|t| *t > 0)
    }

    /// Check if entity can act (not stunned)
    pub fn can_act(&self) -> bool {
        !self
            .effects
            .iter()
            .filter(|(_, turns)| **turns > 0)
            .filter_map(|(name, _)| name.parse::<StatusKind>().ok())
            .any(|kind| kind.prevents_action())
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Iterate `(name, remaining turns)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.effects.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Clear all effects
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Process one turn: apply damage-over-time, count down, drop expired
    /// effects. The caller subtracts `damage` from the entity's health.
    pub fn tick(&mut self, max_health: i32) -> StatusTick {
        let mut tick = StatusTick::default();

        for (name, turns) in self.effects.iter_mut() {
            if let Ok(kind) = name.parse::<StatusKind>() {
                if let Some(fraction) = kind.damage_fraction() {
                    let damage = ((max_health as f64 * fraction) as i32).max(1);
                    tick.damage = tick.damage.saturating_add(damage);
                    tick.messages
                        .push(format!("Suffered {} {} damage", damage, kind.damage_noun()));
                }
            }

            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                tick.messages.push(format!("{} effect has worn off", name));
            }
        }

        self.effects.retain(|_, turns| *turns > 0);
        tick
    }
}
