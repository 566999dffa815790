//! Dice faces
//!
//! A face is one discrete outcome of a die: a signed value (positive buffs,
//! negative debuffs), a category that decides how combat interprets it,
//! and a set of behavior tags.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// How a rolled face is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaceCategory {
    /// Permanent character stat modification
    Trait,
    /// Direct attack
    Combat,
    /// Healing or status effect
    Effect,
    /// Out-of-combat utility
    Utility,
    /// Affects other dice or rolls
    Meta,
}

impl FaceCategory {
    /// Stable name used at the serialization boundary
    pub fn name(&self) -> &'static str {
        match self {
            FaceCategory::Trait => "TRAIT",
            FaceCategory::Combat => "COMBAT",
            FaceCategory::Effect => "EFFECT",
            FaceCategory::Utility => "UTILITY",
            FaceCategory::Meta => "META",
        }
    }
}

impl FromStr for FaceCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRAIT" => Ok(FaceCategory::Trait),
            "COMBAT" => Ok(FaceCategory::Combat),
            "EFFECT" => Ok(FaceCategory::Effect),
            "UTILITY" => Ok(FaceCategory::Utility),
            "META" => Ok(FaceCategory::Meta),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for FaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rarity tier for faces and dice
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Behavioral keys carried by a face.
///
/// Combat resolution and enemy AI key off these tags rather than the
/// display name. Faces authored without explicit tags get them inferred
/// from their name (see [`FaceTag::infer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaceTag {
    /// 1.5x damage multiplier
    Heavy,
    /// 0.8x damage multiplier
    Quick,
    /// Restores health
    Heal,
    /// Stronger heal
    Major,
    /// Applies Bleeding
    Bleed,
    /// Applies Poisoned
    Poison,
    /// Applies Stunned
    Stun,
    /// Counts toward the aggressive AI's attack score
    Attack,
    /// Defensive move
    Defense,
    /// Blocking move
    Block,
    /// Boss finisher
    Ultimate,
}

impl FaceTag {
    /// Name fragment that marks a face with this tag
    pub fn keyword(&self) -> &'static str {
        match self {
            FaceTag::Heavy => "Heavy",
            FaceTag::Quick => "Quick",
            FaceTag::Heal => "Heal",
            FaceTag::Major => "Major",
            FaceTag::Bleed => "Bleed",
            FaceTag::Poison => "Poison",
            FaceTag::Stun => "Stun",
            FaceTag::Attack => "Attack",
            FaceTag::Defense => "Defense",
            FaceTag::Block => "Block",
            FaceTag::Ultimate => "Ultimate",
        }
    }

    /// All tags
    pub fn all() -> &'static [FaceTag] {
        &[
            FaceTag::Heavy,
            FaceTag::Quick,
            FaceTag::Heal,
            FaceTag::Major,
            FaceTag::Bleed,
            FaceTag::Poison,
            FaceTag::Stun,
            FaceTag::Attack,
            FaceTag::Defense,
            FaceTag::Block,
            FaceTag::Ultimate,
        ]
    }

    /// Infer tags from a face name (case-sensitive substring match)
    pub fn infer(name: &str) -> BTreeSet<FaceTag> {
        FaceTag::all()
            .iter()
            .copied()
            .filter(|tag| name.contains(tag.keyword()))
            .collect()
    }
}

/// A single face on a die
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FaceRecord")]
pub struct DiceFace {
    /// Display name (not unique across a die)
    pub name: String,
    /// Positive for buffs, negative for debuffs
    pub value: i32,
    /// How the face resolves
    pub category: FaceCategory,
    /// Human-readable effect text
    pub effect_description: String,
    pub rarity: Rarity,
    /// Resource costs (e.g. `{"mana": 5}`)
    pub cost: BTreeMap<String, i32>,
    /// Names of faces this one synergizes with (informational)
    pub synergies: Vec<String>,
    /// Behavioral tags
    pub tags: BTreeSet<FaceTag>,
}

impl DiceFace {
    /// Create a common face, inferring tags from the name
    pub fn new(name: &str, value: i32, category: FaceCategory, effect_description: &str) -> Self {
        Self {
            name: name.to_string(),
            value,
            category,
            effect_description: effect_description.to_string(),
            rarity: Rarity::Common,
            cost: BTreeMap::new(),
            synergies: Vec::new(),
            tags: FaceTag::infer(name),
        }
    }

    /// Set the rarity
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Add a resource cost
    pub fn with_cost(mut self, resource: &str, amount: i32) -> Self {
        self.cost.insert(resource.to_string(), amount);
        self
    }

    /// Add a synergy reference
    pub fn with_synergy(mut self, face_name: &str) -> Self {
        self.synergies.push(face_name.to_string());
        self
    }

    /// Replace the inferred tags with an explicit set
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = FaceTag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Check whether this face carries a tag
    pub fn has_tag(&self, tag: FaceTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Wire shape of a face. Missing tags are inferred from the name.
#[derive(Deserialize)]
struct FaceRecord {
    name: String,
    value: i32,
    category: FaceCategory,
    #[serde(default)]
    effect_description: String,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default)]
    cost: BTreeMap<String, i32>,
    #[serde(default)]
    synergies: Vec<String>,
    #[serde(default)]
    tags: Option<BTreeSet<FaceTag>>,
}

impl From<FaceRecord> for DiceFace {
    fn from(record: FaceRecord) -> Self {
        let tags = record
            .tags
            .unwrap_or_else(|| FaceTag::infer(&record.name));
        Self {
            name: record.name,
            value: record.value,
            category: record.category,
            effect_description: record.effect_description,
            rarity: record.rarity,
            cost: record.cost,
            synergies: record.synergies,
            tags,
        }
    }
}
