//! Stat taxonomy module.
//!
//! Provides the closed set of stat identities a modifier can target
//! (`Stat`) and the effect kinds describing how a modifier's value
//! combines with others on the same stat (`StatType`).

use crate::error::ModifierError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity of a stat a modifier can target.
///
/// Every stat has a unique snake_case key, used for display and
/// serialization.
///
/// # Examples
///
/// ```rust
/// use statmod::Stat;
///
/// assert_eq!(Stat::SpellDamage.as_str(), "spell_damage");
/// assert_eq!("energy_shield".parse::<Stat>().unwrap(), Stat::EnergyShield);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "strength")]
    Strength,
    #[serde(rename = "dexterity")]
    Dexterity,
    #[serde(rename = "intelligence")]
    Intelligence,
    #[serde(rename = "life")]
    Life,
    #[serde(rename = "mana")]
    Mana,
    #[serde(rename = "energy_shield")]
    EnergyShield,
    #[serde(rename = "armour")]
    Armour,
    #[serde(rename = "evasion_rating")]
    EvasionRating,
    #[serde(rename = "spell_damage")]
    SpellDamage,
    #[serde(rename = "spell_minimum_base_fire_damage")]
    SpellMinimumBaseFireDamage,
    #[serde(rename = "spell_maximum_base_fire_damage")]
    SpellMaximumBaseFireDamage,
    #[serde(rename = "spell_base_fire_damage_%_maximum_life")]
    SpellBaseFireDamageMaximumLife,
    #[serde(rename = "stun_avoidance")]
    StunAvoidance,
}

impl Stat {
    /// All stats, in declaration order.
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Strength,
            Stat::Dexterity,
            Stat::Intelligence,
            Stat::Life,
            Stat::Mana,
            Stat::EnergyShield,
            Stat::Armour,
            Stat::EvasionRating,
            Stat::SpellDamage,
            Stat::SpellMinimumBaseFireDamage,
            Stat::SpellMaximumBaseFireDamage,
            Stat::SpellBaseFireDamageMaximumLife,
            Stat::StunAvoidance,
        ]
    }

    /// Get the key of this stat.
    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Dexterity => "dexterity",
            Stat::Intelligence => "intelligence",
            Stat::Life => "life",
            Stat::Mana => "mana",
            Stat::EnergyShield => "energy_shield",
            Stat::Armour => "armour",
            Stat::EvasionRating => "evasion_rating",
            Stat::SpellDamage => "spell_damage",
            Stat::SpellMinimumBaseFireDamage => "spell_minimum_base_fire_damage",
            Stat::SpellMaximumBaseFireDamage => "spell_maximum_base_fire_damage",
            Stat::SpellBaseFireDamageMaximumLife => "spell_base_fire_damage_%_maximum_life",
            Stat::StunAvoidance => "stun_avoidance",
        }
    }
}

impl FromStr for Stat {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| ModifierError::UnknownStat {
                key: s.to_string(),
                expected: Stat::all().iter().map(|stat| stat.as_str().to_string()).collect(),
            })
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a modifier's value combines with others targeting the same stat.
///
/// Resolving the combination is a consumer's job; the engine only
/// carries the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    /// Flat addition to the stat.
    Base,
    /// Summed percentage applied once.
    Increased,
    /// Independent percentage multiplier.
    More,
}

impl StatType {
    /// Get the key of this effect kind.
    pub fn as_str(self) -> &'static str {
        match self {
            StatType::Base => "base",
            StatType::Increased => "increased",
            StatType::More => "more",
        }
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
