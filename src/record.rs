//! Consumer record module.
//!
//! A `ModifierRecord` is a plain, serializable snapshot of what a stat
//! aggregator needs from a modifier. Dynamic values are resolved at
//! snapshot time; predicates cannot be serialized and are reported by
//! count only.

use crate::modifier::{Modifier, ModifierVariant};
use crate::numeric::ModValue;
use crate::stat::{Stat, StatType};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of a modifier.
///
/// # Examples
///
/// ```rust
/// use statmod::Modifier;
///
/// let record = Modifier::from_text("+20 to Strength").unwrap().to_record();
/// let json = record.to_json().unwrap();
/// assert!(json.contains("\"identifier\":\"additional_strength\""));
/// assert!(json.contains("\"targets\":[\"strength\"]"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierRecord {
    /// Template identifier.
    pub identifier: String,
    /// Canonical text.
    pub text: String,
    /// Shape of the modifier.
    pub variant: ModifierVariant,
    /// Target stats, in order.
    pub targets: Vec<Stat>,
    /// Effect kind.
    pub kind: StatType,
    /// Stored value before dynamic scaling.
    pub stored_value: Option<ModValue>,
    /// Effective value at snapshot time.
    pub value: Option<ModValue>,
    /// Number of predicates the consumer must evaluate.
    pub predicate_count: usize,
}

impl ModifierRecord {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Modifier {
    /// Take a snapshot of this modifier for a consumer.
    pub fn to_record(&self) -> ModifierRecord {
        ModifierRecord {
            identifier: self.identifier().to_string(),
            text: self.text().to_string(),
            variant: self.variant(),
            targets: self.targets().to_vec(),
            kind: self.kind(),
            stored_value: self.stored_value(),
            value: self.value(),
            predicate_count: self.predicates().len(),
        }
    }
}

impl From<&Modifier> for ModifierRecord {
    fn from(modifier: &Modifier) -> Self {
        modifier.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fields() {
        let m = Modifier::from_text("15% increased Spell Damage while holding a Shield").unwrap();
        let record = m.to_record();
        assert_eq!(record.identifier, "increased_spell_damage_%_while_holding_a_shield");
        assert_eq!(record.variant, ModifierVariant::ConditionalValue);
        assert_eq!(record.targets, vec![Stat::SpellDamage]);
        assert_eq!(record.kind, StatType::Increased);
        assert_eq!(record.value, Some(ModValue::Int(15)));
        assert_eq!(record.predicate_count, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let m = Modifier::from_text("Spells gain 2.5% of maximum Life as Base Fire Damage").unwrap();
        let record = ModifierRecord::from(&m);
        let json = record.to_json().unwrap();
        assert!(json.contains("\"targets\":[\"spell_base_fire_damage_%_maximum_life\"]"));
        assert!(json.contains("\"variant\":\"value\""));
        assert_eq!(ModifierRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_non_valued_record() {
        let m = Modifier::from_text("Cannot be Stunned while holding a Shield").unwrap();
        let json = m.to_record().to_json().unwrap();
        assert!(json.contains("\"value\":null"));
        assert!(json.contains("\"variant\":\"conditional\""));
    }
}
