//! Template catalog module.
//!
//! A `Catalog` holds three ordered families of compiled templates
//! (plain, dynamic, conditional). Matching is first-match-wins in
//! family order, then declaration order, so the catalog never relies
//! on hash iteration order.
//!
//! The standard catalog covers the built-in modifier vocabulary. Its
//! dynamic and conditional templates read external game state through
//! `StandardHooks`; `Catalog::global()` uses neutral hooks.

use crate::error::ModifierError;
use crate::modifier::Modifier;
use crate::numeric::ModValue;
use crate::stat::{Stat, StatType};
use crate::template::{Family, Predicate, Scaler, Template, TemplateSpec};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::debug;

// ASCII digits only, at most 18 so every match fits in an i64.
/// Signed integer, sign required.
const SIGNED_INT: &str = r"[+-][0-9]{1,18}";
/// Integer, sign optional.
const INT: &str = r"[+-]?[0-9]{1,18}";
/// Decimal number, sign optional.
const REAL: &str = r"[+-]?[0-9]{1,18}(?:\.[0-9]+)?";

static GLOBAL: LazyLock<Result<Arc<Catalog>, ModifierError>> =
    LazyLock::new(|| Catalog::standard(StandardHooks::default()).map(Arc::new));

/// An immutable, ordered collection of templates.
///
/// # Examples
///
/// ```rust
/// use statmod::catalog::{Catalog, CatalogBuilder};
/// use statmod::template::TemplateSpec;
/// use statmod::{Stat, StatType};
/// use std::sync::Arc;
///
/// let catalog = CatalogBuilder::new()
///     .template(TemplateSpec::plain(
///         "additional_life",
///         r"[+-][0-9]+ to maximum Life",
///         "{value:+d} to maximum Life",
///         [Stat::Life],
///         StatType::Base,
///     ))
///     .build()
///     .unwrap();
///
/// let catalog = Arc::new(catalog);
/// let life = catalog.parse("+40 to maximum Life").unwrap();
/// assert_eq!(life.identifier(), "additional_life");
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    plain: Vec<Arc<Template>>,
    dynamic: Vec<Arc<Template>>,
    conditional: Vec<Arc<Template>>,
}

impl Catalog {
    /// The process-wide standard catalog with default hooks.
    ///
    /// Built on first use and shared afterwards.
    pub fn global() -> Result<Arc<Catalog>, ModifierError> {
        GLOBAL.clone()
    }

    /// Build the standard catalog wired to the given hooks.
    pub fn standard(hooks: StandardHooks) -> Result<Catalog, ModifierError> {
        standard_specs(&hooks)
            .into_iter()
            .fold(CatalogBuilder::new(), CatalogBuilder::template)
            .build()
    }

    /// Templates of one family, in declaration order.
    pub fn family(&self, family: Family) -> &[Arc<Template>] {
        match family {
            Family::Plain => &self.plain,
            Family::Dynamic => &self.dynamic,
            Family::Conditional => &self.conditional,
        }
    }

    /// All templates in classification order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Template>> {
        Family::ORDER
            .into_iter()
            .flat_map(move |family| self.family(family).iter())
    }

    /// Look up a template by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Arc<Template>> {
        self.iter().find(|t| t.identifier() == identifier)
    }

    /// Number of templates across all families.
    pub fn len(&self) -> usize {
        self.plain.len() + self.dynamic.len() + self.conditional.len()
    }

    /// Whether the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse modifier text against this catalog.
    ///
    /// Modifiers produced by arithmetic on the result are re-parsed
    /// against this same catalog.
    pub fn parse(self: &Arc<Self>, text: &str) -> Result<Modifier, ModifierError> {
        Modifier::parse_with(self, text)
    }
}

/// Builder that validates and compiles template specs into a catalog.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    specs: Vec<TemplateSpec>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template. Declaration order within a family is kept.
    pub fn template(mut self, spec: TemplateSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Compile all templates.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if two templates share an identifier,
    /// or the first compilation error of any template.
    pub fn build(self) -> Result<Catalog, ModifierError> {
        let mut seen = HashSet::new();
        let mut catalog = Catalog::default();

        for spec in self.specs {
            if !seen.insert(spec.identifier.clone()) {
                return Err(ModifierError::DuplicateIdentifier(spec.identifier));
            }
            let template = Arc::new(spec.compile()?);
            match template.family() {
                Family::Plain => catalog.plain.push(template),
                Family::Dynamic => catalog.dynamic.push(template),
                Family::Conditional => catalog.conditional.push(template),
            }
        }

        debug!(
            plain = catalog.plain.len(),
            dynamic = catalog.dynamic.len(),
            conditional = catalog.conditional.len(),
            "built modifier catalog"
        );
        Ok(catalog)
    }
}

/// External callbacks used by the standard catalog.
///
/// The defaults are neutral: every scaler returns 1 and every
/// predicate returns true.
#[derive(Clone)]
pub struct StandardHooks {
    /// Current number of power charges.
    pub power_charges: Scaler,
    /// Current number of frenzy charges.
    pub frenzy_charges: Scaler,
    /// Whether a shield is equipped.
    pub holding_shield: Predicate,
}

impl Default for StandardHooks {
    fn default() -> Self {
        Self {
            power_charges: Arc::new(|| ModValue::Int(1)),
            frenzy_charges: Arc::new(|| ModValue::Int(1)),
            holding_shield: Arc::new(|| true),
        }
    }
}

impl fmt::Debug for StandardHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardHooks").finish_non_exhaustive()
    }
}

fn standard_specs(hooks: &StandardHooks) -> Vec<TemplateSpec> {
    use Stat::*;
    use StatType::*;

    let shield = || vec![hooks.holding_shield.clone()];

    vec![
        // Flat attributes and defences
        TemplateSpec::plain(
            "additional_strength",
            format!("{SIGNED_INT} to Strength"),
            "{value:+d} to Strength",
            [Strength],
            Base,
        ),
        TemplateSpec::plain(
            "additional_dexterity",
            format!("{SIGNED_INT} to Dexterity"),
            "{value:+d} to Dexterity",
            [Dexterity],
            Base,
        ),
        TemplateSpec::plain(
            "additional_intelligence",
            format!("{SIGNED_INT} to Intelligence"),
            "{value:+d} to Intelligence",
            [Intelligence],
            Base,
        ),
        TemplateSpec::plain(
            "additional_strength_and_intelligence",
            format!("{SIGNED_INT} to Strength and Intelligence"),
            "{value:+d} to Strength and Intelligence",
            [Strength, Intelligence],
            Base,
        ),
        TemplateSpec::plain(
            "additional_all_attributes",
            format!("{SIGNED_INT} to all Attributes"),
            "{value:+d} to all Attributes",
            [Strength, Dexterity, Intelligence],
            Base,
        ),
        TemplateSpec::plain(
            "additional_maximum_life",
            format!("{SIGNED_INT} to maximum Life"),
            "{value:+d} to maximum Life",
            [Life],
            Base,
        ),
        TemplateSpec::plain(
            "additional_maximum_mana",
            format!("{SIGNED_INT} to maximum Mana"),
            "{value:+d} to maximum Mana",
            [Mana],
            Base,
        ),
        TemplateSpec::plain(
            "additional_maximum_energy_shield",
            format!("{SIGNED_INT} to maximum Energy Shield"),
            "{value:+d} to maximum Energy Shield",
            [EnergyShield],
            Base,
        ),
        TemplateSpec::plain(
            "additional_armour",
            format!("{SIGNED_INT} to Armour"),
            "{value:+d} to Armour",
            [Armour],
            Base,
        ),
        TemplateSpec::plain(
            "additional_evasion_rating",
            format!("{SIGNED_INT} to Evasion Rating"),
            "{value:+d} to Evasion Rating",
            [EvasionRating],
            Base,
        ),
        // Percentages
        TemplateSpec::plain(
            "increased_strength_%",
            format!("{INT}% increased Strength"),
            "{value:d}% increased Strength",
            [Strength],
            Increased,
        ),
        TemplateSpec::plain(
            "more_strength_%",
            format!("{INT}% more Strength"),
            "{value:d}% more Strength",
            [Strength],
            More,
        ),
        TemplateSpec::plain(
            "increased_spell_damage_%",
            format!("{INT}% increased Spell Damage"),
            "{value:d}% increased Spell Damage",
            [SpellDamage],
            Increased,
        ),
        TemplateSpec::plain(
            "more_spell_damage_%",
            format!("{INT}% more Spell Damage"),
            "{value:d}% more Spell Damage",
            [SpellDamage],
            More,
        ),
        TemplateSpec::plain(
            "increased_maximum_life_%",
            format!("{INT}% increased maximum Life"),
            "{value:d}% increased maximum Life",
            [Life],
            Increased,
        ),
        // Spell base damage
        TemplateSpec::plain(
            "spell_minimum_base_fire_damage",
            format!("Spells have {INT} to Minimum Base Fire Damage"),
            "Spells have {value:d} to Minimum Base Fire Damage",
            [SpellMinimumBaseFireDamage],
            Base,
        ),
        TemplateSpec::plain(
            "spell_maximum_base_fire_damage",
            format!("Spells have {INT} to Maximum Base Fire Damage"),
            "Spells have {value:d} to Maximum Base Fire Damage",
            [SpellMaximumBaseFireDamage],
            Base,
        ),
        TemplateSpec::plain(
            "spell_base_fire_damage_%_maximum_life",
            format!("Spells gain {REAL}% of maximum Life as Base Fire Damage"),
            "Spells gain {value:f}% of maximum Life as Base Fire Damage",
            [SpellBaseFireDamageMaximumLife],
            Base,
        ),
        // Per-charge scaling
        TemplateSpec::dynamic(
            "more_spell_damage_%_per_power_charge",
            format!("{INT}% more Spell Damage per Power Charge"),
            "{value:d}% more Spell Damage per Power Charge",
            [SpellDamage],
            More,
            hooks.power_charges.clone(),
        ),
        TemplateSpec::dynamic(
            "increased_evasion_rating_%_per_frenzy_charge",
            format!("{INT}% increased Evasion Rating per Frenzy Charge"),
            "{value:d}% increased Evasion Rating per Frenzy Charge",
            [EvasionRating],
            Increased,
            hooks.frenzy_charges.clone(),
        ),
        // Shield conditions
        TemplateSpec::conditional(
            "increased_spell_damage_%_while_holding_a_shield",
            format!("{INT}% increased Spell Damage while holding a Shield"),
            "{value:d}% increased Spell Damage while holding a Shield",
            [SpellDamage],
            Increased,
            shield(),
        ),
        TemplateSpec::conditional(
            "additional_armour_while_holding_a_shield",
            format!("{SIGNED_INT} to Armour while holding a Shield"),
            "{value:+d} to Armour while holding a Shield",
            [Armour],
            Base,
            shield(),
        ),
        TemplateSpec::conditional(
            "cannot_be_stunned_while_holding_a_shield",
            "Cannot be Stunned while holding a Shield",
            "Cannot be Stunned while holding a Shield",
            [StunAvoidance],
            Base,
            shield(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericKind;

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = Catalog::standard(StandardHooks::default()).unwrap();
        assert_eq!(catalog.family(Family::Plain).len(), 18);
        assert_eq!(catalog.family(Family::Dynamic).len(), 2);
        assert_eq!(catalog.family(Family::Conditional).len(), 3);
        assert_eq!(catalog.len(), 23);
    }

    #[test]
    fn test_iteration_follows_family_order() {
        let catalog = Catalog::standard(StandardHooks::default()).unwrap();
        let families: Vec<Family> = catalog.iter().map(|t| t.family()).collect();
        let mut sorted = families.clone();
        sorted.sort_by_key(|f| Family::ORDER.iter().position(|o| o == f));
        assert_eq!(families, sorted);
        assert_eq!(
            catalog.iter().next().map(|t| t.identifier()),
            Some("additional_strength")
        );
    }

    #[test]
    fn test_get_by_identifier() {
        let catalog = Catalog::standard(StandardHooks::default()).unwrap();
        let template = catalog.get("more_spell_damage_%_per_power_charge").unwrap();
        assert_eq!(template.family(), Family::Dynamic);
        assert_eq!(template.format().kind(), Some(NumericKind::Integer));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let spec = || {
            TemplateSpec::plain(
                "additional_strength",
                r"[+-][0-9]+ to Strength",
                "{value:+d} to Strength",
                [Stat::Strength],
                StatType::Base,
            )
        };
        let err = CatalogBuilder::new()
            .template(spec())
            .template(spec())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModifierError::DuplicateIdentifier("additional_strength".to_string())
        );
    }

    #[test]
    fn test_no_standard_text_matches_two_templates() {
        let catalog = Catalog::standard(StandardHooks::default()).unwrap();
        for template in catalog.iter() {
            let value = template.format().kind().map(|_| ModValue::Int(7));
            let text = template.format().render(value).unwrap();
            let matching: Vec<&str> = catalog
                .iter()
                .filter(|t| t.is_match(&text))
                .map(|t| t.identifier())
                .collect();
            assert_eq!(matching, vec![template.identifier()], "text: {}", text);
        }
    }

    #[test]
    fn test_non_ascii_digits_not_recognized() {
        for text in [
            "+٣ to Strength",
            "１５% increased Strength",
            "Spells gain ٢.٥% of maximum Life as Base Fire Damage",
        ] {
            assert_eq!(
                Modifier::from_text(text).unwrap_err(),
                ModifierError::NoMatchingTemplate {
                    text: text.to_string()
                }
            );
        }
    }

    #[test]
    fn test_numbers_beyond_eighteen_digits_not_recognized() {
        let text = "+99999999999999999999 to Strength";
        assert_eq!(
            Modifier::from_text(text).unwrap_err(),
            ModifierError::NoMatchingTemplate {
                text: text.to_string()
            }
        );

        let widest = Modifier::from_text("+999999999999999999 to Strength").unwrap();
        assert_eq!(widest.stored_value(), Some(ModValue::Int(999_999_999_999_999_999)));
    }

    #[test]
    fn test_global_is_shared() {
        let a = Catalog::global().unwrap();
        let b = Catalog::global().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
