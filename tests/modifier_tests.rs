//! Tests for parsing, classifying and composing modifiers.
//!
//! These tests verify:
//! - The documented scenarios end to end
//! - Round trips of every standard template
//! - Consumer-facing fields per family
//! - Dynamic scaling and conditional predicates with live hooks
//! - Custom catalogs

use statmod::catalog::StandardHooks;
use statmod::template::Family;
use statmod::*;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

fn m(text: &str) -> Modifier {
    Modifier::from_text(text).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_add_strength() {
    let sum = (&m("+20 to Strength") + &m("+15 to Strength")).unwrap();
    assert_eq!(sum.text(), "+35 to Strength");
    assert_eq!(sum.identifier(), "additional_strength");
}

#[test]
fn test_subtract_strength() {
    let diff = (&m("+20 to Strength") - &m("+15 to Strength")).unwrap();
    assert_eq!(diff.text(), "+5 to Strength");
}

#[test]
fn test_scale_strength_both_sides() {
    let a = m("+20 to Strength");
    assert_eq!((&a * 3i32).unwrap().text(), "+60 to Strength");
    assert_eq!((4i32 * &a).unwrap().text(), "+80 to Strength");
}

#[test]
fn test_conditional_spell_damage() {
    let shield = m("15% increased Spell Damage while holding a Shield");
    assert_eq!(shield.targets(), &[Stat::SpellDamage]);
    assert_eq!(shield.kind(), StatType::Increased);
    assert_eq!(shield.variant(), ModifierVariant::ConditionalValue);
    assert!(!shield.predicates().is_empty());
    assert!(shield.predicates().iter().all(|p| p()));
}

#[test]
fn test_unknown_text() {
    assert_eq!(
        Modifier::from_text("not a real modifier").unwrap_err(),
        ModifierError::NoMatchingTemplate {
            text: "not a real modifier".to_string()
        }
    );
}

#[test]
fn test_same_target_different_identity() {
    let err = (&m("+20 to Strength") + &m("+15% increased Strength")).unwrap_err();
    assert_eq!(
        err,
        ModifierError::IncompatibleModifiers {
            left: "additional_strength".to_string(),
            right: "increased_strength_%".to_string(),
        }
    );
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_every_standard_template_round_trips() {
    let catalog = Catalog::global().unwrap();
    for template in catalog.iter() {
        let values: Vec<Option<ModValue>> = match template.format().kind() {
            Some(NumericKind::Integer) => vec![Some(ModValue::Int(1)), Some(ModValue::Int(250))],
            Some(NumericKind::Real) => vec![Some(ModValue::Real(0.5)), Some(ModValue::Real(12.0))],
            None => vec![None],
        };
        for value in values {
            let text = template.format().render(value).unwrap();
            let found = classify_and_parse(&catalog, &text).unwrap();
            assert_eq!(found.template.identifier(), template.identifier(), "{}", text);
            assert_eq!(found.parameters.value(), value, "{}", text);

            let modifier = m(&text);
            assert_eq!(modifier.text(), text);
            assert_eq!(m(modifier.text()).stored_value(), modifier.stored_value());
        }
    }
}

#[test]
fn test_negative_values_round_trip_where_signed() {
    let a = m("-10 to maximum Life");
    assert_eq!(a.stored_value(), Some(ModValue::Int(-10)));
    assert_eq!(a.text(), "-10 to maximum Life");
}

#[test]
fn test_missing_sign_not_recognized() {
    assert!(matches!(
        Modifier::from_text("20 to Strength"),
        Err(ModifierError::NoMatchingTemplate { .. })
    ));
}

// ============================================================================
// Consumer Fields
// ============================================================================

#[test]
fn test_multi_target_modifier() {
    let all = m("+10 to all Attributes");
    assert_eq!(
        all.targets(),
        &[Stat::Strength, Stat::Dexterity, Stat::Intelligence]
    );
    let doubled = (&all * 2i32).unwrap();
    assert_eq!(doubled.text(), "+20 to all Attributes");
    assert_eq!(doubled.targets(), all.targets());
}

#[test]
fn test_kinds_follow_templates() {
    assert_eq!(m("+5 to Armour").kind(), StatType::Base);
    assert_eq!(m("10% increased maximum Life").kind(), StatType::Increased);
    assert_eq!(m("10% more Strength").kind(), StatType::More);
}

#[test]
fn test_plain_modifiers_have_no_hooks() {
    let a = m("+5 to Armour");
    assert_eq!(a.family(), Family::Plain);
    assert!(a.predicates().is_empty());
    assert!(a.scaler().is_none());
    assert_eq!(a.value(), a.stored_value());
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn test_dynamic_value_tracks_charges() {
    let charges = Arc::new(AtomicI64::new(0));
    let source = Arc::clone(&charges);
    let catalog = Arc::new(
        Catalog::standard(StandardHooks {
            power_charges: Arc::new(move || ModValue::Int(source.load(Ordering::SeqCst))),
            ..StandardHooks::default()
        })
        .unwrap(),
    );

    let per_charge = catalog.parse("3% more Spell Damage per Power Charge").unwrap();
    assert_eq!(per_charge.value(), Some(ModValue::Int(0)));

    charges.store(3, Ordering::SeqCst);
    assert_eq!(per_charge.value(), Some(ModValue::Int(9)));

    // Composition works on the stored value, scaling stays live.
    let doubled = (&per_charge + &per_charge).unwrap();
    assert_eq!(doubled.text(), "6% more Spell Damage per Power Charge");
    assert_eq!(doubled.stored_value(), Some(ModValue::Int(6)));
    assert_eq!(doubled.value(), Some(ModValue::Int(18)));

    charges.store(1, Ordering::SeqCst);
    assert_eq!(doubled.value(), Some(ModValue::Int(6)));
}

#[test]
fn test_dynamic_value_with_fractional_scaler() {
    let catalog = Arc::new(
        Catalog::standard(StandardHooks {
            frenzy_charges: Arc::new(|| ModValue::Real(1.5)),
            ..StandardHooks::default()
        })
        .unwrap(),
    );
    let evasion = catalog
        .parse("4% increased Evasion Rating per Frenzy Charge")
        .unwrap();
    assert_eq!(evasion.stored_value(), Some(ModValue::Int(4)));
    assert_eq!(evasion.value(), Some(ModValue::Real(6.0)));
}

#[test]
fn test_predicates_are_read_by_consumer() {
    let holding = Arc::new(AtomicBool::new(false));
    let source = Arc::clone(&holding);
    let catalog = Arc::new(
        Catalog::standard(StandardHooks {
            holding_shield: Arc::new(move || source.load(Ordering::SeqCst)),
            ..StandardHooks::default()
        })
        .unwrap(),
    );

    let armour = catalog.parse("+50 to Armour while holding a Shield").unwrap();
    let applies = |m: &Modifier| m.predicates().iter().all(|p| p());

    assert!(!applies(&armour));
    holding.store(true, Ordering::SeqCst);
    assert!(applies(&armour));

    // Results are parsed against the same catalog, so they share the hooks.
    let sum = (&armour + &armour).unwrap();
    assert!(Arc::ptr_eq(sum.catalog(), &catalog));
    holding.store(false, Ordering::SeqCst);
    assert!(!applies(&sum));
}

// ============================================================================
// Custom Catalogs
// ============================================================================

#[test]
fn test_custom_catalog_template() {
    let catalog = Arc::new(
        CatalogBuilder::new()
            .template(TemplateSpec::plain(
                "additional_mana",
                r"[+-][0-9]+ to maximum Mana",
                "{value:+d} to maximum Mana",
                [Stat::Mana],
                StatType::Base,
            ))
            .build()
            .unwrap(),
    );

    let mana = catalog.parse("+30 to maximum Mana").unwrap();
    assert_eq!(mana.targets(), &[Stat::Mana]);
    assert!(matches!(
        catalog.parse("+20 to Strength"),
        Err(ModifierError::NoMatchingTemplate { .. })
    ));
}

#[test]
fn test_identity_is_by_identifier_across_catalogs() {
    let custom = Arc::new(Catalog::standard(StandardHooks::default()).unwrap());
    let a = custom.parse("+20 to Strength").unwrap();
    let b = m("+15 to Strength");
    assert!(a.same_identity(&b));

    let sum = (&a + &b).unwrap();
    assert!(Arc::ptr_eq(sum.catalog(), &custom));
}

#[test]
fn test_records_for_every_variant() {
    let texts = [
        "+20 to Strength",
        "3% more Spell Damage per Power Charge",
        "15% increased Spell Damage while holding a Shield",
        "Cannot be Stunned while holding a Shield",
    ];
    for text in texts {
        let record = m(text).to_record();
        assert_eq!(record.text, text);
        let json = record.to_json().unwrap();
        assert_eq!(ModifierRecord::from_json(&json).unwrap(), record);
    }
}
