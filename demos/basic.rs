//! Basic example: Parsing and combining modifier text
//!
//! This example demonstrates:
//! - Parsing modifiers against the standard catalog
//! - Adding, subtracting and scaling modifiers
//! - Wiring dynamic and conditional templates to game state

use statmod::catalog::StandardHooks;
use statmod::*;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

fn main() -> Result<(), ModifierError> {
    // Parse two modifiers of the same identity
    println!("Parsing modifiers:");
    let ring = Modifier::from_text("+20 to Strength")?;
    let amulet = Modifier::from_text("+15 to Strength")?;
    println!("  - {} ({})", ring, ring.identifier());
    println!("  - {} ({})", amulet, amulet.identifier());

    // Combine them
    println!("\nCombining:");
    println!("  sum:        {}", (&ring + &amulet)?);
    println!("  difference: {}", (&ring - &amulet)?);
    println!("  tripled:    {}", (&ring * 3i32)?);

    // Same target, different identity
    let percent = Modifier::from_text("+15% increased Strength")?;
    match &ring + &percent {
        Ok(m) => println!("  unexpected: {}", m),
        Err(e) => println!("  rejected:   {}", e),
    }

    // Hook the standard catalog up to some game state
    let charges = Arc::new(AtomicI64::new(2));
    let shield = Arc::new(AtomicBool::new(true));
    let hooks = {
        let charges = Arc::clone(&charges);
        let shield = Arc::clone(&shield);
        StandardHooks {
            power_charges: Arc::new(move || ModValue::Int(charges.load(Ordering::SeqCst))),
            holding_shield: Arc::new(move || shield.load(Ordering::SeqCst)),
            ..StandardHooks::default()
        }
    };
    let catalog = Arc::new(Catalog::standard(hooks)?);

    println!("\n=== Game State ===");
    let per_charge = catalog.parse("3% more Spell Damage per Power Charge")?;
    let conditional = catalog.parse("15% increased Spell Damage while holding a Shield")?;

    for (count, holding) in [(2, true), (4, false)] {
        charges.store(count, Ordering::SeqCst);
        shield.store(holding, Ordering::SeqCst);
        let applies = conditional.predicates().iter().all(|p| p());

        println!("\nPower charges: {}, holding shield: {}", count, holding);
        println!(
            "  {} -> {:?} {:?} {}",
            per_charge,
            per_charge.targets(),
            per_charge.kind(),
            per_charge.value().map_or("-".to_string(), |v| v.to_string())
        );
        println!(
            "  {} -> {}",
            conditional,
            if applies { "applies" } else { "inactive" }
        );
    }

    // Snapshot for an aggregator
    println!("\nRecord:");
    match per_charge.to_record().to_json() {
        Ok(json) => println!("  {}", json),
        Err(e) => println!("  failed to serialize: {}", e),
    }

    Ok(())
}
