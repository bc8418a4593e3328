//! # statmod - Textual Game-Stat Modifier Engine
//!
//! Turns modifier text such as `"+20 to Strength"` or
//! `"15% increased Spell Damage while holding a Shield"` into typed
//! values and combines them arithmetically without losing which
//! modifier they are.
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! ```text
//! text → [Classifier] → Modifier → [Algebra] → text → [Classifier] → Modifier
//!              ↑
//!          [Catalog]
//! ```
//!
//! 1. **Catalog** holds templates in three ordered families: plain,
//!    dynamic (scaled by an external number) and conditional (gated by
//!    external predicates)
//! 2. **Classifier** picks the first template whose pattern matches and
//!    extracts the value with the template's format
//! 3. **Modifier** carries the template, the stored value and the
//!    canonical text
//! 4. **Algebra** adds, subtracts and scales modifiers of the same
//!    identity, building every result by rendering and re-parsing text
//!
//! ### What consumers read
//!
//! `identifier()`, `targets()`, `kind()`, and either `value()` (with
//! dynamic scaling applied) or `predicates()`. The engine never
//! evaluates predicates itself.
//!
//! ## Example
//!
//! ```rust
//! use statmod::*;
//!
//! let a = Modifier::from_text("+20 to Strength").unwrap();
//! let b = Modifier::from_text("+15 to Strength").unwrap();
//! assert_eq!((&a + &b).unwrap().text(), "+35 to Strength");
//!
//! let shield = Modifier::from_text("15% increased Spell Damage while holding a Shield").unwrap();
//! assert_eq!(shield.targets(), &[Stat::SpellDamage]);
//! assert_eq!(shield.kind(), StatType::Increased);
//!
//! let other = Modifier::from_text("+15% increased Strength").unwrap();
//! assert!(matches!(&a + &other, Err(ModifierError::IncompatibleModifiers { .. })));
//! ```
//!
//! ## Modules
//!
//! - [`stat`] - Stat identities and effect kinds
//! - [`numeric`] - Integer/real modifier values
//! - [`format`] - Render/extract text formats
//! - [`template`] - Template definitions
//! - [`catalog`] - Template catalog and standard templates
//! - [`classifier`] - Text classification
//! - [`modifier`] - Modifier values
//! - [`algebra`] - Modifier arithmetic
//! - [`record`] - Serializable snapshots for consumers
//! - [`error`] - Error types

pub mod algebra;
pub mod catalog;
pub mod classifier;
pub mod error;
pub mod format;
pub mod modifier;
pub mod numeric;
pub mod record;
pub mod stat;
pub mod template;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogBuilder, StandardHooks};
pub use classifier::{classify_and_parse, Classification};
pub use error::ModifierError;
pub use modifier::{Modifier, ModifierVariant};
pub use numeric::{ModValue, NumericKind};
pub use record::ModifierRecord;
pub use stat::{Stat, StatType};
pub use template::{Family, Predicate, Scaler, Template, TemplateSpec};

// Re-export algebra entry points
pub use algebra::{
    add, add_in_place, scale, scale_by, scale_in_place, subtract, subtract_in_place, Scalar,
};
