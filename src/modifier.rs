//! Modifier value model.
//!
//! A `Modifier` is one parsed modifier: a shared reference to the
//! template it matched, the catalog it was parsed from, an optional
//! stored value and its canonical text. The four shapes a modifier can
//! take are told apart by `ModifierVariant`.
//!
//! Predicates of conditional modifiers are exposed but never evaluated
//! here; deciding whether a conditional modifier applies is up to the
//! consumer.

use crate::catalog::Catalog;
use crate::classifier::{classify, classify_and_parse, Classification};
use crate::error::ModifierError;
use crate::format::TextFormat;
use crate::numeric::ModValue;
use crate::stat::{Stat, StatType};
use crate::template::{Family, Hook, Predicate, Scaler, Template};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Shape of a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierVariant {
    /// Conditional modifier without a value.
    Conditional,
    /// Plain value modifier.
    Value,
    /// Value scaled by an external number at read time.
    DynamicValue,
    /// Value gated by external predicates.
    ConditionalValue,
}

/// A parsed modifier.
///
/// # Examples
///
/// ```rust
/// use statmod::{Modifier, ModValue, Stat, StatType};
///
/// let m = Modifier::from_text("+20 to Strength").unwrap();
/// assert_eq!(m.identifier(), "additional_strength");
/// assert_eq!(m.targets(), &[Stat::Strength]);
/// assert_eq!(m.kind(), StatType::Base);
/// assert_eq!(m.value(), Some(ModValue::Int(20)));
/// assert_eq!(m.text(), "+20 to Strength");
/// ```
#[derive(Clone)]
pub struct Modifier {
    catalog: Arc<Catalog>,
    template: Arc<Template>,
    value: Option<ModValue>,
    text: String,
}

impl Modifier {
    /// Parse modifier text with the global catalog.
    ///
    /// # Errors
    ///
    /// `NoMatchingTemplate` or `ParameterExtractionFailed`, see
    /// [`classify_and_parse`].
    pub fn from_text(text: &str) -> Result<Self, ModifierError> {
        Self::parse_with(&Catalog::global()?, text)
    }

    /// Parse modifier text with a specific catalog.
    pub fn parse_with(catalog: &Arc<Catalog>, text: &str) -> Result<Self, ModifierError> {
        let classification = classify_and_parse(catalog, text)?;
        Self::instantiate(Arc::clone(catalog), classification, text)
    }

    /// Build a modifier from a classification.
    fn instantiate(
        catalog: Arc<Catalog>,
        Classification {
            template,
            parameters,
        }: Classification,
        source: &str,
    ) -> Result<Self, ModifierError> {
        let value = parameters.value();
        // Rendering fails only for numbers the kind cannot hold, such as
        // a real literal too large for f64.
        let text = template.format().render(value).ok_or_else(|| {
            ModifierError::ParameterExtractionFailed {
                identifier: template.identifier().to_string(),
                text: source.to_string(),
            }
        })?;
        Ok(Self {
            catalog,
            template,
            value,
            text,
        })
    }

    /// The template identifier; decides which modifiers combine.
    pub fn identifier(&self) -> &str {
        self.template.identifier()
    }

    /// Target stats, in order.
    pub fn targets(&self) -> &[Stat] {
        self.template.targets()
    }

    /// Effect kind.
    pub fn kind(&self) -> StatType {
        self.template.kind()
    }

    /// Template family.
    pub fn family(&self) -> Family {
        self.template.family()
    }

    /// Shape of this modifier.
    pub fn variant(&self) -> ModifierVariant {
        match (self.family(), self.value) {
            (Family::Plain, _) => ModifierVariant::Value,
            (Family::Dynamic, _) => ModifierVariant::DynamicValue,
            (Family::Conditional, Some(_)) => ModifierVariant::ConditionalValue,
            (Family::Conditional, None) => ModifierVariant::Conditional,
        }
    }

    /// The template this modifier was parsed from.
    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    /// The catalog this modifier was parsed from.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The template's format.
    pub fn format(&self) -> &TextFormat {
        self.template.format()
    }

    /// Canonical text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The stored value, before any dynamic scaling.
    pub fn stored_value(&self) -> Option<ModValue> {
        self.value
    }

    /// The effective value.
    ///
    /// For dynamic modifiers this is `stored × scaler()`, with the scaler
    /// called on every read. Predicates are not consulted.
    pub fn value(&self) -> Option<ModValue> {
        let stored = self.value?;
        Some(match self.template.hook() {
            Hook::Scaler(scaler) => stored * scaler(),
            Hook::Plain | Hook::Predicates(_) => stored,
        })
    }

    /// The scaler of a dynamic modifier.
    pub fn scaler(&self) -> Option<&Scaler> {
        match self.template.hook() {
            Hook::Scaler(scaler) => Some(scaler),
            _ => None,
        }
    }

    /// Predicates of a conditional modifier; empty for other families.
    pub fn predicates(&self) -> &[Predicate] {
        match self.template.hook() {
            Hook::Predicates(predicates) => predicates,
            _ => &[],
        }
    }

    /// Whether both modifiers come from the same template.
    ///
    /// This is a "same kind of modifier" test; values are ignored.
    pub fn same_identity(&self, other: &Modifier) -> bool {
        self.identifier() == other.identifier()
    }

    /// Coerce `value` to the format's kind and render it.
    ///
    /// The text must classify back to this modifier's own template in its
    /// catalog; text that matches nothing, or that an earlier template
    /// claims first, makes the value unrepresentable.
    pub(crate) fn render_value(&self, value: ModValue) -> Result<(ModValue, String), ModifierError> {
        let not_representable = || ModifierError::ValueNotRepresentable {
            identifier: self.identifier().to_string(),
            value: value.to_string(),
        };
        let kind = self.format().kind().ok_or_else(|| ModifierError::NotValueBearing {
            identifier: self.identifier().to_string(),
        })?;
        let coerced = kind.coerce(value).ok_or_else(not_representable)?;
        let text = self
            .format()
            .render(Some(coerced))
            .ok_or_else(not_representable)?;

        match classify(&self.catalog, &text) {
            Some(template) if template.identifier() == self.identifier() => Ok((coerced, text)),
            found => {
                debug!(
                    text = %text,
                    expected = self.identifier(),
                    actual = ?found.map(|t| t.identifier()),
                    "rendered value does not classify to its own template"
                );
                Err(not_representable())
            }
        }
    }

    /// Replace the stored value without re-parsing.
    ///
    /// Accepts exactly the values [`render_value`](Self::render_value)
    /// accepts. On error the modifier is left unchanged.
    pub(crate) fn set_value(&mut self, value: ModValue) -> Result<(), ModifierError> {
        let (value, text) = self.render_value(value)?;
        self.value = Some(value);
        self.text = text;
        Ok(())
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifier")
            .field("identifier", &self.identifier())
            .field("variant", &self.variant())
            .field("value", &self.value)
            .field("text", &self.text)
            .finish()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Modifier {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}
