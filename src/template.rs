//! Modifier template module.
//!
//! A template is the static definition of one recognized modifier
//! shape: recognition pattern, text format, target stats, effect kind
//! and, depending on its family, a scaler or a predicate list.
//!
//! Templates are authored as `TemplateSpec` values and compiled into
//! `Template`s when a catalog is built. All validation happens during
//! compilation; a compiled template is immutable.

use crate::error::ModifierError;
use crate::format::TextFormat;
use crate::numeric::ModValue;
use crate::stat::{Stat, StatType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// External multiplier read every time a dynamic modifier's value is read.
pub type Scaler = Arc<dyn Fn() -> ModValue + Send + Sync>;

/// External condition attached to a conditional modifier.
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Template family.
///
/// The classifier scans families in `Family::ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Plain numeric modifiers.
    Plain,
    /// Numeric modifiers scaled by an external number.
    Dynamic,
    /// Modifiers gated by external predicates.
    Conditional,
}

impl Family {
    /// Classification order.
    pub const ORDER: [Family; 3] = [Family::Plain, Family::Dynamic, Family::Conditional];
}

/// Family-specific behavior of a template.
#[derive(Clone)]
pub enum Hook {
    /// No behavior.
    Plain,
    /// Read-time multiplier.
    Scaler(Scaler),
    /// Applicability conditions, all of which must hold.
    Predicates(Vec<Predicate>),
}

impl Hook {
    /// The family this hook belongs to.
    pub fn family(&self) -> Family {
        match self {
            Hook::Plain => Family::Plain,
            Hook::Scaler(_) => Family::Dynamic,
            Hook::Predicates(_) => Family::Conditional,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Plain => f.write_str("Plain"),
            Hook::Scaler(_) => f.write_str("Scaler(<fn>)"),
            Hook::Predicates(predicates) => write!(f, "Predicates(<{} fn>)", predicates.len()),
        }
    }
}

/// Declarative form of a template.
///
/// Must be compiled (usually by `CatalogBuilder::build`) before use.
///
/// # Examples
///
/// ```rust
/// use statmod::template::TemplateSpec;
/// use statmod::{Stat, StatType};
///
/// let spec = TemplateSpec::plain(
///     "additional_strength",
///     r"[+-][0-9]+ to Strength",
///     "{value:+d} to Strength",
///     [Stat::Strength],
///     StatType::Base,
/// );
/// let template = spec.compile().unwrap();
/// assert!(template.is_match("+20 to Strength"));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateSpec {
    /// Globally unique key.
    pub identifier: String,
    /// Recognition pattern; always matched against the whole text.
    pub pattern: String,
    /// Parse/render format.
    pub format: String,
    /// Target stats, in order.
    pub targets: Vec<Stat>,
    /// Effect kind.
    pub kind: StatType,
    /// Family behavior.
    pub hook: Hook,
}

impl TemplateSpec {
    /// A plain value template.
    pub fn plain(
        identifier: impl Into<String>,
        pattern: impl Into<String>,
        format: impl Into<String>,
        targets: impl IntoIterator<Item = Stat>,
        kind: StatType,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            pattern: pattern.into(),
            format: format.into(),
            targets: targets.into_iter().collect(),
            kind,
            hook: Hook::Plain,
        }
    }

    /// A dynamically scaled value template.
    pub fn dynamic(
        identifier: impl Into<String>,
        pattern: impl Into<String>,
        format: impl Into<String>,
        targets: impl IntoIterator<Item = Stat>,
        kind: StatType,
        scaler: Scaler,
    ) -> Self {
        Self {
            hook: Hook::Scaler(scaler),
            ..Self::plain(identifier, pattern, format, targets, kind)
        }
    }

    /// A conditional template. The format may omit the placeholder.
    pub fn conditional(
        identifier: impl Into<String>,
        pattern: impl Into<String>,
        format: impl Into<String>,
        targets: impl IntoIterator<Item = Stat>,
        kind: StatType,
        predicates: Vec<Predicate>,
    ) -> Self {
        Self {
            hook: Hook::Predicates(predicates),
            ..Self::plain(identifier, pattern, format, targets, kind)
        }
    }

    /// The family this spec belongs to.
    pub fn family(&self) -> Family {
        self.hook.family()
    }

    /// Compile into a template.
    ///
    /// # Errors
    ///
    /// - `EmptyTargets` if no target stat is given
    /// - `InvalidPattern` if the pattern does not compile
    /// - `InvalidFormat` if the format does not parse
    /// - `MissingValuePlaceholder` if a plain or dynamic format has no
    ///   `value` placeholder
    pub fn compile(self) -> Result<Template, ModifierError> {
        if self.targets.is_empty() {
            return Err(ModifierError::EmptyTargets(self.identifier));
        }

        let pattern = Regex::new(&format!("^(?:{})$", self.pattern)).map_err(|e| {
            ModifierError::InvalidPattern {
                identifier: self.identifier.clone(),
                reason: e.to_string(),
            }
        })?;

        let format =
            TextFormat::parse(&self.format).map_err(|e| ModifierError::InvalidFormat {
                identifier: self.identifier.clone(),
                reason: e.to_string(),
            })?;

        if !format.has_value() && self.family() != Family::Conditional {
            return Err(ModifierError::MissingValuePlaceholder(self.identifier));
        }

        Ok(Template {
            identifier: self.identifier,
            pattern,
            format,
            targets: self.targets,
            kind: self.kind,
            hook: self.hook,
        })
    }
}

/// A compiled, immutable modifier template.
pub struct Template {
    identifier: String,
    pattern: Regex,
    format: TextFormat,
    targets: Vec<Stat>,
    kind: StatType,
    hook: Hook,
}

impl Template {
    /// The unique key of this template.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The compiled, fully anchored recognition pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The parse/render format.
    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    /// Target stats, in order.
    pub fn targets(&self) -> &[Stat] {
        &self.targets
    }

    /// Effect kind.
    pub fn kind(&self) -> StatType {
        self.kind
    }

    /// Family behavior.
    pub fn hook(&self) -> &Hook {
        &self.hook
    }

    /// The family of this template.
    pub fn family(&self) -> Family {
        self.hook.family()
    }

    /// Whether the recognition pattern matches the whole text.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("identifier", &self.identifier)
            .field("pattern", &self.pattern.as_str())
            .field("format", &self.format.as_str())
            .field("targets", &self.targets)
            .field("kind", &self.kind)
            .field("hook", &self.hook)
            .finish()
    }
}
