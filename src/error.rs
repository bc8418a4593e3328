//! Error types for modifier parsing and composition.
//!
//! All errors that can occur while building a catalog, classifying text
//! or combining modifiers are represented by the `ModifierError` enum.

use thiserror::Error;

/// Format a list of stat keys as a readable string.
fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }
    items.join(", ")
}

/// Errors that can occur while parsing or composing modifiers.
///
/// # Examples
///
/// ```rust
/// use statmod::{Modifier, ModifierError};
///
/// let err = Modifier::from_text("not a real modifier").unwrap_err();
/// assert_eq!(
///     err,
///     ModifierError::NoMatchingTemplate { text: "not a real modifier".to_string() }
/// );
/// println!("{}", err); // "No modifier template matches 'not a real modifier'"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModifierError {
    /// The text matches no template in any family.
    #[error("No modifier template matches '{text}'")]
    NoMatchingTemplate { text: String },

    /// A template's pattern matched but its format could not extract
    /// the parameters.
    ///
    /// This indicates a catalog authoring bug: the recognition pattern
    /// is more permissive than the format.
    #[error("Template '{identifier}' matched '{text}' but its parameters could not be extracted")]
    ParameterExtractionFailed { identifier: String, text: String },

    /// Arithmetic between modifiers of different templates.
    #[error("Cannot combine modifier '{left}' with modifier '{right}'")]
    IncompatibleModifiers { left: String, right: String },

    /// Arithmetic on a modifier that carries no value.
    #[error("Modifier '{identifier}' carries no value")]
    NotValueBearing { identifier: String },

    /// An arithmetic result that the template's numeric grammar cannot
    /// express (e.g. a fraction for an integer format).
    #[error("Value {value} cannot be represented by template '{identifier}'")]
    ValueNotRepresentable { identifier: String, value: String },

    /// Two templates in one catalog share an identifier.
    #[error("Duplicate template identifier: {0}")]
    DuplicateIdentifier(String),

    /// A recognition pattern failed to compile.
    #[error("Invalid pattern for template {identifier}: {reason}")]
    InvalidPattern { identifier: String, reason: String },

    /// A format string failed to parse.
    #[error("Invalid format for template {identifier}: {reason}")]
    InvalidFormat { identifier: String, reason: String },

    /// A template targets no stat.
    #[error("Template {0} has no target stats")]
    EmptyTargets(String),

    /// A value-carrying template was authored without a `value` placeholder.
    #[error("Template {0} requires a value placeholder in its format")]
    MissingValuePlaceholder(String),

    /// A stat key that names no known stat.
    #[error("Unknown stat key '{key}', expected one of: {}", format_list(.expected))]
    UnknownStat { key: String, expected: Vec<String> },
}
