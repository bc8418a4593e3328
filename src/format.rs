//! Text format module.
//!
//! A `TextFormat` is a literal string with at most one numeric
//! placeholder named `value`. The same format renders a value into
//! modifier text and, inverted, extracts the value back out of it.
//!
//! Placeholder syntax:
//!
//! | placeholder   | kind    | rendering            |
//! |---------------|---------|----------------------|
//! | `{value:d}`   | integer | `20`, `-5`           |
//! | `{value:+d}`  | integer | `+20`, `-5`, `+0`    |
//! | `{value:f}`   | real    | `2.5`, `-1`          |
//! | `{value:+f}`  | real    | `+2.5`, `-1`         |
//!
//! `{{` and `}}` produce literal braces.

use crate::numeric::{ModValue, NumericKind};
use thiserror::Error;

/// Errors produced while parsing a format string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),

    #[error("unknown placeholder '{{{0}}}', expected {{value:d}}, {{value:+d}}, {{value:f}} or {{value:+f}}")]
    UnknownPlaceholder(String),

    #[error("more than one placeholder")]
    MultiplePlaceholders,
}

/// The numeric slot of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Numeric grammar of the slot.
    pub kind: NumericKind,
    /// Whether non-negative values render with an explicit `+`.
    pub signed: bool,
}

impl Placeholder {
    fn from_spec(spec: &str) -> Result<Self, FormatError> {
        let (kind, signed) = match spec {
            "value:d" => (NumericKind::Integer, false),
            "value:+d" => (NumericKind::Integer, true),
            "value:f" => (NumericKind::Real, false),
            "value:+f" => (NumericKind::Real, true),
            other => return Err(FormatError::UnknownPlaceholder(other.to_string())),
        };
        Ok(Self { kind, signed })
    }

    fn render(self, value: ModValue) -> Option<String> {
        let value = match self.kind.coerce(value)? {
            // Avoid rendering "-0".
            ModValue::Real(r) if r == 0.0 => ModValue::Real(0.0),
            v => v,
        };
        let negative = value.to_f64() < 0.0;
        Some(if self.signed && !negative {
            format!("+{}", value)
        } else {
            value.to_string()
        })
    }
}

/// Parameters extracted from modifier text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Parameters {
    value: Option<ModValue>,
}

impl Parameters {
    /// Parameters carrying a value.
    pub fn with_value(value: ModValue) -> Self {
        Self { value: Some(value) }
    }

    /// Look up a parameter by name.
    ///
    /// Only `value` exists; every other name yields `None`.
    pub fn get(&self, name: &str) -> Option<ModValue> {
        match name {
            "value" => self.value,
            _ => None,
        }
    }

    /// The `value` parameter, if the format declares one.
    pub fn value(&self) -> Option<ModValue> {
        self.value
    }
}

/// A parse/render pattern with at most one `value` placeholder.
///
/// # Examples
///
/// ```rust
/// use statmod::format::TextFormat;
/// use statmod::ModValue;
///
/// let fmt = TextFormat::parse("{value:+d} to Strength").unwrap();
/// assert_eq!(fmt.render(Some(ModValue::Int(20))).as_deref(), Some("+20 to Strength"));
///
/// let params = fmt.extract("+35 to Strength").unwrap();
/// assert_eq!(params.value(), Some(ModValue::Int(35)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextFormat {
    source: String,
    prefix: String,
    placeholder: Option<Placeholder>,
    suffix: String,
}

impl TextFormat {
    /// Parse a format string.
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholder = None;
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            let literal = match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    '{'
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    '}'
                }
                '{' => {
                    let start = pos + 1;
                    let end = source[start..]
                        .find('}')
                        .map(|offset| start + offset)
                        .ok_or(FormatError::UnclosedPlaceholder(pos))?;
                    if placeholder.is_some() {
                        return Err(FormatError::MultiplePlaceholders);
                    }
                    placeholder = Some(Placeholder::from_spec(&source[start..end])?);
                    while chars.next_if(|&(i, _)| i <= end).is_some() {}
                    continue;
                }
                '}' => return Err(FormatError::UnmatchedBrace(pos)),
                c => c,
            };
            if placeholder.is_some() {
                suffix.push(literal);
            } else {
                prefix.push(literal);
            }
        }

        Ok(Self {
            source: source.to_string(),
            prefix,
            placeholder,
            suffix,
        })
    }

    /// The format string this was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The placeholder, if any.
    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    /// Numeric kind of the `value` placeholder, if any.
    pub fn kind(&self) -> Option<NumericKind> {
        self.placeholder.map(|p| p.kind)
    }

    /// Whether the format declares a `value` placeholder.
    pub fn has_value(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Render text for a value.
    ///
    /// Returns `None` when the value does not fit the format: a value
    /// for a format without placeholder, a missing value for one with a
    /// placeholder, or a number the placeholder's kind cannot represent.
    pub fn render(&self, value: Option<ModValue>) -> Option<String> {
        match (self.placeholder, value) {
            (None, None) => Some(self.prefix.clone()),
            (Some(placeholder), Some(value)) => {
                let number = placeholder.render(value)?;
                Some(format!("{}{}{}", self.prefix, number, self.suffix))
            }
            _ => None,
        }
    }

    /// Extract parameters from text, inverting `render`.
    ///
    /// Returns `None` if the literal parts do not match or the number
    /// does not parse as the placeholder's kind. A sign is accepted even
    /// when the placeholder does not render one.
    pub fn extract(&self, text: &str) -> Option<Parameters> {
        let Some(placeholder) = self.placeholder else {
            return (text == self.prefix).then(Parameters::default);
        };
        let number = text
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        placeholder.kind.parse(number).map(Parameters::with_value)
    }
}

impl std::fmt::Display for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
