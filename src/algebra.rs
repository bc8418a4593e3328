//! Composition algebra.
//!
//! Modifiers of the same identity can be added, subtracted and scaled.
//! Results are built by rendering the new value through the left
//! operand's format and parsing the text again, so every result is a
//! modifier the catalog recognizes. In-place variants skip the round
//! trip but produce the same stored value.
//!
//! Operators are also available on references:
//!
//! ```rust
//! use statmod::Modifier;
//!
//! let a = Modifier::from_text("+20 to Strength").unwrap();
//! let b = Modifier::from_text("+15 to Strength").unwrap();
//!
//! assert_eq!((&a + &b).unwrap().text(), "+35 to Strength");
//! assert_eq!((&a - &b).unwrap().text(), "+5 to Strength");
//! assert_eq!((&a * 3i32).unwrap().text(), "+60 to Strength");
//! assert_eq!((4i32 * &a).unwrap().text(), "+80 to Strength");
//! ```

use crate::error::ModifierError;
use crate::modifier::Modifier;
use crate::numeric::ModValue;
use std::ops::{Add, Mul, Sub};

/// Right-hand side of a scaling operation.
#[derive(Debug, Clone, Copy)]
pub enum Scalar<'a> {
    /// A bare number.
    Number(ModValue),
    /// A modifier of the same identity; its stored value is used.
    Modifier(&'a Modifier),
}

impl From<ModValue> for Scalar<'_> {
    fn from(value: ModValue) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar<'_> {
    fn from(value: i64) -> Self {
        Scalar::Number(ModValue::Int(value))
    }
}

impl From<i32> for Scalar<'_> {
    fn from(value: i32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<f64> for Scalar<'_> {
    fn from(value: f64) -> Self {
        Scalar::Number(ModValue::Real(value))
    }
}

impl<'a> From<&'a Modifier> for Scalar<'a> {
    fn from(modifier: &'a Modifier) -> Self {
        Scalar::Modifier(modifier)
    }
}

fn ensure_compatible(left: &Modifier, right: &Modifier) -> Result<(), ModifierError> {
    if left.same_identity(right) {
        Ok(())
    } else {
        Err(ModifierError::IncompatibleModifiers {
            left: left.identifier().to_string(),
            right: right.identifier().to_string(),
        })
    }
}

fn stored(modifier: &Modifier) -> Result<ModValue, ModifierError> {
    modifier
        .stored_value()
        .ok_or_else(|| ModifierError::NotValueBearing {
            identifier: modifier.identifier().to_string(),
        })
}

/// Stored values of two identity-equal, value-bearing modifiers.
fn operands(left: &Modifier, right: &Modifier) -> Result<(ModValue, ModValue), ModifierError> {
    ensure_compatible(left, right)?;
    Ok((stored(left)?, stored(right)?))
}

/// Resolve a scalar to a number, checking identity for modifiers.
fn factor(left: &Modifier, scalar: Scalar<'_>) -> Result<ModValue, ModifierError> {
    match scalar {
        Scalar::Number(value) => Ok(value),
        Scalar::Modifier(right) => operands(left, right).map(|(_, value)| value),
    }
}

/// Render `value` with `left`'s format and parse it again.
fn rebuild(left: &Modifier, value: ModValue) -> Result<Modifier, ModifierError> {
    let (_, text) = left.render_value(value)?;
    Modifier::parse_with(left.catalog(), &text)
}

/// Add two modifiers of the same identity.
///
/// # Errors
///
/// - `IncompatibleModifiers` if the identifiers differ
/// - `NotValueBearing` if either side has no value
/// - `ValueNotRepresentable` if the sum does not fit the format, or its
///   text would classify as a different template
pub fn add(left: &Modifier, right: &Modifier) -> Result<Modifier, ModifierError> {
    let (a, b) = operands(left, right)?;
    rebuild(left, a + b)
}

/// Subtract `right` from `left`. Results may be negative.
///
/// # Errors
///
/// Same as [`add`]. A negative result for a format whose pattern does
/// not accept a sign is not representable.
pub fn subtract(left: &Modifier, right: &Modifier) -> Result<Modifier, ModifierError> {
    let (a, b) = operands(left, right)?;
    rebuild(left, a - b)
}

/// Multiply a modifier by a number or by another modifier's value.
///
/// # Examples
///
/// ```rust
/// use statmod::{algebra, Modifier, ModValue};
///
/// let a = Modifier::from_text("+20 to Strength").unwrap();
/// assert_eq!(algebra::scale(&a, 3).unwrap().text(), "+60 to Strength");
/// assert_eq!(algebra::scale(&a, 1.5).unwrap().stored_value(), Some(ModValue::Int(30)));
/// assert!(algebra::scale(&a, 1.25).is_ok());
/// assert!(algebra::scale(&a, 1.1).is_err());
/// ```
pub fn scale<'a>(left: &Modifier, scalar: impl Into<Scalar<'a>>) -> Result<Modifier, ModifierError> {
    let k = factor(left, scalar.into())?;
    rebuild(left, stored(left)? * k)
}

/// Reflected scaling, `k × modifier`. Same result as [`scale`].
pub fn scale_by<'a>(scalar: impl Into<Scalar<'a>>, right: &Modifier) -> Result<Modifier, ModifierError> {
    let k = factor(right, scalar.into())?;
    rebuild(right, k * stored(right)?)
}

/// In-place [`add`]. On error `left` is unchanged.
pub fn add_in_place(left: &mut Modifier, right: &Modifier) -> Result<(), ModifierError> {
    let (a, b) = operands(left, right)?;
    left.set_value(a + b)
}

/// In-place [`subtract`]. On error `left` is unchanged.
pub fn subtract_in_place(left: &mut Modifier, right: &Modifier) -> Result<(), ModifierError> {
    let (a, b) = operands(left, right)?;
    left.set_value(a - b)
}

/// In-place [`scale`]. On error `left` is unchanged.
pub fn scale_in_place<'a>(
    left: &mut Modifier,
    scalar: impl Into<Scalar<'a>>,
) -> Result<(), ModifierError> {
    let k = factor(left, scalar.into())?;
    let value = stored(left)? * k;
    left.set_value(value)
}

impl Modifier {
    /// See [`add`].
    pub fn try_add(&self, other: &Modifier) -> Result<Modifier, ModifierError> {
        add(self, other)
    }

    /// See [`subtract`].
    pub fn try_sub(&self, other: &Modifier) -> Result<Modifier, ModifierError> {
        subtract(self, other)
    }

    /// See [`scale`].
    pub fn try_scale<'a>(&self, scalar: impl Into<Scalar<'a>>) -> Result<Modifier, ModifierError> {
        scale(self, scalar)
    }

    /// See [`add_in_place`].
    pub fn add_in_place(&mut self, other: &Modifier) -> Result<(), ModifierError> {
        add_in_place(self, other)
    }

    /// See [`subtract_in_place`].
    pub fn sub_in_place(&mut self, other: &Modifier) -> Result<(), ModifierError> {
        subtract_in_place(self, other)
    }

    /// See [`scale_in_place`].
    pub fn scale_in_place<'a>(&mut self, scalar: impl Into<Scalar<'a>>) -> Result<(), ModifierError> {
        scale_in_place(self, scalar)
    }
}

impl Add<&Modifier> for &Modifier {
    type Output = Result<Modifier, ModifierError>;

    fn add(self, other: &Modifier) -> Self::Output {
        add(self, other)
    }
}

impl Sub<&Modifier> for &Modifier {
    type Output = Result<Modifier, ModifierError>;

    fn sub(self, other: &Modifier) -> Self::Output {
        subtract(self, other)
    }
}

impl Mul<&Modifier> for &Modifier {
    type Output = Result<Modifier, ModifierError>;

    fn mul(self, other: &Modifier) -> Self::Output {
        scale(self, other)
    }
}

macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<$t> for &Modifier {
                type Output = Result<Modifier, ModifierError>;

                fn mul(self, k: $t) -> Self::Output {
                    scale(self, k)
                }
            }

            impl Mul<&Modifier> for $t {
                type Output = Result<Modifier, ModifierError>;

                fn mul(self, modifier: &Modifier) -> Self::Output {
                    scale_by(self, modifier)
                }
            }
        )*
    };
}

impl_scalar_mul!(i32, i64, f64, ModValue);
