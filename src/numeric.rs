//! Numeric types for modifier values.
//!
//! A modifier stores either an integer or a real number, depending on
//! the numeric grammar its template's format declares. Arithmetic
//! between the two promotes to real.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Lower and upper bounds of `i64` as exact `f64` values.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// A modifier's stored numeric value.
///
/// Integer arithmetic that overflows `i64` falls back to real
/// arithmetic instead of wrapping.
///
/// # Examples
///
/// ```rust
/// use statmod::ModValue;
///
/// let a = ModValue::Int(20);
/// let b = ModValue::Real(1.5);
///
/// assert_eq!(a + ModValue::Int(15), ModValue::Int(35));
/// assert_eq!(a * b, ModValue::Real(30.0));
/// // Equality is numeric across variants.
/// assert_eq!(ModValue::Int(30), ModValue::Real(30.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModValue {
    /// Integer value.
    Int(i64),
    /// Real value.
    Real(f64),
}

impl ModValue {
    /// Convert to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            ModValue::Int(i) => i as f64,
            ModValue::Real(f) => f,
        }
    }

    /// Whether this value is an integer.
    pub fn is_int(self) -> bool {
        matches!(self, ModValue::Int(_))
    }

    fn combine(
        self,
        other: Self,
        int_op: fn(i64, i64) -> Option<i64>,
        real_op: fn(f64, f64) -> f64,
    ) -> Self {
        match (self, other) {
            (ModValue::Int(a), ModValue::Int(b)) => int_op(a, b)
                .map(ModValue::Int)
                .unwrap_or_else(|| ModValue::Real(real_op(a as f64, b as f64))),
            (a, b) => ModValue::Real(real_op(a.to_f64(), b.to_f64())),
        }
    }
}

impl PartialEq for ModValue {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (ModValue::Int(a), ModValue::Int(b)) => a == b,
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

impl Add for ModValue {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.combine(other, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for ModValue {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.combine(other, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for ModValue {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.combine(other, i64::checked_mul, |a, b| a * b)
    }
}

impl From<i64> for ModValue {
    fn from(i: i64) -> Self {
        ModValue::Int(i)
    }
}

impl From<i32> for ModValue {
    fn from(i: i32) -> Self {
        ModValue::Int(i64::from(i))
    }
}

impl From<f64> for ModValue {
    fn from(f: f64) -> Self {
        ModValue::Real(f)
    }
}

impl fmt::Display for ModValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModValue::Int(i) => write!(f, "{}", i),
            ModValue::Real(r) => write!(f, "{}", r),
        }
    }
}

/// Numeric grammar declared by a format placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    /// Whole numbers (`{value:d}`).
    Integer,
    /// Decimal numbers (`{value:f}`).
    Real,
}

impl NumericKind {
    /// Convert a value into this kind, if it can be represented exactly.
    ///
    /// Integral reals narrow to integers for the integer kind; integers
    /// widen to reals for the real kind. Non-finite values are never
    /// representable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::{ModValue, NumericKind};
    ///
    /// assert_eq!(NumericKind::Integer.coerce(ModValue::Real(30.0)), Some(ModValue::Int(30)));
    /// assert_eq!(NumericKind::Integer.coerce(ModValue::Real(22.5)), None);
    /// assert_eq!(NumericKind::Real.coerce(ModValue::Int(3)), Some(ModValue::Real(3.0)));
    /// ```
    pub fn coerce(self, value: ModValue) -> Option<ModValue> {
        match (self, value) {
            (NumericKind::Integer, ModValue::Int(i)) => Some(ModValue::Int(i)),
            (NumericKind::Integer, ModValue::Real(f)) => {
                if f.is_finite() && f.fract() == 0.0 && (I64_MIN_F64..I64_END_F64).contains(&f) {
                    Some(ModValue::Int(f as i64))
                } else {
                    None
                }
            }
            (NumericKind::Real, v) => {
                let f = v.to_f64();
                f.is_finite().then_some(ModValue::Real(f))
            }
        }
    }

    /// Parse a decimal number of this kind.
    ///
    /// Accepts an optional sign followed by digits; the real kind also
    /// accepts a fractional part. Anything else (exponents, `inf`,
    /// whitespace) is rejected.
    pub fn parse(self, s: &str) -> Option<ModValue> {
        let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits, None),
        };
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) {
            return None;
        }
        match (self, fraction) {
            (NumericKind::Integer, None) => s.parse::<i64>().ok().map(ModValue::Int),
            (NumericKind::Integer, Some(_)) => None,
            (NumericKind::Real, Some(fraction)) if !all_digits(fraction) => None,
            (NumericKind::Real, _) => s.parse::<f64>().ok().map(ModValue::Real),
        }
    }
}
