//! Dynamically-typed field values
//!
//! A `FieldValue` is one slot of a comparison quadruple. It is either the
//! absent-marker (`Missing`, the field did not exist in the snapshot), an
//! explicit `Null` (the field existed and was unset), or a present scalar.
//!
//! Both sentinels are matched explicitly by the comparison engine; neither is
//! ever confused with the other by equality.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;

/// A present scalar value
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Numeric view: booleans count as 0 and 1
    fn number(&self) -> Option<Number> {
        match self {
            Scalar::Bool(b) => Some(Number::Int(i64::from(*b))),
            Scalar::Int(i) => Some(Number::Int(*i)),
            Scalar::Float(x) => Some(Number::Float(*x)),
            Scalar::Str(_) => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

// 2^63 as f64; every integral float in [-2^63, 2^63) converts to i64 exactly
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn int_eq_float(i: i64, x: f64) -> bool {
    x.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&x) && x as i64 == i
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Int(i), Number::Float(x)) | (Number::Float(x), Number::Int(i)) => {
                int_eq_float(i, x)
            }
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            // Exact numeric equality across bool, int and float
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// One field value as seen in a snapshot
///
/// # Example
///
/// ```
/// use fieldeq_core_types::FieldValue;
///
/// assert_eq!(FieldValue::from("abc"), FieldValue::from("abc".to_string()));
/// assert_eq!(FieldValue::from(3), FieldValue::from(3.0));
/// assert_ne!(FieldValue::Missing, FieldValue::Null);
/// assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// The field did not exist
    #[default]
    Missing,
    /// The field existed and was explicitly unset
    Null,
    /// The field carried a scalar value
    Present(Scalar),
}

impl FieldValue {
    /// Build a string value
    pub fn string(value: impl Into<String>) -> Self {
        FieldValue::Present(Scalar::Str(value.into()))
    }

    /// True for `Missing` and `Null`
    pub fn is_sentinel(&self) -> bool {
        matches!(self, FieldValue::Missing | FieldValue::Null)
    }

    /// The string payload, if this is a present string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Present(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Log-safe summary that never exposes the payload
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// Text form used for containment checks.
///
/// Sentinels never render as the empty string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => f.write_str("not present"),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Present(scalar) => scalar.fmt(f),
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Present(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::string(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::string(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Present(Scalar::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Present(Scalar::Int(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Present(Scalar::Int(i64::from(value)))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Present(Scalar::Float(value))
    }
}

/// `None` maps to an explicit `Null`, never to `Missing`
impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, boolean, number or string scalar")
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FieldValue, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(match i64::try_from(v) {
            Ok(i) => FieldValue::from(i),
            Err(_) => FieldValue::from(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        Ok(FieldValue::from(v))
    }
}

/// Deserializes any self-describing scalar; sequences and maps are rejected.
///
/// An absent key is not visible here: containers mark such fields
/// `#[serde(default)]` so they fall back to `FieldValue::Missing`.
impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// Summary of a field value safe to put in logs
///
/// Field values routinely carry secrets (decoded passwords, tokens), so only
/// the kind and length are shown.
pub struct Redacted<'a>(&'a FieldValue);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FieldValue::Missing => f.write_str("not present"),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Present(Scalar::Bool(_)) => f.write_str("bool"),
            FieldValue::Present(Scalar::Int(_)) => f.write_str("int"),
            FieldValue::Present(Scalar::Float(_)) => f.write_str("float"),
            FieldValue::Present(Scalar::Str(s)) => write!(f, "str(len={})", s.chars().count()),
        }
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
