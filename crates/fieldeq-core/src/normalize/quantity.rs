//! Kubernetes-style resource quantity canonicalization.
//!
//! A quantity is `[+-]? number suffix?` where the number is `digits`,
//! `digits.`, `digits.digits` or `.digits`, and the suffix is one of:
//!
//! - binary SI: `Ki Mi Gi Ti Pi Ei` (powers of 1024)
//! - decimal SI: `n u m k M G T P E`
//! - decimal exponent: `e`/`E` followed by an optionally signed integer
//!
//! The canonical form is the exact value rounded to milli precision away
//! from zero (how Kubernetes reads a quantity's milli value), written as a
//! plain decimal with at most three fractional digits and no trailing zeros.
//!
//! | input            | canonical      |
//! |------------------|----------------|
//! | `1e3`            | `1000`         |
//! | `1.5k`           | `1500`         |
//! | `-448017308m`    | `-448017.308`  |
//! | `-.4272625998Mi` | `-448017.308`  |
//! | `0.0001`         | `0.001`        |

use fieldeq_core_types::FieldValue;
use std::borrow::Cow;

/// Canonicalizes numeric quantities so differently-written amounts compare
/// equal.
///
/// Implementations must be total: anything they do not recognize is
/// returned unchanged (borrowed).
pub trait QuantityCanonicalizer: Send + Sync {
    fn canonicalize<'a>(&self, value: &'a FieldValue) -> Cow<'a, FieldValue>;
}

/// Canonicalizer for Kubernetes resource quantity strings
///
/// # Example
/// ```
/// use fieldeq_core::{FieldValue, KubeQuantity, QuantityCanonicalizer};
///
/// let input = FieldValue::from("2Ki");
/// let canonical = KubeQuantity.canonicalize(&input);
/// assert_eq!(canonical.as_ref(), &FieldValue::from("2048"));
///
/// let untouched = FieldValue::from("two");
/// assert_eq!(KubeQuantity.canonicalize(&untouched).as_ref(), &untouched);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KubeQuantity;

impl QuantityCanonicalizer for KubeQuantity {
    fn canonicalize<'a>(&self, value: &'a FieldValue) -> Cow<'a, FieldValue> {
        match value.as_str() {
            Some(text) => match canonical_quantity(text) {
                Some(canonical) if canonical != text => Cow::Owned(FieldValue::from(canonical)),
                _ => Cow::Borrowed(value),
            },
            None => Cow::Borrowed(value),
        }
    }
}

/// Canonical decimal form of a quantity string, or `None` if `text` is not
/// a quantity (or too large to represent).
pub fn canonical_quantity(text: &str) -> Option<String> {
    let quantity = parse_quantity(text)?;
    quantity.milli_value().map(format_milli)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quantity {
    negative: bool,
    /// All digits of the number with the decimal point removed
    mantissa: u128,
    /// Power of ten applied to the mantissa
    scale: i32,
    /// Power of two applied to the mantissa (binary suffixes)
    binary_shift: u32,
}

fn parse_quantity(text: &str) -> Option<Quantity> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let number_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let (number, suffix) = rest.split_at(number_len);
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut mantissa: u128 = 0;
    for digit in whole.bytes().chain(fraction.bytes()) {
        mantissa = mantissa
            .checked_mul(10)?
            .checked_add(u128::from(digit - b'0'))?;
    }

    let (exponent, binary_shift) = parse_suffix(suffix)?;
    let fraction_len = i32::try_from(fraction.len()).ok()?;

    Some(Quantity {
        negative,
        mantissa,
        scale: exponent.checked_sub(fraction_len)?,
        binary_shift,
    })
}

/// Returns `(power of ten, power of two)` for a suffix
fn parse_suffix(suffix: &str) -> Option<(i32, u32)> {
    let parsed = match suffix {
        "" => (0, 0),
        "Ki" => (0, 10),
        "Mi" => (0, 20),
        "Gi" => (0, 30),
        "Ti" => (0, 40),
        "Pi" => (0, 50),
        "Ei" => (0, 60),
        "n" => (-9, 0),
        "u" => (-6, 0),
        "m" => (-3, 0),
        "k" => (3, 0),
        "M" => (6, 0),
        "G" => (9, 0),
        "T" => (12, 0),
        "P" => (15, 0),
        "E" => (18, 0),
        _ => {
            let exponent = suffix.strip_prefix(|c: char| c == 'e' || c == 'E')?;
            let digits = exponent
                .strip_prefix(|c: char| c == '+' || c == '-')
                .unwrap_or(exponent);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (exponent.parse::<i32>().ok()?, 0)
        }
    };
    Some(parsed)
}

impl Quantity {
    /// Value in thousandths, rounded away from zero
    fn milli_value(&self) -> Option<i128> {
        let shifted = self
            .mantissa
            .checked_mul(1u128.checked_shl(self.binary_shift)?)?;
        let power = self.scale.checked_add(3)?;

        let magnitude = if power >= 0 {
            shifted.checked_mul(10u128.checked_pow(power.unsigned_abs())?)?
        } else {
            match 10u128.checked_pow(power.unsigned_abs()) {
                Some(divisor) => shifted / divisor + u128::from(shifted % divisor != 0),
                // Divisor beyond u128: any non-zero value is below one milli
                None => u128::from(shifted != 0),
            }
        };

        let magnitude = i128::try_from(magnitude).ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

fn format_milli(milli: i128) -> String {
    let sign = if milli < 0 { "-" } else { "" };
    let magnitude = milli.unsigned_abs();
    let (whole, thousandths) = (magnitude / 1000, magnitude % 1000);
    if thousandths == 0 {
        format!("{}{}", sign, whole)
    } else {
        let fraction = format!("{:03}", thousandths);
        format!("{}{}.{}", sign, whole, fraction.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(text: &str) -> Option<String> {
        canonical_quantity(text)
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(canon("1000").as_deref(), Some("1000"));
        assert_eq!(canon("007").as_deref(), Some("7"));
        assert_eq!(canon("+5").as_deref(), Some("5"));
        assert_eq!(canon("3.0").as_deref(), Some("3"));
        assert_eq!(canon("3.").as_deref(), Some("3"));
        assert_eq!(canon(".5").as_deref(), Some("0.5"));
        assert_eq!(canon("1.25").as_deref(), Some("1.25"));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(canon("1e3").as_deref(), Some("1000"));
        assert_eq!(canon("1E3").as_deref(), Some("1000"));
        assert_eq!(canon("15e-1").as_deref(), Some("1.5"));
        assert_eq!(canon("2e+2").as_deref(), Some("200"));
    }

    #[test]
    fn test_decimal_suffixes() {
        assert_eq!(canon("1.5k").as_deref(), Some("1500"));
        assert_eq!(canon("250m").as_deref(), Some("0.25"));
        assert_eq!(canon("2M").as_deref(), Some("2000000"));
        assert_eq!(canon("1E").as_deref(), Some("1000000000000000000"));
        assert_eq!(canon("1500u").as_deref(), Some("0.002"));
        assert_eq!(canon("1n").as_deref(), Some("0.001"));
    }

    #[test]
    fn test_binary_suffixes() {
        assert_eq!(canon("1Ki").as_deref(), Some("1024"));
        assert_eq!(canon("1Mi").as_deref(), Some("1048576"));
        assert_eq!(canon("0.5Gi").as_deref(), Some("536870912"));
    }

    #[test]
    fn test_rounds_away_from_zero_to_milli() {
        assert_eq!(canon("0.0001").as_deref(), Some("0.001"));
        assert_eq!(canon("-0.0001").as_deref(), Some("-0.001"));
        assert_eq!(canon("-.4272625998Mi").as_deref(), Some("-448017.308"));
        assert_eq!(canon("-448017308m").as_deref(), Some("-448017.308"));
    }

    #[test]
    fn test_zero() {
        assert_eq!(canon("0").as_deref(), Some("0"));
        assert_eq!(canon("-0").as_deref(), Some("0"));
        assert_eq!(canon("0.000Ki").as_deref(), Some("0"));
        assert_eq!(canon("0e-500").as_deref(), Some("0"));
    }

    #[test]
    fn test_tiny_exponent_rounds_up_to_one_milli() {
        assert_eq!(canon("1e-100").as_deref(), Some("0.001"));
    }

    #[test]
    fn test_not_quantities() {
        for text in [
            "", ".", "-", "abc", "1.2.3", "1e", "1e1.5", "1ki", "1 Ki", " 1", "1K", "0x10",
            "kcaqbdpkpt", "e3",
        ] {
            assert_eq!(canon(text), None, "{:?} should not parse", text);
        }
    }

    #[test]
    fn test_overflow_is_not_a_quantity() {
        assert_eq!(canon("1e40"), None);
        assert_eq!(canon(&"9".repeat(60)), None);
    }

    #[test]
    fn test_canonicalizer_borrows_when_unchanged() {
        let already = FieldValue::from("1000");
        assert!(matches!(KubeQuantity.canonicalize(&already), Cow::Borrowed(_)));

        let number = FieldValue::from(1000);
        assert!(matches!(KubeQuantity.canonicalize(&number), Cow::Borrowed(_)));

        let scientific = FieldValue::from("1e3");
        assert_eq!(
            KubeQuantity.canonicalize(&scientific),
            Cow::<FieldValue>::Owned(FieldValue::from("1000"))
        );
    }
}
