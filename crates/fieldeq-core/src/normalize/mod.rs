//! Value normalizer.
//!
//! Reduces the four raw values of a comparison to a comparable form before
//! the equivalence operators run. At most one transform applies, tried in
//! this order:
//!
//! 1. **Base64**: both output values decode to non-empty UTF-8 text, and at
//!    least one of them actually changed. Inputs are never decoded.
//! 2. **Quantity**: at least one of the four values changes under the
//!    quantity canonicalizer; all four canonicalized values are used.
//! 3. **Identity**: the values are returned unchanged.
//!
//! Base64 runs first so an encoded payload that happens to look numeric is
//! decoded rather than canonicalized. Every failure inside a transform means
//! "not applicable"; normalization itself cannot fail.

pub mod decode;
pub mod quantity;

pub use decode::{decode_text, DecodeError};
pub use quantity::{canonical_quantity, KubeQuantity, QuantityCanonicalizer};

use fieldeq_core_types::schema::{EVENT_DECIDED, OP_NORMALIZE};
use fieldeq_core_types::FieldValue;
use std::borrow::Cow;

/// Which transform produced a [`Normalized`] quadruple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Base64,
    Quantity,
    Identity,
}

impl Transform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transform::Base64 => "base64",
            Transform::Quantity => "quantity",
            Transform::Identity => "identity",
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four values to compare, borrowed where no transform touched them
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<'a> {
    pub transform: Transform,
    pub in_prev: Cow<'a, FieldValue>,
    pub in_curr: Cow<'a, FieldValue>,
    pub out_prev: Cow<'a, FieldValue>,
    pub out_curr: Cow<'a, FieldValue>,
}

impl<'a> Normalized<'a> {
    fn identity(
        in_prev: &'a FieldValue,
        in_curr: &'a FieldValue,
        out_prev: &'a FieldValue,
        out_curr: &'a FieldValue,
    ) -> Self {
        Self {
            transform: Transform::Identity,
            in_prev: Cow::Borrowed(in_prev),
            in_curr: Cow::Borrowed(in_curr),
            out_prev: Cow::Borrowed(out_prev),
            out_curr: Cow::Borrowed(out_curr),
        }
    }

    /// Detach from the borrowed inputs
    pub fn into_owned(self) -> [FieldValue; 4] {
        [
            self.in_prev.into_owned(),
            self.in_curr.into_owned(),
            self.out_prev.into_owned(),
            self.out_curr.into_owned(),
        ]
    }
}

fn base64_outputs(out_prev: &FieldValue, out_curr: &FieldValue) -> Option<(String, String)> {
    let prev = decode_text(out_prev).ok()?;
    let curr = decode_text(out_curr).ok()?;
    if prev.is_empty() || curr.is_empty() {
        return None;
    }
    let unchanged =
        out_prev.as_str() == Some(prev.as_str()) && out_curr.as_str() == Some(curr.as_str());
    (!unchanged).then_some((prev, curr))
}

fn changed(canonical: &Cow<'_, FieldValue>, original: &FieldValue) -> bool {
    matches!(canonical, Cow::Owned(value) if value != original)
}

/// Normalize a comparison quadruple
///
/// # Example
///
/// ```
/// use fieldeq_core::normalize::{normalize, Transform};
/// use fieldeq_core::{FieldValue, KubeQuantity};
///
/// let (a, b) = (FieldValue::from("1e3"), FieldValue::from("1000"));
/// let normalized = normalize(&KubeQuantity, &FieldValue::Missing, &a, &FieldValue::Missing, &b);
/// assert_eq!(normalized.transform, Transform::Quantity);
/// assert_eq!(normalized.in_curr, normalized.out_curr);
/// ```
pub fn normalize<'a, C>(
    canonicalizer: &C,
    in_prev: &'a FieldValue,
    in_curr: &'a FieldValue,
    out_prev: &'a FieldValue,
    out_curr: &'a FieldValue,
) -> Normalized<'a>
where
    C: QuantityCanonicalizer + ?Sized,
{
    let normalized = if let Some((prev, curr)) = base64_outputs(out_prev, out_curr) {
        Normalized {
            transform: Transform::Base64,
            in_prev: Cow::Borrowed(in_prev),
            in_curr: Cow::Borrowed(in_curr),
            out_prev: Cow::Owned(FieldValue::from(prev)),
            out_curr: Cow::Owned(FieldValue::from(curr)),
        }
    } else {
        let canonical = [
            canonicalizer.canonicalize(in_prev),
            canonicalizer.canonicalize(in_curr),
            canonicalizer.canonicalize(out_prev),
            canonicalizer.canonicalize(out_curr),
        ];
        let originals = [in_prev, in_curr, out_prev, out_curr];
        if canonical
            .iter()
            .zip(originals)
            .any(|(value, original)| changed(value, original))
        {
            let [in_prev, in_curr, out_prev, out_curr] = canonical;
            Normalized {
                transform: Transform::Quantity,
                in_prev,
                in_curr,
                out_prev,
                out_curr,
            }
        } else {
            Normalized::identity(in_prev, in_curr, out_prev, out_curr)
        }
    };

    tracing::debug!(
        component = module_path!(),
        op = OP_NORMALIZE,
        event = EVENT_DECIDED,
        transform = normalized.transform.as_str(),
    );
    normalized
}
