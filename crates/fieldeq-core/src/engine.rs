//! Equivalence engine.
//!
//! Decides whether an intended change (`in_prev` → `in_curr`) shows up in
//! the observed state (`out_prev` → `out_curr`). Each time-point is checked
//! with [`Oracle::operator`] (equality, then the custom operators), and a
//! time-point where either side is null or absent may be waived by the
//! wildcard operator. The wildcard never waives both time-points at once:
//!
//! ```text
//! verdict =
//!     (operator(in_prev, out_prev) AND operator(in_curr, out_curr))
//!  OR (wildcard(in_prev, out_prev) AND operator(in_curr, out_curr))
//!  OR (operator(in_prev, out_prev) AND wildcard(in_curr, out_curr))
//! ```

use crate::normalize::{self, KubeQuantity, Normalized, QuantityCanonicalizer, Transform};
use crate::operators::{self, CustomOperator, CUSTOM_OPERATORS};
use fieldeq_core_types::schema::{EVENT_DECIDED, OP_COMPARE, OP_INPUT_COMPARE};
use fieldeq_core_types::FieldValue;

/// How one time-point's input/output pair was judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Match {
    /// Plain equality
    Equal,
    /// A custom operator matched
    Operator(CustomOperator),
    /// One side was null or absent
    Wildcard,
    NoMatch,
}

impl Match {
    pub fn as_str(&self) -> &'static str {
        match self {
            Match::Equal => "equal",
            Match::Operator(op) => op.name(),
            Match::Wildcard => "wildcard",
            Match::NoMatch => "no_match",
        }
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which disjunct of the verdict formula held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    /// Both time-points matched by operator
    BothEquivalent,
    /// Previous waived by wildcard, current matched by operator
    PreviousWildcard,
    /// Previous matched by operator, current waived by wildcard
    CurrentWildcard,
}

impl Clause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Clause::BothEquivalent => "both_equivalent",
            Clause::PreviousWildcard => "previous_wildcard",
            Clause::CurrentWildcard => "current_wildcard",
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explained comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub transform: Transform,
    pub previous: Match,
    pub current: Match,
    /// `None` when the values are not equivalent
    pub clause: Option<Clause>,
}

impl Verdict {
    pub fn is_equivalent(&self) -> bool {
        self.clause.is_some()
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = if self.is_equivalent() {
            "equivalent"
        } else {
            "different"
        };
        write!(
            f,
            "{} (transform: {}, previous: {}, current: {}",
            outcome, self.transform, self.previous, self.current
        )?;
        match self.clause {
            Some(clause) => write!(f, ", clause: {})", clause),
            None => f.write_str(")"),
        }
    }
}

/// The equivalence oracle
///
/// Stateless apart from its quantity canonicalizer; share it by reference.
///
/// # Example
///
/// ```
/// use fieldeq_core::{FieldValue, Oracle};
///
/// let oracle = Oracle::new();
/// assert!(oracle.compare(
///     &FieldValue::Missing,
///     &"-.4272625998Mi".into(),
///     &FieldValue::Missing,
///     &"-448017308m".into(),
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Oracle<C = KubeQuantity> {
    canonicalizer: C,
}

impl Oracle<KubeQuantity> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: QuantityCanonicalizer> Oracle<C> {
    /// Build an oracle around a different quantity canonicalizer
    pub fn with_canonicalizer(canonicalizer: C) -> Self {
        Self { canonicalizer }
    }

    pub fn canonicalizer(&self) -> &C {
        &self.canonicalizer
    }

    /// Custom operators in the order they are tried
    pub fn custom_operators(&self) -> &'static [CustomOperator] {
        &CUSTOM_OPERATORS
    }

    /// Equal, or matched by any custom operator
    pub fn operator(&self, input: &FieldValue, output: &FieldValue) -> bool {
        self.match_pair(input, output).is_some()
    }

    /// True if either side is null or absent
    pub fn none_notpresent_operator(&self, input: &FieldValue, output: &FieldValue) -> bool {
        operators::none_notpresent_operator(input, output)
    }

    /// Normalize a quadruple the way [`Oracle::compare`] does before judging it
    pub fn normalize<'a>(
        &self,
        in_prev: &'a FieldValue,
        in_curr: &'a FieldValue,
        out_prev: &'a FieldValue,
        out_curr: &'a FieldValue,
    ) -> Normalized<'a> {
        normalize::normalize(&self.canonicalizer, in_prev, in_curr, out_prev, out_curr)
    }

    /// True when the observed values reflect the intended change
    pub fn compare(
        &self,
        in_prev: &FieldValue,
        in_curr: &FieldValue,
        out_prev: &FieldValue,
        out_curr: &FieldValue,
    ) -> bool {
        self.compare_explained(in_prev, in_curr, out_prev, out_curr)
            .is_equivalent()
    }

    /// Like [`Oracle::compare`], reporting how the verdict was reached
    pub fn compare_explained(
        &self,
        in_prev: &FieldValue,
        in_curr: &FieldValue,
        out_prev: &FieldValue,
        out_curr: &FieldValue,
    ) -> Verdict {
        let normalized = self.normalize(in_prev, in_curr, out_prev, out_curr);

        let previous = self.match_pair(&normalized.in_prev, &normalized.out_prev);
        let current = self.match_pair(&normalized.in_curr, &normalized.out_curr);
        let previous_wild =
            self.none_notpresent_operator(&normalized.in_prev, &normalized.out_prev);
        let current_wild =
            self.none_notpresent_operator(&normalized.in_curr, &normalized.out_curr);

        let clause = match (previous.is_some(), current.is_some()) {
            (true, true) => Some(Clause::BothEquivalent),
            (false, true) if previous_wild => Some(Clause::PreviousWildcard),
            (true, false) if current_wild => Some(Clause::CurrentWildcard),
            _ => None,
        };

        let verdict = Verdict {
            transform: normalized.transform,
            previous: judged(previous, previous_wild),
            current: judged(current, current_wild),
            clause,
        };

        tracing::debug!(
            component = module_path!(),
            op = OP_COMPARE,
            event = EVENT_DECIDED,
            verdict = verdict.is_equivalent(),
            transform = verdict.transform.as_str(),
            previous = verdict.previous.as_str(),
            current = verdict.current.as_str(),
            clause = verdict.clause.map(|c| c.as_str()),
        );
        verdict
    }

    /// True when two input values are the same, treating null and absent
    /// as interchangeable
    pub fn input_compare(&self, prev: &FieldValue, curr: &FieldValue) -> bool {
        let same = prev == curr
            || matches!(
                (prev, curr),
                (FieldValue::Null, FieldValue::Missing) | (FieldValue::Missing, FieldValue::Null)
            );
        tracing::trace!(
            component = module_path!(),
            op = OP_INPUT_COMPARE,
            event = EVENT_DECIDED,
            verdict = same,
        );
        same
    }

    fn match_pair(&self, input: &FieldValue, output: &FieldValue) -> Option<Match> {
        if input == output {
            return Some(Match::Equal);
        }
        self.custom_operators()
            .iter()
            .find(|op| op.matches(input, output))
            .map(|op| Match::Operator(*op))
    }
}

fn judged(matched: Option<Match>, wildcard: bool) -> Match {
    match matched {
        Some(m) => m,
        None if wildcard => Match::Wildcard,
        None => Match::NoMatch,
    }
}

/// [`Oracle::compare`] with the default canonicalizer
pub fn compare(
    in_prev: &FieldValue,
    in_curr: &FieldValue,
    out_prev: &FieldValue,
    out_curr: &FieldValue,
) -> bool {
    Oracle::new().compare(in_prev, in_curr, out_prev, out_curr)
}

/// [`Oracle::input_compare`] with the default canonicalizer
pub fn input_compare(prev: &FieldValue, curr: &FieldValue) -> bool {
    Oracle::new().input_compare(prev, curr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[test]
    fn test_equal_values_both_time_points() {
        let verdict = Oracle::new().compare_explained(&v("a"), &v("b"), &v("a"), &v("b"));
        assert!(verdict.is_equivalent());
        assert_eq!(verdict.previous, Match::Equal);
        assert_eq!(verdict.current, Match::Equal);
        assert_eq!(verdict.clause, Some(Clause::BothEquivalent));
        assert_eq!(verdict.transform, Transform::Identity);
    }

    #[test]
    fn test_wildcards_never_cover_both_time_points() {
        let oracle = Oracle::new();
        let verdict = oracle.compare_explained(
            &FieldValue::Missing,
            &FieldValue::Null,
            &v("x"),
            &v("y"),
        );
        assert!(!verdict.is_equivalent());
        assert_eq!(verdict.previous, Match::Wildcard);
        assert_eq!(verdict.current, Match::Wildcard);
        assert_eq!(verdict.clause, None);
    }

    #[test]
    fn test_previous_wildcard_clause() {
        let verdict = Oracle::new().compare_explained(
            &FieldValue::Null,
            &v("kcaqbdpkpt"),
            &v("old"),
            &v("dataDir=/data\nkcaqbdpkpt=1"),
        );
        assert_eq!(verdict.clause, Some(Clause::PreviousWildcard));
        assert_eq!(verdict.previous, Match::Wildcard);
        assert_eq!(
            verdict.current,
            Match::Operator(CustomOperator::Substring)
        );
    }

    #[test]
    fn test_current_wildcard_clause() {
        let verdict =
            Oracle::new().compare_explained(&v("a"), &v("b"), &v("a"), &FieldValue::Missing);
        assert_eq!(verdict.clause, Some(Clause::CurrentWildcard));
        assert_eq!(verdict.current, Match::Wildcard);
    }

    #[test]
    fn test_mismatch_current() {
        let verdict = Oracle::new().compare_explained(&v("a"), &v("b"), &v("a"), &v("c"));
        assert!(!verdict.is_equivalent());
        assert_eq!(verdict.previous, Match::Equal);
        assert_eq!(verdict.current, Match::NoMatch);
    }

    #[test]
    fn test_config_subset_wins_when_substring_fails() {
        let input = "b = 2\na = 1";
        let output = "a=1\nb=2\nc=3";
        let verdict = Oracle::new().compare_explained(
            &FieldValue::Missing,
            &v(input),
            &FieldValue::Missing,
            &v(output),
        );
        assert_eq!(
            verdict.current,
            Match::Operator(CustomOperator::ConfigSubset)
        );
        assert_eq!(verdict.previous, Match::Equal);
    }

    #[test]
    fn test_operator_prefers_equality() {
        let oracle = Oracle::new();
        assert_eq!(oracle.match_pair(&v("abc"), &v("abc")), Some(Match::Equal));
        assert_eq!(
            oracle.match_pair(&v("abc"), &v("xabcx")),
            Some(Match::Operator(CustomOperator::Substring))
        );
        assert!(oracle.operator(&FieldValue::Null, &FieldValue::Null));
        assert!(!oracle.operator(&FieldValue::Null, &FieldValue::Missing));
    }

    #[test]
    fn test_input_compare() {
        let oracle = Oracle::new();
        assert!(oracle.input_compare(&v("a"), &v("a")));
        assert!(oracle.input_compare(&FieldValue::Null, &FieldValue::Missing));
        assert!(oracle.input_compare(&FieldValue::Missing, &FieldValue::Null));
        assert!(!oracle.input_compare(&FieldValue::Null, &v("a")));
        assert!(!oracle.input_compare(&v("a"), &v("b")));
        assert!(input_compare(&FieldValue::from(1), &FieldValue::from(1.0)));
    }

    #[test]
    fn test_verdict_display() {
        let verdict = Verdict {
            transform: Transform::Quantity,
            previous: Match::Equal,
            current: Match::Operator(CustomOperator::Substring),
            clause: Some(Clause::BothEquivalent),
        };
        assert_eq!(
            verdict.to_string(),
            "equivalent (transform: quantity, previous: equal, current: substring, clause: both_equivalent)"
        );
    }

    #[test]
    fn test_oracle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Oracle>();
    }
}
