//! Equivalence operators.
//!
//! Every operator is a pure predicate over an *input* value `a` (what the
//! harness meant to set) and an *output* value `b` (what was observed). The
//! predicates are directional: `a` describes the minimum the output must
//! show, so `b` may carry more.
//!
//! The custom operators are a fixed, ordered list ([`CUSTOM_OPERATORS`]);
//! the first one that matches wins.

pub mod config_block;

pub use config_block::{parse_config_block, ConfigBlock, ConfigBlockError};

use fieldeq_core_types::FieldValue;

/// A named fallback equivalence check tried after plain equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomOperator {
    /// Input text contained in output text, ignoring case
    Substring,
    /// Input config block is a subset of the output config block
    ConfigSubset,
}

/// Custom operators in the order they are tried
pub const CUSTOM_OPERATORS: [CustomOperator; 2] =
    [CustomOperator::Substring, CustomOperator::ConfigSubset];

impl CustomOperator {
    pub fn name(&self) -> &'static str {
        match self {
            CustomOperator::Substring => "substring",
            CustomOperator::ConfigSubset => "config_subset",
        }
    }

    /// Apply this operator to an input/output pair
    pub fn matches(&self, input: &FieldValue, output: &FieldValue) -> bool {
        match self {
            CustomOperator::Substring => substring_operator(input, output),
            CustomOperator::ConfigSubset => config_operator(input, output),
        }
    }
}

impl std::fmt::Display for CustomOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// True if either side is `Null` or `Missing`.
///
/// Means "no assertion intended here"; the engine never lets this stand in
/// for both time-points at once.
pub fn none_notpresent_operator(input: &FieldValue, output: &FieldValue) -> bool {
    input.is_sentinel() || output.is_sentinel()
}

/// True if the lowercase text of `input` occurs inside the lowercase text
/// of `output`.
///
/// ```
/// use fieldeq_core::operators::substring_operator;
/// use fieldeq_core::FieldValue;
///
/// assert!(substring_operator(&"abc".into(), &"xxABCxx".into()));
/// assert!(!substring_operator(&"xxabcxx".into(), &"abc".into()));
/// ```
pub fn substring_operator(input: &FieldValue, output: &FieldValue) -> bool {
    let needle = input.to_string().to_lowercase();
    output.to_string().to_lowercase().contains(&needle)
}

/// True if both values are strings holding flat config blocks and every
/// key/value of the input block appears unchanged in the output block.
///
/// An input block with no keys never matches, and a block that fails to
/// parse on either side means "not applicable".
///
/// ```
/// use fieldeq_core::operators::config_operator;
/// use fieldeq_core::FieldValue;
///
/// assert!(config_operator(&"key=1".into(), &"key=1\nother=2".into()));
/// assert!(!config_operator(&"key=1\nother=2".into(), &"key=1".into()));
/// assert!(!config_operator(&"".into(), &"key=1".into()));
/// ```
pub fn config_operator(input: &FieldValue, output: &FieldValue) -> bool {
    let (Some(input), Some(output)) = (input.as_str(), output.as_str()) else {
        return false;
    };

    let Ok(expected) = parse_config_block(input) else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }

    parse_config_block(output).is_ok_and(|observed| {
        tracing::trace!(
            expected_keys = expected.len(),
            observed_keys = observed.len(),
            "config_subset"
        );
        expected.is_subset_of(&observed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_order_is_fixed() {
        assert_eq!(
            CUSTOM_OPERATORS
                .iter()
                .map(CustomOperator::name)
                .collect::<Vec<_>>(),
            vec!["substring", "config_subset"]
        );
    }

    #[test]
    fn test_wildcard_operator() {
        let x = FieldValue::from("x");
        assert!(none_notpresent_operator(&FieldValue::Null, &x));
        assert!(none_notpresent_operator(&x, &FieldValue::Missing));
        assert!(none_notpresent_operator(
            &FieldValue::Missing,
            &FieldValue::Null
        ));
        assert!(!none_notpresent_operator(&x, &x));
        assert!(!none_notpresent_operator(&FieldValue::from(""), &x));
    }

    #[test]
    fn test_substring_is_directional_and_case_insensitive() {
        assert!(substring_operator(&"abc".into(), &"xxabcxx".into()));
        assert!(!substring_operator(&"xxabcxx".into(), &"abc".into()));
        assert!(substring_operator(&"ABC".into(), &"xxabcxx".into()));
    }

    #[test]
    fn test_substring_over_non_strings() {
        assert!(substring_operator(&FieldValue::from(80), &"port=8080".into()));
        assert!(substring_operator(&FieldValue::from(true), &"enabled: TRUE".into()));
        assert!(!substring_operator(&FieldValue::Null, &"anything".into()));
        assert!(!substring_operator(&FieldValue::Missing, &"anything".into()));
    }

    #[test]
    fn test_config_operator_requires_strings() {
        assert!(!config_operator(&FieldValue::from(1), &"a=1".into()));
        assert!(!config_operator(&"a=1".into(), &FieldValue::Null));
    }

    #[test]
    fn test_config_operator_value_mismatch_and_missing_key() {
        assert!(!config_operator(&"a=1".into(), &"a=2".into()));
        assert!(!config_operator(&"a=1".into(), &"b=1".into()));
    }

    #[test]
    fn test_config_operator_parse_errors_do_not_match() {
        assert!(!config_operator(&"a=1\n[x]".into(), &"a=1".into()));
        assert!(!config_operator(&"a=1".into(), &"a=1\nnot a pair".into()));
    }

    #[test]
    fn test_config_operator_tolerates_alignment() {
        let input = "cluster_partition_handling = pause_minority\nratio = 0.99\n";
        let output = "extra = 1\n\
                      cluster_partition_handling      = pause_minority\n\
                      ratio           = 0.99\n";
        assert!(config_operator(&input.into(), &output.into()));
    }
}
