//! Case runner
//!
//! Evaluates every case of a file with an [`Oracle`] and collects the
//! outcomes. A failing case is a normal outcome, not an error; callers that
//! want an error use [`CaseReport::ensure_passed`].

use crate::cases::format_v0::{CaseFileV0, CaseV0};
use crate::engine::{Oracle, Verdict};
use crate::errors::{FieldEqError, Result};
use crate::normalize::QuantityCanonicalizer;
use crate::{log_op_end, log_op_start};
use fieldeq_core_types::schema::OP_RUN_CASES;

/// Result of evaluating one case
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub name: String,
    pub expected: bool,
    pub verdict: Verdict,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.verdict.is_equivalent() == self.expected
    }
}

/// Outcomes of a run, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseReport {
    pub outcomes: Vec<CaseOutcome>,
    /// Number of cases in the file, including any not evaluated
    pub total: usize,
}

impl CaseReport {
    pub fn evaluated(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.evaluated() - self.passed()
    }

    /// Cases skipped after a fail-fast stop
    pub fn skipped(&self) -> usize {
        self.total - self.evaluated()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0 && self.skipped() == 0
    }

    /// # Errors
    ///
    /// `CaseFailed` when any case failed or was skipped.
    pub fn ensure_passed(&self) -> Result<()> {
        if self.all_passed() {
            return Ok(());
        }
        Err(FieldEqError::CasesFailed {
            failed: self.failed(),
            total: self.total,
        }
        .into())
    }
}

fn evaluate<C: QuantityCanonicalizer>(oracle: &Oracle<C>, case: &CaseV0) -> CaseOutcome {
    let verdict =
        oracle.compare_explained(&case.in_prev, &case.in_curr, &case.out_prev, &case.out_curr);
    CaseOutcome {
        name: case.name.clone(),
        expected: case.expected,
        verdict,
    }
}

/// Evaluate the cases of `file` in order
///
/// With `fail_fast`, evaluation stops after the first failing case.
pub fn run_cases<C: QuantityCanonicalizer>(
    oracle: &Oracle<C>,
    file: &CaseFileV0,
    fail_fast: bool,
) -> CaseReport {
    log_op_start!(OP_RUN_CASES, case_count = file.cases.len());
    let start = std::time::Instant::now();

    let mut report = CaseReport {
        outcomes: Vec::with_capacity(file.cases.len()),
        total: file.cases.len(),
    };

    for case in &file.cases {
        let outcome = evaluate(oracle, case);
        let passed = outcome.passed();
        if !passed {
            tracing::warn!(
                case = %case.name,
                expected = case.expected,
                verdict = %outcome.verdict,
                in_prev = %case.in_prev.redacted(),
                in_curr = %case.in_curr.redacted(),
                out_prev = %case.out_prev.redacted(),
                out_curr = %case.out_curr.redacted(),
                "case failed"
            );
        }
        report.outcomes.push(outcome);
        if !passed && fail_fast {
            break;
        }
    }

    log_op_end!(
        OP_RUN_CASES,
        duration_ms = start.elapsed().as_millis() as u64,
        passed = report.passed(),
        failed = report.failed(),
        skipped = report.skipped()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::parse_case_str;
    use crate::errors::ExErrorKind;
    use crate::normalize::Transform;

    const CASES: &str = r#"
schema_version: 0
cases:
  - name: equal
    in_curr: a
    out_curr: a
  - name: wrong-expectation
    in_curr: a
    out_curr: b
  - name: expected-different
    in_curr: a
    out_curr: b
    expected: false
"#;

    #[test]
    fn test_run_all_cases() {
        let file = parse_case_str(CASES).unwrap();
        let report = run_cases(&Oracle::new(), &file, false);
        assert_eq!(report.total, 3);
        assert_eq!(report.evaluated(), 3);
        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 0);
        assert!(!report.all_passed());

        let failures: Vec<_> = report.failures().map(|o| o.name.as_str()).collect();
        assert_eq!(failures, vec!["wrong-expectation"]);
        assert_eq!(report.outcomes[0].verdict.transform, Transform::Identity);
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let file = parse_case_str(CASES).unwrap();
        let report = run_cases(&Oracle::new(), &file, true);
        assert_eq!(report.evaluated(), 2);
        assert_eq!(report.skipped(), 1);

        let err = report.ensure_passed().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::CaseFailed);
        assert_eq!(err.message(), "1 of 3 cases failed");
    }

    #[test]
    fn test_empty_file_passes() {
        let file = parse_case_str("schema_version: 0\n").unwrap();
        let report = run_cases(&Oracle::new(), &file, false);
        assert!(report.all_passed());
        assert!(report.ensure_passed().is_ok());
    }
}
