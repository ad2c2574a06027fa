//! Case file check command
//!
//! Usage: fieldeq check <CASES> [--config <PATH>] [--fail-fast] [--explain]

use clap::Args;
use fieldeq_core::cases::{parse_case_file, run_cases, CaseOutcome, CaseReport};
use fieldeq_core::config::load_config;
use fieldeq_core::logging_facility;
use fieldeq_core::{log_op_error, Oracle};
use fieldeq_core_types::schema::OP_RUN_CASES;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to the case YAML file
    pub path: PathBuf,

    /// Path to a fieldeq TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop at the first failing case
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the explained verdict for every case
    #[arg(long)]
    pub explain: bool,
}

fn expectation(equivalent: bool) -> &'static str {
    if equivalent {
        "equivalent"
    } else {
        "different"
    }
}

fn outcome_line(outcome: &CaseOutcome, explain: bool) -> String {
    let status = if outcome.passed() { "PASS" } else { "FAIL" };
    let mut line = format!("{} {}", status, outcome.name);
    if !outcome.passed() {
        line.push_str(&format!(
            ": expected {}, got {}",
            expectation(outcome.expected),
            expectation(outcome.verdict.is_equivalent())
        ));
    }
    if explain {
        line.push_str(&format!(" [{}]", outcome.verdict));
    }
    line
}

fn summary_line(report: &CaseReport) -> String {
    let mut line = format!("{} passed, {} failed", report.passed(), report.failed());
    if report.skipped() > 0 {
        line.push_str(&format!(", {} skipped", report.skipped()));
    }
    line
}

/// Log a failed check as the end of the case run
fn logged<T>(result: fieldeq_core::Result<T>, start: Instant) -> fieldeq_core::Result<T> {
    result.map_err(|e| {
        log_op_error!(
            OP_RUN_CASES,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })
}

/// Execute check
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    logging_facility::init(config.logging.profile);

    let fail_fast = args.fail_fast || config.harness.fail_fast;
    let explain = args.explain || config.harness.explain;

    let start = Instant::now();
    let file = logged(parse_case_file(&args.path), start)?;
    let report = run_cases(&Oracle::new(), &file, fail_fast);

    for outcome in &report.outcomes {
        println!("{}", outcome_line(outcome, explain));
    }
    println!("{}", summary_line(&report));

    logged(report.ensure_passed(), start)?;
    Ok(())
}
