//! Single comparisons
//!
//! Usage:
//!   fieldeq compare [--in-prev <V>] [--in-curr <V>] [--out-prev <V>] [--out-curr <V>] [--explain] [--literal]
//!   fieldeq input-compare [--prev <V>] [--curr <V>] [--literal]
//!
//! A value is read as a YAML scalar (`null`, `true`, `42`, `1.5`, `text`);
//! an omitted flag is the absent-marker. `--literal` takes every value as a
//! verbatim string instead, for multi-line config blocks and text that YAML
//! would read as a number.

use clap::Args;
use fieldeq_core::errors::FieldEqError;
use fieldeq_core::logging_facility::{self, Profile};
use fieldeq_core::{FieldValue, Oracle};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Intended value before the change
    #[arg(long, allow_hyphen_values = true)]
    pub in_prev: Option<String>,

    /// Intended value after the change
    #[arg(long, allow_hyphen_values = true)]
    pub in_curr: Option<String>,

    /// Observed value before the change
    #[arg(long, allow_hyphen_values = true)]
    pub out_prev: Option<String>,

    /// Observed value after the change
    #[arg(long, allow_hyphen_values = true)]
    pub out_curr: Option<String>,

    /// Print how the verdict was reached
    #[arg(long)]
    pub explain: bool,

    /// Take values as verbatim strings
    #[arg(long)]
    pub literal: bool,
}

#[derive(Debug, Args)]
pub struct InputCompareArgs {
    /// Input value in the previous snapshot
    #[arg(long, allow_hyphen_values = true)]
    pub prev: Option<String>,

    /// Input value in the current snapshot
    #[arg(long, allow_hyphen_values = true)]
    pub curr: Option<String>,

    /// Take values as verbatim strings
    #[arg(long)]
    pub literal: bool,
}

/// Parse one command-line value; `None` is the absent-marker
pub fn parse_value(raw: Option<&str>, literal: bool) -> fieldeq_core::Result<FieldValue> {
    match raw {
        None => Ok(FieldValue::Missing),
        Some(raw) if literal => Ok(FieldValue::from(raw)),
        Some(raw) => serde_yaml::from_str(raw).map_err(|e| {
            FieldEqError::InvalidFieldValue {
                raw: raw.to_string(),
                reason: e.to_string(),
            }
            .into()
        }),
    }
}

/// Execute compare
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(Profile::Production);

    let in_prev = parse_value(args.in_prev.as_deref(), args.literal)?;
    let in_curr = parse_value(args.in_curr.as_deref(), args.literal)?;
    let out_prev = parse_value(args.out_prev.as_deref(), args.literal)?;
    let out_curr = parse_value(args.out_curr.as_deref(), args.literal)?;

    let verdict = Oracle::new().compare_explained(&in_prev, &in_curr, &out_prev, &out_curr);
    if args.explain {
        println!("{}", verdict);
    } else if verdict.is_equivalent() {
        println!("equivalent");
    } else {
        println!("different");
    }

    Ok(())
}

/// Execute input-compare
pub fn execute_input(args: InputCompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(Profile::Production);

    let prev = parse_value(args.prev.as_deref(), args.literal)?;
    let curr = parse_value(args.curr.as_deref(), args.literal)?;

    if Oracle::new().input_compare(&prev, &curr) {
        println!("unchanged");
    } else {
        println!("changed");
    }

    Ok(())
}
