//! fieldeq CLI
//!
//! Command-line interface for the field-value equivalence oracle

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "fieldeq")]
#[command(about = "fieldeq - Field-value equivalence oracle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare an intended change against observed values
    Compare(commands::compare::CompareArgs),
    /// Check whether two input values are the same
    InputCompare(commands::compare::InputCompareArgs),
    /// Run a YAML case file against expected verdicts
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::InputCompare(args) => commands::compare::execute_input(args),
        Commands::Check(args) => commands::check::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
