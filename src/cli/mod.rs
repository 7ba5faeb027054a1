use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::application::LedgerService;

mod shell;

pub use shell::*;

/// Data file used when neither `--file` nor `BUDGET_TRACKER_FILE` is given.
pub const DEFAULT_DATA_FILE: &str = "transactions.txt";

/// Budget Tracker - Personal Income & Expense Ledger
#[derive(Parser, Debug)]
#[command(name = "budget-tracker")]
#[command(about = "A menu-driven tracker for personal income and expenses")]
#[command(version)]
pub struct Cli {
    /// Data file used by Save and Load
    #[arg(short, long, env = "BUDGET_TRACKER_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Currency symbol printed before amounts
    #[arg(long, env = "BUDGET_TRACKER_CURRENCY", default_value = "$")]
    pub currency: String,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log filter applied when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "info" };
        format!("budget_tracker={level}")
    }

    /// Run the interactive menu on stdin/stdout until the user exits.
    pub fn run(self) -> Result<()> {
        info!(data_file = %self.file.display(), "starting budget tracker");

        let service = LedgerService::new(self.file);
        let mut shell = Shell::new(
            service,
            self.currency,
            io::stdin().lock(),
            io::stdout().lock(),
        );

        shell.run().context("Failed to talk to the terminal")
    }
}
