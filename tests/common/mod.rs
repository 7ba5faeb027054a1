// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use budget_tracker::application::LedgerService;
use budget_tracker::cli::Shell;
use budget_tracker::domain::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Helper to create a data file path inside a fresh temporary directory.
/// The file itself is not created.
pub fn temp_data_file() -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("transactions.txt");
    Ok((path, temp_dir))
}

/// Helper to create a service bound to a temporary data file
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let (path, temp_dir) = temp_data_file()?;
    Ok((LedgerService::new(path), temp_dir))
}

/// Helper to parse a YYYY-MM-DD string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to parse an exact decimal literal
pub fn amount(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn expense(description: &str, value: &str, category: &str, date: &str) -> Transaction {
    Transaction::new(
        description,
        amount(value),
        TransactionKind::Expense,
        category,
        parse_date(date),
    )
}

pub fn income(description: &str, value: &str, category: &str, date: &str) -> Transaction {
    Transaction::new(
        description,
        amount(value),
        TransactionKind::Income,
        category,
        parse_date(date),
    )
}

/// Test fixture: a month of typical activity
pub struct StandardTransactions;

impl StandardTransactions {
    pub fn january() -> Vec<Transaction> {
        vec![
            expense("Coffee", "4.50", "Food", "2024-01-05"),
            income("Salary", "2000.00", "Work", "2024-01-01"),
            expense("Rent", "850.00", "Housing", "2024-01-02"),
            expense("Groceries", "62.35", "Food", "2024-01-07"),
            income("Freelance", "300.00", "Work", "2024-01-20"),
            expense("Cinema", "12.00", "Entertainment", "2024-01-13"),
            expense("Bus pass", "45.00", "Transport", "2024-01-02"),
        ]
    }

    pub fn add_january(service: &mut LedgerService) {
        for t in Self::january() {
            service.add_transaction(t);
        }
    }
}

/// Drive the interactive shell with a scripted stdin.
/// Returns everything written to stdout plus the service for inspection.
pub fn run_shell(service: LedgerService, script: &str) -> Result<(String, LedgerService)> {
    let mut shell = Shell::new(service, "$", script.as_bytes(), Vec::new());
    shell.run()?;
    let (service, output) = shell.into_parts();
    Ok((String::from_utf8(output)?, service))
}
