use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{CategoryTotal, Ledger, SortKey, Summary, Transaction};
use crate::storage::{LoadReport, Repository};

use super::{AppError, render_bar_chart};

/// Application service providing the ledger operations.
/// Owns the in-memory ledger and the file it is saved to and loaded from.
pub struct LedgerService {
    ledger: Ledger,
    repo: Repository,
}

impl LedgerService {
    /// Start with an empty ledger bound to `data_file`. Nothing is read yet.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            ledger: Ledger::new(),
            repo: Repository::new(data_file),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn data_file(&self) -> &Path {
        self.repo.path()
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        debug!(
            description = %transaction.description,
            amount = %transaction.amount,
            kind = %transaction.kind,
            category = %transaction.category,
            "adding transaction"
        );
        self.ledger.add(transaction);
    }

    pub fn summary(&self) -> Result<Summary, AppError> {
        Ok(self.ledger.summary()?)
    }

    pub fn category_expense_totals(&self) -> Result<Vec<CategoryTotal>, AppError> {
        Ok(self.ledger.category_expense_totals()?)
    }

    pub fn sorted(&self, key: SortKey) -> Vec<Transaction> {
        debug!(key = %key, "sorting transactions");
        self.ledger.sorted(key)
    }

    pub fn render_bar_chart(&self) -> Result<String, AppError> {
        Ok(render_bar_chart(&self.ledger.category_expense_totals()?))
    }

    /// Overwrite the data file with the current ledger.
    pub fn save(&self) -> Result<usize, AppError> {
        self.repo.save(&self.ledger)
    }

    /// Append the data file's records to the current ledger.
    pub fn load(&mut self) -> Result<LoadReport, AppError> {
        self.repo.load_into(&mut self.ledger)
    }
}
