use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::application::{
    AppError, LedgerService, format_transaction, render_category_totals, render_summary,
};
use crate::domain::{
    ParseKindError, SortKey, Transaction, TransactionKind, parse_amount, parse_date,
};
use crate::storage::FIELD_SEPARATOR;

/// Entries of the main menu, keyed by the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTransaction,
    ShowSummary,
    ShowCategoryExpenses,
    SortTransactions,
    ShowVisualAnalytics,
    SaveTransactions,
    LoadTransactions,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddTransaction),
            "2" => Ok(MenuChoice::ShowSummary),
            "3" => Ok(MenuChoice::ShowCategoryExpenses),
            "4" => Ok(MenuChoice::SortTransactions),
            "5" => Ok(MenuChoice::ShowVisualAnalytics),
            "6" => Ok(MenuChoice::SaveTransactions),
            "7" => Ok(MenuChoice::LoadTransactions),
            "0" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

const MENU: &str = "\n==== Personal Budget Tracker ====
1. Add Transaction
2. Show Summary
3. Show Category-wise Expenses
4. Sort Transactions
5. Show Visual Analytics
6. Save Transactions
7. Load Transactions
0. Exit";

/// Errors that stop a single command.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Reported to the user; the loop carries on.
    #[error(transparent)]
    App(#[from] AppError),

    /// Reading stdin or writing stdout failed; the loop cannot carry on.
    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

enum Step {
    Continue,
    Exit,
}

/// Blocking menu loop over any line-based input and output.
pub struct Shell<R, W> {
    service: LedgerService,
    currency: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(service: LedgerService, currency: impl Into<String>, input: R, output: W) -> Self {
        Self {
            service,
            currency: currency.into(),
            input,
            output,
        }
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    /// Take back the service and the output sink once the loop has ended.
    pub fn into_parts(self) -> (LedgerService, W) {
        (self.service, self.output)
    }

    /// Run until the user picks Exit or input ends.
    ///
    /// Command failures are printed and the loop continues; only console
    /// failures are returned.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                debug!("input closed, leaving");
                return Ok(());
            };

            let Ok(choice) = line.parse::<MenuChoice>() else {
                writeln!(self.output, "Invalid option.")?;
                continue;
            };

            match self.execute(choice) {
                Ok(Step::Continue) => {}
                Ok(Step::Exit) => return Ok(()),
                Err(ShellError::App(e)) => {
                    debug!(error = %e, ?choice, "command failed");
                    writeln!(self.output, "Error: {}", e)?;
                }
                Err(ShellError::Console(e)) => return Err(e),
            }
        }
    }

    fn execute(&mut self, choice: MenuChoice) -> Result<Step, ShellError> {
        match choice {
            MenuChoice::AddTransaction => return self.add_transaction(),
            MenuChoice::ShowSummary => {
                let summary = self.service.summary()?;
                writeln!(self.output, "------ Summary ------")?;
                writeln!(self.output, "{}", render_summary(&summary, &self.currency))?;
            }
            MenuChoice::ShowCategoryExpenses => {
                let totals = self.service.category_expense_totals()?;
                writeln!(self.output, "------ Category-wise Expenses ------")?;
                if !totals.is_empty() {
                    writeln!(self.output, "{}", render_category_totals(&totals, &self.currency))?;
                }
            }
            MenuChoice::SortTransactions => return self.sort_transactions(),
            MenuChoice::ShowVisualAnalytics => {
                let chart = self.service.render_bar_chart()?;
                writeln!(self.output, "------ Visual Analytics ------")?;
                if !chart.is_empty() {
                    writeln!(self.output, "{}", chart)?;
                }
            }
            MenuChoice::SaveTransactions => {
                self.service.save()?;
                writeln!(self.output, "Transactions saved.")?;
            }
            MenuChoice::LoadTransactions => {
                self.service.load()?;
                writeln!(self.output, "Transactions loaded.")?;
            }
            MenuChoice::Exit => return Ok(Step::Exit),
        }
        Ok(Step::Continue)
    }

    fn add_transaction(&mut self) -> Result<Step, ShellError> {
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(Step::Exit);
        };
        check_free_text("description", &description)?;

        let Some(amount) = self.prompt("Amount: ")? else {
            return Ok(Step::Exit);
        };
        let amount = parse_amount(&amount).map_err(AppError::from)?;

        let Some(kind) = self.prompt("Type (Income/Expense): ")? else {
            return Ok(Step::Exit);
        };
        let kind: TransactionKind = kind
            .parse()
            .map_err(|e: ParseKindError| AppError::from(e))?;

        let Some(category) = self.prompt("Category: ")? else {
            return Ok(Step::Exit);
        };
        check_free_text("category", &category)?;

        let Some(date) = self.prompt("Date (yyyy-mm-dd): ")? else {
            return Ok(Step::Exit);
        };
        let date = parse_date(&date).map_err(AppError::from)?;

        self.service
            .add_transaction(Transaction::new(description, amount, kind, category, date));
        writeln!(self.output, "Transaction added.")?;
        Ok(Step::Continue)
    }

    fn sort_transactions(&mut self) -> Result<Step, ShellError> {
        let Some(key) = self.prompt("Sort by (date/category/amount): ")? else {
            return Ok(Step::Exit);
        };

        let key = match key.parse::<SortKey>() {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "rejected sort key");
                writeln!(self.output, "Invalid sort type.")?;
                return Ok(Step::Continue);
            }
        };
        let sorted = self.service.sorted(key);

        writeln!(self.output, "------ Sorted Transactions ------")?;
        for t in &sorted {
            writeln!(self.output, "{}", format_transaction(t, &self.currency))?;
        }
        Ok(Step::Continue)
    }

    /// Print `label` and read one line. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Free-text fields are stored verbatim in the data file, so they may not
/// contain its field separator.
fn check_free_text(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.contains(FIELD_SEPARATOR) {
        return Err(AppError::ReservedCharacter {
            field,
            character: FIELD_SEPARATOR,
        });
    }
    Ok(())
}
