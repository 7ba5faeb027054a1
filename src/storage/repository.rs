use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::AppError;
use crate::domain::{
    DATE_FORMAT, Ledger, ParseKindError, Transaction, TransactionKind, parse_amount, parse_date,
};

/// Field separator in the data file.
pub const FIELD_SEPARATOR: char = '|';

/// Fields per record: description, amount, kind, category, date.
pub const FIELD_COUNT: usize = 5;

/// Outcome of reading a data file into a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records appended to the ledger
    pub loaded: usize,
    /// Lines skipped because they did not have exactly five fields
    pub skipped: usize,
}

/// Repository for persisting a ledger as a plain text file, one record per line.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every record, replacing whatever the file held before.
    pub fn save(&self, ledger: &Ledger) -> Result<usize, AppError> {
        let mut contents = String::new();
        for transaction in ledger.transactions() {
            contents.push_str(&encode_record(transaction));
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|e| AppError::io(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            count = ledger.len(),
            "saved transactions"
        );
        Ok(ledger.len())
    }

    /// Append the file's records to `ledger`.
    ///
    /// A missing file loads nothing. Lines without exactly five fields are
    /// skipped and counted. A five-field line with a bad amount, type or date
    /// fails the whole load and leaves `ledger` untouched.
    pub fn load_into(&self, ledger: &mut Ledger) -> Result<LoadReport, AppError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file, nothing to load");
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(AppError::io(&self.path, e)),
        };

        let mut report = LoadReport::default();
        let mut parsed = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            match decode_record(line, index + 1)? {
                Some(transaction) => parsed.push(transaction),
                None => report.skipped += 1,
            }
        }

        report.loaded = parsed.len();
        ledger.extend(parsed);

        if report.skipped > 0 {
            warn!(
                path = %self.path.display(),
                skipped = report.skipped,
                "skipped lines without {} fields",
                FIELD_COUNT
            );
        }
        debug!(
            path = %self.path.display(),
            loaded = report.loaded,
            "loaded transactions"
        );
        Ok(report)
    }
}

/// Serialize one record as `description|amount|kind|category|date`.
pub fn encode_record(t: &Transaction) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}",
        t.description,
        t.amount,
        t.kind,
        t.category,
        t.date.format(DATE_FORMAT),
        sep = FIELD_SEPARATOR
    )
}

/// Parse one line of the data file. `line_number` is 1-based and only used
/// in error messages.
///
/// Returns `Ok(None)` for lines that do not split into exactly five fields.
pub fn decode_record(line: &str, line_number: usize) -> Result<Option<Transaction>, AppError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Ok(None);
    }

    let malformed = |reason: String| AppError::MalformedRecord {
        line: line_number,
        reason,
    };

    let amount = parse_amount(fields[1]).map_err(|e| malformed(e.to_string()))?;
    let kind: TransactionKind = fields[2]
        .parse()
        .map_err(|e: ParseKindError| malformed(e.to_string()))?;
    let date = parse_date(fields[4]).map_err(|e| malformed(e.to_string()))?;

    Ok(Some(Transaction::new(fields[0], amount, kind, fields[3], date)))
}
