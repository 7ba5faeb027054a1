use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{AmountOverflow, ParseAmountError, ParseDateError, ParseKindError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseAmountError),

    #[error("Invalid type: {0}")]
    InvalidKind(#[from] ParseKindError),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] ParseDateError),

    #[error("Amount overflow: {0}")]
    AmountOverflow(#[from] AmountOverflow),

    #[error("The {field} may not contain '{character}'")]
    ReservedCharacter {
        field: &'static str,
        character: char,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}
