use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors raised while building or validating a single trade.
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(String),

    #[error("Price for '{field}' must not be negative, got {value}")]
    NegativePrice { field: &'static str, value: String },

    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Closed trade is missing its {0}")]
    MissingExitData(&'static str),

    #[error("Open trade must not carry an {0}")]
    UnexpectedExitData(&'static str),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Failed to parse integer for '{field}': {source}")]
    ParseInt {
        field: &'static str,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to parse decimal for '{field}': {source}")]
    ParseDecimal {
        field: &'static str,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("Failed to parse date for '{field}': {source}")]
    ParseDate {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to parse enum: {0}")]
    ParseEnum(#[from] strum::ParseError),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

/// Errors raised while importing a journal document.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import document is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Import document must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    #[error("Trade at index {index} has invalid shape: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate trade id '{0}'")]
    DuplicateId(String),
}

/// Errors related to file I/O and serialization.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to {action} {}: {source}", path.display())]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
