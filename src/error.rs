//! Error types for receipt parsing and collection.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for receipt operations
pub type Result<T> = std::result::Result<T, ReceiptError>;

/// Errors that can occur while reading, writing or collecting receipts.
///
/// Every variant that concerns a file carries the offending path so a
/// caller running in partial-collection mode can report it per file.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// A file or directory could not be opened, listed or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content, or a failure while encoding a receipt
    #[error("invalid receipt {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// The file extension is neither `.json` nor `.csv`
    #[error("unsupported receipt format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Structurally invalid JSON, or JSON of the wrong shape
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReceiptError {
    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ReceiptError::Io { path, .. }
            | ReceiptError::Format { path, .. }
            | ReceiptError::UnsupportedFormat { path }
            | ReceiptError::Decode { path, .. } => path,
        }
    }
}

/// Errors raised while decoding a single encoded receipt stream.
///
/// These have no knowledge of file paths; [`ReceiptError`] attaches one.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The underlying CSV reader or writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row had fewer columns than the header
    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// One or more numeric columns of a row failed to parse
    #[error("row {row}: {}", FieldErrors(.failures))]
    InvalidNumbers { row: usize, failures: Vec<FieldError> },

    /// A price or tax cannot be encoded as a JSON number
    #[error("item {item}: {column} is not a finite number")]
    NonFinite { item: usize, column: &'static str },

    /// JSON decoding or encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing encoded output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single numeric column that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: &'static str,
    pub value: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} {:?}: {}",
            self.column, self.value, self.message
        )
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}
