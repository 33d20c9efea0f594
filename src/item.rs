//! Receipt line items and their CSV row representation.

use crate::error::{FieldError, FormatError};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Column names of a CSV receipt, in order.
pub const CSV_HEADER: [&str; 6] = ["id", "quantity", "note", "price", "tax", "time"];

/// A single purchased item on a receipt.
///
/// `quantity` is taken as parsed; negative or zero values are not rejected.
/// `timestamp` is kept as the literal string from the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Product / SKU identifier
    pub id: String,

    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub note: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub tax: f64,

    /// RFC 3339 instant, stored opaquely
    #[serde(rename = "time", default)]
    pub timestamp: String,
}

impl Item {
    /// Creates an item with the given id and quantity and empty remaining fields.
    pub fn new(id: impl Into<String>, quantity: i64) -> Self {
        Item {
            id: id.into(),
            quantity,
            note: String::new(),
            price: 0.0,
            tax: 0.0,
            timestamp: String::new(),
        }
    }

    /// Parses one CSV data row.
    ///
    /// `row` is the 1-based record number, used only for error reporting.
    /// Every numeric column is attempted; all failures are returned together.
    pub fn from_record(record: &StringRecord, row: usize) -> Result<Self, FormatError> {
        if record.len() < CSV_HEADER.len() {
            return Err(FormatError::ColumnCount {
                row,
                expected: CSV_HEADER.len(),
                found: record.len(),
            });
        }

        let mut failures = Vec::new();

        let quantity = record[1].parse::<i64>().map_err(|e| FieldError {
            column: CSV_HEADER[1],
            value: record[1].to_string(),
            message: e.to_string(),
        });
        let price = record[3].parse::<f64>().map_err(|e| FieldError {
            column: CSV_HEADER[3],
            value: record[3].to_string(),
            message: e.to_string(),
        });
        let tax = record[4].parse::<f64>().map_err(|e| FieldError {
            column: CSV_HEADER[4],
            value: record[4].to_string(),
            message: e.to_string(),
        });

        let quantity = quantity.unwrap_or_else(|e| {
            failures.push(e);
            0
        });
        let price = price.unwrap_or_else(|e| {
            failures.push(e);
            0.0
        });
        let tax = tax.unwrap_or_else(|e| {
            failures.push(e);
            0.0
        });

        if !failures.is_empty() {
            return Err(FormatError::InvalidNumbers { row, failures });
        }

        Ok(Item {
            id: record[0].to_string(),
            quantity,
            note: record[2].to_string(),
            price,
            tax,
            timestamp: record[5].to_string(),
        })
    }

    /// Renders the item as a CSV row in header order.
    ///
    /// Floats use Rust's shortest round-trip representation, so reading the
    /// row back yields the identical value.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.id.clone(),
            self.quantity.to_string(),
            self.note.clone(),
            self.price.to_string(),
            self.tax.to_string(),
            self.timestamp.clone(),
        ]
    }
}

/// Returns `true` if the record is the CSV header row.
pub fn is_header(record: &StringRecord) -> bool {
    record.len() == CSV_HEADER.len() && record.iter().zip(CSV_HEADER).all(|(a, b)| a == b)
}
