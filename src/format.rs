//! Receipt encodings: JSON and CSV.
//!
//! Both codecs work on plain readers and writers so they can be exercised
//! without touching the filesystem. File handling lives in [`crate::receipt`].

use crate::error::{FormatError, ReceiptError, Result};
use crate::item::{self, Item, CSV_HEADER};
use crate::receipt::Receipt;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::trace;
use std::io::{Read, Write};
use std::path::Path;

/// A supported receipt encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptFormat {
    Json,
    Csv,
}

impl ReceiptFormat {
    /// Determines the format from the path's extension (case-insensitive).
    ///
    /// Anything other than `.json` or `.csv`, including a missing extension,
    /// is rejected instead of producing an empty receipt.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(ReceiptFormat::Json),
            Some("csv") => Ok(ReceiptFormat::Csv),
            _ => Err(ReceiptError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Decodes a whole receipt from `reader`.
    pub fn read<R: Read>(self, reader: R) -> std::result::Result<Receipt, FormatError> {
        match self {
            ReceiptFormat::Json => read_json(reader),
            ReceiptFormat::Csv => read_csv(reader),
        }
    }

    /// Encodes `receipt` to `writer`.
    pub fn write<W: Write>(
        self,
        writer: W,
        receipt: &Receipt,
    ) -> std::result::Result<(), FormatError> {
        match self {
            ReceiptFormat::Json => write_json(writer, receipt),
            ReceiptFormat::Csv => write_csv(writer, receipt),
        }
    }
}

fn read_json<R: Read>(reader: R) -> std::result::Result<Receipt, FormatError> {
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<W: Write>(
    mut writer: W,
    receipt: &Receipt,
) -> std::result::Result<(), FormatError> {
    // serde_json would emit `null` for these, which the reader rejects
    for (idx, item) in receipt.items().iter().enumerate() {
        for (column, value) in [("price", item.price), ("tax", item.tax)] {
            if !value.is_finite() {
                return Err(FormatError::NonFinite {
                    item: idx + 1,
                    column,
                });
            }
        }
    }

    serde_json::to_writer_pretty(&mut writer, receipt)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn read_csv<R: Read>(reader: R) -> std::result::Result<Receipt, FormatError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut receipt = Receipt::new();
    let mut record = StringRecord::new();
    let mut row = 0;

    while csv_reader.read_record(&mut record)? {
        row += 1;

        if item::is_header(&record) {
            trace!("Row {}: skipping header", row);
            continue;
        }

        receipt.push(Item::from_record(&record, row)?);
    }

    Ok(receipt)
}

fn write_csv<W: Write>(writer: W, receipt: &Receipt) -> std::result::Result<(), FormatError> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for item in receipt.items() {
        csv_writer.write_record(item.to_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}
