//! Receipts and their file-level reading and writing.

use crate::error::{FormatError, ReceiptError, Result};
use crate::format::ReceiptFormat;
use crate::item::Item;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// An ordered list of items read from one source file.
///
/// Item order is preserved and ids may repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(default, deserialize_with = "null_as_empty")]
    items: Vec<Item>,
}

/// `"items": null` reads the same as a missing `items` key.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Receipt {
    /// Creates an empty receipt.
    pub fn new() -> Self {
        Receipt { items: Vec::new() }
    }

    /// Appends an item at the end of the receipt.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reads a receipt file, picking the decoder from the file extension.
    ///
    /// Unsupported extensions are rejected before the file is opened.
    pub fn read_file(path: &Path) -> Result<Self> {
        let format = ReceiptFormat::from_path(path)?;

        let file = File::open(path).map_err(|source| ReceiptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let receipt = format
            .read(BufReader::new(file))
            .map_err(|e| with_path(e, path))?;

        debug!(
            "Read {} items from {} ({:?})",
            receipt.len(),
            path.display(),
            format
        );
        Ok(receipt)
    }

    /// Writes the receipt to `path`, encoding it according to the extension.
    ///
    /// The file is created or truncated.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let format = ReceiptFormat::from_path(path)?;

        let file = File::create(path).map_err(|source| ReceiptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        format
            .write(BufWriter::new(file), self)
            .map_err(|e| with_path(e, path))?;

        debug!("Wrote {} items to {}", self.len(), path.display());
        Ok(())
    }
}

impl FromIterator<Item> for Receipt {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Receipt {
            items: iter.into_iter().collect(),
        }
    }
}

/// Attaches a path to a codec error, keeping I/O and JSON failures distinct.
fn with_path(err: FormatError, path: &Path) -> ReceiptError {
    let path = path.to_path_buf();
    match err {
        FormatError::Io(source) => ReceiptError::Io { path, source },
        FormatError::Json(source) if source.is_io() => ReceiptError::Io {
            path,
            source: source.into(),
        },
        FormatError::Json(source) => ReceiptError::Decode { path, source },
        FormatError::Csv(source) if source.is_io_error() => ReceiptError::Io {
            path,
            source: source.into(),
        },
        other => ReceiptError::Format {
            path,
            source: other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_receipt() -> Receipt {
        vec![
            Item {
                id: "X".to_string(),
                quantity: 3,
                note: "first".to_string(),
                price: 12.5,
                tax: 0.21,
                timestamp: "2024-01-01T10:00:00Z".to_string(),
            },
            Item::new("Y", 1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_write_then_read_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r1.json");

        let receipt = sample_receipt();
        receipt.write_file(&path).unwrap();
        assert_eq!(Receipt::read_file(&path).unwrap(), receipt);
    }

    #[test]
    fn test_write_then_read_csv_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r1.csv");

        let receipt = sample_receipt();
        receipt.write_file(&path).unwrap();
        assert_eq!(Receipt::read_file(&path).unwrap(), receipt);
    }

    #[test]
    fn test_read_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "X,1,,0,0,t\n").unwrap();

        assert!(matches!(
            Receipt::read_file(&path),
            Err(ReceiptError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        match Receipt::read_file(&path) {
            Err(ReceiptError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_read_invalid_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"items\": 5}").unwrap();

        assert!(matches!(
            Receipt::read_file(&path),
            Err(ReceiptError::Decode { .. })
        ));
    }

    #[test]
    fn test_read_null_items_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r.json");
        fs::write(&path, "{\"items\": null}\n").unwrap();

        assert!(Receipt::read_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_non_finite_json_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r.json");
        let receipt: Receipt = vec![Item {
            tax: f64::NEG_INFINITY,
            ..Item::new("X", 1)
        }]
        .into_iter()
        .collect();

        assert!(matches!(
            receipt.write_file(&path),
            Err(ReceiptError::Format {
                source: FormatError::NonFinite { column: "tax", .. },
                ..
            })
        ));
    }

    #[test]
    fn test_read_malformed_csv_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "id,quantity,note,price,tax,time\nX,1,,0\n").unwrap();

        assert!(matches!(
            Receipt::read_file(&path),
            Err(ReceiptError::Format {
                source: FormatError::ColumnCount { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_write_unsupported_extension_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r1.xml");

        assert!(matches!(
            sample_receipt().write_file(&path),
            Err(ReceiptError::UnsupportedFormat { .. })
        ));
        assert!(!path.exists());
    }
}
