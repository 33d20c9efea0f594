//! Client collection: walks `<root>/<client>/<receipt file>` and parses
//! every receipt it finds.
//!
//! The walk is single-threaded and sequential. Each file is opened, fully
//! decoded and closed before the next one is touched.

use crate::error::{ReceiptError, Result};
use crate::receipt::Receipt;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Receipts found in one client directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Name of the client directory. Unique within one collection run.
    pub id: String,

    pub receipts: Vec<Receipt>,
}

/// What to do when a client directory or receipt file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectPolicy {
    /// Stop at the first failure and return it.
    #[default]
    AbortOnError,

    /// Record the failure, skip the offending entry and keep going.
    CollectPartial,
}

/// A client directory or file that was skipped under
/// [`CollectPolicy::CollectPartial`].
#[derive(Debug)]
pub struct CollectFailure {
    pub path: PathBuf,
    pub error: ReceiptError,
}

/// Result of one collection run.
#[derive(Debug, Default)]
pub struct Collection {
    /// Clients in directory-listing order. Callers must not rely on it
    /// being sorted.
    pub clients: Vec<Client>,

    /// Always empty under [`CollectPolicy::AbortOnError`].
    pub failures: Vec<CollectFailure>,
}

impl Collection {
    /// Total number of parsed receipts across all clients.
    pub fn receipt_count(&self) -> usize {
        self.clients.iter().map(|c| c.receipts.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Collects every client under `root`.
///
/// Each immediate subdirectory of `root` is one client; plain files directly
/// under `root` are ignored. Within a client directory every plain file is
/// parsed as a receipt and nested directories are skipped.
///
/// Failing to list `root` is always an error. Other failures are handled
/// according to `policy`.
pub fn collect_clients(root: &Path, policy: CollectPolicy) -> Result<Collection> {
    info!("Collecting receipts under {}", root.display());

    let mut collection = Collection::default();

    for entry in list_dir(root)? {
        if !entry.is_dir {
            debug!("Skipping non-directory {}", entry.path.display());
            continue;
        }

        let id = match client_id(entry.name, &entry.path) {
            Ok(id) => id,
            Err(error) => match policy {
                CollectPolicy::AbortOnError => return Err(error),
                CollectPolicy::CollectPartial => {
                    warn!("Skipping client {}: {}", entry.path.display(), error);
                    collection.failures.push(CollectFailure {
                        path: entry.path,
                        error,
                    });
                    continue;
                }
            },
        };

        match collect_receipts(&entry.path, policy, &mut collection.failures) {
            Ok(receipts) => {
                debug!("Client {}: {} receipts", id, receipts.len());
                collection.clients.push(Client { id, receipts });
            }
            Err(error) => match policy {
                CollectPolicy::AbortOnError => return Err(error),
                CollectPolicy::CollectPartial => {
                    warn!("Skipping client {}: {}", id, error);
                    collection.failures.push(CollectFailure {
                        path: entry.path,
                        error,
                    });
                }
            },
        }
    }

    info!(
        "Collected {} clients, {} receipts",
        collection.clients.len(),
        collection.receipt_count()
    );
    Ok(collection)
}

/// Client ids must be exact directory names, so a name that is not valid
/// UTF-8 is rejected rather than lossily converted.
fn client_id(name: OsString, path: &Path) -> Result<String> {
    name.into_string().map_err(|name| ReceiptError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(
            io::ErrorKind::InvalidData,
            format!("client directory name {:?} is not valid UTF-8", name),
        ),
    })
}

/// Parses every plain file directly inside `folder`.
///
/// Only a failure to list `folder` itself is returned under
/// [`CollectPolicy::CollectPartial`]; per-file failures go to `failures`.
fn collect_receipts(
    folder: &Path,
    policy: CollectPolicy,
    failures: &mut Vec<CollectFailure>,
) -> Result<Vec<Receipt>> {
    let mut receipts = Vec::new();

    for entry in list_dir(folder)? {
        if entry.is_dir {
            debug!("Skipping nested directory {}", entry.path.display());
            continue;
        }

        match Receipt::read_file(&entry.path) {
            Ok(receipt) => receipts.push(receipt),
            Err(error) => match policy {
                CollectPolicy::AbortOnError => return Err(error),
                CollectPolicy::CollectPartial => {
                    warn!("Skipping receipt {}: {}", entry.path.display(), error);
                    failures.push(CollectFailure {
                        path: entry.path,
                        error,
                    });
                }
            },
        }
    }

    Ok(receipts)
}

struct DirEntry {
    name: OsString,
    path: PathBuf,
    is_dir: bool,
}

/// Lists the immediate entries of `dir` in filesystem order.
///
/// Symlinks are not followed when deciding whether an entry is a directory.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    let io_err = |source| ReceiptError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_type = entry.file_type().map_err(|source| ReceiptError::Io {
            path: entry.path(),
            source,
        })?;

        entries.push(DirEntry {
            name: entry.file_name(),
            path: entry.path(),
            is_dir: file_type.is_dir(),
        });
    }

    Ok(entries)
}
