//! # Receipt Collector
//!
//! Reads per-client receipt files (JSON or CSV) from a directory tree and
//! totals purchased item quantities, per client and overall.
//!
//! ## Pipeline
//!
//! - **Parse**: [`Receipt::read_file`] decodes one file, choosing the
//!   encoding from its extension
//! - **Collect**: [`collect_clients`] walks `<root>/<client>/<file>`
//! - **Aggregate**: [`Overview`] sums quantities by item id
//! - **Render**: [`Report`] writes aligned text blocks
//!
//! ## Example
//!
//! ```no_run
//! use receipt_collector::{collect_clients, CollectPolicy, RenderOrder, Report};
//! use std::path::Path;
//!
//! let collection = collect_clients(Path::new("data/receipts"), CollectPolicy::AbortOnError).unwrap();
//! let report = Report::from_clients(&collection.clients);
//! report.write_to(std::io::stdout(), RenderOrder::Sorted).unwrap();
//! ```

pub mod collector;
pub mod error;
pub mod format;
pub mod item;
pub mod overview;
pub mod receipt;
pub mod report;

pub use collector::{collect_clients, Client, CollectFailure, CollectPolicy, Collection};
pub use error::{FieldError, FormatError, ReceiptError, Result};
pub use format::ReceiptFormat;
pub use item::Item;
pub use overview::Overview;
pub use receipt::Receipt;
pub use report::{render_overview, RenderOrder, Report};
