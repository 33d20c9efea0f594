//! Receipt Collector CLI
//!
//! Collects every client's receipts under a root folder and prints the
//! grand total followed by one block per client.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data/receipts --policy partial
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` or `debug` to control logging verbosity

use clap::{Parser, ValueEnum};
use receipt_collector::{collect_clients, CollectPolicy, RenderOrder, Report, Result};
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Policy {
    /// Stop at the first unreadable directory or receipt
    Abort,
    /// Skip unreadable entries and report them at the end
    Partial,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Order {
    Sorted,
    Unordered,
}

#[derive(Parser, Debug)]
#[command(name = "receipt-collector", version, about = "Total item quantities across client receipts")]
struct Cli {
    /// Folder holding one subfolder per client
    #[arg(default_value = "data/receipts")]
    root: PathBuf,

    /// How to handle unreadable client folders or receipt files
    #[arg(long, value_enum, default_value = "abort")]
    policy: Policy,

    /// Output order of clients and item ids
    #[arg(long, value_enum, default_value = "sorted")]
    order: Order,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let policy = match cli.policy {
        Policy::Abort => CollectPolicy::AbortOnError,
        Policy::Partial => CollectPolicy::CollectPartial,
    };
    let order = match cli.order {
        Order::Sorted => RenderOrder::Sorted,
        Order::Unordered => RenderOrder::Unordered,
    };

    let collection = collect_clients(&cli.root, policy)?;
    let report = Report::from_clients(&collection.clients);

    let stdout = io::stdout();
    report
        .write_to(stdout.lock(), order)
        .map_err(|source| receipt_collector::ReceiptError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;

    if !collection.is_complete() {
        for failure in &collection.failures {
            eprintln!("Skipped: {}", failure.error);
        }
        eprintln!(
            "{} unreadable entries under {}",
            collection.failures.len(),
            cli.root.display()
        );
    }

    Ok(())
}
