//! Report building and text rendering.

use crate::collector::Client;
use crate::overview::Overview;
use std::io::{self, Write};

/// Order in which report lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderOrder {
    /// Item ids and client ids sorted lexicographically.
    #[default]
    Sorted,

    /// Whatever order the underlying maps and directory listing give.
    Unordered,
}

/// Grand total plus one overview per client.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub total: Overview,
    pub clients: Vec<(String, Overview)>,
}

impl Report {
    /// Aggregates the receipts of every client, separately and combined.
    pub fn from_clients(clients: &[Client]) -> Self {
        let mut total = Overview::new();
        let mut per_client = Vec::with_capacity(clients.len());

        for client in clients {
            let mut overview = Overview::new();
            overview.add_receipts(&client.receipts);
            total.merge(&overview);
            per_client.push((client.id.clone(), overview));
        }

        Report {
            total,
            clients: per_client,
        }
    }

    /// Writes the total followed by each client's overview.
    pub fn write_to<W: Write>(&self, mut writer: W, order: RenderOrder) -> io::Result<()> {
        render_overview(&mut writer, "Total", &self.total, order)?;

        let mut clients: Vec<_> = self.clients.iter().collect();
        if order == RenderOrder::Sorted {
            clients.sort_by(|a, b| a.0.cmp(&b.0));
        }

        for (id, overview) in clients {
            render_overview(&mut writer, &format!("client: {}", id), overview, order)?;
        }

        writer.flush()
    }
}

/// Writes one labelled overview.
///
/// Ids are padded to the longest id in the overview so the quantities line
/// up, then a blank line closes the block.
pub fn render_overview<W: Write>(
    writer: &mut W,
    title: &str,
    overview: &Overview,
    order: RenderOrder,
) -> io::Result<()> {
    writeln!(writer, "==== {} ====", title)?;

    let entries: Vec<(&str, i64)> = match order {
        RenderOrder::Sorted => overview.sorted(),
        RenderOrder::Unordered => overview.iter().collect(),
    };

    let width = overview.max_id_width();
    for (id, quantity) in entries {
        let padding = width - id.chars().count();
        writeln!(writer, "{}:{}    {}", id, " ".repeat(padding), quantity)?;
    }

    writeln!(writer)
}
