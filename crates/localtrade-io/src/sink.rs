//! Report rendering.
//!
//! The text format is line oriented and meant for people (and for diffing against earlier runs):
//!
//! ```text
//! Data loaded. Launching computation...
//!
//! Results final revenue by nations:
//! INDIA: 190
//!
//! Time taken: 0.000412 seconds
//! ```
//!
//! The JSON format carries the same ranking plus the query and scan counters.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use localtrade_engine::{QueryOutcome, RevenueQuery, ScanStats};
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct JsonNation<'a> {
    nation: &'a str,
    revenue: f64,
}

#[derive(Debug, Serialize)]
struct JsonStats {
    orders_scanned: u64,
    orders_outside_window: u64,
    orders_unresolved_client: u64,
    orders_outside_region: u64,
    orders_without_items: u64,
    items_unresolved_vendor: u64,
    items_foreign_vendor: u64,
    items_malformed: u64,
    items_contributing: u64,
}

impl From<&ScanStats> for JsonStats {
    fn from(stats: &ScanStats) -> Self {
        Self {
            orders_scanned: stats.orders_scanned,
            orders_outside_window: stats.orders_outside_window,
            orders_unresolved_client: stats.orders_unresolved_client,
            orders_outside_region: stats.orders_outside_region,
            orders_without_items: stats.orders_without_items,
            items_unresolved_vendor: stats.items_unresolved_vendor,
            items_foreign_vendor: stats.items_foreign_vendor,
            items_malformed: stats.items_malformed,
            items_contributing: stats.items_contributing,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    region: &'a str,
    from: &'a str,
    to: &'a str,
    threads: usize,
    nations: Vec<JsonNation<'a>>,
    elapsed_seconds: f64,
    stats: JsonStats,
}

pub fn write_report<W: Write>(
    mut out: W,
    format: ReportFormat,
    query: &RevenueQuery,
    outcome: &QueryOutcome,
) -> Result<(), SinkError> {
    match format {
        ReportFormat::Text => {
            writeln!(out, "Data loaded. Launching computation...")?;
            writeln!(out)?;
            writeln!(out, "Results final revenue by nations:")?;
            for entry in &outcome.ranking {
                writeln!(out, "{}: {}", entry.nation, entry.revenue)?;
            }
            writeln!(out)?;
            writeln!(out, "Time taken: {} seconds", outcome.elapsed.as_secs_f64())?;
        }
        ReportFormat::Json => {
            let report = JsonReport {
                region: &query.region,
                from: &query.window.from,
                to: &query.window.to,
                threads: outcome.threads,
                nations: outcome
                    .ranking
                    .iter()
                    .map(|entry| JsonNation {
                        nation: &entry.nation,
                        revenue: entry.revenue,
                    })
                    .collect(),
                elapsed_seconds: outcome.elapsed.as_secs_f64(),
                stats: JsonStats::from(&outcome.stats),
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the report into it.
pub fn write_report_file(
    path: &Path,
    format: ReportFormat,
    query: &RevenueQuery,
    outcome: &QueryOutcome,
) -> Result<(), SinkError> {
    let file = File::create(path).map_err(|source| SinkError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_report(BufWriter::new(file), format, query, outcome)?;
    let nations = outcome.ranking.len();
    log::info!("wrote {nations} nations to {}", path.display());
    Ok(())
}
