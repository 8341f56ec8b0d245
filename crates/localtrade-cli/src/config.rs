use std::num::NonZeroUsize;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, ValueEnum};
use localtrade_engine::RevenueQuery;
use localtrade_io::{LineItemLayout, LoadOptions, ReportFormat};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LineItemColumns {
    /// Vendor key in the second column.
    Standard,
    /// Vendor key in the third column, as written by TPC-H `dbgen`.
    Dbgen,
}

#[derive(Parser, Debug)]
#[command(
    name = "localtrade",
    about = "Rank the nations of one region by revenue from local trade (client and vendor in the same nation).",
    after_help = "Example: localtrade ASIA 1995-01-01 1996-01-01 4 ./data/ output.txt"
)]
pub struct Args {
    /// Region name, matched exactly (e.g. `ASIA`).
    region: String,

    /// First order date included (YYYY-MM-DD).
    #[arg(value_parser = parse_date)]
    from_date: NaiveDate,

    /// First order date excluded (YYYY-MM-DD).
    #[arg(value_parser = parse_date)]
    to_date: NaiveDate,

    /// Number of worker threads the orders are split across.
    #[arg(value_parser = parse_threads)]
    threads: NonZeroUsize,

    /// Folder holding region.tbl, nation.tbl, customer.tbl, orders.tbl, lineitem.tbl and
    /// supplier.tbl.
    data_dir: PathBuf,

    /// File the report is written to (created or truncated).
    result_file: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Column layout of lineitem.tbl.
    #[arg(long = "lineitem-layout", value_enum, default_value_t = LineItemColumns::Standard)]
    lineitem_layout: LineItemColumns,
}

/// Validated run configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub query: RevenueQuery,
    pub threads: NonZeroUsize,
    pub data_dir: PathBuf,
    pub result_file: PathBuf,
    pub format: ReportFormat,
    pub load: LoadOptions,
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|err| format!("expected a YYYY-MM-DD date, got '{input}' ({err})"))
}

fn parse_threads(input: &str) -> Result<NonZeroUsize, String> {
    input
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| format!("expected a positive integer, got '{input}'"))
}

impl Args {
    /// Cross-argument checks clap cannot express.
    pub fn into_config(self) -> Result<Config, clap::Error> {
        if self.from_date > self.to_date {
            return Err(Args::command().error(
                clap::error::ErrorKind::ValueValidation,
                format!(
                    "FROM_DATE {} is after TO_DATE {}",
                    self.from_date, self.to_date
                ),
            ));
        }

        // Dates are re-rendered zero-padded so byte-wise comparison against order dates matches
        // chronological order even if the user typed `1995-1-1`.
        let query = RevenueQuery::new(
            self.region,
            self.from_date.format(DATE_FORMAT).to_string(),
            self.to_date.format(DATE_FORMAT).to_string(),
        );

        Ok(Config {
            query,
            threads: self.threads,
            data_dir: self.data_dir,
            result_file: self.result_file,
            format: match self.format {
                OutputFormat::Text => ReportFormat::Text,
                OutputFormat::Json => ReportFormat::Json,
            },
            load: LoadOptions {
                line_item_layout: match self.lineitem_layout {
                    LineItemColumns::Standard => LineItemLayout::Standard,
                    LineItemColumns::Dbgen => LineItemLayout::Dbgen,
                },
            },
        })
    }
}
