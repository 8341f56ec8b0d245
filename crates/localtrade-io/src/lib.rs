//! File-facing collaborators of the local-trade engine.
//!
//! - [`tbl`]: decoding of pipe-delimited `.tbl` table dumps into engine row types.
//! - [`dataset`]: loading all six tables of a data folder.
//! - [`sink`]: rendering a [`localtrade_engine::QueryOutcome`] as text or JSON.

#![forbid(unsafe_code)]

pub mod dataset;
pub mod sink;
pub mod tbl;

pub use crate::dataset::{load_dataset, DatasetFiles, LoadOptions};
pub use crate::sink::{write_report, write_report_file, ReportFormat, SinkError};
pub use crate::tbl::{LineItemLayout, TblError};
