//! Local-trade revenue engine.
//!
//! Given six flat tables loaded in memory (regions, nations, clients, orders, line items and
//! vendors), this crate computes the discounted revenue of every nation in one region where the
//! client and the vendor of a line item share the same nation, within a half-open order date
//! window.
//!
//! The pipeline is fixed:
//! - [`JoinIndex::build`] turns the tables into hash lookups (sequential, once per query).
//! - [`partition`] splits the order list into one contiguous range per worker.
//! - [`aggregate_partition`] runs the join chain and predicate over one range.
//! - [`RevenueMerger`] folds every worker's partial result under a single lock per worker.
//! - [`rank`] orders the merged totals by descending revenue.
//!
//! [`execute`] wires these together on a dedicated Rayon pool.

#![forbid(unsafe_code)]

mod error;
mod index;
mod merge;
mod model;
mod parallel;
mod partition;
mod query;
mod report;
mod worker;

pub use crate::error::{EngineError, EngineResult};
pub use crate::index::{JoinIndex, NationEntry};
pub use crate::merge::{fold_partials, MergedRevenue, RevenueMerger};
pub use crate::model::{
    join_key, Client, ClientKey, LineItem, Nation, NationKey, Order, OrderKey, Region, RegionKey,
    Tables, Vendor, VendorKey, MISSING_AMOUNT, MISSING_KEY,
};
pub use crate::parallel::{execute, execute_sequential};
pub use crate::partition::{partition, Partition};
pub use crate::query::{DateWindow, RevenueQuery};
pub use crate::report::{rank, NationRevenue, QueryOutcome};
pub use crate::worker::{aggregate_partition, PartialRevenue, RevenueByNation, ScanStats};
