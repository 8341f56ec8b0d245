use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use localtrade_engine::{Client, LineItem, Nation, Order, Region, Tables, Vendor};

use crate::tbl::{self, LineItemLayout, TblError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub line_item_layout: LineItemLayout,
}

/// Paths of the six table files inside a data folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetFiles {
    pub regions: PathBuf,
    pub nations: PathBuf,
    pub clients: PathBuf,
    pub orders: PathBuf,
    pub line_items: PathBuf,
    pub vendors: PathBuf,
}

impl DatasetFiles {
    pub fn in_folder(folder: impl AsRef<Path>) -> Self {
        let folder = folder.as_ref();
        Self {
            regions: folder.join("region.tbl"),
            nations: folder.join("nation.tbl"),
            clients: folder.join("customer.tbl"),
            orders: folder.join("orders.tbl"),
            line_items: folder.join("lineitem.tbl"),
            vendors: folder.join("supplier.tbl"),
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, TblError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TblError::Open {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_regions(path: &Path) -> Result<Vec<Region>, TblError> {
    tbl::read_regions(open(path)?)
}

pub fn load_nations(path: &Path) -> Result<Vec<Nation>, TblError> {
    tbl::read_nations(open(path)?)
}

pub fn load_clients(path: &Path) -> Result<Vec<Client>, TblError> {
    tbl::read_clients(open(path)?)
}

pub fn load_orders(path: &Path) -> Result<Vec<Order>, TblError> {
    tbl::read_orders(open(path)?)
}

pub fn load_line_items(path: &Path, layout: LineItemLayout) -> Result<Vec<LineItem>, TblError> {
    tbl::read_line_items(open(path)?, layout)
}

pub fn load_vendors(path: &Path) -> Result<Vec<Vendor>, TblError> {
    tbl::read_vendors(open(path)?)
}

/// Load all six tables of `folder`.
///
/// A missing or unreadable file fails the whole load; malformed fields inside a file do not.
pub fn load_dataset(folder: impl AsRef<Path>, options: &LoadOptions) -> Result<Tables, TblError> {
    let files = DatasetFiles::in_folder(folder.as_ref());
    let started = Instant::now();

    let tables = Tables {
        regions: load_regions(&files.regions)?,
        nations: load_nations(&files.nations)?,
        clients: load_clients(&files.clients)?,
        orders: load_orders(&files.orders)?,
        line_items: load_line_items(&files.line_items, options.line_item_layout)?,
        vendors: load_vendors(&files.vendors)?,
    };

    log::info!(
        "loaded {} rows from {} in {:?} ({} orders, {} line items)",
        tables.total_rows(),
        folder.as_ref().display(),
        started.elapsed(),
        tables.orders.len(),
        tables.line_items.len()
    );
    Ok(tables)
}
