//! Decoding of `.tbl` dumps.
//!
//! One record per line, fields separated by `|`, no header, usually a trailing `|` before the line
//! break. Only the columns the engine needs are read; the rest are ignored, and so is any extra or
//! missing trailing field.
//!
//! A numeric field that is missing or does not parse becomes `None` and is reported through
//! `log::warn!` (capped per table). It never aborts the load. I/O failures do.

use std::io::Read;

use csv::ByteRecord;
use localtrade_engine::{Client, LineItem, Nation, Order, Region, Vendor};
use thiserror::Error;

/// Warnings logged per table before switching to a summary count.
const MAX_LOGGED_WARNINGS: u64 = 10;

#[derive(Debug, Error)]
pub enum TblError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {table} table at line {line}: {source}")]
    Read {
        table: &'static str,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Position of the vendor key in `lineitem.tbl`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineItemLayout {
    /// `order|vendor|part|line|quantity|price|discount|...`
    #[default]
    Standard,
    /// TPC-H `dbgen` output: `order|part|vendor|line|quantity|price|discount|...`
    Dbgen,
}

impl LineItemLayout {
    fn vendor_column(self) -> usize {
        match self {
            LineItemLayout::Standard => 1,
            LineItemLayout::Dbgen => 2,
        }
    }
}

/// Field access for one record, with parse failures logged against the table and line.
struct Fields<'r> {
    record: &'r ByteRecord,
    line: u64,
    warnings: &'r mut Warnings,
}

impl Fields<'_> {
    fn raw(&self, idx: usize) -> Option<&str> {
        let bytes = self.record.get(idx)?;
        std::str::from_utf8(bytes).ok().map(str::trim)
    }

    fn text(&mut self, idx: usize, field: &'static str) -> String {
        match self.record.get(idx) {
            Some(bytes) => String::from_utf8_lossy(bytes).trim().to_string(),
            None => {
                self.warnings.record(field, self.line, None);
                String::new()
            }
        }
    }

    fn int(&mut self, idx: usize, field: &'static str) -> Option<i64> {
        let parsed = self.raw(idx).and_then(|raw| raw.parse::<i64>().ok());
        if parsed.is_none() {
            let raw = self.raw_lossy(idx);
            self.warnings.record(field, self.line, raw);
        }
        parsed
    }

    fn float(&mut self, idx: usize, field: &'static str) -> Option<f64> {
        let parsed = self.raw(idx).and_then(|raw| raw.parse::<f64>().ok());
        if parsed.is_none() {
            let raw = self.raw_lossy(idx);
            self.warnings.record(field, self.line, raw);
        }
        parsed
    }

    fn raw_lossy(&self, idx: usize) -> Option<String> {
        self.record
            .get(idx)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

#[derive(Debug)]
struct Warnings {
    table: &'static str,
    count: u64,
}

impl Warnings {
    fn new(table: &'static str) -> Self {
        Self { table, count: 0 }
    }

    fn record(&mut self, field: &'static str, line: u64, raw: Option<String>) {
        self.count += 1;
        if self.count > MAX_LOGGED_WARNINGS {
            return;
        }
        match raw {
            Some(raw) => log::warn!(
                "{}.{field}: line {line}: could not parse {raw:?}",
                self.table
            ),
            None => log::warn!("{}.{field}: line {line}: field missing", self.table),
        }
    }

    fn finish(self, rows: usize) {
        if self.count > MAX_LOGGED_WARNINGS {
            log::warn!(
                "{}: {} unparseable fields across {rows} rows ({} not shown)",
                self.table,
                self.count,
                self.count - MAX_LOGGED_WARNINGS
            );
        }
    }
}

fn read_table<R, T>(
    reader: R,
    table: &'static str,
    mut decode: impl FnMut(&mut Fields<'_>) -> T,
) -> Result<Vec<T>, TblError>
where
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        // Dumps end every record with a delimiter and may carry free-text comments; neither
        // quoting nor a fixed field count applies.
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut warnings = Warnings::new(table);
    let mut record = ByteRecord::new();
    loop {
        let line = record.position().map_or(0, |p| p.line()) + 1;
        let has_record = csv_reader
            .read_byte_record(&mut record)
            .map_err(|source| TblError::Read {
                table,
                line,
                source,
            })?;
        if !has_record {
            break;
        }
        if record.len() == 1 && record[0].iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let line = record.position().map_or(line, |p| p.line());
        let mut fields = Fields {
            record: &record,
            line,
            warnings: &mut warnings,
        };
        rows.push(decode(&mut fields));
    }

    warnings.finish(rows.len());
    log::debug!("{table}: decoded {} rows", rows.len());
    Ok(rows)
}

/// `region.tbl`: `key|name|comment|`
pub fn read_regions<R: Read>(reader: R) -> Result<Vec<Region>, TblError> {
    read_table(reader, "region", |f| Region {
        id: f.int(0, "key"),
        name: f.text(1, "name"),
    })
}

/// `nation.tbl`: `key|name|region|comment|`
pub fn read_nations<R: Read>(reader: R) -> Result<Vec<Nation>, TblError> {
    read_table(reader, "nation", |f| Nation {
        id: f.int(0, "key"),
        name: f.text(1, "name"),
        region_id: f.int(2, "region"),
    })
}

/// `customer.tbl`: `key|name|address|nation|...`
pub fn read_clients<R: Read>(reader: R) -> Result<Vec<Client>, TblError> {
    read_table(reader, "customer", |f| Client {
        id: f.int(0, "key"),
        nation_id: f.int(3, "nation"),
    })
}

/// `orders.tbl`: `key|customer|status|total|date|...`
pub fn read_orders<R: Read>(reader: R) -> Result<Vec<Order>, TblError> {
    read_table(reader, "orders", |f| Order {
        id: f.int(0, "key"),
        client_id: f.int(1, "customer"),
        order_date: f.text(4, "date"),
    })
}

/// `lineitem.tbl`: order key first, vendor key per `layout`, price and discount at 5 and 6.
pub fn read_line_items<R: Read>(
    reader: R,
    layout: LineItemLayout,
) -> Result<Vec<LineItem>, TblError> {
    let vendor = layout.vendor_column();
    read_table(reader, "lineitem", |f| LineItem {
        order_id: f.int(0, "order"),
        vendor_id: f.int(vendor, "supplier"),
        price: f.float(5, "price"),
        discount: f.float(6, "discount"),
    })
}

/// `supplier.tbl`: `key|name|address|nation|...`
pub fn read_vendors<R: Read>(reader: R) -> Result<Vec<Vendor>, TblError> {
    read_table(reader, "supplier", |f| Vendor {
        id: f.int(0, "key"),
        nation_id: f.int(3, "nation"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_regions_with_trailing_delimiter() {
        let input = "0|AFRICA|lar deposits. blithely final|\n2|ASIA|ges. thinly even|\n";
        let regions = read_regions(input.as_bytes()).unwrap();
        assert_eq!(
            regions,
            vec![
                Region {
                    id: Some(0),
                    name: "AFRICA".to_string(),
                },
                Region {
                    id: Some(2),
                    name: "ASIA".to_string(),
                },
            ]
        );
    }

    #[test]
    fn reads_nations() {
        let input = "8|INDIA|2|ss excuses cajole slyly across the packages|\n";
        let nations = read_nations(input.as_bytes()).unwrap();
        assert_eq!(
            nations,
            vec![Nation {
                id: Some(8),
                name: "INDIA".to_string(),
                region_id: Some(2),
            }]
        );
    }

    #[test]
    fn reads_clients_and_vendors_from_the_fourth_column() {
        let customers = "1|Customer#000000001|IVhzIApeRb ot,c,E|15|25-989-741-2988|711.56|BUILDING|x|\n";
        let suppliers = "1|Supplier#000000001| N kD4on9OM Ipw3,gf0JBoQDd7tgrzrddZ|17|27-918-335-1736|5755.94|each slyly above|\n";
        assert_eq!(
            read_clients(customers.as_bytes()).unwrap(),
            vec![Client {
                id: Some(1),
                nation_id: Some(15),
            }]
        );
        assert_eq!(
            read_vendors(suppliers.as_bytes()).unwrap(),
            vec![Vendor {
                id: Some(1),
                nation_id: Some(17),
            }]
        );
    }

    #[test]
    fn reads_orders_date_from_fifth_column() {
        let input = "1|36901|O|173665.47|1996-01-02|5-LOW|Clerk#000000951|0|nstructions sleep|\n";
        let orders = read_orders(input.as_bytes()).unwrap();
        assert_eq!(
            orders,
            vec![Order {
                id: Some(1),
                client_id: Some(36901),
                order_date: "1996-01-02".to_string(),
            }]
        );
    }

    #[test]
    fn line_item_layout_selects_vendor_column() {
        let input = "1|7706|155190|1|17|21168.23|0.04|0.02|N|O|1996-03-13|\n";

        let standard = read_line_items(input.as_bytes(), LineItemLayout::Standard).unwrap();
        assert_eq!(
            standard,
            vec![LineItem {
                order_id: Some(1),
                vendor_id: Some(7706),
                price: Some(21168.23),
                discount: Some(0.04),
            }]
        );

        let dbgen = read_line_items(input.as_bytes(), LineItemLayout::Dbgen).unwrap();
        assert_eq!(dbgen[0].vendor_id, Some(155190));
    }

    #[test]
    fn malformed_numbers_become_none() {
        let input = "x1|7|a|b|c|12,5|n/a|\n2|3|\n";
        let items = read_line_items(input.as_bytes(), LineItemLayout::Standard).unwrap();
        assert_eq!(
            items,
            vec![
                LineItem {
                    order_id: None,
                    vendor_id: Some(7),
                    price: None,
                    discount: None,
                },
                LineItem {
                    order_id: Some(2),
                    vendor_id: Some(3),
                    price: None,
                    discount: None,
                },
            ]
        );
    }

    #[test]
    fn non_finite_numbers_are_kept() {
        let input = "1|2|a|b|c|inf|nan|\n";
        let items = read_line_items(input.as_bytes(), LineItemLayout::Standard).unwrap();
        assert_eq!(items[0].price, Some(f64::INFINITY));
        assert!(items[0].discount.is_some_and(f64::is_nan));
    }

    #[test]
    fn fields_are_trimmed() {
        let input = " 3 | EUROPE |x|\n";
        let regions = read_regions(input.as_bytes()).unwrap();
        assert_eq!(regions[0].id, Some(3));
        assert_eq!(regions[0].name, "EUROPE");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "0|AFRICA|\n\n1|AMERICA|\r\n";
        let regions = read_regions(input.as_bytes()).unwrap();
        let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["AFRICA", "AMERICA"]);
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        assert!(read_orders(&b""[..]).unwrap().is_empty());
    }
}
