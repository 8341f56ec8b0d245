#![no_main]

use libfuzzer_sys::fuzz_target;
use localtrade_engine::{execute_sequential, RevenueQuery, Tables};
use localtrade_io::tbl;
use localtrade_io::LineItemLayout;

/// Keep the harness itself bounded; every byte becomes part of six decoded tables.
const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let data = if data.len() > MAX_INPUT_BYTES {
        &data[..MAX_INPUT_BYTES]
    } else {
        data
    };

    // The first byte picks the line item layout; the rest is fed to every decoder so the same
    // bytes exercise all column positions.
    let layout = if data[0] & 1 == 0 {
        LineItemLayout::Standard
    } else {
        LineItemLayout::Dbgen
    };
    let body = &data[1..];

    // Decoding in-memory bytes can only fail on I/O, which a slice never produces.
    let tables = Tables {
        regions: tbl::read_regions(body).expect("regions"),
        nations: tbl::read_nations(body).expect("nations"),
        clients: tbl::read_clients(body).expect("clients"),
        orders: tbl::read_orders(body).expect("orders"),
        line_items: tbl::read_line_items(body, layout).expect("line items"),
        vendors: tbl::read_vendors(body).expect("vendors"),
    };

    // Whatever was decoded must be safe to query.
    let query = RevenueQuery::new("ASIA", "1995-01-01", "1996-01-01");
    let outcome = execute_sequential(&tables, &query);
    assert!(outcome.stats.orders_scanned as usize == tables.orders.len());
});
