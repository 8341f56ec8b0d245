mod common;

use common::*;
use localtrade_engine::{execute, execute_sequential, RevenueQuery, Tables};
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;

fn threads(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn single_local_trade_order_reports_one_nation() {
    let tables = Tables {
        regions: vec![region(1, "ASIA")],
        nations: vec![nation(8, "INDIA", 1)],
        clients: vec![client(1, 8)],
        vendors: vec![vendor(1, 8)],
        orders: vec![order(1, 1, "1995-06-01")],
        line_items: vec![item(1, 1, 200.0, 0.05)],
    };
    let query = RevenueQuery::new("ASIA", "1995-01-01", "1996-01-01");

    let outcome = execute(&tables, &query, threads(4)).unwrap();
    assert_eq!(outcome.ranking.len(), 1);
    assert_eq!(outcome.ranking[0].nation, "INDIA");
    assert_eq!(outcome.ranking[0].revenue, 190.0);
    assert_eq!(outcome.threads, 4);
}

#[test]
fn region_without_matching_nations_yields_empty_ranking() {
    let mut tables = geography();
    tables.orders = vec![order(1, 8, "1995-06-01")];
    tables.line_items = vec![item(1, 8, 10.0, 0.0)];
    let query = RevenueQuery::new("AMERICA", "1995-01-01", "1996-01-01");

    let outcome = execute(&tables, &query, threads(2)).unwrap();
    assert!(outcome.ranking.is_empty());
    assert_eq!(outcome.stats.orders_outside_region, 1);
}

#[test]
fn ranking_is_descending_and_excludes_other_regions() {
    let mut tables = geography();
    tables.orders = vec![
        order(1, 8, "1995-02-01"),
        order(2, 12, "1995-03-01"),
        order(3, 18, "1995-04-01"),
        order(4, 6, "1995-05-01"),
        order(5, 12, "1997-01-01"),
    ];
    tables.line_items = vec![
        item(1, 8, 100.0, 0.0),
        item(2, 12, 300.0, 0.0),
        item(3, 18, 200.0, 0.5),
        item(3, 18, 150.0, 0.0),
        item(4, 6, 1_000.0, 0.0),
        item(5, 12, 1_000.0, 0.0),
    ];
    let query = RevenueQuery::new("ASIA", "1995-01-01", "1996-01-01");

    let outcome = execute(&tables, &query, threads(3)).unwrap();
    let ranking: Vec<(&str, f64)> = outcome
        .ranking
        .iter()
        .map(|r| (r.nation.as_str(), r.revenue))
        .collect();
    assert_eq!(
        ranking,
        vec![("JAPAN", 300.0), ("CHINA", 250.0), ("INDIA", 100.0)]
    );
}

#[test]
fn more_threads_than_orders_still_counts_everything_once() {
    let mut tables = geography();
    tables.orders = vec![order(1, 8, "1995-06-01"), order(2, 9, "1995-06-02")];
    tables.line_items = vec![item(1, 8, 10.0, 0.0), item(2, 9, 20.0, 0.0)];
    let query = RevenueQuery::new("ASIA", "1995-01-01", "1996-01-01");

    let outcome = execute(&tables, &query, threads(16)).unwrap();
    assert_eq!(outcome.stats.orders_scanned, 2);
    assert_eq!(outcome.revenue_of("INDIA"), Some(10.0));
    assert_eq!(outcome.revenue_of("INDONESIA"), Some(20.0));
}

#[test]
fn empty_tables_produce_an_empty_report() {
    let query = RevenueQuery::new("ASIA", "1995-01-01", "1996-01-01");
    let outcome = execute(&Tables::default(), &query, threads(3)).unwrap();
    assert!(outcome.ranking.is_empty());
    assert_eq!(outcome.stats.orders_scanned, 0);
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let mut tables = geography();
    let nations = [0, 8, 9, 12, 18, 6, 7];
    for id in 0..2_000i64 {
        let client_nation = nations[(id % 7) as usize];
        let month = 1 + (id % 24);
        let date = format!("{}-{:02}-15", 1994 + month / 12, 1 + month % 12);
        tables.orders.push(order(id, client_nation, &date));
        for line in 0..(id % 4) {
            let vendor_nation = nations[((id + line) % 7) as usize];
            let price = 10.0 + (id * 7 + line) as f64 * 0.25;
            let discount = ((id + line) % 11) as f64 / 100.0;
            tables.line_items.push(item(id, vendor_nation, price, discount));
        }
    }
    let query = RevenueQuery::new("ASIA", "1995-01-01", "1996-01-01");

    let baseline = execute_sequential(&tables, &query);
    assert!(!baseline.ranking.is_empty());
    for n in [1, 2, 3, 8, 13] {
        let outcome = execute(&tables, &query, threads(n)).unwrap();
        assert_eq!(outcome.stats, baseline.stats);

        let mut names: Vec<_> = outcome.ranking.iter().map(|r| &r.nation).collect();
        let mut expected: Vec<_> = baseline.ranking.iter().map(|r| &r.nation).collect();
        names.sort();
        expected.sort();
        assert_eq!(names, expected);

        for entry in &baseline.ranking {
            assert_close(outcome.revenue_of(&entry.nation).unwrap(), entry.revenue);
        }
    }
}
