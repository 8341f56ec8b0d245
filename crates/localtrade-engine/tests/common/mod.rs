#![allow(dead_code)]

use localtrade_engine::{Client, LineItem, Nation, Order, Region, Tables, Vendor};

pub fn region(id: i64, name: &str) -> Region {
    Region {
        id: Some(id),
        name: name.to_string(),
    }
}

pub fn nation(id: i64, name: &str, region_id: i64) -> Nation {
    Nation {
        id: Some(id),
        name: name.to_string(),
        region_id: Some(region_id),
    }
}

pub fn client(id: i64, nation_id: i64) -> Client {
    Client {
        id: Some(id),
        nation_id: Some(nation_id),
    }
}

pub fn vendor(id: i64, nation_id: i64) -> Vendor {
    Vendor {
        id: Some(id),
        nation_id: Some(nation_id),
    }
}

pub fn order(id: i64, client_id: i64, date: &str) -> Order {
    Order {
        id: Some(id),
        client_id: Some(client_id),
        order_date: date.to_string(),
    }
}

pub fn item(order_id: i64, vendor_id: i64, price: f64, discount: f64) -> LineItem {
    LineItem {
        order_id: Some(order_id),
        vendor_id: Some(vendor_id),
        price: Some(price),
        discount: Some(discount),
    }
}

/// Two regions with a handful of nations, one client and one vendor per nation (sharing the
/// nation's id), and no orders.
pub fn geography() -> Tables {
    Tables {
        regions: vec![region(0, "AFRICA"), region(1, "ASIA"), region(2, "EUROPE")],
        nations: vec![
            nation(0, "ALGERIA", 0),
            nation(8, "INDIA", 1),
            nation(9, "INDONESIA", 1),
            nation(12, "JAPAN", 1),
            nation(18, "CHINA", 1),
            nation(6, "FRANCE", 2),
            nation(7, "GERMANY", 2),
        ],
        clients: [0, 8, 9, 12, 18, 6, 7]
            .into_iter()
            .map(|n| client(n, n))
            .collect(),
        vendors: [0, 8, 9, 12, 18, 6, 7]
            .into_iter()
            .map(|n| vendor(n, n))
            .collect(),
        ..Tables::default()
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
