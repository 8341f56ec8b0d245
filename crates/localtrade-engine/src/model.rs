//! Row types for the six input tables.
//!
//! Numeric fields are optional: a field that could not be parsed when the table was loaded is
//! `None`. The join phase still treats it like the dumps' historical `-1`: a missing key joins as
//! [`MISSING_KEY`] and a missing price or discount enters the revenue formula as
//! [`MISSING_AMOUNT`].

pub type RegionKey = i64;
pub type NationKey = i64;
pub type ClientKey = i64;
pub type OrderKey = i64;
pub type VendorKey = i64;

/// Key a field that failed to parse is joined under.
pub const MISSING_KEY: i64 = -1;

/// Value a price or discount that failed to parse takes in the revenue formula.
pub const MISSING_AMOUNT: f64 = -1.0;

/// Join key of an optional key field.
pub fn join_key(key: Option<i64>) -> i64 {
    key.unwrap_or(MISSING_KEY)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub id: Option<RegionKey>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Nation {
    pub id: Option<NationKey>,
    pub name: String,
    pub region_id: Option<RegionKey>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    pub id: Option<ClientKey>,
    pub nation_id: Option<NationKey>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: Option<OrderKey>,
    pub client_id: Option<ClientKey>,
    /// ISO `YYYY-MM-DD`; compared lexicographically.
    pub order_date: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub order_id: Option<OrderKey>,
    pub vendor_id: Option<VendorKey>,
    pub price: Option<f64>,
    /// Fraction in `[0, 1]`.
    pub discount: Option<f64>,
}

impl LineItem {
    /// Discounted amount `price * (1 - discount)`, with missing fields taken as [`MISSING_AMOUNT`].
    pub fn discounted_amount(&self) -> f64 {
        let price = self.price.unwrap_or(MISSING_AMOUNT);
        let discount = self.discount.unwrap_or(MISSING_AMOUNT);
        price * (1.0 - discount)
    }

    /// Whether price or discount failed to parse.
    pub fn is_malformed(&self) -> bool {
        self.price.is_none() || self.discount.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vendor {
    pub id: Option<VendorKey>,
    pub nation_id: Option<NationKey>,
}

/// All six tables of one dataset.
///
/// Owned by the caller and borrowed read-only by the engine for the duration of one query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tables {
    pub regions: Vec<Region>,
    pub nations: Vec<Nation>,
    pub clients: Vec<Client>,
    pub orders: Vec<Order>,
    pub line_items: Vec<LineItem>,
    pub vendors: Vec<Vendor>,
}

impl Tables {
    pub fn total_rows(&self) -> usize {
        self.regions.len()
            + self.nations.len()
            + self.clients.len()
            + self.orders.len()
            + self.line_items.len()
            + self.vendors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discounted_amount_applies_rate() {
        let item = LineItem {
            order_id: Some(1),
            vendor_id: Some(1),
            price: Some(100.0),
            discount: Some(0.1),
        };
        assert_eq!(item.discounted_amount(), 90.0);
        assert!(!item.is_malformed());
    }

    #[test]
    fn missing_fields_enter_the_amount_as_minus_one() {
        let mut item = LineItem {
            order_id: Some(1),
            vendor_id: Some(1),
            price: None,
            discount: Some(0.1),
        };
        assert_eq!(item.discounted_amount(), -0.9);
        assert!(item.is_malformed());

        item.price = Some(10.0);
        item.discount = None;
        assert_eq!(item.discounted_amount(), 20.0);
        assert!(item.is_malformed());
    }

    #[test]
    fn missing_keys_join_as_minus_one() {
        assert_eq!(join_key(Some(7)), 7);
        assert_eq!(join_key(None), MISSING_KEY);
    }
}
