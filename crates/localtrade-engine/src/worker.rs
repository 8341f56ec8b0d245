use crate::index::JoinIndex;
use crate::model::{join_key, Order};
use crate::partition::Partition;
use crate::query::RevenueQuery;
use ahash::AHashMap;
use std::ops::AddAssign;

/// Accumulated revenue keyed by nation name.
///
/// Names are borrowed from the nation table through the [`JoinIndex`].
pub type RevenueByNation<'a> = AHashMap<&'a str, f64>;

/// Counters describing why orders and line items did or did not contribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub orders_scanned: u64,
    pub orders_outside_window: u64,
    pub orders_unresolved_client: u64,
    /// Client nation, its region, or the region name did not resolve to the queried region.
    pub orders_outside_region: u64,
    pub orders_without_items: u64,
    pub items_unresolved_vendor: u64,
    pub items_foreign_vendor: u64,
    /// Contributing line items whose price or discount failed to parse when the table was loaded.
    pub items_malformed: u64,
    pub items_contributing: u64,
}

impl AddAssign for ScanStats {
    fn add_assign(&mut self, other: Self) {
        self.orders_scanned += other.orders_scanned;
        self.orders_outside_window += other.orders_outside_window;
        self.orders_unresolved_client += other.orders_unresolved_client;
        self.orders_outside_region += other.orders_outside_region;
        self.orders_without_items += other.orders_without_items;
        self.items_unresolved_vendor += other.items_unresolved_vendor;
        self.items_foreign_vendor += other.items_foreign_vendor;
        self.items_malformed += other.items_malformed;
        self.items_contributing += other.items_contributing;
    }
}

/// One worker's private result.
#[derive(Clone, Debug, Default)]
pub struct PartialRevenue<'a> {
    pub worker: usize,
    pub revenue: RevenueByNation<'a>,
    pub stats: ScanStats,
}

/// Join, filter and aggregate the orders in `part`.
///
/// For each order: keep it only if its date lies in the query window, its client resolves to a
/// nation whose region is the queried one, and it has line items. For each of its line items, keep
/// it only if the vendor's nation is the client's nation, then add `price * (1 - discount)` to that
/// nation's total.
///
/// Keys that failed to parse join as [`MISSING_KEY`](crate::MISSING_KEY), and a missing price or
/// discount enters the amount as [`MISSING_AMOUNT`](crate::MISSING_AMOUNT); such line items still
/// contribute and are counted as malformed. Anything that fails to resolve is skipped and counted;
/// nothing here is an error. The result is
/// owned by the caller and touches no shared state.
pub fn aggregate_partition<'a>(
    orders: &[Order],
    part: Partition,
    index: &JoinIndex<'a>,
    query: &RevenueQuery,
) -> PartialRevenue<'a> {
    let mut revenue = RevenueByNation::default();
    let mut stats = ScanStats::default();

    let orders = orders.get(part.range()).unwrap_or_default();
    for order in orders {
        stats.orders_scanned += 1;

        if !query.window.contains(&order.order_date) {
            stats.orders_outside_window += 1;
            continue;
        }

        let Some(nation_id) = index.client_nation(join_key(order.client_id)) else {
            stats.orders_unresolved_client += 1;
            continue;
        };

        if index.nation_region_name(nation_id) != Some(query.region.as_str()) {
            stats.orders_outside_region += 1;
            continue;
        }
        let Some(nation) = index.nation(nation_id) else {
            stats.orders_outside_region += 1;
            continue;
        };

        let Some(items) = index.order_items(join_key(order.id)) else {
            stats.orders_without_items += 1;
            continue;
        };

        for item in items {
            let Some(vendor_nation) = index.vendor_nation(join_key(item.vendor_id)) else {
                stats.items_unresolved_vendor += 1;
                continue;
            };
            if vendor_nation != nation_id {
                stats.items_foreign_vendor += 1;
                continue;
            }
            if item.is_malformed() {
                stats.items_malformed += 1;
            }

            *revenue.entry(nation.name).or_insert(0.0) += item.discounted_amount();
            stats.items_contributing += 1;
        }
    }

    PartialRevenue {
        worker: part.worker,
        revenue,
        stats,
    }
}
