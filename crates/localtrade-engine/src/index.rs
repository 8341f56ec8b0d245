use crate::model::{
    join_key, ClientKey, LineItem, NationKey, OrderKey, RegionKey, Tables, VendorKey,
};
use ahash::AHashMap;

/// Name and region of one nation, as stored in the nation index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NationEntry<'a> {
    pub name: &'a str,
    pub region_id: RegionKey,
}

/// Hash lookups over one [`Tables`] snapshot.
///
/// Built once, sequentially, before any worker starts; read-only afterwards, so workers share it
/// through a plain `&JoinIndex`. Names and line items are borrowed from the tables.
///
/// Every key goes through [`join_key`], so a key that failed to parse is stored and looked up as
/// [`MISSING_KEY`](crate::MISSING_KEY) like any other value. Repeated keys follow
/// last-write-wins, except line items which are grouped per order. Dangling foreign keys are not
/// detected here; they just fail to resolve during the scan.
#[derive(Debug, Default)]
pub struct JoinIndex<'a> {
    region_names: AHashMap<RegionKey, &'a str>,
    nations: AHashMap<NationKey, NationEntry<'a>>,
    client_nations: AHashMap<ClientKey, NationKey>,
    vendor_nations: AHashMap<VendorKey, NationKey>,
    order_items: AHashMap<OrderKey, Vec<&'a LineItem>>,
}

impl<'a> JoinIndex<'a> {
    pub fn build(tables: &'a Tables) -> Self {
        let mut region_names = AHashMap::with_capacity(tables.regions.len());
        for region in &tables.regions {
            region_names.insert(join_key(region.id), region.name.as_str());
        }

        let mut nations = AHashMap::with_capacity(tables.nations.len());
        for nation in &tables.nations {
            nations.insert(
                join_key(nation.id),
                NationEntry {
                    name: nation.name.as_str(),
                    region_id: join_key(nation.region_id),
                },
            );
        }

        let mut client_nations = AHashMap::with_capacity(tables.clients.len());
        for client in &tables.clients {
            client_nations.insert(join_key(client.id), join_key(client.nation_id));
        }

        let mut vendor_nations = AHashMap::with_capacity(tables.vendors.len());
        for vendor in &tables.vendors {
            vendor_nations.insert(join_key(vendor.id), join_key(vendor.nation_id));
        }

        let mut order_items: AHashMap<OrderKey, Vec<&'a LineItem>> =
            AHashMap::with_capacity(tables.orders.len());
        for item in &tables.line_items {
            order_items
                .entry(join_key(item.order_id))
                .or_default()
                .push(item);
        }

        log::debug!(
            "join index built: {} regions, {} nations, {} clients, {} vendors, {} orders with items",
            region_names.len(),
            nations.len(),
            client_nations.len(),
            vendor_nations.len(),
            order_items.len()
        );

        Self {
            region_names,
            nations,
            client_nations,
            vendor_nations,
            order_items,
        }
    }

    pub fn region_name(&self, region: RegionKey) -> Option<&'a str> {
        self.region_names.get(&region).copied()
    }

    pub fn nation(&self, nation: NationKey) -> Option<NationEntry<'a>> {
        self.nations.get(&nation).copied()
    }

    pub fn client_nation(&self, client: ClientKey) -> Option<NationKey> {
        self.client_nations.get(&client).copied()
    }

    pub fn vendor_nation(&self, vendor: VendorKey) -> Option<NationKey> {
        self.vendor_nations.get(&vendor).copied()
    }

    /// Line items of an order; `None` when the order has none.
    pub fn order_items(&self, order: OrderKey) -> Option<&[&'a LineItem]> {
        self.order_items.get(&order).map(Vec::as_slice)
    }

    /// Region name of a nation, following nation -> region.
    pub fn nation_region_name(&self, nation: NationKey) -> Option<&'a str> {
        self.region_name(self.nation(nation)?.region_id)
    }
}
