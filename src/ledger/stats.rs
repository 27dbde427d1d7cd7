//! Read-only statistics derived from an item collection.
//!
//! Every function is pure and accepts an empty slice. Negative contributions
//! (e.g. selling below cost) flow through unclamped.

use serde::Serialize;

use crate::domain::{Item, ItemState};

/// Profit for `quantity` units of `item`.
///
/// For sold records this is
/// `(sold_price - sold_price * platform_fee - purchase_price - other_fees) * quantity`.
/// For inventory the fees are unknown, so the result is only an estimate:
/// `(listed_price - purchase_price) * quantity`.
pub fn profit_for_item(item: &Item, quantity: u32) -> f64 {
    let units = f64::from(quantity);
    match &item.state {
        ItemState::Sold(sale) => {
            let platform_cut = sale.sold_price * sale.platform_fee;
            (sale.sold_price - platform_cut - item.purchase_price - sale.other_fees) * units
        }
        ItemState::Inventory => (item.listed_price - item.purchase_price) * units,
    }
}

/// Realised profit across sold records. Inventory contributes nothing.
pub fn total_profit(items: &[Item]) -> f64 {
    sold(items)
        .map(|item| profit_for_item(item, item.quantity))
        .sum()
}

/// Estimated profit still sitting in unsold stock.
pub fn estimated_profit(items: &[Item]) -> f64 {
    inventory(items)
        .map(|item| profit_for_item(item, item.quantity))
        .sum()
}

/// Listed value of unsold stock.
pub fn total_inventory_value(items: &[Item]) -> f64 {
    inventory(items)
        .map(|item| item.listed_price * f64::from(item.quantity))
        .sum()
}

/// Purchase cost of unsold stock.
pub fn total_investment(items: &[Item]) -> f64 {
    inventory(items)
        .map(|item| item.purchase_price * f64::from(item.quantity))
        .sum()
}

pub fn total_inventory_units(items: &[Item]) -> u64 {
    inventory(items).map(|item| u64::from(item.quantity)).sum()
}

/// Number of sold records, not units.
pub fn total_sold_count(items: &[Item]) -> usize {
    sold(items).count()
}

/// Net proceeds of sold records.
///
/// Unlike [`profit_for_item`], the platform fee is subtracted here as a flat
/// amount rather than as a fraction of the sold price. Both formulas are kept
/// as-is until the intended one is confirmed.
pub fn total_sold_value(items: &[Item]) -> f64 {
    items
        .iter()
        .filter_map(|item| item.sale().map(|sale| (item, sale)))
        .map(|(item, sale)| {
            f64::from(item.quantity) * (sale.sold_price - sale.other_fees - sale.platform_fee)
        })
        .sum()
}

fn inventory(items: &[Item]) -> impl Iterator<Item = &Item> {
    items.iter().filter(|item| !item.is_sold())
}

fn sold(items: &[Item]) -> impl Iterator<Item = &Item> {
    items.iter().filter(|item| item.is_sold())
}

/// All aggregates computed in one pass over the same collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LedgerSummary {
    pub total_profit: f64,
    pub estimated_profit: f64,
    pub inventory_value: f64,
    pub investment: f64,
    pub inventory_units: u64,
    pub sold_count: usize,
    pub sold_value: f64,
}

impl LedgerSummary {
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            total_profit: total_profit(items),
            estimated_profit: estimated_profit(items),
            inventory_value: total_inventory_value(items),
            investment: total_investment(items),
            inventory_units: total_inventory_units(items),
            sold_count: total_sold_count(items),
            sold_value: total_sold_value(items),
        }
    }
}
