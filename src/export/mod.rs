//! Flat CSV tables of inventory and sold items for spreadsheets.

use std::{collections::HashMap, io};

use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{Identifiable, Item, Tag, Titled},
    errors::Result,
    ledger::profit_for_item,
};

pub const INVENTORY_HEADERS: [&str; 7] = [
    "Title",
    "Quantity",
    "Purchase Date",
    "Purchase Price",
    "Listed Price",
    "Tag",
    "Notes",
];

pub const SOLD_HEADERS: [&str; 10] = [
    "Title",
    "Quantity",
    "Sold Date",
    "Purchase Price",
    "Sold Price",
    "Platform Fee",
    "Other Fees",
    "Profit",
    "Tag",
    "Notes",
];

#[derive(Serialize)]
struct InventoryRow<'a> {
    title: &'a str,
    quantity: u32,
    purchase_date: String,
    purchase_price: String,
    listed_price: String,
    tag: &'a str,
    notes: &'a str,
}

#[derive(Serialize)]
struct SoldRow<'a> {
    title: &'a str,
    quantity: u32,
    sold_date: String,
    purchase_price: String,
    sold_price: String,
    platform_fee: String,
    other_fees: String,
    profit: String,
    tag: &'a str,
    notes: &'a str,
}

/// Writes every unsold item, one row each, after a fixed header row.
pub fn write_inventory_csv<W: io::Write>(items: &[Item], tags: &[Tag], out: W) -> Result<()> {
    let titles = title_index(tags);
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(INVENTORY_HEADERS)?;
    for item in items.iter().filter(|item| !item.is_sold()) {
        writer.serialize(InventoryRow {
            title: &item.title,
            quantity: item.quantity,
            purchase_date: item
                .purchase_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            purchase_price: money(item.purchase_price),
            listed_price: money(item.listed_price),
            tag: tag_title(&titles, item.tag_id),
            notes: item.notes.as_deref().unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes every sold record with its realised profit.
pub fn write_sold_csv<W: io::Write>(items: &[Item], tags: &[Tag], out: W) -> Result<()> {
    let titles = title_index(tags);
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(SOLD_HEADERS)?;
    for item in items {
        let Some(sale) = item.sale() else {
            continue;
        };
        writer.serialize(SoldRow {
            title: &item.title,
            quantity: item.quantity,
            sold_date: sale.sold_date.format("%Y-%m-%d").to_string(),
            purchase_price: money(item.purchase_price),
            sold_price: money(sale.sold_price),
            platform_fee: format!("{}", sale.platform_fee),
            other_fees: money(sale.other_fees),
            profit: money(profit_for_item(item, item.quantity)),
            tag: tag_title(&titles, item.tag_id),
            notes: item.notes.as_deref().unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn title_index<T: Identifiable + Titled>(entries: &[T]) -> HashMap<Uuid, &str> {
    entries
        .iter()
        .map(|entry| (entry.id(), entry.title()))
        .collect()
}

fn tag_title<'a>(titles: &HashMap<Uuid, &'a str>, tag_id: Option<Uuid>) -> &'a str {
    tag_id
        .and_then(|id| titles.get(&id).copied())
        .unwrap_or_default()
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}
