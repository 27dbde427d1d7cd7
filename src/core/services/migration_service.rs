//! One-shot import of the flat record files written by earlier releases.

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    domain::{Item, LegacyData, LegacyRecord, SaleDetails, Tag},
    errors::Result,
    storage::{legacy::LegacySource, ItemStore},
};

use super::in_transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyMigrated,
    NoLegacyData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    Skipped(SkipReason),
    Migrated { items: usize, tags: usize },
}

pub struct MigrationService;

impl MigrationService {
    /// Imports legacy data once, guarded by `AppState::data_was_migrated`.
    ///
    /// Read failures and commit failures leave the flag unset so the next
    /// launch retries. An empty legacy source is skipped without setting it.
    pub fn run<S, L>(store: &mut S, source: &L) -> Result<MigrationOutcome>
    where
        S: ItemStore + ?Sized,
        L: LegacySource + ?Sized,
    {
        let mut state = store.app_state()?;
        if state.data_was_migrated {
            return Ok(MigrationOutcome::Skipped(SkipReason::AlreadyMigrated));
        }

        let data = source.read_all().map_err(|err| {
            warn!("legacy data could not be read, migration will retry: {err}");
            err
        })?;
        if data.is_empty() {
            info!("no legacy data found");
            return Ok(MigrationOutcome::Skipped(SkipReason::NoLegacyData));
        }

        let (items, tags) = convert(data);
        let counts = (items.len(), tags.len());
        state.data_was_migrated = true;
        in_transaction(store, "legacy migration", |store| {
            for tag in tags {
                store.insert_tag(tag)?;
            }
            for item in items {
                store.insert_item(item)?;
            }
            store.set_app_state(state)
        })?;

        info!(items = counts.0, tags = counts.1, "legacy data migrated");
        Ok(MigrationOutcome::Migrated {
            items: counts.0,
            tags: counts.1,
        })
    }
}

fn convert(data: LegacyData) -> (Vec<Item>, Vec<Tag>) {
    let mut items = Vec::with_capacity(data.inventory.len() + data.sold.len());
    let mut tags = Vec::new();

    for record in data.inventory {
        let tag = record.tag.as_deref().and_then(fresh_tag);
        items.push(inventory_item(record, tag.as_ref()));
        tags.extend(tag);
    }
    for record in data.sold {
        let tag = record.tag.as_deref().and_then(fresh_tag);
        items.push(sold_item(record, tag.as_ref()));
        tags.extend(tag);
    }
    tags.extend(data.tag_names.iter().filter_map(|name| fresh_tag(name)));
    (items, tags)
}

fn fresh_tag(title: &str) -> Option<Tag> {
    let title = title.trim();
    (!title.is_empty()).then(|| Tag::new(title))
}

fn inventory_item(record: LegacyRecord, tag: Option<&Tag>) -> Item {
    let mut item = Item::new(
        record.title,
        record.quantity,
        record.purchase_price,
        record.listing_price,
    );
    item.notes = record.notes;
    item.purchase_date = record.date_listed.map(|date| date.date_naive());
    item.tag_id = tag.map(|tag| tag.id);
    item
}

fn sold_item(record: LegacyRecord, tag: Option<&Tag>) -> Item {
    // Legacy sold entries carried no fee data.
    let sale = SaleDetails::new(
        record.date_sold.unwrap_or_else(Utc::now),
        record.sold_price.unwrap_or(record.listing_price),
    );
    inventory_item(record, tag).with_sale(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::ResaleError,
        storage::{ItemFilter, MemoryStore},
    };
    use chrono::TimeZone;

    #[derive(Default)]
    struct FixedSource {
        data: LegacyData,
        fail: bool,
    }

    impl LegacySource for FixedSource {
        fn read_inventory(&self) -> Result<Vec<LegacyRecord>> {
            if self.fail {
                return Err(ResaleError::Migration("corrupt inventory".into()));
            }
            Ok(self.data.inventory.clone())
        }

        fn read_sold(&self) -> Result<Vec<LegacyRecord>> {
            Ok(self.data.sold.clone())
        }

        fn read_tag_names(&self) -> Result<Vec<String>> {
            Ok(self.data.tag_names.clone())
        }
    }

    fn record(title: &str, sold_price: Option<f64>, tag: Option<&str>) -> LegacyRecord {
        LegacyRecord {
            title: title.into(),
            purchase_price: 10.0,
            listing_price: 20.0,
            sold_price,
            quantity: 2,
            tag: tag.map(str::to_string),
            notes: None,
            date_sold: sold_price.map(|_| Utc.with_ymd_and_hms(2022, 3, 4, 5, 6, 7).unwrap()),
            date_listed: None,
        }
    }

    fn sample_source() -> FixedSource {
        FixedSource {
            data: LegacyData {
                inventory: vec![record("Skates", None, Some("Sports")), record("Helmet", None, None)],
                sold: vec![record("Bike", Some(150.0), Some("Sports"))],
                tag_names: vec!["Sports".into(), "Garden".into()],
            },
            fail: false,
        }
    }

    #[test]
    fn converts_every_collection() {
        let mut store = MemoryStore::new();
        let outcome = MigrationService::run(&mut store, &sample_source()).unwrap();
        assert_eq!(outcome, MigrationOutcome::Migrated { items: 3, tags: 4 });

        let sold = store.fetch_items(ItemFilter::Sold).unwrap();
        assert_eq!(sold.len(), 1);
        let sale = sold[0].sale().unwrap();
        assert_eq!(sale.sold_price, 150.0);
        assert_eq!(sale.platform_fee, 0.0);
        assert_eq!(sale.other_fees, 0.0);
        assert_eq!(store.fetch_items(ItemFilter::Inventory).unwrap().len(), 2);
        assert!(store.app_state().unwrap().data_was_migrated);
        assert!(!store.has_changes());
    }

    #[test]
    fn item_tags_point_at_created_tags() {
        let mut store = MemoryStore::new();
        MigrationService::run(&mut store, &sample_source()).unwrap();
        for item in store.fetch_items(ItemFilter::All).unwrap() {
            if let Some(tag_id) = item.tag_id {
                assert_eq!(store.tag(tag_id).unwrap().unwrap().title, "Sports");
            }
        }
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut store = MemoryStore::new();
        MigrationService::run(&mut store, &sample_source()).unwrap();
        let before = store.committed().clone();
        let outcome = MigrationService::run(&mut store, &sample_source()).unwrap();
        assert_eq!(outcome, MigrationOutcome::Skipped(SkipReason::AlreadyMigrated));
        assert_eq!(store.committed(), &before);
    }

    #[test]
    fn empty_source_inserts_nothing_and_leaves_flag_unset() {
        let mut store = MemoryStore::new();
        let outcome = MigrationService::run(&mut store, &FixedSource::default()).unwrap();
        assert_eq!(outcome, MigrationOutcome::Skipped(SkipReason::NoLegacyData));
        assert!(store.catalog().items.is_empty());
        assert!(store.catalog().tags.is_empty());
        assert!(!store.app_state().unwrap().data_was_migrated);
    }

    #[test]
    fn read_failure_aborts_without_flag() {
        let mut store = MemoryStore::new();
        let source = FixedSource {
            fail: true,
            ..sample_source()
        };
        let err = MigrationService::run(&mut store, &source).unwrap_err();
        assert!(matches!(err, ResaleError::Migration(_)));
        assert!(!store.app_state().unwrap().data_was_migrated);
        assert!(store.catalog().items.is_empty());
    }
}
