use std::{io, path::PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::Config,
    core::{
        services::{
            DeleteScope, DeletionReport, DeletionService, ItemService, MigrationOutcome,
            MigrationService, NewItem, SaleOutcome, SaleRequest, SaleService,
        },
        utils::PathResolver,
    },
    domain::Item,
    errors::Result,
    export,
    ledger::LedgerSummary,
    storage::{ItemFilter, ItemStore, JsonLegacySource, JsonStore, LegacySource},
};

/// Facade the front end talks to: one store plus the user's preferences.
pub struct InventoryManager {
    store: Box<dyn ItemStore>,
    config: Config,
}

impl InventoryManager {
    pub fn new(store: Box<dyn ItemStore>, config: Config) -> Self {
        Self { store, config }
    }

    /// Opens the JSON catalog under the configured data directory.
    pub fn open(config: Config) -> Result<Self> {
        let base = PathResolver::resolve_base(config.data_dir.clone());
        let store = JsonStore::open(PathResolver::catalog_file_in(&base))?;
        info!(path = %store.path().display(), "catalog opened");
        Ok(Self::new(Box::new(store), config))
    }

    /// Runs the legacy migration from `<data dir>/legacy`. Meant to be called on
    /// every launch; a failure is logged and retried next time.
    pub fn migrate_legacy(&mut self) -> Result<MigrationOutcome> {
        let legacy = JsonLegacySource::new(PathResolver::legacy_dir_in(&self.data_dir()));
        self.migrate(&legacy).map_err(|err| {
            warn!("legacy migration deferred: {err}");
            err
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        PathResolver::resolve_base(self.config.data_dir.clone())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }

    pub fn summary(&self) -> Result<LedgerSummary> {
        let items = self.store.fetch_items(ItemFilter::All)?;
        Ok(LedgerSummary::from_items(&items))
    }

    pub fn items(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        ItemService::list(self.store.as_ref(), filter)
    }

    /// A new-item form pre-filled with the configured auto-delete default.
    pub fn new_item(
        &self,
        title: impl Into<String>,
        quantity: u32,
        purchase_price: f64,
        listed_price: f64,
    ) -> NewItem {
        NewItem {
            delete_when_sold_out: self.config.delete_when_sold_out,
            ..NewItem::new(title, quantity, purchase_price, listed_price)
        }
    }

    /// A sale form pre-filled with the configured platform fee.
    pub fn sale_request(&self, quantity: u32, sale_price: f64) -> SaleRequest {
        SaleRequest::new(quantity, sale_price).with_fees(self.config.default_platform_fee, 0.0)
    }

    pub fn add_item(&mut self, input: NewItem) -> Result<Item> {
        ItemService::create(self.store.as_mut(), input)
    }

    pub fn sell(&mut self, item_id: Uuid, request: SaleRequest) -> Result<SaleOutcome> {
        SaleService::sell(self.store.as_mut(), item_id, request)
    }

    pub fn delete(&mut self, scope: DeleteScope) -> Result<DeletionReport> {
        DeletionService::delete(self.store.as_mut(), scope)
    }

    pub fn migrate<L>(&mut self, source: &L) -> Result<MigrationOutcome>
    where
        L: LegacySource + ?Sized,
    {
        MigrationService::run(self.store.as_mut(), source)
    }

    pub fn export<W: io::Write>(&self, scope: ItemFilter, out: W) -> Result<()> {
        let items = self.store.fetch_items(ItemFilter::All)?;
        let tags = self.store.fetch_tags()?;
        match scope {
            ItemFilter::Sold => export::write_sold_csv(&items, &tags, out),
            ItemFilter::Inventory | ItemFilter::All => {
                export::write_inventory_csv(&items, &tags, out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn manager(config: Config) -> InventoryManager {
        InventoryManager::new(Box::new(MemoryStore::new()), config)
    }

    #[test]
    fn new_item_form_applies_auto_delete_default() {
        let mut manager = manager(Config {
            delete_when_sold_out: true,
            ..Config::default()
        });
        let input = manager.new_item("Hat", 1, 2.0, 6.0);
        let item = manager.add_item(input).unwrap();
        assert!(item.delete_when_sold_out);
    }

    #[test]
    fn sale_form_applies_default_platform_fee() {
        let mut manager = manager(Config {
            default_platform_fee: 0.2,
            ..Config::default()
        });
        let item = manager.add_item(NewItem::new("Hat", 2, 2.0, 6.0)).unwrap();
        let request = manager.sale_request(1, 10.0);
        let outcome = manager.sell(item.id, request).unwrap();
        assert_eq!(outcome.sold.sale().unwrap().platform_fee, 0.2);

        let summary = manager.summary().unwrap();
        assert_eq!(summary.sold_count, 1);
        assert_eq!(summary.inventory_units, 1);
    }
}
