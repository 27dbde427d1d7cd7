use uuid::Uuid;

use crate::{
    domain::{AppState, Catalog, Item, Tag},
    errors::{ResaleError, Result},
};

use super::{ItemFilter, ItemStore};

/// In-process store keeping a working catalog next to the last committed one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: Catalog,
    working: Catalog,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already-committed catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            committed: catalog.clone(),
            working: catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.working
    }

    pub fn committed(&self) -> &Catalog {
        &self.committed
    }

    pub fn has_changes(&self) -> bool {
        self.committed != self.working
    }

    /// Promotes the working catalog to committed without any I/O.
    pub fn commit(&mut self) {
        self.committed = self.working.clone();
    }
}

impl ItemStore for MemoryStore {
    fn fetch_items(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        Ok(self
            .working
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    fn item(&self, id: Uuid) -> Result<Option<Item>> {
        Ok(self.working.item(id).cloned())
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.working.tags.clone())
    }

    fn tag(&self, id: Uuid) -> Result<Option<Tag>> {
        Ok(self.working.tag(id).cloned())
    }

    fn insert_item(&mut self, item: Item) -> Result<()> {
        self.working.upsert_item(item);
        Ok(())
    }

    fn insert_tag(&mut self, tag: Tag) -> Result<()> {
        self.working.upsert_tag(tag);
        Ok(())
    }

    fn delete_item(&mut self, id: Uuid) -> Result<()> {
        self.working
            .remove_item(id)
            .map(|_| ())
            .ok_or(ResaleError::ItemNotFound(id))
    }

    fn delete_tag(&mut self, id: Uuid) -> Result<()> {
        self.working
            .remove_tag(id)
            .map(|_| ())
            .ok_or(ResaleError::TagNotFound(id))
    }

    fn app_state(&self) -> Result<AppState> {
        Ok(self.working.app_state.clone())
    }

    fn set_app_state(&mut self, state: AppState) -> Result<()> {
        self.working.app_state = state;
        self.working.touch();
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.commit();
        Ok(())
    }

    fn rollback(&mut self) {
        self.working = self.committed.clone();
    }
}
