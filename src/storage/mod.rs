pub mod json_backend;
pub mod legacy;
pub mod memory;

use uuid::Uuid;

use crate::{
    domain::{AppState, Item, Tag},
    errors::Result,
};

/// Which slice of the item collection a fetch returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFilter {
    #[default]
    All,
    Inventory,
    Sold,
}

impl ItemFilter {
    pub fn matches(self, item: &Item) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::Inventory => !item.is_sold(),
            ItemFilter::Sold => item.is_sold(),
        }
    }
}

/// Persistence collaborator used by every service.
///
/// Mutations are staged until [`ItemStore::save`] commits them;
/// [`ItemStore::rollback`] discards everything staged since the last commit.
pub trait ItemStore {
    fn fetch_items(&self, filter: ItemFilter) -> Result<Vec<Item>>;
    fn item(&self, id: Uuid) -> Result<Option<Item>>;
    fn fetch_tags(&self) -> Result<Vec<Tag>>;
    fn tag(&self, id: Uuid) -> Result<Option<Tag>>;
    /// Inserts the item or replaces the record with the same id.
    fn insert_item(&mut self, item: Item) -> Result<()>;
    fn insert_tag(&mut self, tag: Tag) -> Result<()>;
    fn delete_item(&mut self, id: Uuid) -> Result<()>;
    fn delete_tag(&mut self, id: Uuid) -> Result<()>;
    fn app_state(&self) -> Result<AppState>;
    fn set_app_state(&mut self, state: AppState) -> Result<()>;
    fn save(&mut self) -> Result<()>;
    fn rollback(&mut self);
}

pub use json_backend::JsonStore;
pub use legacy::{JsonLegacySource, LegacySource};
pub use memory::MemoryStore;
