use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{app_state::AppState, item::Item, tag::Tag};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything a store persists: the item and tag collections plus app flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub app_state: AppState,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Catalog::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            tags: Vec::new(),
            app_state: AppState::default(),
            updated_at: Utc::now(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Inserts the item, replacing any existing record with the same id.
    pub fn upsert_item(&mut self, item: Item) -> Uuid {
        let id = item.id;
        match self.items.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.touch();
        id
    }

    pub fn upsert_tag(&mut self, tag: Tag) -> Uuid {
        let id = tag.id;
        match self.tags.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = tag,
            None => self.tags.push(tag),
        }
        self.touch();
        id
    }

    pub fn item(&self, id: Uuid) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn tag(&self, id: Uuid) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn remove_item(&mut self, id: Uuid) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_tag(&mut self, id: Uuid) -> Option<Tag> {
        let index = self.tags.iter().position(|tag| tag.id == id)?;
        let removed = self.tags.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_item() {
        let mut catalog = Catalog::new();
        let mut item = Item::new("Watch", 1, 50.0, 120.0);
        let id = catalog.upsert_item(item.clone());
        item.quantity = 4;
        catalog.upsert_item(item);
        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.item(id).map(|item| item.quantity), Some(4));
    }

    #[test]
    fn remove_unknown_item_returns_none() {
        let mut catalog = Catalog::new();
        assert!(catalog.remove_item(Uuid::new_v4()).is_none());
    }
}
