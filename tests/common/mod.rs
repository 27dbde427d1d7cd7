#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use resale_core::{
    domain::{AppState, Item, Tag},
    errors::{ResaleError, Result},
    storage::{ItemFilter, ItemStore, JsonStore, MemoryStore},
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a JSON store backed by a unique temporary directory.
pub fn temp_json_store() -> JsonStore {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("catalog.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonStore::open(path).expect("open json store")
}

/// Memory store whose commits fail on demand, for exercising rollback paths.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_saves: bool,
    pub fail_deletes_after: Option<usize>,
    deletes: usize,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }
}

impl ItemStore for FlakyStore {
    fn fetch_items(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        self.inner.fetch_items(filter)
    }

    fn item(&self, id: Uuid) -> Result<Option<Item>> {
        self.inner.item(id)
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        self.inner.fetch_tags()
    }

    fn tag(&self, id: Uuid) -> Result<Option<Tag>> {
        self.inner.tag(id)
    }

    fn insert_item(&mut self, item: Item) -> Result<()> {
        self.inner.insert_item(item)
    }

    fn insert_tag(&mut self, tag: Tag) -> Result<()> {
        self.inner.insert_tag(tag)
    }

    fn delete_item(&mut self, id: Uuid) -> Result<()> {
        if let Some(limit) = self.fail_deletes_after {
            if self.deletes >= limit {
                return Err(ResaleError::Storage("simulated delete failure".into()));
            }
        }
        self.deletes += 1;
        self.inner.delete_item(id)
    }

    fn delete_tag(&mut self, id: Uuid) -> Result<()> {
        self.inner.delete_tag(id)
    }

    fn app_state(&self) -> Result<AppState> {
        self.inner.app_state()
    }

    fn set_app_state(&mut self, state: AppState) -> Result<()> {
        self.inner.set_app_state(state)
    }

    fn save(&mut self) -> Result<()> {
        if self.fail_saves {
            return Err(ResaleError::Storage("simulated commit failure".into()));
        }
        self.inner.save()
    }

    fn rollback(&mut self) {
        self.inner.rollback();
    }
}

/// A committed store holding one inventory lot; returns the lot id.
pub fn store_with_lot(quantity: u32, delete_when_sold_out: bool) -> (MemoryStore, Uuid) {
    let mut store = MemoryStore::new();
    let item =
        Item::new("Camera", quantity, 10.0, 20.0).deleting_when_sold_out(delete_when_sold_out);
    let id = item.id;
    store.insert_item(item).expect("insert lot");
    store.save().expect("commit lot");
    (store, id)
}
