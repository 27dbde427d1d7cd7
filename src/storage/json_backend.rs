use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::{catalog::CURRENT_SCHEMA_VERSION, AppState, Catalog, Item, Tag},
    errors::{ResaleError, Result},
    utils::persistence::write_atomic,
};

use super::{ItemFilter, ItemStore, MemoryStore};

/// Single-file JSON store. Changes live in memory until `save` writes them.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    staging: MemoryStore,
}

impl JsonStore {
    /// Opens the catalog at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let catalog = if path.exists() {
            load_catalog_from_path(&path)?
        } else {
            Catalog::new()
        };
        for warning in catalog_warnings(&catalog) {
            warn!("{}: {}", path.display(), warning);
        }
        Ok(Self {
            path,
            staging: MemoryStore::from_catalog(catalog),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        self.staging.catalog()
    }

    pub fn has_changes(&self) -> bool {
        self.staging.has_changes()
    }
}

impl ItemStore for JsonStore {
    fn fetch_items(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        self.staging.fetch_items(filter)
    }

    fn item(&self, id: Uuid) -> Result<Option<Item>> {
        self.staging.item(id)
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        self.staging.fetch_tags()
    }

    fn tag(&self, id: Uuid) -> Result<Option<Tag>> {
        self.staging.tag(id)
    }

    fn insert_item(&mut self, item: Item) -> Result<()> {
        self.staging.insert_item(item)
    }

    fn insert_tag(&mut self, tag: Tag) -> Result<()> {
        self.staging.insert_tag(tag)
    }

    fn delete_item(&mut self, id: Uuid) -> Result<()> {
        self.staging.delete_item(id)
    }

    fn delete_tag(&mut self, id: Uuid) -> Result<()> {
        self.staging.delete_tag(id)
    }

    fn app_state(&self) -> Result<AppState> {
        self.staging.app_state()
    }

    fn set_app_state(&mut self, state: AppState) -> Result<()> {
        self.staging.set_app_state(state)
    }

    fn save(&mut self) -> Result<()> {
        save_catalog_to_path(self.staging.catalog(), &self.path)?;
        self.staging.commit();
        Ok(())
    }

    fn rollback(&mut self) {
        self.staging.rollback();
    }
}

pub fn save_catalog_to_path(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    write_atomic(path, &json)
}

pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data = fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&data)?;
    if catalog.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(ResaleError::Storage(format!(
            "catalog `{}` is from a newer schema version ({})",
            path.display(),
            catalog.schema_version
        )));
    }
    Ok(catalog)
}

/// Detects dangling tag references and zero-quantity stock left behind.
pub fn catalog_warnings(catalog: &Catalog) -> Vec<String> {
    let tag_ids: HashSet<_> = catalog.tags.iter().map(|tag| tag.id).collect();
    let mut warnings = Vec::new();

    for item in &catalog.items {
        if let Some(tag_id) = item.tag_id {
            if !tag_ids.contains(&tag_id) {
                warnings.push(format!("item {} references missing tag {}", item.id, tag_id));
            }
        }
        if !item.is_sold() && item.quantity == 0 && item.delete_when_sold_out {
            warnings.push(format!(
                "item {} is sold out but was not removed automatically",
                item.id
            ));
        }
    }
    warnings
}
