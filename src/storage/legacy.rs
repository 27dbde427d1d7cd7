//! Readers for the flat files written by earlier releases.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;

use crate::{
    domain::{LegacyData, LegacyRecord},
    errors::{ResaleError, Result},
};

pub const LEGACY_INVENTORY_FILE: &str = "inventory.json";
pub const LEGACY_SOLD_FILE: &str = "sold.json";
pub const LEGACY_TAGS_FILE: &str = "tags.json";

/// Source of the three legacy collections consumed by the migration.
pub trait LegacySource {
    fn read_inventory(&self) -> Result<Vec<LegacyRecord>>;
    fn read_sold(&self) -> Result<Vec<LegacyRecord>>;
    fn read_tag_names(&self) -> Result<Vec<String>>;

    fn read_all(&self) -> Result<LegacyData> {
        Ok(LegacyData {
            inventory: self.read_inventory()?,
            sold: self.read_sold()?,
            tag_names: self.read_tag_names()?,
        })
    }
}

/// Reads JSON arrays from a legacy directory. Missing files read as empty.
#[derive(Debug, Clone)]
pub struct JsonLegacySource {
    dir: PathBuf,
}

impl JsonLegacySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_array<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path).map_err(|err| {
            ResaleError::Migration(format!("unable to read `{}`: {err}", path.display()))
        })?;
        serde_json::from_str(&data).map_err(|err| {
            ResaleError::Migration(format!("unable to decode `{}`: {err}", path.display()))
        })
    }
}

impl LegacySource for JsonLegacySource {
    fn read_inventory(&self) -> Result<Vec<LegacyRecord>> {
        self.read_array(LEGACY_INVENTORY_FILE)
    }

    fn read_sold(&self) -> Result<Vec<LegacyRecord>> {
        self.read_array(LEGACY_SOLD_FILE)
    }

    fn read_tag_names(&self) -> Result<Vec<String>> {
        self.read_array(LEGACY_TAGS_FILE)
    }
}
