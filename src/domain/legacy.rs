//! Flat record shape written by earlier releases, read only by the migration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the legacy inventory or sold-items list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecord {
    pub title: String,
    pub purchase_price: f64,
    pub listing_price: f64,
    #[serde(default)]
    pub sold_price: Option<f64>,
    pub quantity: u32,
    /// Tag title; legacy data never referenced tag records.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date_sold: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_listed: Option<DateTime<Utc>>,
}

/// The three legacy collections read together by the migration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyData {
    pub inventory: Vec<LegacyRecord>,
    pub sold: Vec<LegacyRecord>,
    pub tag_names: Vec<String>,
}

impl LegacyData {
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty() && self.sold.is_empty() && self.tag_names.is_empty()
    }
}
