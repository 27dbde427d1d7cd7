//! Domain types representing inventory lots and completed sales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// One inventory lot, or one completed sale split off from a lot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: f64,
    pub listed_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<Uuid>,
    #[serde(default)]
    pub delete_when_sold_out: bool,
    #[serde(default)]
    pub state: ItemState,
}

impl Item {
    /// Creates an inventory lot with no tag, notes or image.
    pub fn new(
        title: impl Into<String>,
        quantity: u32,
        purchase_price: f64,
        listed_price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            image: None,
            notes: None,
            quantity,
            purchase_date: None,
            purchase_price,
            listed_price,
            tag_id: None,
            delete_when_sold_out: false,
            state: ItemState::Inventory,
        }
    }

    pub fn with_tag(mut self, tag_id: Uuid) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn deleting_when_sold_out(mut self, enabled: bool) -> Self {
        self.delete_when_sold_out = enabled;
        self
    }

    pub fn with_sale(mut self, sale: SaleDetails) -> Self {
        self.state = ItemState::Sold(sale);
        self
    }

    pub fn is_sold(&self) -> bool {
        matches!(self.state, ItemState::Sold(_))
    }

    pub fn sale(&self) -> Option<&SaleDetails> {
        match &self.state {
            ItemState::Sold(sale) => Some(sale),
            ItemState::Inventory => None,
        }
    }
}

impl Identifiable for Item {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Titled for Item {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Displayable for Item {
    fn display_label(&self) -> String {
        match &self.state {
            ItemState::Inventory => {
                format!("{} x{} @ {:.2}", self.title, self.quantity, self.listed_price)
            }
            ItemState::Sold(sale) => format!(
                "{} x{} sold @ {:.2} on {}",
                self.title,
                self.quantity,
                sale.sold_price,
                sale.sold_date.format("%Y-%m-%d")
            ),
        }
    }
}

/// Lifecycle of an item: stock on hand, or a completed sale with its fees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemState {
    #[default]
    Inventory,
    Sold(SaleDetails),
}

/// Terms of a completed sale. Prices are per unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleDetails {
    pub sold_date: DateTime<Utc>,
    pub sold_price: f64,
    /// Fraction of the sale price kept by the marketplace, e.g. `0.13`.
    #[serde(default)]
    pub platform_fee: f64,
    /// Flat deduction per unit such as shipping.
    #[serde(default)]
    pub other_fees: f64,
}

impl SaleDetails {
    pub fn new(sold_date: DateTime<Utc>, sold_price: f64) -> Self {
        Self {
            sold_date,
            sold_price,
            platform_fee: 0.0,
            other_fees: 0.0,
        }
    }

    pub fn with_fees(mut self, platform_fee: f64, other_fees: f64) -> Self {
        self.platform_fee = platform_fee;
        self.other_fees = other_fees;
        self
    }
}
