//! Business logic helpers for creating and editing items.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{common::is_valid_price, Item},
    errors::{ResaleError, Result},
    storage::{ItemFilter, ItemStore},
};

use super::in_transaction;

/// User input for a new inventory lot.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub quantity: u32,
    pub purchase_price: f64,
    pub listed_price: f64,
    pub purchase_date: Option<NaiveDate>,
    pub tag_id: Option<Uuid>,
    pub notes: Option<String>,
    pub image: Option<Vec<u8>>,
    pub delete_when_sold_out: bool,
}

impl NewItem {
    pub fn new(
        title: impl Into<String>,
        quantity: u32,
        purchase_price: f64,
        listed_price: f64,
    ) -> Self {
        Self {
            title: title.into(),
            quantity,
            purchase_price,
            listed_price,
            ..Self::default()
        }
    }

    fn into_item(self) -> Item {
        let mut item = Item::new(
            self.title.trim(),
            self.quantity,
            self.purchase_price,
            self.listed_price,
        );
        item.purchase_date = self.purchase_date;
        item.tag_id = self.tag_id;
        item.notes = self.notes.filter(|notes| !notes.trim().is_empty());
        item.image = self.image;
        item.delete_when_sold_out = self.delete_when_sold_out;
        item
    }
}

/// Provides validated CRUD helpers for items.
pub struct ItemService;

impl ItemService {
    /// Validates and stores a new inventory lot.
    pub fn create<S>(store: &mut S, input: NewItem) -> Result<Item>
    where
        S: ItemStore + ?Sized,
    {
        let item = input.into_item();
        validate(&item)?;
        ensure_tag_exists(&*store, item.tag_id)?;
        let created = item.clone();
        in_transaction(store, "create item", |store| store.insert_item(item))?;
        info!(item = %created.id, title = %created.title, "item created");
        Ok(created)
    }

    /// Applies `mutator` to the item identified by `id`, revalidating before commit.
    ///
    /// The identifier cannot be changed through the mutator, and neither can the
    /// sale state: sold records only come from [`super::SaleService::sell`].
    pub fn update<S, F>(store: &mut S, id: Uuid, mutator: F) -> Result<Item>
    where
        S: ItemStore + ?Sized,
        F: FnOnce(&mut Item),
    {
        let original = store.item(id)?.ok_or(ResaleError::ItemNotFound(id))?;
        let mut item = original.clone();
        mutator(&mut item);
        if item.state != original.state {
            return Err(ResaleError::SaleStateLocked(id));
        }
        item.id = id;
        item.title = item.title.trim().to_string();
        validate(&item)?;
        ensure_tag_exists(&*store, item.tag_id)?;
        let updated = item.clone();
        in_transaction(store, "update item", |store| store.insert_item(item))?;
        Ok(updated)
    }

    /// Removes a single item, returning the removed record. Its tag is left alone.
    pub fn remove<S>(store: &mut S, id: Uuid) -> Result<Item>
    where
        S: ItemStore + ?Sized,
    {
        let item = store.item(id)?.ok_or(ResaleError::ItemNotFound(id))?;
        in_transaction(store, "remove item", |store| store.delete_item(id))?;
        info!(item = %id, "item removed");
        Ok(item)
    }

    pub fn list<S>(store: &S, filter: ItemFilter) -> Result<Vec<Item>>
    where
        S: ItemStore + ?Sized,
    {
        store.fetch_items(filter)
    }
}

pub(crate) fn validate(item: &Item) -> Result<()> {
    if item.title.trim().is_empty() {
        return Err(ResaleError::InvalidTitle);
    }
    if !is_valid_price(item.purchase_price) {
        return Err(ResaleError::InvalidPrice(format!(
            "purchase price {} is out of range",
            item.purchase_price
        )));
    }
    if !is_valid_price(item.listed_price) {
        return Err(ResaleError::InvalidPrice(format!(
            "listed price {} is out of range",
            item.listed_price
        )));
    }
    Ok(())
}

pub(crate) fn ensure_tag_exists<S>(store: &S, tag_id: Option<Uuid>) -> Result<()>
where
    S: ItemStore + ?Sized,
{
    match tag_id {
        Some(id) if store.tag(id)?.is_none() => Err(ResaleError::TagNotFound(id)),
        _ => Ok(()),
    }
}
