//! Converts part or all of an inventory lot into a sold record.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{common::is_valid_price, Item, ItemState, SaleDetails},
    errors::{ResaleError, Result},
    storage::ItemStore,
};

use super::in_transaction;

/// Terms the user confirmed when selling from a lot. Prices are per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRequest {
    pub quantity: u32,
    pub sale_price: f64,
    /// Defaults to the current time.
    pub sale_date: Option<DateTime<Utc>>,
    pub platform_fee: f64,
    pub other_fees: f64,
    /// Replaces the source notes on the sold record when present.
    pub notes: Option<String>,
}

impl SaleRequest {
    pub fn new(quantity: u32, sale_price: f64) -> Self {
        Self {
            quantity,
            sale_price,
            sale_date: None,
            platform_fee: 0.0,
            other_fees: 0.0,
            notes: None,
        }
    }

    pub fn with_fees(mut self, platform_fee: f64, other_fees: f64) -> Self {
        self.platform_fee = platform_fee;
        self.other_fees = other_fees;
        self
    }

    pub fn on(mut self, sale_date: DateTime<Utc>) -> Self {
        self.sale_date = Some(sale_date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Result of a committed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleOutcome {
    pub sold: Item,
    /// The source lot after decrementing, or `None` when it was auto-deleted.
    pub remaining: Option<Item>,
    pub source_deleted: bool,
}

pub struct SaleService;

impl SaleService {
    /// Sells `request.quantity` units from the inventory item `item_id`.
    ///
    /// Validation happens before anything is staged. The sold record insert,
    /// the source decrement and the optional auto-delete commit together or not
    /// at all.
    pub fn sell<S>(store: &mut S, item_id: Uuid, request: SaleRequest) -> Result<SaleOutcome>
    where
        S: ItemStore + ?Sized,
    {
        let source = store
            .item(item_id)?
            .ok_or(ResaleError::ItemNotFound(item_id))?;
        validate(&source, &request)?;

        let sold = sold_record(&source, &request);
        let mut remaining = source;
        remaining.quantity -= request.quantity;
        let delete_source = remaining.quantity == 0 && remaining.delete_when_sold_out;

        let staged_sold = sold.clone();
        let staged_remaining = remaining.clone();
        in_transaction(store, "sale", |store| {
            store.insert_item(staged_sold)?;
            if delete_source {
                store.delete_item(item_id)
            } else {
                store.insert_item(staged_remaining)
            }
        })?;

        info!(
            source = %item_id,
            sold = %sold.id,
            quantity = request.quantity,
            source_deleted = delete_source,
            "sale recorded"
        );
        Ok(SaleOutcome {
            sold,
            remaining: (!delete_source).then_some(remaining),
            source_deleted: delete_source,
        })
    }
}

fn validate(source: &Item, request: &SaleRequest) -> Result<()> {
    if source.is_sold() {
        return Err(ResaleError::ItemAlreadySold(source.id));
    }
    if request.quantity == 0 || request.quantity > source.quantity {
        return Err(ResaleError::InvalidQuantity(format!(
            "cannot sell {} of {} on hand",
            request.quantity, source.quantity
        )));
    }
    if !is_valid_price(request.sale_price) {
        return Err(ResaleError::InvalidSalePrice(format!(
            "sale price {} must be between 0 and 99999",
            request.sale_price
        )));
    }
    if !request.platform_fee.is_finite() || !(0.0..=1.0).contains(&request.platform_fee) {
        return Err(ResaleError::InvalidFee(format!(
            "platform fee {} must be a fraction between 0 and 1",
            request.platform_fee
        )));
    }
    if !request.other_fees.is_finite() || request.other_fees < 0.0 {
        return Err(ResaleError::InvalidFee(format!(
            "other fees {} must not be negative",
            request.other_fees
        )));
    }
    Ok(())
}

fn sold_record(source: &Item, request: &SaleRequest) -> Item {
    let sale = SaleDetails::new(request.sale_date.unwrap_or_else(Utc::now), request.sale_price)
        .with_fees(request.platform_fee, request.other_fees);
    Item {
        id: Uuid::new_v4(),
        title: source.title.clone(),
        image: source.image.clone(),
        notes: request.notes.clone().or_else(|| source.notes.clone()),
        quantity: request.quantity,
        purchase_date: source.purchase_date,
        purchase_price: source.purchase_price,
        listed_price: source.listed_price,
        tag_id: source.tag_id,
        delete_when_sold_out: false,
        state: ItemState::Sold(sale),
    }
}
