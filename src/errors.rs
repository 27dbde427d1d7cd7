use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the domain, service and storage layers.
#[derive(Debug, Error)]
pub enum ResaleError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Invalid sale price: {0}")]
    InvalidSalePrice(String),
    #[error("Invalid title: title must not be empty")]
    InvalidTitle,
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Invalid fee: {0}")]
    InvalidFee(String),
    #[error("Item {0} has already been sold")]
    ItemAlreadySold(Uuid),
    #[error("Item {0} sale state can only change through a sale")]
    SaleStateLocked(Uuid),
    #[error("Invalid delete scope: {0}")]
    InvalidScope(String),
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),
    #[error("Tag not found: {0}")]
    TagNotFound(Uuid),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ResaleError>;

impl ResaleError {
    /// Input errors the caller can recover from by re-prompting; nothing was mutated.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ResaleError::InvalidQuantity(_)
                | ResaleError::InvalidSalePrice(_)
                | ResaleError::InvalidTitle
                | ResaleError::InvalidPrice(_)
                | ResaleError::InvalidFee(_)
                | ResaleError::ItemAlreadySold(_)
                | ResaleError::SaleStateLocked(_)
                | ResaleError::InvalidScope(_)
        )
    }
}

impl From<std::io::Error> for ResaleError {
    fn from(err: std::io::Error) -> Self {
        ResaleError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ResaleError {
    fn from(err: serde_json::Error) -> Self {
        ResaleError::Storage(err.to_string())
    }
}

impl From<csv::Error> for ResaleError {
    fn from(err: csv::Error) -> Self {
        ResaleError::Storage(err.to_string())
    }
}
