#![doc(test(attr(deny(warnings))))]

//! Resale Core tracks purchased items held for resale, records their sales
//! with marketplace fees, and derives profit and inventory statistics.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Resale Core tracing initialized.");
    });
}
