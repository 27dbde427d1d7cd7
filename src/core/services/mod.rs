pub mod deletion_service;
pub mod item_service;
pub mod migration_service;
pub mod sale_service;
pub mod tag_service;

pub use deletion_service::{DeleteScope, DeletionReport, DeletionService};
pub use item_service::{ItemService, NewItem};
pub use migration_service::{MigrationOutcome, MigrationService, SkipReason};
pub use sale_service::{SaleOutcome, SaleRequest, SaleService};
pub use tag_service::TagService;

use tracing::warn;

use crate::{errors::Result, storage::ItemStore};

/// Runs `op` against the store and commits it with a single `save`.
///
/// Any error from `op` or from the commit rolls the store back to its last
/// committed state before being returned.
pub(crate) fn in_transaction<S, T, F>(store: &mut S, label: &str, op: F) -> Result<T>
where
    S: ItemStore + ?Sized,
    F: FnOnce(&mut S) -> Result<T>,
{
    let outcome = op(&mut *store).and_then(|value| store.save().map(|()| value));
    if let Err(err) = &outcome {
        warn!("{label} rolled back: {err}");
        store.rollback();
    }
    outcome
}
