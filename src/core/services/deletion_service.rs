use std::{fmt, str::FromStr};

use tracing::info;

use crate::{
    errors::{ResaleError, Result},
    storage::{ItemFilter, ItemStore},
};

use super::{in_transaction, tag_service::clear_tag_references};

/// Category erased by a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Inventory,
    SoldItems,
    Tags,
    Everything,
}

impl DeleteScope {
    fn item_filter(self) -> Option<ItemFilter> {
        match self {
            DeleteScope::Inventory => Some(ItemFilter::Inventory),
            DeleteScope::SoldItems => Some(ItemFilter::Sold),
            DeleteScope::Everything => Some(ItemFilter::All),
            DeleteScope::Tags => None,
        }
    }

    fn includes_tags(self) -> bool {
        matches!(self, DeleteScope::Tags | DeleteScope::Everything)
    }
}

impl fmt::Display for DeleteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeleteScope::Inventory => "inventory",
            DeleteScope::SoldItems => "sold",
            DeleteScope::Tags => "tags",
            DeleteScope::Everything => "everything",
        };
        f.write_str(label)
    }
}

impl FromStr for DeleteScope {
    type Err = ResaleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inventory" => Ok(DeleteScope::Inventory),
            "sold" | "sold-items" | "sold_items" => Ok(DeleteScope::SoldItems),
            "tags" => Ok(DeleteScope::Tags),
            "everything" | "all" => Ok(DeleteScope::Everything),
            other => Err(ResaleError::InvalidScope(format!(
                "`{other}` is not one of inventory, sold, tags, everything"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletionReport {
    pub items_removed: usize,
    pub tags_removed: usize,
}

pub struct DeletionService;

impl DeletionService {
    /// Erases every record in `scope` as one transaction.
    ///
    /// Remaining items that pointed at a deleted tag are detached from it.
    pub fn delete<S>(store: &mut S, scope: DeleteScope) -> Result<DeletionReport>
    where
        S: ItemStore + ?Sized,
    {
        let report = in_transaction(store, "bulk delete", |store| {
            let mut report = DeletionReport::default();
            if let Some(filter) = scope.item_filter() {
                for item in store.fetch_items(filter)? {
                    store.delete_item(item.id)?;
                    report.items_removed += 1;
                }
            }
            if scope.includes_tags() {
                for tag in store.fetch_tags()? {
                    store.delete_tag(tag.id)?;
                    report.tags_removed += 1;
                }
                clear_tag_references(store, |_| true)?;
            }
            Ok(report)
        })?;
        info!(
            %scope,
            items = report.items_removed,
            tags = report.tags_removed,
            "bulk delete committed"
        );
        Ok(report)
    }
}
