pub mod app_state;
pub mod catalog;
pub mod common;
pub mod item;
pub mod legacy;
pub mod tag;

pub use app_state::{AppState, Theme};
pub use catalog::Catalog;
pub use common::{Displayable, Identifiable, Titled};
pub use item::{Item, ItemState, SaleDetails};
pub use legacy::{LegacyData, LegacyRecord};
pub use tag::Tag;
