pub mod inventory_manager;
pub mod services;
pub mod utils;

pub use inventory_manager::InventoryManager;
