pub mod stats;

pub use stats::{
    estimated_profit, profit_for_item, total_inventory_units, total_inventory_value,
    total_investment, total_profit, total_sold_count, total_sold_value, LedgerSummary,
};
