pub mod bom_item;
pub mod build;
pub mod part;
pub mod part_category;
pub mod stock_item;
pub mod stock_item_tracking;
pub mod stock_location;
pub mod supplier;
pub mod supplier_part;
