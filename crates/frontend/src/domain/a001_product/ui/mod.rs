pub mod list;
pub mod stock;
