pub mod aggregate;
pub mod list;

pub use aggregate::Sale;
pub use list::{SaleSearchField, SaleSortField, SALES_PAGE};
