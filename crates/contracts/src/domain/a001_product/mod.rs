pub mod aggregate;
pub mod list;

pub use aggregate::{Product, ProductId, StockSummary};
pub use list::{ProductSearchField, ProductSortField, PRODUCTS_PAGE, STOCK_PAGE};
