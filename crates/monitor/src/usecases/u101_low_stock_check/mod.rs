pub mod executor;
pub mod report;

pub use executor::{CycleSummary, StockMonitor};
