pub mod alert_thresholds;
pub mod data_access;
pub mod export;
pub mod feedback;
pub mod fixtures;
pub mod list_projection;
pub mod stock_report;
pub mod summary;
pub mod validation;
