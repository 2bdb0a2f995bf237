pub mod bar_chart;
pub mod page_header;
pub mod stat_card;
pub mod status_badge;

pub use bar_chart::{BarChart, BarPoint};
pub use page_header::PageHeader;
pub use stat_card::{StatCard, StatCardTone};
pub use status_badge::{LowStockBadge, ShipmentStatusBadge};
