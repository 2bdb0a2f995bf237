pub mod a001_product;
pub mod a002_stock_adjustment;
pub mod a003_sale;
pub mod a004_shipment;
pub mod a005_activity;
pub mod a006_alert_settings;
pub mod a007_notification;
