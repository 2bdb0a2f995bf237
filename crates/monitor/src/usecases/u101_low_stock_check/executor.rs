use super::report::write_report;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::domain::a001_product::ProductId;
use contracts::domain::a007_notification::low_stock_notifications;
use contracts::shared::alert_thresholds::low_stock_entries;
use contracts::shared::data_access::InventoryApi;
use contracts::shared::stock_report::build_stock_report;
use std::path::PathBuf;
use tracing::{info, warn};

/// Итог одного прохода проверки
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleSummary {
    pub product_count: usize,
    pub low_stock: Vec<ProductId>,
    pub notifications: usize,
    pub files: Vec<PathBuf>,
}

/// Executor проверки остатков: снимок товаров, пороги, отчёт
pub struct StockMonitor<A: InventoryApi> {
    api: A,
    report_dir: PathBuf,
}

impl<A: InventoryApi> StockMonitor<A> {
    pub fn new(api: A, report_dir: PathBuf) -> Self {
        Self { api, report_dir }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Result<CycleSummary> {
        let products = self
            .api
            .list_products()
            .await
            .context("Failed to load products")?;
        let settings = self
            .api
            .get_alert_settings()
            .await
            .context("Failed to load alert settings")?;

        let mut summary = CycleSummary {
            product_count: products.len(),
            ..CycleSummary::default()
        };

        if products.is_empty() {
            info!("No products returned, report skipped");
            return Ok(summary);
        }

        let entries = low_stock_entries(&products, &settings.products, &settings.global);
        for entry in &entries {
            warn!(
                "Low stock: [{}] {} available {} (threshold {}, short by {})",
                entry.item.id,
                entry.item.title,
                entry.item.stock.available,
                entry.threshold,
                entry.shortfall()
            );
        }
        summary.low_stock = entries.iter().map(|entry| entry.item.id).collect();

        // Номера уведомлений продолжают уже выданные сервером
        let first_id = match self.api.list_notifications().await {
            Ok(existing) => existing.iter().map(|n| n.id).max().unwrap_or(0) + 1,
            Err(e) => {
                warn!("Failed to load notifications: {}", e);
                1
            }
        };
        let notifications =
            low_stock_notifications(&products, &settings.products, &settings.global, now, first_id);
        for notification in &notifications {
            info!("Notification #{}: {} - {}", notification.id, notification.title, notification.message);
        }
        summary.notifications = notifications.len();

        let report = build_stock_report(&products, &settings.products, &settings.global)?;
        summary.files = write_report(&self.report_dir, now.date_naive(), &report)?;
        info!("Stock report saved to {}", self.report_dir.display());

        Ok(summary)
    }
}
