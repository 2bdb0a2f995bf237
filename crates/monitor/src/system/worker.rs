use chrono::Utc;
use contracts::shared::data_access::InventoryApi;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::usecases::u101_low_stock_check::StockMonitor;

/// Периодический запуск проверки остатков.
///
/// Ошибка цикла логируется, следующий тик выполняется как обычно.
pub async fn run_loop<A: InventoryApi>(monitor: &StockMonitor<A>, interval_secs: u64) {
    info!("Stock monitor started with interval {} seconds", interval_secs);
    let mut interval = time::interval(time::Duration::from_secs(interval_secs.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        info!("Running stock check...");
        match monitor.run_cycle(Utc::now()).await {
            Ok(summary) => info!(
                "Stock check finished: {} products, {} low stock, {} notifications",
                summary.product_count,
                summary.low_stock.len(),
                summary.notifications
            ),
            Err(e) => error!("Stock check failed: {:?}", e),
        }
    }
}
