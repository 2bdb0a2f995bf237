use chrono::{DateTime, TimeZone, Utc};
use contracts::domain::a001_product::ProductId;
use contracts::shared::data_access::ApiError;
use contracts::shared::fixtures::FixtureInventoryApi;
use std::path::PathBuf;
use tempfile::TempDir;
use stock_monitor::usecases::u101_low_stock_check::StockMonitor;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// Каталог отчётов внутри временной папки; сам каталог ещё не создан
fn report_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join("reports")
}

#[tokio::test]
async fn test_cycle_writes_report_and_flags_low_stock() {
    let tmp = TempDir::new().unwrap();
    let dir = report_dir(&tmp);
    let monitor = StockMonitor::new(FixtureInventoryApi::sample(fixed_now()), dir.clone());

    let summary = monitor.run_cycle(fixed_now()).await.unwrap();

    assert_eq!(summary.product_count, 5);
    assert_eq!(summary.low_stock, vec![ProductId(1), ProductId(4), ProductId(5)]);
    assert_eq!(summary.notifications, 3);
    assert_eq!(summary.files.len(), 3);
    for name in [
        "stock_2024-03-15.csv",
        "stock_summary_2024-03-15.csv",
        "stock_recommendations_2024-03-15.csv",
    ] {
        assert!(dir.join(name).exists(), "{} missing", name);
    }

    let stock = std::fs::read_to_string(dir.join("stock_2024-03-15.csv")).unwrap();
    assert!(stock.starts_with('\u{FEFF}'));
    assert!(stock.contains("Smartphone Galaxy A54"));
}

#[tokio::test]
async fn test_cycle_with_no_products_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let dir = report_dir(&tmp);
    let monitor = StockMonitor::new(FixtureInventoryApi::new(fixed_now()), dir.clone());

    let summary = monitor.run_cycle(fixed_now()).await.unwrap();

    assert_eq!(summary.product_count, 0);
    assert!(summary.files.is_empty());
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_cycle_reports_api_failure() {
    let tmp = TempDir::new().unwrap();
    let dir = report_dir(&tmp);
    let api = FixtureInventoryApi::sample(fixed_now());
    api.fail_with(Some(ApiError::Unauthorized));
    let monitor = StockMonitor::new(api, dir.clone());

    let result = monitor.run_cycle(fixed_now()).await;

    assert!(result.is_err());
    assert!(!dir.exists());

    // После восстановления API следующий проход проходит нормально
    monitor.api().fail_with(None);
    let summary = monitor.run_cycle(fixed_now()).await.unwrap();
    assert_eq!(summary.low_stock.len(), 3);
}
