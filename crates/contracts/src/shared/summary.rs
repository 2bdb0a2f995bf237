//! Итоговые показатели для карточек и блоков итогов

use crate::domain::a001_product::{Product, ProductId};
use crate::domain::a003_sale::Sale;
use crate::domain::a004_shipment::{Shipment, ShipmentStatus};
use crate::domain::a006_alert_settings::{AlertOverrides, AlertSettings};
use crate::shared::alert_thresholds::classify_all;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// Итоги по остаткам
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockTotals {
    pub product_count: usize,
    pub low_stock_count: usize,
    pub total_available: i64,
    pub total_not_available: i64,
}

pub fn stock_totals(products: &[Product], overrides: &AlertOverrides, global: &AlertSettings) -> StockTotals {
    StockTotals {
        product_count: products.len(),
        low_stock_count: classify_all(products, overrides, global).len(),
        total_available: products.iter().map(|p| p.stock.available).sum(),
        total_not_available: products.iter().map(|p| p.stock.not_available).sum(),
    }
}

/// Продажи одного товара за период
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSalesRollup {
    pub product_id: ProductId,
    pub product_title: String,
    pub quantity: i64,
    pub orders: usize,
    pub revenue: f64,
}

/// Продажи за день (столбик графика)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesTotals {
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub order_count: usize,
    /// По убыванию количества; при равенстве в порядке первого появления
    pub by_product: Vec<ProductSalesRollup>,
    /// По возрастанию даты, только дни с продажами
    pub daily: Vec<DailySales>,
}

pub fn sales_totals(sales: &[Sale]) -> SalesTotals {
    let mut by_product: Vec<ProductSalesRollup> = Vec::new();
    let mut daily: BTreeMap<NaiveDate, DailySales> = BTreeMap::new();

    for sale in sales {
        let revenue = sale.revenue();
        match by_product.iter_mut().find(|r| r.product_id == sale.product_id) {
            Some(rollup) => {
                rollup.quantity += sale.quantity_sold;
                rollup.orders += 1;
                rollup.revenue += revenue;
            }
            None => by_product.push(ProductSalesRollup {
                product_id: sale.product_id,
                product_title: sale.product_title.clone(),
                quantity: sale.quantity_sold,
                orders: 1,
                revenue,
            }),
        }

        let date = sale.sale_timestamp.date_naive();
        let day = daily.entry(date).or_insert(DailySales { date, quantity: 0, revenue: 0.0 });
        day.quantity += sale.quantity_sold;
        day.revenue += revenue;
    }
    by_product.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    SalesTotals {
        total_quantity: sales.iter().map(|s| s.quantity_sold).sum(),
        total_revenue: sales.iter().map(Sale::revenue).sum(),
        order_count: sales.len(),
        by_product,
        daily: daily.into_values().collect(),
    }
}

/// Карточки главной страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub product_count: usize,
    pub available_stock: i64,
    /// Проданные единицы с начала текущего месяца
    pub monthly_sales: i64,
    pub low_stock_alerts: usize,
}

pub fn dashboard_stats(
    products: &[Product],
    sales: &[Sale],
    overrides: &AlertOverrides,
    global: &AlertSettings,
    now: DateTime<Utc>,
) -> DashboardStats {
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    DashboardStats {
        product_count: products.len(),
        available_stock: products.iter().map(|p| p.stock.available).sum(),
        monthly_sales: sales
            .iter()
            .filter(|s| s.sale_timestamp >= month_start && s.sale_timestamp <= now)
            .map(|s| s.quantity_sold)
            .sum(),
        low_stock_alerts: classify_all(products, overrides, global).len(),
    }
}

/// Количество отправок по статусам в порядке жизненного цикла
pub fn shipments_by_status(shipments: &[Shipment]) -> Vec<(ShipmentStatus, usize)> {
    ShipmentStatus::all()
        .into_iter()
        .map(|status| (status, shipments.iter().filter(|s| s.status == status).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::StockSummary;
    use chrono::Duration;

    fn product(id: i64, available: i64, not_available: i64) -> Product {
        Product {
            id: ProductId(id),
            sku: format!("SKU-{}", id),
            ml_item_id: format!("MLB{}", id),
            ml_inventory_id: None,
            title: format!("Товар {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            stock: StockSummary {
                total: available + not_available,
                available,
                not_available,
                last_updated: None,
            },
        }
    }

    fn sale(id: i64, product_id: i64, qty: i64, at: DateTime<Utc>, price: Option<f64>) -> Sale {
        Sale {
            id,
            product_id: ProductId(product_id),
            product_title: format!("Товар {}", product_id),
            ml_order_id: format!("ML{}", id),
            quantity_sold: qty,
            sale_timestamp: at,
            price,
        }
    }

    #[test]
    fn test_stock_totals() {
        let products = vec![product(1, 2, 1), product(2, 10, 0), product(3, 5, 4)];
        let totals = stock_totals(&products, &AlertOverrides::new(), &AlertSettings::default());
        assert_eq!(
            totals,
            StockTotals { product_count: 3, low_stock_count: 2, total_available: 17, total_not_available: 5 }
        );
    }

    #[test]
    fn test_sales_totals_rollup_and_daily_series() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap();
        let sales = vec![
            sale(1, 1, 1, day, Some(100.0)),
            sale(2, 2, 3, day + Duration::hours(2), Some(10.0)),
            sale(3, 1, 1, day + Duration::days(1), None),
            sale(4, 3, 2, day + Duration::days(1), Some(5.0)),
        ];
        let totals = sales_totals(&sales);
        assert_eq!(totals.total_quantity, 7);
        assert!((totals.total_revenue - 140.0).abs() < 1e-9);
        assert_eq!(totals.order_count, 4);

        let order: Vec<i64> = totals.by_product.iter().map(|r| r.product_id.value()).collect();
        // 2 и 1 по 3 и 2 шт.; 3 тоже 2 шт., но появился позже 1
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(totals.by_product[1].orders, 2);

        assert_eq!(totals.daily.len(), 2);
        assert_eq!(totals.daily[0].quantity, 4);
        assert_eq!(totals.daily[1].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_dashboard_stats_counts_current_month_only() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let products = vec![product(1, 2, 0), product(2, 10, 0)];
        let sales = vec![
            sale(1, 1, 2, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), None),
            sale(2, 1, 5, Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 0).unwrap(), None),
            sale(3, 2, 1, now - Duration::hours(1), None),
        ];
        let stats = dashboard_stats(&products, &sales, &AlertOverrides::new(), &AlertSettings::default(), now);
        assert_eq!(
            stats,
            DashboardStats { product_count: 2, available_stock: 12, monthly_sales: 3, low_stock_alerts: 1 }
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(sales_totals(&[]), SalesTotals::default());
        let counts = shipments_by_status(&[]);
        assert_eq!(counts.len(), 5);
        assert!(counts.iter().all(|(_, n)| *n == 0));
    }
}
