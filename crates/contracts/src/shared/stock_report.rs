//! Отчёт по остаткам: основной лист, сводка и рекомендации по пополнению

use crate::domain::a001_product::Product;
use crate::domain::a006_alert_settings::{AlertOverrides, AlertSettings};
use crate::domain::common::timestamp::format_datetime_or_never;
use crate::shared::alert_thresholds::{is_low_stock, low_stock_entries};
use crate::shared::export::{render_csv, ExcelExportable, ExportError};
use crate::shared::summary::stock_totals;

impl ExcelExportable for Product {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Товар",
            "SKU",
            "ID объявления",
            "Доступно",
            "Всего",
            "Недоступно",
            "Последнее обновление",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.sku.clone(),
            self.ml_item_id.clone(),
            self.stock.available.to_string(),
            self.stock.total.to_string(),
            self.stock.not_available.to_string(),
            format_datetime_or_never(self.stock.last_updated.as_ref()),
        ]
    }
}

/// Строка листа «Остатки»
pub struct StockRow<'a> {
    pub product: &'a Product,
    pub low_stock: bool,
}

impl ExcelExportable for StockRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec![
            "Товар",
            "SKU",
            "Доступно",
            "Недоступно",
            "Всего",
            "Последнее обновление",
            "Низкий остаток",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        let p = self.product;
        vec![
            p.title.clone(),
            p.sku.clone(),
            p.stock.available.to_string(),
            p.stock.not_available.to_string(),
            p.stock.total.to_string(),
            format_datetime_or_never(p.stock.last_updated.as_ref()),
            if self.low_stock { "Да" } else { "Нет" }.to_string(),
        ]
    }
}

/// Строка листа «Сводка»
pub struct SummaryRow {
    pub metric: &'static str,
    pub value: i64,
}

impl ExcelExportable for SummaryRow {
    fn headers() -> Vec<&'static str> {
        vec!["Показатель", "Значение"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![self.metric.to_string(), self.value.to_string()]
    }
}

/// Строка листа «Рекомендации»
pub struct RecommendationRow<'a> {
    pub product: &'a Product,
    pub threshold: i64,
}

impl ExcelExportable for RecommendationRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["Товар", "SKU", "Доступно", "Всего", "Порог", "Рекомендация"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        let p = self.product;
        let recommendation = if p.stock.available <= 0 {
            "Срочно пополнить запас"
        } else {
            "Пополнить запас"
        };
        vec![
            p.title.clone(),
            p.sku.clone(),
            p.stock.available.to_string(),
            p.stock.total.to_string(),
            self.threshold.to_string(),
            recommendation.to_string(),
        ]
    }
}

/// Готовые CSV листов отчёта
#[derive(Debug, Clone, PartialEq)]
pub struct StockReport {
    pub stock: String,
    pub summary: String,
    /// Нет, если товаров с низким остатком нет
    pub recommendations: Option<String>,
}

pub fn build_stock_report(
    products: &[Product],
    overrides: &AlertOverrides,
    global: &AlertSettings,
) -> Result<StockReport, ExportError> {
    let rows: Vec<StockRow<'_>> = products
        .iter()
        .map(|product| StockRow {
            product,
            low_stock: is_low_stock(product, overrides, global),
        })
        .collect();
    let stock = render_csv(&rows)?;

    let totals = stock_totals(products, overrides, global);
    let summary = render_csv(&[
        SummaryRow { metric: "Всего товаров", value: totals.product_count as i64 },
        SummaryRow { metric: "Товаров с низким остатком", value: totals.low_stock_count as i64 },
        SummaryRow { metric: "Доступно всего", value: totals.total_available },
        SummaryRow { metric: "Недоступно всего", value: totals.total_not_available },
    ])?;

    let recommendations: Vec<RecommendationRow<'_>> = low_stock_entries(products, overrides, global)
        .into_iter()
        .map(|entry| RecommendationRow {
            product: entry.item,
            threshold: entry.threshold,
        })
        .collect();
    let recommendations = if recommendations.is_empty() {
        None
    } else {
        Some(render_csv(&recommendations)?)
    };

    Ok(StockReport {
        stock,
        summary,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::{ProductId, StockSummary};
    use chrono::{TimeZone, Utc};

    fn product(id: i64, title: &str, available: i64) -> Product {
        Product {
            id: ProductId(id),
            sku: format!("SKU-{}", id),
            ml_item_id: format!("MLB{}", id),
            ml_inventory_id: Some(format!("INV-{}", id)),
            title: title.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            stock: StockSummary { total: available + 2, available, not_available: 2, last_updated: None },
        }
    }

    #[test]
    fn test_report_sheets() {
        let products = vec![product(1, "Galaxy", 2), product(2, "Notebook", 15), product(5, "Canon", 0)];
        let report = build_stock_report(&products, &AlertOverrides::new(), &AlertSettings::default()).unwrap();

        let stock_lines: Vec<&str> = report.stock.lines().collect();
        assert_eq!(stock_lines.len(), 4);
        assert!(stock_lines[1].starts_with("Galaxy;SKU-1;2;2;4;Никогда;Да"));
        assert!(stock_lines[2].ends_with(";Нет"));

        assert!(report.summary.contains("Всего товаров;3"));
        assert!(report.summary.contains("Товаров с низким остатком;2"));
        assert!(report.summary.contains("Доступно всего;17"));
        assert!(report.summary.contains("Недоступно всего;6"));

        let recommendations = report.recommendations.unwrap();
        assert!(recommendations.contains("Galaxy;SKU-1;2;4;5;Пополнить запас"));
        assert!(recommendations.contains("Canon;SKU-5;0;2;5;Срочно пополнить запас"));
    }

    #[test]
    fn test_no_recommendations_when_everything_is_stocked() {
        let products = vec![product(2, "Notebook", 15)];
        let report = build_stock_report(&products, &AlertOverrides::new(), &AlertSettings::default()).unwrap();
        assert_eq!(report.recommendations, None);
    }

    #[test]
    fn test_empty_snapshot_cannot_be_exported() {
        let result = build_stock_report(&[], &AlertOverrides::new(), &AlertSettings::default());
        assert_eq!(result, Err(ExportError::Empty));
    }

    #[test]
    fn test_products_sheet_row() {
        let row = product(1, "Galaxy", 2).to_csv_row();
        assert_eq!(row.len(), Product::headers().len());
        assert_eq!(row[3], "MLB1");
    }
}
