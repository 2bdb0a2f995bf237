use crate::domain::a001_product::ProductId;
use crate::domain::common::timestamp::{format_datetime, serde_timestamp};
use crate::shared::export::ExcelExportable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Продажа (заказ маркетплейса по одному товару)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_title: String,
    pub ml_order_id: String,
    pub quantity_sold: i64,
    #[serde(with = "serde_timestamp")]
    pub sale_timestamp: DateTime<Utc>,
    /// Цена за единицу; бэкенд отдаёт её не всегда
    #[serde(default)]
    pub price: Option<f64>,
}

impl Sale {
    /// Выручка по продаже (0 без цены)
    pub fn revenue(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.quantity_sold as f64
    }
}

impl ExcelExportable for Sale {
    fn headers() -> Vec<&'static str> {
        vec!["Дата", "Заказ", "Товар", "Количество", "Цена", "Сумма"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            format_datetime(&self.sale_timestamp),
            self.ml_order_id.clone(),
            self.product_title.clone(),
            self.quantity_sold.to_string(),
            self.price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
            format!("{:.2}", self.revenue()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_revenue_and_csv_row() {
        let sale = Sale {
            id: 1,
            product_id: ProductId(4),
            product_title: "Fone de Ouvido JBL".to_string(),
            ml_order_id: "2000001".to_string(),
            quantity_sold: 2,
            sale_timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap(),
            price: Some(349.9),
        };
        assert!((sale.revenue() - 699.8).abs() < 1e-9);
        assert_eq!(
            sale.to_csv_row(),
            vec!["15.03.2024 14:02:26", "2000001", "Fone de Ouvido JBL", "2", "349.90", "699.80"]
        );

        let no_price = Sale { price: None, ..sale };
        assert_eq!(no_price.revenue(), 0.0);
        assert_eq!(no_price.to_csv_row()[4], "");
    }
}
