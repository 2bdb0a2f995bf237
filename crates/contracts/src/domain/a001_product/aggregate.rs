use crate::domain::common::timestamp::{serde_timestamp, serde_timestamp_opt};
use crate::domain::common::AggregateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ID товара (целочисленный ключ бэкенда)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        <i64 as AggregateId>::from_string(s).map(ProductId::new)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Сводка остатков товара на складе фулфилмента
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockSummary {
    pub total: i64,
    pub available: i64,
    pub not_available: i64,
    /// Время последней синхронизации остатков (None: ни разу)
    #[serde(default, with = "serde_timestamp_opt")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl StockSummary {
    /// Применить корректировку со знаком к остаткам.
    ///
    /// Доступный остаток не уходит ниже нуля, общий не меньше доступного.
    pub fn adjusted(&self, signed_quantity: i64, at: DateTime<Utc>) -> StockSummary {
        let available = (self.available + signed_quantity).max(0);
        let total = (self.total + signed_quantity).max(available);
        StockSummary {
            total,
            available,
            not_available: total - available,
            last_updated: Some(at),
        }
    }
}

/// Товар (объявление маркетплейса с остатками)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    /// Идентификатор объявления на маркетплейсе (MLB...)
    pub ml_item_id: String,
    /// Идентификатор позиции на складе фулфилмента; None: товар не на фулфилменте
    #[serde(default)]
    pub ml_inventory_id: Option<String>,
    pub title: String,
    #[serde(with = "serde_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stock: StockSummary,
}

impl Product {
    pub fn is_fulfillment(&self) -> bool {
        self.ml_inventory_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": 7,
            "sku": "SKU-7",
            "ml_item_id": "MLB123",
            "ml_inventory_id": null,
            "title": "Смартфон",
            "created_at": "2024-03-01T10:00:00.000123",
            "stock": {"total": 10, "available": 8, "not_available": 2, "last_updated": null}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.stock.available, 8);
        assert_eq!(product.stock.last_updated, None);
        assert!(!product.is_fulfillment());
        assert_eq!(
            product.created_at.date_naive(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap().date_naive()
        );
    }

    #[test]
    fn test_adjusted_clamps_available_and_total() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let stock = StockSummary { total: 10, available: 4, not_available: 6, last_updated: None };

        let out = stock.adjusted(-6, at);
        assert_eq!((out.available, out.total, out.not_available), (0, 4, 4));

        let out = stock.adjusted(5, at);
        assert_eq!((out.available, out.total, out.not_available), (9, 15, 6));
        assert_eq!(out.last_updated, Some(at));

        let empty = StockSummary::default();
        let out = empty.adjusted(-3, at);
        assert_eq!((out.available, out.total, out.not_available), (0, 0, 0));
    }
}
