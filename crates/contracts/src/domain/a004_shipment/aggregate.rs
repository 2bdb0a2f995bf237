use crate::domain::a001_product::ProductId;
use crate::domain::common::timestamp::{serde_timestamp, serde_timestamp_opt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Центры распределения фулфилмента, доступные как склад назначения
pub const WAREHOUSES: &[&str] = &[
    "CD São Paulo - Vila Guilherme",
    "CD Cajamar",
    "CD Rio de Janeiro",
    "CD Extrema",
    "CD Recife",
];

/// Статус отправки на склад фулфилмента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Draft,
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ShipmentStatus::Draft => "draft",
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShipmentStatus::Draft => "Черновик",
            ShipmentStatus::Pending => "Ожидает",
            ShipmentStatus::InTransit => "В пути",
            ShipmentStatus::Delivered => "Доставлено",
            ShipmentStatus::Cancelled => "Отменено",
        }
    }

    pub fn all() -> Vec<ShipmentStatus> {
        vec![
            ShipmentStatus::Draft,
            ShipmentStatus::Pending,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
            ShipmentStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Порядок статусов в жизненном цикле (для сортировки)
    pub fn rank(&self) -> i64 {
        match self {
            ShipmentStatus::Draft => 0,
            ShipmentStatus::Pending => 1,
            ShipmentStatus::InTransit => 2,
            ShipmentStatus::Delivered => 3,
            ShipmentStatus::Cancelled => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_title: String,
    pub quantity: i64,
}

/// Отправка товаров на склад фулфилмента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: i64,
    pub status: ShipmentStatus,
    #[serde(with = "serde_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, with = "serde_timestamp_opt")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    /// Пустая строка у черновиков приходит как None
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tracking_number: Option<String>,
    pub destination_warehouse: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<ShipmentItem>,
}

impl Shipment {
    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Запрос POST /api/shipments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShipmentRequest {
    pub status: ShipmentStatus,
    pub items: Vec<CreateShipmentItem>,
    pub destination_warehouse: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShipmentItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_with_empty_tracking() {
        let json = r#"{
            "id": 1004, "status": "draft",
            "created_at": "2024-03-15T10:00:00Z", "updated_at": "2024-03-15T10:00:00Z",
            "estimated_delivery": "", "tracking_number": "",
            "destination_warehouse": "CD Extrema", "notes": "",
            "items": [{"product_id": 2, "product_title": "Notebook", "quantity": 8}]
        }"#;
        let shipment: Shipment = serde_json::from_str(json).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Draft);
        assert_eq!(shipment.tracking_number, None);
        assert_eq!(shipment.estimated_delivery, None);
        assert_eq!(shipment.total_units(), 8);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            serde_json::to_string(&ShipmentStatus::InTransit).unwrap(),
            "\"in_transit\""
        );
        assert_eq!(ShipmentStatus::from_code("delivered"), Some(ShipmentStatus::Delivered));
        assert_eq!(ShipmentStatus::from_code("all"), None);
    }
}
