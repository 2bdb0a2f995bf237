//! Доступ к данным бэкенда.
//!
//! Ядра (пороги, проекция, итоги) получают уже загруженные снимки и про
//! транспорт ничего не знают. Реализации трейта: HTTP во фронтенде, reqwest
//! в мониторе и [`crate::shared::fixtures::FixtureInventoryApi`] для тестов и демо.

use crate::domain::a001_product::Product;
use crate::domain::a002_stock_adjustment::{StockAdjustmentAck, StockAdjustmentRequest};
use crate::domain::a003_sale::Sale;
use crate::domain::a004_shipment::{CreateShipmentRequest, Shipment, ShipmentStatus};
use crate::domain::a005_activity::{Activity, ActivityFilter, ActivityQuery};
use crate::domain::a006_alert_settings::AlertSettingsDto;
use crate::domain::a007_notification::Notification;
use crate::enums::SyncKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Сервер недоступен: {0}")]
    Network(String),
    #[error("Требуется авторизация")]
    Unauthorized,
    #[error("Ошибка сервера ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Ошибка по коду ответа; тело `{"error": "..."}` становится сообщением
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        ApiError::Http { status, message }
    }

    /// Имеет ли смысл повторить запрос
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Http { status, .. } => *status >= 500,
            ApiError::Unauthorized | ApiError::Decode(_) => false,
        }
    }
}

/// Ответ синхронизации
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default)]
    pub success: bool,
    /// Только при синхронизации товаров
    #[serde(default)]
    pub new_products: Option<u32>,
    #[serde(default)]
    pub updated_products: u32,
}

impl SyncResult {
    pub fn message(&self) -> String {
        match self.new_products {
            Some(new) => format!(
                "Синхронизация завершена: {} новых, {} обновлено",
                new, self.updated_products
            ),
            None => format!("Остатки обновлены для {} товаров", self.updated_products),
        }
    }
}

/// Пути REST API (относительно базового адреса)
pub mod endpoints {
    use super::*;

    pub const PRODUCTS: &str = "/api/products";
    pub const STOCK_ADJUST: &str = "/api/stock/adjust";
    pub const SHIPMENTS: &str = "/api/shipments";
    pub const ALERT_SETTINGS: &str = "/api/alerts/settings";
    pub const NOTIFICATIONS: &str = "/api/notifications";

    pub fn sync(kind: SyncKind) -> String {
        format!("/api/sync/{}", kind.code())
    }

    pub fn sales(days: u32) -> String {
        format!("/api/sales?days={}", days)
    }

    pub fn activities(query: &ActivityQuery) -> String {
        let mut path = format!("/api/activities?days={}", query.days);
        if let Some(limit) = query.limit {
            path.push_str(&format!("&limit={}", limit));
        }
        if query.filter != ActivityFilter::All {
            path.push_str(&format!("&type={}", query.filter.code()));
        }
        path
    }

    pub fn shipments(status: Option<ShipmentStatus>) -> String {
        match status {
            Some(status) => format!("{}?status={}", SHIPMENTS, status.code()),
            None => format!("{}?status=all", SHIPMENTS),
        }
    }
}

/// Операции бэкенда, которыми пользуются страницы и монитор.
///
/// `?Send`: в браузере всё выполняется в одном потоке.
#[async_trait(?Send)]
pub trait InventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn trigger_sync(&self, kind: SyncKind) -> Result<SyncResult, ApiError>;

    async fn submit_adjustment(
        &self,
        request: &StockAdjustmentRequest,
    ) -> Result<StockAdjustmentAck, ApiError>;

    async fn list_sales(&self, days: u32) -> Result<Vec<Sale>, ApiError>;

    async fn list_activities(&self, query: &ActivityQuery) -> Result<Vec<Activity>, ApiError>;

    async fn list_shipments(&self, status: Option<ShipmentStatus>) -> Result<Vec<Shipment>, ApiError>;

    async fn create_shipment(&self, request: &CreateShipmentRequest) -> Result<Shipment, ApiError>;

    async fn get_alert_settings(&self) -> Result<AlertSettingsDto, ApiError>;

    async fn save_alert_settings(&self, settings: &AlertSettingsDto) -> Result<(), ApiError>;

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_status() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_status(404, r#"{"error": "Товар не найден"}"#),
            ApiError::Http { status: 404, message: "Товар не найден".to_string() }
        );
        let err = ApiError::from_status(502, "Bad Gateway");
        assert!(err.is_retryable());
        assert!(!ApiError::from_status(400, "{}").is_retryable());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(endpoints::sync(SyncKind::Stock), "/api/sync/stock");
        assert_eq!(endpoints::sales(30), "/api/sales?days=30");
        let query = ActivityQuery { days: 7, limit: Some(5), filter: ActivityFilter::Sale };
        assert_eq!(endpoints::activities(&query), "/api/activities?days=7&limit=5&type=sale");
        assert_eq!(endpoints::activities(&ActivityQuery::default()), "/api/activities?days=7");
        assert_eq!(endpoints::shipments(None), "/api/shipments?status=all");
        assert_eq!(
            endpoints::shipments(Some(ShipmentStatus::InTransit)),
            "/api/shipments?status=in_transit"
        );
    }

    #[test]
    fn test_sync_result_message() {
        let products: SyncResult =
            serde_json::from_str(r#"{"success": true, "new_products": 2, "updated_products": 5}"#).unwrap();
        assert_eq!(products.message(), "Синхронизация завершена: 2 новых, 5 обновлено");
        let stock: SyncResult = serde_json::from_str(r#"{"success": true, "updated_products": 4}"#).unwrap();
        assert_eq!(stock.message(), "Остатки обновлены для 4 товаров");
    }
}
