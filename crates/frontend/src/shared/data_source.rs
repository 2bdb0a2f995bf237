//! Источник данных дашборда.
//!
//! Страницы получают `Rc<dyn InventoryApi>` через [`data_source`]: в обычном
//! режиме это HTTP-клиент бэкенда, с `?demo=1` детерминированный набор в памяти.

use crate::shared::api_utils::{api_base, is_demo_mode};
use crate::system::auth::storage;
use async_trait::async_trait;
use contracts::domain::a001_product::Product;
use contracts::domain::a002_stock_adjustment::{StockAdjustmentAck, StockAdjustmentRequest};
use contracts::domain::a003_sale::Sale;
use contracts::domain::a004_shipment::{CreateShipmentRequest, Shipment, ShipmentStatus};
use contracts::domain::a005_activity::{Activity, ActivityQuery};
use contracts::domain::a006_alert_settings::AlertSettingsDto;
use contracts::domain::a007_notification::Notification;
use contracts::enums::SyncKind;
use contracts::shared::data_access::{endpoints, ApiError, InventoryApi, SyncResult};
use contracts::shared::fixtures::FixtureInventoryApi;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

thread_local! {
    static DATA_SOURCE: Rc<dyn InventoryApi> = create_data_source();
}

fn create_data_source() -> Rc<dyn InventoryApi> {
    if is_demo_mode() {
        log::info!("Demo mode: using built-in sample data");
        Rc::new(FixtureInventoryApi::sample(chrono::Utc::now()))
    } else {
        Rc::new(HttpInventoryApi::new(api_base()))
    }
}

/// Общий для всех страниц источник данных
pub fn data_source() -> Rc<dyn InventoryApi> {
    DATA_SOURCE.with(Rc::clone)
}

/// REST-клиент бэкенда поверх gloo-net
pub struct HttpInventoryApi {
    base_url: String,
}

impl HttpInventoryApi {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match storage::get_access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Self::authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Self::authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        log::error!("API request failed with status {}: {}", status, body);
        let error = ApiError::from_status(status, &body);
        if error == ApiError::Unauthorized {
            storage::clear_access_token();
        }
        return Err(error);
    }

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(500).collect();
        log::error!("Failed to parse API response: {}. Body: {}", e, preview);
        ApiError::Decode(e.to_string())
    })
}

#[async_trait(?Send)]
impl InventoryApi for HttpInventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(endpoints::PRODUCTS).await
    }

    async fn trigger_sync(&self, kind: SyncKind) -> Result<SyncResult, ApiError> {
        self.get_json(&endpoints::sync(kind)).await
    }

    async fn submit_adjustment(
        &self,
        request: &StockAdjustmentRequest,
    ) -> Result<StockAdjustmentAck, ApiError> {
        self.post_json(endpoints::STOCK_ADJUST, request).await
    }

    async fn list_sales(&self, days: u32) -> Result<Vec<Sale>, ApiError> {
        self.get_json(&endpoints::sales(days)).await
    }

    async fn list_activities(&self, query: &ActivityQuery) -> Result<Vec<Activity>, ApiError> {
        self.get_json(&endpoints::activities(query)).await
    }

    async fn list_shipments(&self, status: Option<ShipmentStatus>) -> Result<Vec<Shipment>, ApiError> {
        self.get_json(&endpoints::shipments(status)).await
    }

    async fn create_shipment(&self, request: &CreateShipmentRequest) -> Result<Shipment, ApiError> {
        self.post_json(endpoints::SHIPMENTS, request).await
    }

    async fn get_alert_settings(&self) -> Result<AlertSettingsDto, ApiError> {
        self.get_json(endpoints::ALERT_SETTINGS).await
    }

    async fn save_alert_settings(&self, settings: &AlertSettingsDto) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post_json(endpoints::ALERT_SETTINGS, settings).await?;
        Ok(())
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get_json(endpoints::NOTIFICATIONS).await
    }
}
