use crate::shared::config::ApiConfig;
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
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP-клиент REST API дашборда остатков
pub struct RestInventoryApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestInventoryApi {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        let token = Some(config.token.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(&url))
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
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("API request failed with status {}: {}", status, body);
        return Err(ApiError::from_status(status.as_u16(), &body));
    }
    decode(&body)
}

/// Разбор тела ответа; в лог уходит только начало тела
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let preview: String = body.chars().take(500).collect();
        tracing::error!("Failed to parse API response: {}. Body: {}", e, preview);
        ApiError::Decode(e.to_string())
    })
}

#[async_trait(?Send)]
impl InventoryApi for RestInventoryApi {
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
