//! Детерминированная реализация [`InventoryApi`] в памяти.
//!
//! Используется в тестах и в демо-режиме дашборда. Случайности нет: все
//! данные строятся от переданного момента `now`. Изменяющие операции
//! повторяют поведение бэкенда (корректировка, синхронизация, создание отправки).

use crate::domain::a001_product::{Product, ProductId, StockSummary};
use crate::domain::a002_stock_adjustment::{StockAdjustmentAck, StockAdjustmentRequest, StockLevels};
use crate::domain::a003_sale::Sale;
use crate::domain::a004_shipment::{
    CreateShipmentRequest, Shipment, ShipmentItem, ShipmentStatus,
};
use crate::domain::a005_activity::{Activity, ActivityKind, ActivityQuery};
use crate::domain::a006_alert_settings::{AlertField, AlertOverrides, AlertSettings, AlertSettingsDto};
use crate::domain::a007_notification::{Notification, NotificationKind};
use crate::enums::SyncKind;
use crate::shared::alert_thresholds::set_override;
use crate::shared::data_access::{ApiError, InventoryApi, SyncResult};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;

const SAMPLE_PRODUCTS: &[(i64, &str, &str, &str, i64, i64, f64)] = &[
    // id, title, sku, ml_item_id, available, not_available, price
    (1, "Smartphone Galaxy A54", "GAL-A54-128", "MLB3012345671", 2, 2, 1899.90),
    (2, "Notebook Dell Inspiron", "DELL-INS-15", "MLB3012345672", 15, 2, 3899.00),
    (3, "Smart TV LG 50\"", "LG-50UQ80", "MLB3012345673", 8, 0, 2499.00),
    (4, "Fone de Ouvido JBL", "JBL-T510BT", "MLB3012345674", 3, 2, 349.90),
    (5, "Câmera Canon EOS", "CANON-R50", "MLB3012345675", 0, 1, 4299.00),
];

#[derive(Debug, Default)]
struct FixtureState {
    products: Vec<Product>,
    sales: Vec<Sale>,
    activities: Vec<Activity>,
    shipments: Vec<Shipment>,
    alerts: AlertSettingsDto,
    notifications: Vec<Notification>,
    next_adjustment_id: i64,
    next_sync_id: i64,
    failure: Option<ApiError>,
}

pub struct FixtureInventoryApi {
    now: DateTime<Utc>,
    state: RefCell<FixtureState>,
}

impl FixtureInventoryApi {
    /// Пустой источник: нет товаров, настройки по умолчанию
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            state: RefCell::new(FixtureState {
                next_adjustment_id: 1,
                next_sync_id: 1,
                ..FixtureState::default()
            }),
        }
    }

    /// Демонстрационный набор: пять товаров, месяц продаж, отправки и уведомления
    pub fn sample(now: DateTime<Utc>) -> Self {
        let products = sample_products(now);
        let sales = sample_sales(now);
        let mut activities: Vec<Activity> = sales.iter().map(sale_activity).collect();
        activities.extend(sample_history(now, &products));

        let global = AlertSettings {
            notification_email: "sklad@example.com".to_string(),
            ..AlertSettings::default()
        };
        let overrides = set_override(&AlertOverrides::new(), ProductId(1), AlertField::Threshold(Some(3)), &global);
        let overrides = set_override(&overrides, ProductId(2), AlertField::Threshold(Some(10)), &global);

        let api = Self::new(now);
        {
            let mut state = api.state.borrow_mut();
            state.products = products;
            state.sales = sales;
            state.activities = activities;
            state.shipments = sample_shipments(now);
            state.alerts = AlertSettingsDto { global, products: overrides };
            state.notifications = sample_notifications(now);
            state.next_adjustment_id = 3;
            state.next_sync_id = 4;
        }
        api
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.state.borrow_mut().products = products;
        self
    }

    pub fn with_sales(self, sales: Vec<Sale>) -> Self {
        self.state.borrow_mut().sales = sales;
        self
    }

    pub fn with_alert_settings(self, alerts: AlertSettingsDto) -> Self {
        self.state.borrow_mut().alerts = alerts;
        self
    }

    pub fn with_notifications(self, notifications: Vec<Notification>) -> Self {
        self.state.borrow_mut().notifications = notifications;
        self
    }

    /// Все следующие вызовы завершаются этой ошибкой (None: снова работать)
    pub fn fail_with(&self, error: Option<ApiError>) {
        self.state.borrow_mut().failure = error;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Текущий снимок товаров (для проверок в тестах)
    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.state.borrow().failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl InventoryApi for FixtureInventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.check()?;
        Ok(self.state.borrow().products.clone())
    }

    async fn trigger_sync(&self, kind: SyncKind) -> Result<SyncResult, ApiError> {
        self.check()?;
        let now = self.now;
        let mut state = self.state.borrow_mut();
        let sync_id = state.next_sync_id;
        state.next_sync_id += 1;

        let result = match kind {
            SyncKind::Products => SyncResult {
                success: true,
                new_products: Some(0),
                updated_products: state.products.len() as u32,
            },
            SyncKind::Stock => {
                let mut changes = Vec::new();
                for product in state.products.iter_mut().filter(|p| p.is_fulfillment()) {
                    product.stock.last_updated = Some(now);
                    changes.push(Activity {
                        id: format!("stock_{}_{}", sync_id, product.id),
                        description: "Обновление остатков на складе фулфилмента".to_string(),
                        timestamp: now,
                        kind: ActivityKind::StockChange {
                            product_id: product.id,
                            product_title: product.title.clone(),
                            available: product.stock.available,
                            total: product.stock.total,
                        },
                    });
                }
                let updated = changes.len() as u32;
                state.activities.extend(changes);
                SyncResult {
                    success: true,
                    new_products: None,
                    updated_products: updated,
                }
            }
        };

        state.activities.push(Activity {
            id: format!("sync_{}", sync_id),
            description: kind.display_name().to_string(),
            timestamp: now,
            kind: ActivityKind::Sync,
        });
        Ok(result)
    }

    async fn submit_adjustment(
        &self,
        request: &StockAdjustmentRequest,
    ) -> Result<StockAdjustmentAck, ApiError> {
        self.check()?;
        if request.quantity == 0 {
            return Err(ApiError::Http {
                status: 400,
                message: "Количество должно быть ненулевым".to_string(),
            });
        }
        let now = self.now;
        let mut state = self.state.borrow_mut();
        let adjustment_id = state.next_adjustment_id;

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == request.product_id)
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: "Товар не найден".to_string(),
            })?;
        let quantity = request.adjustment_type.signed(request.quantity);
        product.stock = product.stock.adjusted(quantity, now);
        let new_stock = StockLevels {
            available: product.stock.available,
            total: product.stock.total,
            not_available: product.stock.not_available,
        };
        let activity = Activity {
            id: format!("adjustment_{}", adjustment_id),
            description: format!(
                "Ручная корректировка остатков: {}",
                request.adjustment_type.display_name()
            ),
            timestamp: now,
            kind: ActivityKind::Adjustment {
                product_id: product.id,
                product_title: product.title.clone(),
                quantity,
                reason: request.reason.clone(),
            },
        };

        state.next_adjustment_id += 1;
        state.activities.push(activity);
        Ok(StockAdjustmentAck {
            success: true,
            message: "Остатки скорректированы".to_string(),
            adjustment_id,
            new_stock,
        })
    }

    async fn list_sales(&self, days: u32) -> Result<Vec<Sale>, ApiError> {
        self.check()?;
        let since = self.now - Duration::days(days as i64);
        Ok(self
            .state
            .borrow()
            .sales
            .iter()
            .filter(|s| s.sale_timestamp >= since)
            .cloned()
            .collect())
    }

    async fn list_activities(&self, query: &ActivityQuery) -> Result<Vec<Activity>, ApiError> {
        self.check()?;
        let since = self.now - Duration::days(query.days as i64);
        let mut activities: Vec<Activity> = self
            .state
            .borrow()
            .activities
            .iter()
            .filter(|a| a.timestamp >= since && query.filter.accepts(a))
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = query.limit {
            activities.truncate(limit);
        }
        Ok(activities)
    }

    async fn list_shipments(&self, status: Option<ShipmentStatus>) -> Result<Vec<Shipment>, ApiError> {
        self.check()?;
        Ok(self
            .state
            .borrow()
            .shipments
            .iter()
            .filter(|s| status.map_or(true, |status| s.status == status))
            .cloned()
            .collect())
    }

    async fn create_shipment(&self, request: &CreateShipmentRequest) -> Result<Shipment, ApiError> {
        self.check()?;
        if request.items.is_empty() {
            return Err(ApiError::Http {
                status: 400,
                message: "Отправка без товаров".to_string(),
            });
        }
        let now = self.now;
        let mut state = self.state.borrow_mut();
        let id = state.shipments.iter().map(|s| s.id).max().unwrap_or(1000) + 1;
        let items = request
            .items
            .iter()
            .map(|item| ShipmentItem {
                product_id: item.product_id,
                product_title: state
                    .products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|p| p.title.clone())
                    .unwrap_or_default(),
                quantity: item.quantity,
            })
            .collect();
        let shipment = Shipment {
            id,
            status: ShipmentStatus::Pending,
            created_at: now,
            updated_at: now,
            estimated_delivery: Some(now + Duration::days(3)),
            tracking_number: Some(format!("MLSHIP{:06}", id)),
            destination_warehouse: request.destination_warehouse.clone(),
            notes: request.notes.clone(),
            items,
        };
        state.shipments.push(shipment.clone());
        Ok(shipment)
    }

    async fn get_alert_settings(&self) -> Result<AlertSettingsDto, ApiError> {
        self.check()?;
        Ok(self.state.borrow().alerts.clone())
    }

    async fn save_alert_settings(&self, settings: &AlertSettingsDto) -> Result<(), ApiError> {
        self.check()?;
        self.state.borrow_mut().alerts = settings.clone();
        Ok(())
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.check()?;
        Ok(self.state.borrow().notifications.clone())
    }
}

fn sample_products(now: DateTime<Utc>) -> Vec<Product> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|&(id, title, sku, ml_item_id, available, not_available, _)| Product {
            id: ProductId(id),
            sku: sku.to_string(),
            ml_item_id: ml_item_id.to_string(),
            ml_inventory_id: Some(format!("INV{:05}", id * 1117)),
            title: title.to_string(),
            created_at: now - Duration::days(90 - id * 7),
            stock: StockSummary {
                total: available + not_available,
                available,
                not_available,
                last_updated: Some(now - Duration::hours(5)),
            },
        })
        .collect()
}

fn sample_sales(now: DateTime<Utc>) -> Vec<Sale> {
    (0..40_i64)
        .map(|i| {
            let (product_id, title, _, _, _, _, price) = SAMPLE_PRODUCTS[((i * 7 + 3) % 5) as usize];
            Sale {
                id: i + 1,
                product_id: ProductId(product_id),
                product_title: title.to_string(),
                ml_order_id: format!("ML{}", 20_000_000 + i * 7919),
                quantity_sold: 1 + i % 3,
                sale_timestamp: now - Duration::hours(i * 17 + 3),
                price: Some(price),
            }
        })
        .collect()
}

fn sale_activity(sale: &Sale) -> Activity {
    Activity {
        id: format!("sale_{}", sale.id),
        description: "Продажа на маркетплейсе".to_string(),
        timestamp: sale.sale_timestamp,
        kind: ActivityKind::Sale {
            product_id: sale.product_id,
            product_title: sale.product_title.clone(),
            quantity: sale.quantity_sold,
            reference_id: sale.ml_order_id.clone(),
        },
    }
}

fn sample_history(now: DateTime<Utc>, products: &[Product]) -> Vec<Activity> {
    let title = |id: i64| {
        products
            .iter()
            .find(|p| p.id == ProductId(id))
            .map(|p| p.title.clone())
            .unwrap_or_default()
    };
    let mut history = vec![
        Activity {
            id: "adjustment_1".to_string(),
            description: "Ручная корректировка остатков: Повреждение".to_string(),
            timestamp: now - Duration::hours(30),
            kind: ActivityKind::Adjustment {
                product_id: ProductId(4),
                product_title: title(4),
                quantity: -2,
                reason: "Повреждена упаковка при хранении".to_string(),
            },
        },
        Activity {
            id: "adjustment_2".to_string(),
            description: "Ручная корректировка остатков: Ручное поступление".to_string(),
            timestamp: now - Duration::hours(70),
            kind: ActivityKind::Adjustment {
                product_id: ProductId(2),
                product_title: title(2),
                quantity: 5,
                reason: "Возврат от покупателя".to_string(),
            },
        },
    ];
    for (n, hours) in [5_i64, 53, 101].into_iter().enumerate() {
        history.push(Activity {
            id: format!("sync_{}", n + 1),
            description: SyncKind::Stock.display_name().to_string(),
            timestamp: now - Duration::hours(hours),
            kind: ActivityKind::Sync,
        });
    }
    for product in products {
        history.push(Activity {
            id: format!("stock_0_{}", product.id),
            description: "Обновление остатков на складе фулфилмента".to_string(),
            timestamp: now - Duration::hours(5),
            kind: ActivityKind::StockChange {
                product_id: product.id,
                product_title: product.title.clone(),
                available: product.stock.available,
                total: product.stock.total,
            },
        });
    }
    history
}

fn sample_shipments(now: DateTime<Utc>) -> Vec<Shipment> {
    let item = |id: i64, quantity: i64| ShipmentItem {
        product_id: ProductId(id),
        product_title: SAMPLE_PRODUCTS
            .iter()
            .find(|p| p.0 == id)
            .map(|p| p.1.to_string())
            .unwrap_or_default(),
        quantity,
    };
    vec![
        Shipment {
            id: 1001,
            status: ShipmentStatus::InTransit,
            created_at: now - Duration::days(2),
            updated_at: now - Duration::hours(12),
            estimated_delivery: Some(now + Duration::days(1)),
            tracking_number: Some("MLSHIP123456".to_string()),
            destination_warehouse: "CD São Paulo - Vila Guilherme".to_string(),
            notes: "Пополнение товаров с низким остатком".to_string(),
            items: vec![item(1, 10), item(4, 15)],
        },
        Shipment {
            id: 1002,
            status: ShipmentStatus::Delivered,
            created_at: now - Duration::days(7),
            updated_at: now - Duration::days(5),
            estimated_delivery: Some(now - Duration::days(4)),
            tracking_number: Some("MLSHIP789012".to_string()),
            destination_warehouse: "CD Cajamar".to_string(),
            notes: "Плановая ежемесячная отправка".to_string(),
            items: vec![item(2, 5), item(3, 3), item(5, 8)],
        },
        Shipment {
            id: 1003,
            status: ShipmentStatus::Pending,
            created_at: now - Duration::hours(6),
            updated_at: now - Duration::hours(6),
            estimated_delivery: Some(now + Duration::days(3)),
            tracking_number: Some("MLSHIP345678".to_string()),
            destination_warehouse: "CD Rio de Janeiro".to_string(),
            notes: "Товары для промо-акции".to_string(),
            items: vec![item(1, 20), item(4, 30)],
        },
        Shipment {
            id: 1004,
            status: ShipmentStatus::Draft,
            created_at: now - Duration::minutes(30),
            updated_at: now - Duration::minutes(30),
            estimated_delivery: None,
            tracking_number: None,
            destination_warehouse: "CD Extrema".to_string(),
            notes: "Черновик: плановое пополнение".to_string(),
            items: vec![item(2, 8), item(5, 12)],
        },
    ]
}

fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let low_stock = |id: i64| NotificationKind::LowStock {
        product_id: ProductId(id),
        product_title: SAMPLE_PRODUCTS[(id - 1) as usize].1.to_string(),
    };
    vec![
        Notification {
            id: 1,
            title: "Низкий остаток".to_string(),
            message: "Smartphone Galaxy A54: доступно всего 2 шт.".to_string(),
            timestamp: now - Duration::minutes(30),
            read: false,
            kind: low_stock(1),
        },
        Notification {
            id: 2,
            title: "Низкий остаток".to_string(),
            message: "Fone de Ouvido JBL: доступно всего 3 шт.".to_string(),
            timestamp: now - Duration::minutes(120),
            read: false,
            kind: low_stock(4),
        },
        Notification {
            id: 3,
            title: "Остатки обновлены".to_string(),
            message: "Остаток Notebook Dell Inspiron обновлён до 15 шт.".to_string(),
            timestamp: now - Duration::hours(5),
            read: true,
            kind: NotificationKind::StockChange {
                product_id: ProductId(2),
                product_title: "Notebook Dell Inspiron".to_string(),
            },
        },
        Notification {
            id: 4,
            title: "Синхронизация завершена".to_string(),
            message: "Синхронизация с маркетплейсом прошла успешно.".to_string(),
            timestamp: now - Duration::hours(12),
            read: true,
            kind: NotificationKind::System,
        },
        Notification {
            id: 5,
            title: "Критический остаток".to_string(),
            message: "Câmera Canon EOS: остаток исчерпан!".to_string(),
            timestamp: now - Duration::minutes(10),
            read: false,
            kind: low_stock(5),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_stock_adjustment::{AdjustmentType, StockAdjustmentForm};
    use crate::domain::a004_shipment::ShipmentDraft;
    use crate::domain::a005_activity::ActivityFilter;
    use crate::domain::a007_notification::unread_count;
    use crate::shared::alert_thresholds::classify_all;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_sample_low_stock_with_overrides() {
        let api = FixtureInventoryApi::sample(now());
        let products = api.list_products().await.unwrap();
        let alerts = api.get_alert_settings().await.unwrap();
        let low: Vec<i64> = classify_all(&products, &alerts.products, &alerts.global)
            .iter()
            .map(|p| p.id.value())
            .collect();
        // 1: 2 ≤ 3 (своя настройка), 2: 15 > 10, 3: 8 > 5, 4: 3 ≤ 5, 5: 0 ≤ 5
        assert_eq!(low, vec![1, 4, 5]);
    }

    #[tokio::test]
    async fn test_adjustment_updates_stock_and_history() {
        let api = FixtureInventoryApi::sample(now());
        let form = StockAdjustmentForm {
            product_id: Some(ProductId(3)),
            adjustment_type: AdjustmentType::Loss,
            quantity: 10,
            reason: "Бой при транспортировке".to_string(),
        };
        let ack = api.submit_adjustment(&form.validate().unwrap()).await.unwrap();
        assert!(ack.success);
        assert_eq!(ack.adjustment_id, 3);
        assert_eq!(ack.new_stock, StockLevels { available: 0, total: 0, not_available: 0 });

        let query = ActivityQuery { days: 1, limit: Some(1), filter: ActivityFilter::Adjustment };
        let latest = api.list_activities(&query).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, "adjustment_3");
        assert!(matches!(latest[0].kind, ActivityKind::Adjustment { quantity: -10, .. }));
    }

    #[tokio::test]
    async fn test_adjustment_for_unknown_product() {
        let api = FixtureInventoryApi::new(now());
        let request = StockAdjustmentRequest {
            product_id: ProductId(99),
            adjustment_type: AdjustmentType::ManualIn,
            quantity: 1,
            reason: "x".to_string(),
        };
        let err = api.submit_adjustment(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_stock_sync_touches_fulfillment_products() {
        let api = FixtureInventoryApi::sample(now());
        let result = api.trigger_sync(SyncKind::Stock).await.unwrap();
        assert_eq!(result.updated_products, 5);
        assert!(api.products().iter().all(|p| p.stock.last_updated == Some(now())));

        let query = ActivityQuery { days: 1, limit: None, filter: ActivityFilter::Sync };
        let syncs = api.list_activities(&query).await.unwrap();
        assert_eq!(syncs[0].timestamp, now());
    }

    #[tokio::test]
    async fn test_sales_window_and_activity_order() {
        let api = FixtureInventoryApi::sample(now());
        let week = api.list_sales(7).await.unwrap();
        let month = api.list_sales(30).await.unwrap();
        assert!(week.len() < month.len());
        assert!(week.iter().all(|s| s.sale_timestamp >= now() - Duration::days(7)));

        let activities = api.list_activities(&ActivityQuery { days: 30, ..ActivityQuery::default() }).await.unwrap();
        assert!(activities.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_create_shipment_from_draft() {
        let api = FixtureInventoryApi::sample(now());
        let mut draft = ShipmentDraft::default();
        draft.add_product(ProductId(1));
        draft.set_quantity(ProductId(1), 12);
        draft.destination_warehouse = "CD Recife".to_string();

        let shipment = api.create_shipment(&draft.validate().unwrap()).await.unwrap();
        assert_eq!(shipment.id, 1005);
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(shipment.tracking_number.as_deref(), Some("MLSHIP001005"));
        assert_eq!(shipment.items[0].product_title, "Smartphone Galaxy A54");

        let pending = api.list_shipments(Some(ShipmentStatus::Pending)).await.unwrap();
        assert_eq!(pending.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1003, 1005]);
    }

    #[tokio::test]
    async fn test_failure_injection_keeps_state() {
        let api = FixtureInventoryApi::sample(now());
        api.fail_with(Some(ApiError::Network("offline".to_string())));
        assert_eq!(
            api.list_products().await,
            Err(ApiError::Network("offline".to_string()))
        );
        api.fail_with(None);
        assert_eq!(api.list_products().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_alert_settings_roundtrip_and_notifications() {
        let api = FixtureInventoryApi::new(now());
        let mut dto = api.get_alert_settings().await.unwrap();
        assert_eq!(dto.global, AlertSettings::default());
        dto.global.threshold = 9;
        api.save_alert_settings(&dto).await.unwrap();
        assert_eq!(api.get_alert_settings().await.unwrap().global.threshold, 9);

        let sample = FixtureInventoryApi::sample(now());
        assert_eq!(unread_count(&sample.list_notifications().await.unwrap()), 3);
    }
}
