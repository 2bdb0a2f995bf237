use crate::domain::a001_product::{Product, ProductId};
use crate::domain::a006_alert_settings::{AlertOverrides, AlertSettings};
use crate::domain::common::timestamp::serde_timestamp;
use crate::shared::alert_thresholds::low_stock_entries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Уведомление в панели оповещений
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(with = "serde_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(flatten)]
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    LowStock {
        product_id: ProductId,
        product_title: String,
    },
    StockChange {
        product_id: ProductId,
        product_title: String,
    },
    System,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::LowStock { .. } => "⚠️",
            NotificationKind::StockChange { .. } => "📦",
            NotificationKind::System => "🔔",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::LowStock { .. } => "notification-low-stock",
            NotificationKind::StockChange { .. } => "notification-stock-change",
            NotificationKind::System => "notification-system",
        }
    }
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

pub fn mark_read(notifications: &[Notification], id: i64) -> Vec<Notification> {
    notifications
        .iter()
        .cloned()
        .map(|mut n| {
            if n.id == id {
                n.read = true;
            }
            n
        })
        .collect()
}

pub fn mark_all_read(notifications: &[Notification]) -> Vec<Notification> {
    notifications
        .iter()
        .cloned()
        .map(|mut n| {
            n.read = true;
            n
        })
        .collect()
}

/// «только что», «12 мин назад», «3 ч назад», «2 дн. назад»
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    if minutes < 1 {
        "только что".to_string()
    } else if minutes < 60 {
        format!("{} мин назад", minutes)
    } else if minutes < 60 * 24 {
        format!("{} ч назад", minutes / 60)
    } else {
        format!("{} дн. назад", minutes / (60 * 24))
    }
}

/// Уведомления о низком остатке по текущему снимку товаров.
///
/// Ничего не создаётся при выключенных глобальных оповещениях или выключенном
/// показе в панели; товар с собственной выключенной настройкой пропускается.
pub fn low_stock_notifications(
    products: &[Product],
    overrides: &AlertOverrides,
    global: &AlertSettings,
    now: DateTime<Utc>,
    first_id: i64,
) -> Vec<Notification> {
    if !global.enabled || !global.notification_dashboard {
        return Vec::new();
    }
    low_stock_entries(products, overrides, global)
        .into_iter()
        .filter(|entry| {
            overrides
                .get(&entry.item.id)
                .map_or(true, |o| o.enabled && o.notification_dashboard)
        })
        .zip(first_id..)
        .map(|(entry, id)| {
            let product = entry.item;
            let (title, message) = if product.stock.available <= 0 {
                (
                    "Критический остаток".to_string(),
                    format!("{}: остаток исчерпан!", product.title),
                )
            } else {
                (
                    "Низкий остаток".to_string(),
                    format!(
                        "{}: доступно всего {} шт. (порог {}).",
                        product.title, product.stock.available, entry.threshold
                    ),
                )
            };
            Notification {
                id,
                title,
                message,
                timestamp: now,
                read: false,
                kind: NotificationKind::LowStock {
                    product_id: product.id,
                    product_title: product.title.clone(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::StockSummary;
    use crate::domain::a006_alert_settings::AlertField;
    use crate::shared::alert_thresholds::set_override;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn product(id: i64, title: &str, available: i64) -> Product {
        Product {
            id: ProductId(id),
            sku: format!("SKU-{}", id),
            ml_item_id: format!("MLB{}", id),
            ml_inventory_id: None,
            title: title.to_string(),
            created_at: now(),
            stock: StockSummary { total: available, available, not_available: 0, last_updated: None },
        }
    }

    fn notification(id: i64, read: bool) -> Notification {
        Notification {
            id,
            title: "Синхронизация".to_string(),
            message: "Готово".to_string(),
            timestamp: now(),
            read,
            kind: NotificationKind::System,
        }
    }

    #[test]
    fn test_unread_and_mark_read() {
        let list = vec![notification(1, false), notification(2, true), notification(3, false)];
        assert_eq!(unread_count(&list), 2);
        let list2 = mark_read(&list, 3);
        assert_eq!(unread_count(&list2), 1);
        assert!(!list2[0].read);
        assert_eq!(unread_count(&list), 2);
        assert_eq!(unread_count(&mark_all_read(&list2)), 0);
    }

    #[test]
    fn test_relative_time() {
        let now = now();
        assert_eq!(relative_time(now, now), "только что");
        assert_eq!(relative_time(now - Duration::minutes(30), now), "30 мин назад");
        assert_eq!(relative_time(now - Duration::minutes(150), now), "2 ч назад");
        assert_eq!(relative_time(now - Duration::days(3), now), "3 дн. назад");
        // время из будущего не даёт отрицательных значений
        assert_eq!(relative_time(now + Duration::minutes(5), now), "только что");
    }

    #[test]
    fn test_low_stock_notifications() {
        let products = vec![product(1, "Galaxy", 2), product(2, "Notebook", 15), product(5, "Canon", 0)];
        let global = AlertSettings::default();
        let out = low_stock_notifications(&products, &AlertOverrides::new(), &global, now(), 100);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 100);
        assert_eq!(out[0].title, "Низкий остаток");
        assert!(out[0].message.contains("порог 5"));
        assert_eq!(out[1].id, 101);
        assert_eq!(out[1].title, "Критический остаток");
        assert!(matches!(out[1].kind, NotificationKind::LowStock { product_id: ProductId(5), .. }));
    }

    #[test]
    fn test_low_stock_notifications_respect_switches() {
        let products = vec![product(1, "Galaxy", 2), product(5, "Canon", 0)];
        let mut global = AlertSettings::default();
        let overrides = set_override(&AlertOverrides::new(), ProductId(1), AlertField::Enabled(false), &global);
        let out = low_stock_notifications(&products, &overrides, &global, now(), 1);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);

        global.enabled = false;
        assert!(low_stock_notifications(&products, &AlertOverrides::new(), &global, now(), 1).is_empty());
    }

    #[test]
    fn test_dashboard_switches() {
        let products = vec![product(1, "Galaxy", 2), product(5, "Canon", 0)];
        let mut global = AlertSettings::default();

        // Выключенный показ у товара убирает только его уведомление
        let hidden = set_override(
            &AlertOverrides::new(),
            ProductId(5),
            AlertField::NotificationDashboard(false),
            &global,
        );
        let out = low_stock_notifications(&products, &hidden, &global, now(), 1);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0].kind, NotificationKind::LowStock { product_id: ProductId(1), .. }));

        // Глобальный выключатель сильнее настройки товара
        global.notification_dashboard = false;
        let shown = set_override(
            &AlertOverrides::new(),
            ProductId(1),
            AlertField::NotificationDashboard(true),
            &global,
        );
        assert!(low_stock_notifications(&products, &shown, &global, now(), 1).is_empty());
        assert!(low_stock_notifications(&products, &AlertOverrides::new(), &global, now(), 1).is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let json = r#"{"id": 1, "type": "low_stock", "title": "t", "message": "m",
            "timestamp": "2024-03-15T11:30:00", "read": false, "product_id": 1, "product_title": "Galaxy"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(relative_time(n.timestamp, now()), "30 мин назад");
        assert_eq!(n.kind.icon(), "⚠️");
    }
}
