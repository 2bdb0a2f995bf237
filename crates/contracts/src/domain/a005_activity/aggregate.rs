use crate::domain::a001_product::ProductId;
use crate::domain::common::timestamp::serde_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Запись истории действий.
///
/// На проводе тег варианта лежит в поле `type`, поля варианта рядом с общими.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Составной ключ бэкенда: `sale_12`, `adjustment_3`, `stock_7`
    pub id: String,
    pub description: String,
    #[serde(with = "serde_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    Sale {
        product_id: ProductId,
        product_title: String,
        quantity: i64,
        /// Номер заказа маркетплейса
        reference_id: String,
    },
    Adjustment {
        product_id: ProductId,
        product_title: String,
        /// Со знаком: списания отрицательные
        quantity: i64,
        reason: String,
    },
    StockChange {
        product_id: ProductId,
        product_title: String,
        available: i64,
        total: i64,
    },
    Sync,
}

impl ActivityKind {
    pub fn filter(&self) -> ActivityFilter {
        match self {
            ActivityKind::Sale { .. } => ActivityFilter::Sale,
            ActivityKind::Adjustment { .. } => ActivityFilter::Adjustment,
            ActivityKind::StockChange { .. } => ActivityFilter::StockChange,
            ActivityKind::Sync => ActivityFilter::Sync,
        }
    }

    pub fn product_title(&self) -> Option<&str> {
        match self {
            ActivityKind::Sale { product_title, .. }
            | ActivityKind::Adjustment { product_title, .. }
            | ActivityKind::StockChange { product_title, .. } => Some(product_title),
            ActivityKind::Sync => None,
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            ActivityKind::Sale { product_id, .. }
            | ActivityKind::Adjustment { product_id, .. }
            | ActivityKind::StockChange { product_id, .. } => Some(*product_id),
            ActivityKind::Sync => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.filter().display_name()
    }
}

/// Фильтр по типу действия (параметр `type` запроса)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFilter {
    #[default]
    All,
    Sale,
    Adjustment,
    Sync,
    StockChange,
}

impl ActivityFilter {
    pub fn code(&self) -> &'static str {
        match self {
            ActivityFilter::All => "all",
            ActivityFilter::Sale => "sale",
            ActivityFilter::Adjustment => "adjustment",
            ActivityFilter::Sync => "sync",
            ActivityFilter::StockChange => "stock_change",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityFilter::All => "Все",
            ActivityFilter::Sale => "Продажа",
            ActivityFilter::Adjustment => "Корректировка",
            ActivityFilter::Sync => "Синхронизация",
            ActivityFilter::StockChange => "Изменение остатков",
        }
    }

    pub fn all() -> Vec<ActivityFilter> {
        vec![
            ActivityFilter::All,
            ActivityFilter::Sale,
            ActivityFilter::Adjustment,
            ActivityFilter::Sync,
            ActivityFilter::StockChange,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.code() == code)
    }

    pub fn accepts(&self, activity: &Activity) -> bool {
        *self == ActivityFilter::All || *self == activity.kind.filter()
    }
}

/// Параметры запроса GET /api/activities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityQuery {
    pub days: u32,
    pub limit: Option<usize>,
    pub filter: ActivityFilter,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            days: 7,
            limit: None,
            filter: ActivityFilter::All,
        }
    }
}

/// Количество действий по типам (блок итогов на странице истории)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityCounts {
    pub sales: usize,
    pub adjustments: usize,
    pub syncs: usize,
    pub stock_changes: usize,
}

impl ActivityCounts {
    pub fn from_activities(activities: &[Activity]) -> Self {
        activities
            .iter()
            .fold(ActivityCounts::default(), |mut acc, a| {
                match a.kind {
                    ActivityKind::Sale { .. } => acc.sales += 1,
                    ActivityKind::Adjustment { .. } => acc.adjustments += 1,
                    ActivityKind::Sync => acc.syncs += 1,
                    ActivityKind::StockChange { .. } => acc.stock_changes += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flattened_variants() {
        let json = r#"[
            {"id": "sale_1", "type": "sale", "description": "Продажа", "timestamp": "2024-03-15T10:00:00",
             "product_id": 1, "product_title": "TV", "quantity": 2, "reference_id": "ML123"},
            {"id": "sync_1", "type": "sync", "description": "Синхронизация", "timestamp": "2024-03-14T10:00:00"},
            {"id": "stock_4", "type": "stock_change", "description": "Остатки", "timestamp": "2024-03-13T10:00:00",
             "product_id": 3, "product_title": "Fone", "available": 12, "total": 60}
        ]"#;
        let activities: Vec<Activity> = serde_json::from_str(json).unwrap();
        assert_eq!(activities.len(), 3);
        assert!(matches!(
            &activities[0].kind,
            ActivityKind::Sale { quantity: 2, reference_id, .. } if reference_id == "ML123"
        ));
        assert_eq!(activities[1].kind, ActivityKind::Sync);
        assert_eq!(activities[2].kind.product_id(), Some(ProductId(3)));

        let counts = ActivityCounts::from_activities(&activities);
        assert_eq!((counts.sales, counts.syncs, counts.stock_changes, counts.adjustments), (1, 1, 1, 0));
    }

    #[test]
    fn test_serialize_puts_tag_in_type_field() {
        let json = serde_json::to_value(&ActivityKind::Sync).unwrap();
        assert_eq!(json, serde_json::json!({"type": "sync"}));
    }

    #[test]
    fn test_filter_accepts() {
        let activity = Activity {
            id: "adjustment_1".to_string(),
            description: "Корректировка".to_string(),
            timestamp: Utc::now(),
            kind: ActivityKind::Adjustment {
                product_id: ProductId(1),
                product_title: "TV".to_string(),
                quantity: -2,
                reason: "брак".to_string(),
            },
        };
        assert!(ActivityFilter::All.accepts(&activity));
        assert!(ActivityFilter::Adjustment.accepts(&activity));
        assert!(!ActivityFilter::Sale.accepts(&activity));
        assert_eq!(ActivityFilter::from_code("stock_change"), Some(ActivityFilter::StockChange));
    }
}
