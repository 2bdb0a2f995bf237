//! Определение низкого остатка с учётом настроек по товарам.
//!
//! Все функции чистые и тотальные: входные настройки не изменяются,
//! новые версии возвращаются значением.

use crate::domain::a001_product::{Product, ProductId};
use crate::domain::a006_alert_settings::{AlertField, AlertOverride, AlertOverrides, AlertSettings};

/// Сущность, у которой есть доступный остаток
pub trait StockLevel {
    fn stock_key(&self) -> ProductId;
    fn available_quantity(&self) -> i64;
}

impl StockLevel for Product {
    fn stock_key(&self) -> ProductId {
        self.id
    }

    fn available_quantity(&self) -> i64 {
        self.stock.available
    }
}

/// Откуда взят действующий порог
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSource {
    Global(i64),
    Override(i64),
}

impl ThresholdSource {
    pub fn value(&self) -> i64 {
        match self {
            ThresholdSource::Global(v) | ThresholdSource::Override(v) => *v,
        }
    }
}

pub fn threshold_source(
    id: ProductId,
    overrides: &AlertOverrides,
    global: &AlertSettings,
) -> ThresholdSource {
    match overrides.get(&id).and_then(|o| o.threshold) {
        Some(threshold) => ThresholdSource::Override(threshold),
        None => ThresholdSource::Global(global.threshold),
    }
}

/// Порог товара: заданный в настройке товара, иначе глобальный
pub fn resolve_threshold(id: ProductId, overrides: &AlertOverrides, global: &AlertSettings) -> i64 {
    threshold_source(id, overrides, global).value()
}

pub fn is_low_stock<T: StockLevel>(item: &T, overrides: &AlertOverrides, global: &AlertSettings) -> bool {
    item.available_quantity() <= resolve_threshold(item.stock_key(), overrides, global)
}

/// Товары с низким остатком в исходном порядке
pub fn classify_all<'a, T: StockLevel>(
    items: &'a [T],
    overrides: &AlertOverrides,
    global: &AlertSettings,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| is_low_stock(*item, overrides, global))
        .collect()
}

/// Товар с низким остатком и порог, по которому он отобран
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowStockEntry<'a, T> {
    pub item: &'a T,
    pub threshold: i64,
}

impl<T: StockLevel> LowStockEntry<'_, T> {
    /// Сколько не хватает до порога (0, если остаток равен порогу)
    pub fn shortfall(&self) -> i64 {
        (self.threshold - self.item.available_quantity()).max(0)
    }
}

pub fn low_stock_entries<'a, T: StockLevel>(
    items: &'a [T],
    overrides: &AlertOverrides,
    global: &AlertSettings,
) -> Vec<LowStockEntry<'a, T>> {
    items
        .iter()
        .filter_map(|item| {
            let threshold = resolve_threshold(item.stock_key(), overrides, global);
            (item.available_quantity() <= threshold).then_some(LowStockEntry { item, threshold })
        })
        .collect()
}

/// Изменить поле настройки товара.
///
/// Если настройки ещё нет, она создаётся копией глобальной и затем меняется.
pub fn set_override(
    overrides: &AlertOverrides,
    id: ProductId,
    field: AlertField,
    global: &AlertSettings,
) -> AlertOverrides {
    let mut next = overrides.clone();
    next.entry(id)
        .or_insert_with(|| AlertOverride::from(global))
        .apply(field);
    next
}

/// Сбросить настройку товара к глобальной
pub fn clear_override(overrides: &AlertOverrides, id: ProductId) -> AlertOverrides {
    let mut next = overrides.clone();
    next.remove(&id);
    next
}

pub fn has_override(overrides: &AlertOverrides, id: ProductId) -> bool {
    overrides.contains_key(&id)
}

/// Подпись порога для таблицы настроек: «глобальный (5)» или «3»
pub fn effective_threshold_label(
    id: ProductId,
    overrides: &AlertOverrides,
    global: &AlertSettings,
) -> String {
    match threshold_source(id, overrides, global) {
        ThresholdSource::Global(v) => format!("глобальный ({})", v),
        ThresholdSource::Override(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        title: &'static str,
        available: i64,
    }

    impl StockLevel for Item {
        fn stock_key(&self) -> ProductId {
            ProductId(self.id)
        }
        fn available_quantity(&self) -> i64 {
            self.available
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, title: "A", available: 2 },
            Item { id: 2, title: "B", available: 10 },
        ]
    }

    fn ids(found: &[&Item]) -> Vec<i64> {
        found.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_global_threshold_flags_entity_at_or_below() {
        let items = items();
        let global = AlertSettings::default();
        let low = classify_all(&items, &AlertOverrides::new(), &global);
        assert_eq!(ids(&low), vec![1]);
        assert_eq!(low[0].title, "A");
    }

    #[test]
    fn test_override_takes_precedence() {
        let items = items();
        let global = AlertSettings::default();
        let overrides = set_override(&AlertOverrides::new(), ProductId(1), AlertField::Threshold(Some(1)), &global);
        assert!(classify_all(&items, &overrides, &global).is_empty());
    }

    #[test]
    fn test_override_with_undefined_threshold_falls_through() {
        let global = AlertSettings::default();
        let overrides = set_override(&AlertOverrides::new(), ProductId(1), AlertField::Threshold(None), &global);
        assert!(has_override(&overrides, ProductId(1)));
        assert_eq!(resolve_threshold(ProductId(1), &overrides, &global), 5);
        assert_eq!(threshold_source(ProductId(1), &overrides, &global), ThresholdSource::Global(5));
    }

    #[test]
    fn test_zero_override_is_respected() {
        let global = AlertSettings::default();
        let overrides = set_override(&AlertOverrides::new(), ProductId(2), AlertField::Threshold(Some(0)), &global);
        assert_eq!(resolve_threshold(ProductId(2), &overrides, &global), 0);
        let item = Item { id: 2, title: "B", available: 0 };
        assert!(is_low_stock(&item, &overrides, &global));
        let item = Item { id: 2, title: "B", available: 1 };
        assert!(!is_low_stock(&item, &overrides, &global));
    }

    #[test]
    fn test_set_override_seeds_from_global_and_keeps_input() {
        let mut global = AlertSettings::default();
        global.notification_email = "ops@example.com".to_string();
        let before = AlertOverrides::new();
        let after = set_override(&before, ProductId(3), AlertField::NotificationDashboard(false), &global);

        assert!(before.is_empty());
        let seeded = &after[&ProductId(3)];
        assert_eq!(seeded.threshold, Some(5));
        assert_eq!(seeded.notification_email, "ops@example.com");
        assert!(!seeded.notification_dashboard);
        assert!(seeded.enabled);
    }

    #[test]
    fn test_set_override_updates_existing_entry_only() {
        let global = AlertSettings::default();
        let first = set_override(&AlertOverrides::new(), ProductId(3), AlertField::Threshold(Some(8)), &global);
        let second = set_override(&first, ProductId(3), AlertField::Enabled(false), &global);
        assert_eq!(second[&ProductId(3)].threshold, Some(8));
        assert!(!second[&ProductId(3)].enabled);
        assert!(first[&ProductId(3)].enabled);
    }

    #[test]
    fn test_clear_is_left_inverse_of_set_on_absent_entity() {
        let global = AlertSettings::default();
        let base = set_override(&AlertOverrides::new(), ProductId(1), AlertField::Threshold(Some(2)), &global);
        for field in [
            AlertField::Threshold(Some(9)),
            AlertField::Threshold(None),
            AlertField::Enabled(false),
            AlertField::NotificationEmail("x@y.z".to_string()),
        ] {
            let restored = clear_override(&set_override(&base, ProductId(4), field, &global), ProductId(4));
            assert_eq!(restored, base);
        }
    }

    #[test]
    fn test_classification_is_order_preserving_and_global_sensitive() {
        let items = vec![
            Item { id: 5, title: "E", available: 3 },
            Item { id: 1, title: "A", available: 1 },
            Item { id: 3, title: "C", available: 7 },
        ];
        let mut global = AlertSettings::default();
        let overrides = AlertOverrides::new();
        assert_eq!(ids(&classify_all(&items, &overrides, &global)), vec![5, 1]);
        global.threshold = 0;
        assert!(classify_all(&items, &overrides, &global).is_empty());
        global.threshold = 7;
        assert_eq!(ids(&classify_all(&items, &overrides, &global)), vec![5, 1, 3]);
    }

    #[test]
    fn test_low_stock_entries_carry_threshold() {
        let items = items();
        let global = AlertSettings::default();
        let overrides = set_override(&AlertOverrides::new(), ProductId(2), AlertField::Threshold(Some(12)), &global);
        let entries = low_stock_entries(&items, &overrides, &global);
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].item.id, entries[0].threshold, entries[0].shortfall()), (1, 5, 3));
        assert_eq!((entries[1].item.id, entries[1].threshold, entries[1].shortfall()), (2, 12, 2));
    }

    #[test]
    fn test_threshold_label() {
        let global = AlertSettings::default();
        let overrides = set_override(&AlertOverrides::new(), ProductId(1), AlertField::Threshold(Some(3)), &global);
        assert_eq!(effective_threshold_label(ProductId(1), &overrides, &global), "3");
        assert_eq!(effective_threshold_label(ProductId(2), &overrides, &global), "глобальный (5)");
    }
}
