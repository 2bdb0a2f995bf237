//! Tab labels - единственный источник правды для заголовков табов.

/// Возвращает читаемый заголовок таба для данного ключа. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> &str {
    match key {
        "d100_dashboard" => "Дашборд",
        "a001_product" => "Товары",
        "a001_product_stock" => "Остатки",
        "a002_stock_adjustment" => "Корректировка остатков",
        "a003_sale" => "История продаж",
        "a004_shipment" => "Отслеживание отправок",
        "a004_shipment_planning" => "Планирование отправки",
        "a005_activity" => "История операций",
        "a006_alert_settings" => "Настройки оповещений",
        _ => key,
    }
}
