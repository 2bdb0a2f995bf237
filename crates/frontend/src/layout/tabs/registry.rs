//! Tab content registry - маппинг tab.key → View

use crate::dashboards::d100_overview::OverviewDashboard;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a001_product::ui::stock::StockList;
use crate::domain::a002_stock_adjustment::ui::form::StockAdjustmentPage;
use crate::domain::a003_sale::ui::list::SalesHistory;
use crate::domain::a004_shipment::ui::list::ShipmentList;
use crate::domain::a004_shipment::ui::planning::ShipmentPlanning;
use crate::domain::a005_activity::ui::list::ActivityHistory;
use crate::domain::a006_alert_settings::ui::settings::AlertSettingsPage;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу; для неизвестных ключей показывает заглушку
pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        "d100_dashboard" => view! { <OverviewDashboard /> }.into_any(),
        "a001_product" => view! { <ProductList /> }.into_any(),
        "a001_product_stock" => view! { <StockList /> }.into_any(),
        "a002_stock_adjustment" => view! { <StockAdjustmentPage /> }.into_any(),
        "a003_sale" => view! { <SalesHistory /> }.into_any(),
        "a004_shipment" => view! { <ShipmentList /> }.into_any(),
        "a004_shipment_planning" => view! { <ShipmentPlanning /> }.into_any(),
        "a005_activity" => view! { <ActivityHistory /> }.into_any(),
        "a006_alert_settings" => view! { <AlertSettingsPage /> }.into_any(),
        _ => {
            log::warn!("Unknown tab key: {}", key);
            let text = format!("Страница «{}» не найдена", key);
            view! { <div class="page page--placeholder">{text}</div> }.into_any()
        }
    }
}
