use contracts::domain::a004_shipment::ShipmentStatus;
use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

fn status_color(status: ShipmentStatus) -> BadgeColor {
    match status {
        ShipmentStatus::Draft => BadgeColor::Subtle,
        ShipmentStatus::Pending => BadgeColor::Warning,
        ShipmentStatus::InTransit => BadgeColor::Informative,
        ShipmentStatus::Delivered => BadgeColor::Success,
        ShipmentStatus::Cancelled => BadgeColor::Danger,
    }
}

#[component]
pub fn ShipmentStatusBadge(status: ShipmentStatus) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
            {status.display_name()}
        </Badge>
    }
}

/// Отметка остатка: "Нет в наличии" при нуле, "Мало" при низком остатке
#[component]
pub fn LowStockBadge(available: i64, low: bool) -> impl IntoView {
    if available <= 0 {
        view! {
            <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>"Нет в наличии"</Badge>
        }
        .into_any()
    } else if low {
        view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>"Мало"</Badge>
        }
        .into_any()
    } else {
        view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"В наличии"</Badge>
        }
        .into_any()
    }
}
