use crate::shared::icons::icon;
use leptos::prelude::*;

/// Вид карточки: обычная или с предупреждением
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatCardTone {
    #[default]
    Neutral,
    Warning,
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Готовое к показу значение (None = загрузка)
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(into, optional)]
    tone: Signal<StatCardTone>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let card_class = move || match tone.get() {
        StatCardTone::Neutral => "stat-card",
        StatCardTone::Warning => "stat-card stat-card--warning",
    };

    view! {
        <div class=card_class>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "—".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
