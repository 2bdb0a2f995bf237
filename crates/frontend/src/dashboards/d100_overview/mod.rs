//! Главная страница: карточки, последние операции, продажи по дням.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{BarChart, BarPoint, PageHeader, StatCard, StatCardTone};
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_day_month, format_relative, now};
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_thousands};
use contracts::domain::a003_sale::Sale;
use contracts::domain::a005_activity::{Activity, ActivityFilter, ActivityQuery};
use contracts::domain::a006_alert_settings::AlertSettingsDto;
use contracts::enums::SyncKind;
use contracts::shared::data_access::ApiError;
use contracts::shared::feedback::Feedback;
use contracts::shared::summary::{dashboard_stats, sales_totals, DashboardStats};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

/// Глубина выборки продаж: покрывает текущий месяц целиком
const SALES_DAYS: u32 = 31;
/// Сколько последних дней показывать на графике
const CHART_DAYS: usize = 7;

const RECENT_ACTIVITY: ActivityQuery = ActivityQuery {
    days: 7,
    limit: Some(5),
    filter: ActivityFilter::All,
};

#[component]
#[allow(non_snake_case)]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let sales = RwSignal::new(Vec::<Sale>::new());
    let alerts = RwSignal::new(AlertSettingsDto::default());
    let activities = RwSignal::new(Vec::<Activity>::new());
    let stats = RwSignal::new(None::<DashboardStats>);
    let loading = RwSignal::new(false);
    let syncing = RwSignal::new(None::<SyncKind>);
    let feedback = RwSignal::new(None::<Feedback>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            let api = data_source();

            match api.get_alert_settings().await {
                Ok(dto) => alerts.set(dto),
                Err(e) => log::warn!("Alert settings unavailable, using defaults: {}", e),
            }

            let loaded = async {
                let list = api.list_products().await?;
                let recent_sales = api.list_sales(SALES_DAYS).await?;
                let recent = api.list_activities(&RECENT_ACTIVITY).await?;
                Ok::<_, ApiError>((list, recent_sales, recent))
            }
            .await;

            match loaded {
                Ok((list, recent_sales, recent)) => {
                    let computed = alerts.with_untracked(|dto| {
                        dashboard_stats(&list, &recent_sales, &dto.products, &dto.global, now())
                    });
                    stats.set(Some(computed));
                    sales.set(recent_sales);
                    activities.set(recent);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load dashboard: {}", e);
                    show_feedback(feedback, Feedback::load_failed("данные дашборда", &e));
                }
            }
            loading.set(false);
        });
    };

    let sync = move |kind: SyncKind| {
        syncing.set(Some(kind));
        spawn_local(async move {
            match data_source().trigger_sync(kind).await {
                Ok(result) => {
                    show_feedback(feedback, Feedback::success(result.message()));
                    load();
                }
                Err(e) => {
                    log::error!("{} sync failed: {}", kind, e);
                    show_feedback(feedback, Feedback::submit_failed(&e));
                }
            }
            syncing.set(None);
        });
    };

    let chart_points = Signal::derive(move || {
        let totals = sales.with(|items| sales_totals(items));
        let skip = totals.daily.len().saturating_sub(CHART_DAYS);
        totals
            .daily
            .into_iter()
            .skip(skip)
            .map(|day| BarPoint {
                label: format_day_month(day.date),
                value: day.quantity as f64,
                tooltip: format!("{} шт., {}", day.quantity, format_money(day.revenue)),
            })
            .collect::<Vec<_>>()
    });

    let low_tone = Signal::derive(move || match stats.get() {
        Some(s) if s.low_stock_alerts > 0 => StatCardTone::Warning,
        _ => StatCardTone::Neutral,
    });

    load();

    view! {
        <div class="page dashboard">
            <PageHeader title="Дашборд" subtitle="Склад фулфилмента" loading=loading>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| sync(SyncKind::Products)
                    disabled=Signal::derive(move || syncing.get().is_some())
                >
                    {icon("refresh")}
                    {move || if syncing.get() == Some(SyncKind::Products) { "Синхронизация..." } else { "Синхронизировать товары" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| sync(SyncKind::Stock)
                    disabled=Signal::derive(move || syncing.get().is_some())
                >
                    {icon("refresh")}
                    {move || if syncing.get() == Some(SyncKind::Stock) { "Синхронизация..." } else { "Обновить остатки" }}
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <div class="stat-grid">
                <StatCard
                    label="Товаров"
                    icon_name="products"
                    value=Signal::derive(move || stats.get().map(|s| format_thousands(s.product_count as i64)))
                />
                <StatCard
                    label="Доступно на складе"
                    icon_name="inventory"
                    value=Signal::derive(move || stats.get().map(|s| format_thousands(s.available_stock)))
                    subtitle=Signal::derive(|| Some("единиц".to_string()))
                />
                <StatCard
                    label="Продажи за месяц"
                    icon_name="sales"
                    value=Signal::derive(move || stats.get().map(|s| format_thousands(s.monthly_sales)))
                    subtitle=Signal::derive(|| Some("единиц с начала месяца".to_string()))
                />
                <StatCard
                    label="Низкий остаток"
                    icon_name="alert"
                    value=Signal::derive(move || stats.get().map(|s| s.low_stock_alerts.to_string()))
                    tone=low_tone
                />
            </div>

            <div class="dashboard__columns">
                <section class="page__section">
                    <h3 class="page__section-title">"Продажи за неделю"</h3>
                    <BarChart points=chart_points empty_text="Продаж пока нет" />
                </section>

                <section class="page__section">
                    <div class="page__section-header">
                        <h3 class="page__section-title">"Последние операции"</h3>
                        <button class="link-button" on:click=move |_| ctx.open_page("a005_activity")>
                            "Вся история"
                            {icon("chevron-right")}
                        </button>
                    </div>
                    {move || {
                        let recent = activities.get();
                        if recent.is_empty() {
                            return view! { <p class="text-muted">"Операций за неделю нет"</p> }.into_any();
                        }
                        view! {
                            <ul class="activity-feed">
                                {recent.into_iter().map(|a| view! {
                                    <li class="activity-feed__item">
                                        <span class="activity-feed__kind">{a.kind.display_name()}</span>
                                        <span class="activity-feed__text">{a.description.clone()}</span>
                                        <span class="activity-feed__time">{format_relative(a.timestamp)}</span>
                                    </li>
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }}
                </section>
            </div>

            {move || {
                let low = stats.get().map(|s| s.low_stock_alerts).unwrap_or(0);
                (low > 0).then(|| view! {
                    <div class="alert alert-warning">
                        {icon("alert")}
                        <span class="alert__text">{format!("Товаров с низким остатком: {}", low)}</span>
                        <button class="link-button" on:click=move |_| ctx.open_page("a001_product_stock")>
                            "Открыть остатки"
                        </button>
                    </div>
                })
            }}
        </div>
    }
}
