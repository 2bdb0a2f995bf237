//! Остатки на складе фулфилмента с отметкой низкого остатка.
//!
//! Отметка считается по тем же порогам, что и оповещения: настройка товара,
//! если она есть, иначе глобальная.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{LowStockBadge, PageHeader};
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_datetime_or_never, today};
use crate::shared::export::download_csv;
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::list_utils::{empty_row, highlight_matches, sortable_header, SearchInput};
use contracts::domain::a001_product::{Product, ProductSortField, STOCK_PAGE};
use contracts::domain::a006_alert_settings::AlertSettingsDto;
use contracts::enums::SyncKind;
use contracts::shared::alert_thresholds::is_low_stock;
use contracts::shared::feedback::Feedback;
use contracts::shared::stock_report::build_stock_report;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Checkbox, Table, TableBody, TableCell, TableHeader,
    TableHeaderCell, TableRow,
};

#[component]
#[allow(non_snake_case)]
pub fn StockList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let products = RwSignal::new(Vec::<Product>::new());
    let alerts = RwSignal::new(AlertSettingsDto::default());
    let loading = RwSignal::new(false);
    let syncing = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(STOCK_PAGE.initial_sort);
    let only_low = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            let api = data_source();
            match api.list_products().await {
                Ok(list) => {
                    products.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load stock: {}", e);
                    show_feedback(feedback, Feedback::load_failed("остатки", &e));
                }
            }
            // Без настроек работаем с порогом по умолчанию
            match api.get_alert_settings().await {
                Ok(dto) => alerts.set(dto),
                Err(e) => log::warn!("Alert settings unavailable, using defaults: {}", e),
            }
            loading.set(false);
        });
    };

    let sync_stock = move |_| {
        syncing.set(true);
        spawn_local(async move {
            match data_source().trigger_sync(SyncKind::Stock).await {
                Ok(result) => {
                    show_feedback(feedback, Feedback::success(result.message()));
                    load();
                }
                Err(e) => {
                    log::error!("Stock sync failed: {}", e);
                    show_feedback(feedback, Feedback::submit_failed(&e));
                }
            }
            syncing.set(false);
        });
    };

    let visible = Signal::derive(move || {
        let rows = products.with(|items| STOCK_PAGE.project(items, &search.get(), sort.get()));
        if !only_low.get() {
            return rows;
        }
        alerts.with(|dto| {
            rows.into_iter()
                .filter(|p| is_low_stock(p, &dto.products, &dto.global))
                .collect()
        })
    });

    let export_report = move |_| {
        let report = products.with_untracked(|items| {
            alerts.with_untracked(|dto| build_stock_report(items, &dto.products, &dto.global))
        });
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                show_feedback(feedback, Feedback::export_failed(e.to_string()));
                return;
            }
        };

        let date = today().format("%d-%m-%Y");
        let mut files = vec![
            (format!("остатки_{}.csv", date), report.stock),
            (format!("остатки_сводка_{}.csv", date), report.summary),
        ];
        if let Some(recommendations) = report.recommendations {
            files.push((format!("остатки_пополнение_{}.csv", date), recommendations));
        }
        for (name, content) in files {
            if let Err(e) = download_csv(&content, &name) {
                show_feedback(feedback, Feedback::export_failed(e));
                return;
            }
        }
    };

    load();

    let policy = STOCK_PAGE.new_field_direction;

    view! {
        <div class="page">
            <PageHeader title="Остатки" subtitle="Склад фулфилмента" loading=loading>
                <SearchInput value=search placeholder="Название или SKU" />
                <Checkbox checked=only_low label="Только низкий остаток" />
                <Button appearance=ButtonAppearance::Primary on_click=sync_stock disabled=syncing>
                    {icon("refresh")}
                    {move || if syncing.get() { "Синхронизация..." } else { "Обновить остатки" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=export_report>
                    {icon("download")}
                    "Отчёт"
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <Table>
                <TableHeader>
                    <TableRow>
                        {sortable_header("Товар", ProductSortField::Title, sort, policy)}
                        {sortable_header("SKU", ProductSortField::Sku, sort, policy)}
                        {sortable_header("Доступно", ProductSortField::StockAvailable, sort, policy)}
                        {sortable_header("Недоступно", ProductSortField::StockNotAvailable, sort, policy)}
                        {sortable_header("Всего", ProductSortField::StockTotal, sort, policy)}
                        {sortable_header("Обновлено", ProductSortField::StockLastUpdated, sort, policy)}
                        <TableHeaderCell>"Статус"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = visible.get();
                        if rows.is_empty() {
                            return empty_row(8, "Нет товаров для отображения");
                        }
                        let filter = search.get();
                        let dto = alerts.get();
                        rows.into_iter().map(|p| {
                            let low = is_low_stock(&p, &dto.products, &dto.global);
                            let id = p.id;
                            let title = highlight_matches(&p.title, &filter);
                            let sku = highlight_matches(&p.sku, &filter);
                            let available = p.stock.available;
                            let not_available = p.stock.not_available;
                            let total = p.stock.total;
                            let last_updated = format_datetime_or_never(p.stock.last_updated.as_ref());
                            view! {
                                <TableRow class:table__row--warning=low>
                                    <TableCell>{title}</TableCell>
                                    <TableCell>{sku}</TableCell>
                                    <TableCell class="table__cell--number">{available}</TableCell>
                                    <TableCell class="table__cell--number">{not_available}</TableCell>
                                    <TableCell class="table__cell--number">{total}</TableCell>
                                    <TableCell>{last_updated}</TableCell>
                                    <TableCell>
                                        <LowStockBadge available=available low=low />
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| ctx.adjust_stock(id)
                                        >
                                            {icon("adjust")}
                                            "Корректировать"
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view().into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
