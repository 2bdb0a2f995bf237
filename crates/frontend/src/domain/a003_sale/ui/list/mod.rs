use crate::shared::components::{BarChart, BarPoint, PageHeader, StatCard};
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_datetime, format_day_month};
use crate::shared::export::export_to_excel;
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::list_utils::{empty_row, highlight_matches, sortable_header, SearchInput};
use crate::shared::number_format::{format_money, format_money_opt, format_thousands};
use contracts::domain::a003_sale::{Sale, SaleSortField, SALES_PAGE};
use contracts::enums::ReportPeriod;
use contracts::shared::feedback::Feedback;
use contracts::shared::summary::sales_totals;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Button, ButtonAppearance, Select, Table, TableBody, TableCell, TableHeader, TableHeaderCell,
    TableRow,
};

#[component]
#[allow(non_snake_case)]
pub fn SalesHistory() -> impl IntoView {
    let sales = RwSignal::new(Vec::<Sale>::new());
    let loading = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(SALES_PAGE.initial_sort);
    let period_code = RwSignal::new(ReportPeriod::default().code().to_string());

    let period =
        Signal::derive(move || ReportPeriod::from_code(&period_code.get()).unwrap_or_default());

    // Перезагрузка при смене периода (и первая загрузка)
    Effect::new(move |_| {
        let days = period.get().days();
        loading.set(true);
        spawn_local(async move {
            match data_source().list_sales(days).await {
                Ok(list) => {
                    sales.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load sales for {} days: {}", days, e);
                    show_feedback(feedback, Feedback::load_failed("историю продаж", &e));
                }
            }
            loading.set(false);
        });
    });

    let visible = Signal::derive(move || {
        sales.with(|items| SALES_PAGE.project(items, &search.get(), sort.get()))
    });
    let totals = Signal::derive(move || sales.with(|items| sales_totals(items)));

    let chart_points = Signal::derive(move || {
        totals.with(|t| {
            t.daily
                .iter()
                .map(|day| BarPoint {
                    label: format_day_month(day.date),
                    value: day.quantity as f64,
                    tooltip: format!("{} шт., {}", day.quantity, format_money(day.revenue)),
                })
                .collect::<Vec<_>>()
        })
    });

    let export = move |_| {
        if let Err(e) = export_to_excel(&visible.get_untracked(), "продажи") {
            show_feedback(feedback, Feedback::export_failed(e));
        }
    };

    let policy = SALES_PAGE.new_field_direction;

    view! {
        <div class="page">
            <PageHeader title="История продаж" loading=loading>
                <Select value=period_code>
                    {ReportPeriod::all().into_iter().map(|p| view! {
                        <option value=p.code()>{p.display_name()}</option>
                    }).collect_view()}
                </Select>
                <SearchInput value=search placeholder="Товар или номер заказа" />
                <Button appearance=ButtonAppearance::Secondary on_click=export>
                    {icon("download")}
                    "Экспорт"
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <div class="stat-grid">
                <StatCard
                    label="Продано единиц"
                    icon_name="sales"
                    value=Signal::derive(move || Some(format_thousands(totals.with(|t| t.total_quantity))))
                />
                <StatCard
                    label="Выручка"
                    icon_name="sales"
                    value=Signal::derive(move || Some(format_money(totals.with(|t| t.total_revenue))))
                />
                <StatCard
                    label="Заказов"
                    icon_name="history"
                    value=Signal::derive(move || Some(format_thousands(totals.with(|t| t.order_count as i64))))
                />
            </div>

            <section class="page__section">
                <h3 class="page__section-title">"Продажи по дням"</h3>
                <BarChart points=chart_points empty_text="Нет продаж за выбранный период" />
            </section>

            <section class="page__section">
                <h3 class="page__section-title">"По товарам"</h3>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Товар"</TableHeaderCell>
                            <TableHeaderCell>"Заказов"</TableHeaderCell>
                            <TableHeaderCell>"Продано"</TableHeaderCell>
                            <TableHeaderCell>"Выручка"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let rollup = totals.with(|t| t.by_product.clone());
                            if rollup.is_empty() {
                                return empty_row(4, "Нет продаж");
                            }
                            rollup.into_iter().map(|row| view! {
                                <TableRow>
                                    <TableCell>{row.product_title}</TableCell>
                                    <TableCell class="table__cell--number">{row.orders}</TableCell>
                                    <TableCell class="table__cell--number">{format_thousands(row.quantity)}</TableCell>
                                    <TableCell class="table__cell--number">{format_money(row.revenue)}</TableCell>
                                </TableRow>
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </section>

            <section class="page__section">
                <h3 class="page__section-title">"Продажи"</h3>
                <Table>
                    <TableHeader>
                        <TableRow>
                            {sortable_header("Дата", SaleSortField::SaleTimestamp, sort, policy)}
                            {sortable_header("Заказ", SaleSortField::OrderId, sort, policy)}
                            {sortable_header("Товар", SaleSortField::ProductTitle, sort, policy)}
                            {sortable_header("Количество", SaleSortField::QuantitySold, sort, policy)}
                            {sortable_header("Цена", SaleSortField::Price, sort, policy)}
                            <TableHeaderCell>"Сумма"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let rows = visible.get();
                            if rows.is_empty() {
                                return empty_row(6, "Продажи не найдены");
                            }
                            let filter = search.get();
                            rows.into_iter().map(|s| {
                                let sale_timestamp = format_datetime(&s.sale_timestamp);
                                let ml_order_id = highlight_matches(&s.ml_order_id, &filter);
                                let product_title = highlight_matches(&s.product_title, &filter);
                                let quantity_sold = s.quantity_sold;
                                let price = format_money_opt(s.price);
                                let revenue = format_money(s.revenue());
                                view! {
                                    <TableRow>
                                        <TableCell>{sale_timestamp}</TableCell>
                                        <TableCell>{ml_order_id}</TableCell>
                                        <TableCell>{product_title}</TableCell>
                                        <TableCell class="table__cell--number">{quantity_sold}</TableCell>
                                        <TableCell class="table__cell--number">{price}</TableCell>
                                        <TableCell class="table__cell--number">{revenue}</TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </section>
        </div>
    }
}
