use crate::shared::components::{PageHeader, StatCard};
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_datetime, format_relative};
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::list_utils::{empty_row, highlight_matches, sortable_header, SearchInput};
use contracts::domain::a005_activity::{
    Activity, ActivityCounts, ActivityFilter, ActivityKind, ActivityQuery, ActivitySortField,
    ACTIVITY_PAGE,
};
use contracts::enums::ReportPeriod;
use contracts::shared::feedback::Feedback;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Badge, BadgeAppearance, Button, ButtonAppearance, Select, Table, TableBody, TableCell,
    TableHeader, TableHeaderCell, TableRow,
};

/// Подробности действия для колонки «Детали»
fn activity_details(kind: &ActivityKind) -> String {
    match kind {
        ActivityKind::Sale { quantity, reference_id, .. } => {
            format!("{} шт., заказ {}", quantity, reference_id)
        }
        ActivityKind::Adjustment { quantity, reason, .. } => format!("{:+} шт. ({})", quantity, reason),
        ActivityKind::StockChange { available, total, .. } => {
            format!("доступно {} из {}", available, total)
        }
        ActivityKind::Sync => String::new(),
    }
}

/// История операций: продажи, корректировки, синхронизации, изменения остатков
#[component]
#[allow(non_snake_case)]
pub fn ActivityHistory() -> impl IntoView {
    let activities = RwSignal::new(Vec::<Activity>::new());
    let loading = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(ACTIVITY_PAGE.initial_sort);
    let filter_code = RwSignal::new(ActivityFilter::All.code().to_string());
    let period_code = RwSignal::new(ReportPeriod::Week.code().to_string());

    let query = Signal::derive(move || ActivityQuery {
        days: ReportPeriod::from_code(&period_code.get())
            .unwrap_or(ReportPeriod::Week)
            .days(),
        limit: None,
        filter: ActivityFilter::from_code(&filter_code.get()).unwrap_or_default(),
    });

    let load = move |query: ActivityQuery| {
        loading.set(true);
        spawn_local(async move {
            match data_source().list_activities(&query).await {
                Ok(list) => {
                    activities.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load activities ({:?}): {}", query, e);
                    show_feedback(feedback, Feedback::load_failed("историю операций", &e));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load(query.get()));

    let visible = Signal::derive(move || {
        activities.with(|items| ACTIVITY_PAGE.project(items, &search.get(), sort.get()))
    });
    let counts = Signal::derive(move || activities.with(|items| ActivityCounts::from_activities(items)));

    let policy = ACTIVITY_PAGE.new_field_direction;

    view! {
        <div class="page">
            <PageHeader title="История операций" loading=loading>
                <Select value=filter_code>
                    {ActivityFilter::all().into_iter().map(|f| view! {
                        <option value=f.code()>{f.display_name()}</option>
                    }).collect_view()}
                </Select>
                <Select value=period_code>
                    {ReportPeriod::all().into_iter().map(|p| view! {
                        <option value=p.code()>{p.display_name()}</option>
                    }).collect_view()}
                </Select>
                <SearchInput value=search placeholder="Описание или товар" />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load(query.get_untracked())>
                    {icon("refresh")}
                    "Обновить"
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <div class="stat-grid">
                <StatCard label="Продажи" icon_name="sales" value=Signal::derive(move || Some(counts.get().sales.to_string())) />
                <StatCard label="Корректировки" icon_name="adjust" value=Signal::derive(move || Some(counts.get().adjustments.to_string())) />
                <StatCard label="Синхронизации" icon_name="refresh" value=Signal::derive(move || Some(counts.get().syncs.to_string())) />
                <StatCard label="Изменения остатков" icon_name="inventory" value=Signal::derive(move || Some(counts.get().stock_changes.to_string())) />
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        {sortable_header("Время", ActivitySortField::Timestamp, sort, policy)}
                        {sortable_header("Тип", ActivitySortField::Kind, sort, policy)}
                        {sortable_header("Товар", ActivitySortField::ProductTitle, sort, policy)}
                        <TableHeaderCell>"Описание"</TableHeaderCell>
                        <TableHeaderCell>"Детали"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = visible.get();
                        if rows.is_empty() {
                            return empty_row(5, "Операций за период нет");
                        }
                        let filter = search.get();
                        rows.into_iter().map(|a| {
                            let timestamp_title = format_datetime(&a.timestamp);
                            let relative = format_relative(a.timestamp);
                            let kind_name = a.kind.display_name();
                            let product_title = highlight_matches(a.kind.product_title().unwrap_or("—"), &filter);
                            let description = highlight_matches(&a.description, &filter);
                            let details = activity_details(&a.kind);
                            view! {
                                <TableRow>
                                    <TableCell attr:title=timestamp_title>{relative}</TableCell>
                                    <TableCell>
                                        <Badge appearance=BadgeAppearance::Tint>{kind_name}</Badge>
                                    </TableCell>
                                    <TableCell>{product_title}</TableCell>
                                    <TableCell>{description}</TableCell>
                                    <TableCell>{details}</TableCell>
                                </TableRow>
                            }
                        }).collect_view().into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
