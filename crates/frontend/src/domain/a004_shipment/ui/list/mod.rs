use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{PageHeader, ShipmentStatusBadge};
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::list_utils::{empty_row, highlight_matches, sortable_header, SearchInput};
use crate::shared::number_format::format_thousands;
use contracts::domain::a004_shipment::{Shipment, ShipmentSortField, ShipmentStatus, SHIPMENTS_PAGE};
use contracts::shared::feedback::Feedback;
use contracts::shared::summary::shipments_by_status;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Button, ButtonAppearance, Select, Table, TableBody, TableCell, TableHeader, TableHeaderCell,
    TableRow,
};

const ALL_STATUSES: &str = "all";

/// Отслеживание отправок на склад фулфилмента
#[component]
#[allow(non_snake_case)]
pub fn ShipmentList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let shipments = RwSignal::new(Vec::<Shipment>::new());
    let loading = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(SHIPMENTS_PAGE.initial_sort);
    let status_code = RwSignal::new(ALL_STATUSES.to_string());
    let selected_id = RwSignal::new(None::<i64>);

    let status_filter = Signal::derive(move || ShipmentStatus::from_code(&status_code.get()));

    let load = move |status: Option<ShipmentStatus>| {
        loading.set(true);
        spawn_local(async move {
            match data_source().list_shipments(status).await {
                Ok(list) => {
                    shipments.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load shipments: {}", e);
                    show_feedback(feedback, Feedback::load_failed("отправки", &e));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load(status_filter.get()));

    let visible = Signal::derive(move || {
        shipments.with(|items| SHIPMENTS_PAGE.project(items, &search.get(), sort.get()))
    });
    let counts = Signal::derive(move || shipments.with(|items| shipments_by_status(items)));
    let selected = Signal::derive(move || {
        let id = selected_id.get()?;
        shipments.with(|items| items.iter().find(|s| s.id == id).cloned())
    });

    let policy = SHIPMENTS_PAGE.new_field_direction;

    view! {
        <div class="page">
            <PageHeader title="Отслеживание отправок" loading=loading>
                <Select value=status_code>
                    <option value=ALL_STATUSES>"Все статусы"</option>
                    {ShipmentStatus::all().into_iter().map(|s| view! {
                        <option value=s.code()>{s.display_name()}</option>
                    }).collect_view()}
                </Select>
                <SearchInput value=search placeholder="Трек-номер, склад, примечание" />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load(status_filter.get_untracked())>
                    {icon("refresh")}
                    "Обновить"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| ctx.open_page("a004_shipment_planning")>
                    {icon("plus")}
                    "Новая отправка"
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <div class="status-summary">
                {move || counts.get().into_iter().map(|(status, count)| view! {
                    <span class="status-summary__item">
                        <ShipmentStatusBadge status=status />
                        <span class="status-summary__count">{count}</span>
                    </span>
                }).collect_view()}
            </div>

            <div class="page__split">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {sortable_header("№", ShipmentSortField::Id, sort, policy)}
                            {sortable_header("Статус", ShipmentSortField::Status, sort, policy)}
                            {sortable_header("Склад", ShipmentSortField::Warehouse, sort, policy)}
                            <TableHeaderCell>"Трек-номер"</TableHeaderCell>
                            <TableHeaderCell>"Единиц"</TableHeaderCell>
                            {sortable_header("Создана", ShipmentSortField::CreatedAt, sort, policy)}
                            {sortable_header("Доставка", ShipmentSortField::EstimatedDelivery, sort, policy)}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let rows = visible.get();
                            if rows.is_empty() {
                                return empty_row(7, "Отправок нет");
                            }
                            let filter = search.get();
                            let current = selected_id.get();
                            rows.into_iter().map(|s| {
                                let id = s.id;
                                let id_text = format!("#{}", s.id);
                                let status = s.status;
                                let destination = highlight_matches(&s.destination_warehouse, &filter);
                                let tracking = match s.tracking_number.as_deref() {
                                    Some(tracking) => highlight_matches(tracking, &filter),
                                    None => view! { <span class="text-muted">"—"</span> }.into_any(),
                                };
                                let total_units = format_thousands(s.total_units());
                                let created_at = format_date(&s.created_at);
                                let estimated_delivery = s.estimated_delivery.as_ref().map(format_date).unwrap_or_default();
                                view! {
                                    <TableRow
                                        class:table__row--selected=current == Some(id)
                                        on:click=move |_| selected_id.set(Some(id))
                                        attr:style="cursor: pointer;"
                                    >
                                        <TableCell>{id_text}</TableCell>
                                        <TableCell><ShipmentStatusBadge status=status /></TableCell>
                                        <TableCell>{destination}</TableCell>
                                        <TableCell>
                                            {tracking}
                                        </TableCell>
                                        <TableCell class="table__cell--number">{total_units}</TableCell>
                                        <TableCell>{created_at}</TableCell>
                                        <TableCell>{estimated_delivery}</TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>

                {move || selected.get().map(|s| view! { <ShipmentDetails shipment=s on_close=move |_| selected_id.set(None) /> })}
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn ShipmentDetails(shipment: Shipment, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    view! {
        <aside class="details-panel">
            <div class="details-panel__header">
                <h3>{format!("Отправка #{}", shipment.id)}</h3>
                <button class="details-panel__close" title="Закрыть" on:click=move |_| on_close.run(())>
                    {icon("x")}
                </button>
            </div>
            <dl class="details-panel__props">
                <dt>"Статус"</dt>
                <dd><ShipmentStatusBadge status=shipment.status /></dd>
                <dt>"Склад назначения"</dt>
                <dd>{shipment.destination_warehouse.clone()}</dd>
                <dt>"Трек-номер"</dt>
                <dd>{shipment.tracking_number.clone().unwrap_or_else(|| "не присвоен".to_string())}</dd>
                <dt>"Создана"</dt>
                <dd>{format_datetime(&shipment.created_at)}</dd>
                <dt>"Изменена"</dt>
                <dd>{format_datetime(&shipment.updated_at)}</dd>
                <dt>"Ожидаемая доставка"</dt>
                <dd>{shipment.estimated_delivery.as_ref().map(format_date).unwrap_or_else(|| "—".to_string())}</dd>
            </dl>
            {(!shipment.notes.is_empty()).then(|| view! {
                <p class="details-panel__notes">{shipment.notes.clone()}</p>
            })}
            <h4>"Товары"</h4>
            <ul class="details-panel__items">
                {shipment.items.iter().map(|item| view! {
                    <li>
                        <span>{item.product_title.clone()}</span>
                        <span class="details-panel__qty">{format!("{} шт.", item.quantity)}</span>
                    </li>
                }).collect_view()}
            </ul>
            <div class="details-panel__total">{format!("Всего единиц: {}", shipment.total_units())}</div>
        </aside>
    }
}
