//! Планирование отправки на склад фулфилмента.
//!
//! Черновик живёт только на странице; на бэкенд уходит после проверки
//! (есть позиции, выбран склад из списка центров распределения).

use crate::shared::components::PageHeader;
use crate::shared::data_source::data_source;
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::list_utils::{empty_row, highlight_matches, SearchInput};
use contracts::domain::a001_product::{Product, ProductId, PRODUCTS_PAGE};
use contracts::domain::a004_shipment::{ShipmentDraft, WAREHOUSES};
use contracts::shared::feedback::Feedback;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Select, Table, TableBody, TableCell, TableHeader,
    TableHeaderCell, TableRow, Textarea,
};

#[component]
#[allow(non_snake_case)]
pub fn ShipmentPlanning() -> impl IntoView {
    let products = RwSignal::new(Vec::<Product>::new());
    let loading = RwSignal::new(false);
    let submitting = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);
    let search = RwSignal::new(String::new());

    let draft = RwSignal::new(ShipmentDraft::default());
    let warehouse = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    spawn_local(async move {
        loading.set(true);
        match data_source().list_products().await {
            Ok(list) => {
                products.set(list);
                clear_load_error(feedback);
            }
            Err(e) => {
                log::error!("Failed to load products for shipment planning: {}", e);
                show_feedback(feedback, Feedback::load_failed("товары", &e));
            }
        }
        loading.set(false);
    });

    let candidates = Signal::derive(move || {
        products.with(|items| PRODUCTS_PAGE.project(items, &search.get(), PRODUCTS_PAGE.initial_sort))
    });

    let title_of = move |id: ProductId| {
        products.with(|items| {
            items
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| format!("Товар #{}", id))
        })
    };

    let submit = move |_| {
        let mut current = draft.get_untracked();
        current.destination_warehouse = warehouse.get_untracked();
        current.notes = notes.get_untracked();

        let request = match current.validate() {
            Ok(request) => request,
            Err(e) => {
                show_feedback(feedback, Feedback::invalid(e));
                return;
            }
        };

        submitting.set(true);
        spawn_local(async move {
            match data_source().create_shipment(&request).await {
                Ok(shipment) => {
                    log::info!("Shipment #{} created", shipment.id);
                    show_feedback(
                        feedback,
                        Feedback::success(format!(
                            "Отправка #{} создана: {} ед. на {}",
                            shipment.id,
                            shipment.total_units(),
                            shipment.destination_warehouse
                        )),
                    );
                    draft.set(ShipmentDraft::default());
                    notes.set(String::new());
                }
                Err(e) => {
                    log::error!("Failed to create shipment: {}", e);
                    show_feedback(feedback, Feedback::submit_failed(&e));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Планирование отправки" subtitle="Отправка товаров на склад фулфилмента" loading=loading />

            <FeedbackBanner slot=feedback />

            <div class="page__split">
                <section class="page__section">
                    <h3 class="page__section-title">"Товары"</h3>
                    <SearchInput value=search placeholder="Название или SKU" />
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Товар"</TableHeaderCell>
                                <TableHeaderCell>"Доступно"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = candidates.get();
                                if rows.is_empty() {
                                    return empty_row(3, "Товары не найдены");
                                }
                                let filter = search.get();
                                rows.into_iter().map(|p| {
                                    let id = p.id;
                                    let in_draft = draft.with(|d| d.contains(id));
                                    let title = highlight_matches(&p.title, &filter);
                                    let available = p.stock.available;
                                    view! {
                                        <TableRow class:table__row--selected=in_draft>
                                            <TableCell>{title}</TableCell>
                                            <TableCell class="table__cell--number">{available}</TableCell>
                                            <TableCell>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| draft.update(|d| d.add_product(id))
                                                >
                                                    {icon("plus")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view().into_any()
                            }}
                        </TableBody>
                    </Table>
                </section>

                <section class="page__section">
                    <h3 class="page__section-title">"Отправка"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Товар"</TableHeaderCell>
                                <TableHeaderCell>"Количество"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let items = draft.with(|d| d.items.clone());
                                if items.is_empty() {
                                    return empty_row(3, "Добавьте товары из списка слева");
                                }
                                items.into_iter().map(|item| {
                                    let id = item.product_id;
                                    view! {
                                        <TableRow>
                                            <TableCell>{title_of(id)}</TableCell>
                                            <TableCell>
                                                <input
                                                    type="number"
                                                    class="form__input form__input--small"
                                                    min="0"
                                                    prop:value=item.quantity.to_string()
                                                    on:change=move |ev| {
                                                        let quantity = event_target_value(&ev).trim().parse().unwrap_or(0);
                                                        draft.update(|d| d.set_quantity(id, quantity));
                                                    }
                                                />
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| draft.update(|d| d.remove_product(id))
                                                >
                                                    {icon("x")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view().into_any()
                            }}
                        </TableBody>
                    </Table>
                    <div class="details-panel__total">
                        {move || format!("Всего единиц: {}", draft.with(|d| d.total_units()))}
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Склад назначения"</label>
                        <Select value=warehouse>
                            <option value="">"-- Выберите склад --"</option>
                            {WAREHOUSES.iter().map(|w| view! { <option value=*w>{*w}</option> }).collect_view()}
                        </Select>
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Примечание"</label>
                        <Textarea value=notes placeholder="Необязательно" attr:rows=3 />
                    </div>

                    <div class="form__actions">
                        <Button appearance=ButtonAppearance::Primary on_click=submit disabled=submitting>
                            {icon("shipments")}
                            {move || if submitting.get() { "Создание..." } else { "Создать отправку" }}
                        </Button>
                    </div>
                </section>
            </div>
        </div>
    }
}
