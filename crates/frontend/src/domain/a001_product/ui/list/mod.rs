use crate::shared::components::PageHeader;
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_datetime, format_datetime_or_never};
use crate::shared::export::export_to_excel;
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use crate::shared::list_utils::{empty_row, highlight_matches, sortable_header, SearchInput};
use contracts::domain::a001_product::{Product, ProductSortField, PRODUCTS_PAGE};
use contracts::enums::SyncKind;
use contracts::shared::feedback::Feedback;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Table, TableBody, TableCell, TableHeader, TableRow};

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let products = RwSignal::new(Vec::<Product>::new());
    let loading = RwSignal::new(false);
    let syncing = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(PRODUCTS_PAGE.initial_sort);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match data_source().list_products().await {
                Ok(list) => {
                    products.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load products: {}", e);
                    show_feedback(feedback, Feedback::load_failed("товары", &e));
                }
            }
            loading.set(false);
        });
    };

    let sync_products = move |_| {
        syncing.set(true);
        spawn_local(async move {
            match data_source().trigger_sync(SyncKind::Products).await {
                Ok(result) => {
                    show_feedback(feedback, Feedback::success(result.message()));
                    load();
                }
                Err(e) => {
                    log::error!("Product sync failed: {}", e);
                    show_feedback(feedback, Feedback::submit_failed(&e));
                }
            }
            syncing.set(false);
        });
    };

    let visible = Signal::derive(move || {
        products.with(|items| PRODUCTS_PAGE.project(items, &search.get(), sort.get()))
    });

    let export = move |_| {
        if let Err(e) = export_to_excel(&visible.get_untracked(), "товары") {
            show_feedback(feedback, Feedback::export_failed(e));
        }
    };

    load();

    let policy = PRODUCTS_PAGE.new_field_direction;

    view! {
        <div class="page">
            <PageHeader title="Товары" loading=loading>
                <SearchInput value=search placeholder="Название, SKU или ID объявления" />
                <Button appearance=ButtonAppearance::Primary on_click=sync_products disabled=syncing>
                    {icon("refresh")}
                    {move || if syncing.get() { "Синхронизация..." } else { "Синхронизировать" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=export>
                    {icon("download")}
                    "Экспорт"
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <div class="page__summary">
                {move || format!("Показано {} из {}", visible.with(Vec::len), products.with(Vec::len))}
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        {sortable_header("ID", ProductSortField::Id, sort, policy)}
                        {sortable_header("Товар", ProductSortField::Title, sort, policy)}
                        {sortable_header("SKU", ProductSortField::Sku, sort, policy)}
                        {sortable_header("ID объявления", ProductSortField::MlItemId, sort, policy)}
                        {sortable_header("Доступно", ProductSortField::StockAvailable, sort, policy)}
                        {sortable_header("Всего", ProductSortField::StockTotal, sort, policy)}
                        {sortable_header("Создан", ProductSortField::CreatedAt, sort, policy)}
                        {sortable_header("Обновлено", ProductSortField::StockLastUpdated, sort, policy)}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = visible.get();
                        if rows.is_empty() {
                            return empty_row(8, "Товары не найдены");
                        }
                        let filter = search.get();
                        rows.into_iter().map(|p| {
                            let id_text = p.id.to_string();
                            let title = highlight_matches(&p.title, &filter);
                            let sku = highlight_matches(&p.sku, &filter);
                            let ml_item_id = highlight_matches(&p.ml_item_id, &filter);
                            let available = p.stock.available;
                            let total = p.stock.total;
                            let created_at = format_datetime(&p.created_at);
                            let last_updated = format_datetime_or_never(p.stock.last_updated.as_ref());
                            view! {
                                <TableRow>
                                    <TableCell>{id_text}</TableCell>
                                    <TableCell>{title}</TableCell>
                                    <TableCell>{sku}</TableCell>
                                    <TableCell>{ml_item_id}</TableCell>
                                    <TableCell class="table__cell--number">{available}</TableCell>
                                    <TableCell class="table__cell--number">{total}</TableCell>
                                    <TableCell>{created_at}</TableCell>
                                    <TableCell>{last_updated}</TableCell>
                                </TableRow>
                            }
                        }).collect_view().into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
