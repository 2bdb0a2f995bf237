//! Настройки оповещений о низком остатке: глобальные и по отдельным товарам.
//!
//! Настройка товара создаётся копией глобальной при первом изменении любого
//! её поля; «Сбросить» возвращает товар к глобальной настройке.

use crate::shared::components::{LowStockBadge, PageHeader};
use crate::shared::data_source::data_source;
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use contracts::domain::a001_product::{Product, ProductId};
use contracts::domain::a006_alert_settings::{
    AlertField, AlertOverride, AlertOverrides, AlertSettings, AlertSettingsDto,
};
use contracts::shared::alert_thresholds::{
    clear_override, effective_threshold_label, has_override, low_stock_entries, set_override,
};
use contracts::shared::feedback::Feedback;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Checkbox, Flex, FlexGap, Input, InputType, Table,
    TableBody, TableCell, TableHeader, TableHeaderCell, TableRow,
};

#[component]
#[allow(non_snake_case)]
pub fn AlertSettingsPage() -> impl IntoView {
    let products = RwSignal::new(Vec::<Product>::new());
    let overrides = RwSignal::new(AlertOverrides::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);

    // Поля глобальной формы
    let enabled = RwSignal::new(true);
    let threshold = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let dashboard = RwSignal::new(true);
    // Последняя загруженная или сохранённая глобальная настройка
    let last_valid = RwSignal::new(AlertSettings::default());

    let fill_global = move |global: AlertSettings| {
        last_valid.set(global.clone());
        enabled.set(global.enabled);
        threshold.set(global.threshold.to_string());
        email.set(global.notification_email);
        dashboard.set(global.notification_dashboard);
    };

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            let api = data_source();
            let settings = api.get_alert_settings().await;
            let list = api.list_products().await;
            match (settings, list) {
                (Ok(dto), Ok(list)) => {
                    fill_global(dto.global);
                    overrides.set(dto.products);
                    products.set(list);
                    clear_load_error(feedback);
                }
                (Err(e), _) | (_, Err(e)) => {
                    log::error!("Failed to load alert settings: {}", e);
                    show_feedback(feedback, Feedback::load_failed("настройки оповещений", &e));
                }
            }
            loading.set(false);
        });
    };

    // Порог пока не проверен: 0 и мусор отсекаются при сохранении
    let global = Signal::derive(move || AlertSettings {
        enabled: enabled.get(),
        threshold: threshold.get().trim().parse().unwrap_or(0),
        notification_email: email.get().trim().to_string(),
        notification_dashboard: dashboard.get(),
    });
    // То, что действует для товаров, пока форма заполнена не до конца
    let effective_global =
        Signal::derive(move || last_valid.with(|last| global.get().or_last_valid(last)));

    let update_field = move |id: ProductId, field: AlertField| {
        let current_global = effective_global.get_untracked();
        overrides.update(|o| *o = set_override(o, id, field, &current_global));
    };

    let save = move |_| {
        let current_global = global.get_untracked();
        if let Err(e) = current_global.validate() {
            show_feedback(feedback, Feedback::invalid(e));
            return;
        }
        let dto = AlertSettingsDto {
            global: current_global.clone(),
            products: overrides.get_untracked(),
        };

        saving.set(true);
        spawn_local(async move {
            match data_source().save_alert_settings(&dto).await {
                Ok(()) => {
                    last_valid.set(current_global);
                    show_feedback(feedback, Feedback::success("Настройки оповещений сохранены"));
                }
                Err(e) => {
                    log::error!("Failed to save alert settings: {}", e);
                    show_feedback(feedback, Feedback::submit_failed(&e));
                }
            }
            saving.set(false);
        });
    };

    let low_stock = Signal::derive(move || {
        let global = effective_global.get();
        products.with(|items| {
            overrides.with(|o| {
                low_stock_entries(items, o, &global)
                    .into_iter()
                    .map(|entry| (entry.item.clone(), entry.threshold))
                    .collect::<Vec<_>>()
            })
        })
    });

    load();

    view! {
        <div class="page page--form">
            <PageHeader title="Настройки оповещений" loading=loading>
                <Button appearance=ButtonAppearance::Primary on_click=save disabled=saving>
                    {icon("check")}
                    {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                </Button>
            </PageHeader>

            <FeedbackBanner slot=feedback />

            <section class="page__section">
                <h3 class="page__section-title">"Глобальные настройки"</h3>
                <Flex vertical=true gap=FlexGap::Medium class="form">
                    <Checkbox checked=enabled label="Оповещения включены" />
                    <div class="form__group">
                        <label class="form__label">"Порог низкого остатка"</label>
                        <Input input_type=InputType::Number value=threshold />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Email для уведомлений"</label>
                        <Input input_type=InputType::Email value=email placeholder="Необязательно" />
                    </div>
                    <Checkbox checked=dashboard label="Показывать на дашборде" />
                </Flex>
            </section>

            <section class="page__section">
                <h3 class="page__section-title">"Товары с низким остатком"</h3>
                {move || {
                    let entries = low_stock.get();
                    if entries.is_empty() {
                        return view! { <p class="text-muted">"Все остатки выше порога"</p> }.into_any();
                    }
                    view! {
                        <ul class="low-stock-list">
                            {entries.into_iter().map(|(p, limit)| view! {
                                <li>
                                    <LowStockBadge available=p.stock.available low=true />
                                    <span>{p.title}</span>
                                    <span class="text-muted">{format!("{} при пороге {}", p.stock.available, limit)}</span>
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </section>

            <section class="page__section">
                <h3 class="page__section-title">"Настройки по товарам"</h3>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Товар"</TableHeaderCell>
                            <TableHeaderCell>"Доступно"</TableHeaderCell>
                            <TableHeaderCell>"Вкл."</TableHeaderCell>
                            <TableHeaderCell>"Порог"</TableHeaderCell>
                            <TableHeaderCell>"Действует"</TableHeaderCell>
                            <TableHeaderCell>"Email"</TableHeaderCell>
                            <TableHeaderCell>"Дашборд"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let current_global = effective_global.get();
                            let current = overrides.get();
                            products.get().into_iter().map(|p| {
                                let id = p.id;
                                let custom = has_override(&current, id);
                                let shown = current
                                    .get(&id)
                                    .cloned()
                                    .unwrap_or_else(|| AlertOverride::from(&current_global));
                                let label = effective_threshold_label(id, &current, &current_global);
                                view! {
                                    <TableRow class:table__row--custom=custom>
                                        <TableCell>{p.title.clone()}</TableCell>
                                        <TableCell class="table__cell--number">{p.stock.available}</TableCell>
                                        <TableCell>
                                            <input
                                                type="checkbox"
                                                prop:checked=shown.enabled
                                                on:change=move |ev| update_field(id, AlertField::Enabled(event_target_checked(&ev)))
                                            />
                                        </TableCell>
                                        <TableCell>
                                            <input
                                                type="number"
                                                class="form__input form__input--small"
                                                min="0"
                                                prop:value=shown.threshold.map(|t| t.to_string()).unwrap_or_default()
                                                on:change=move |ev| {
                                                    let value = event_target_value(&ev).trim().parse::<i64>().ok();
                                                    update_field(id, AlertField::Threshold(value));
                                                }
                                            />
                                        </TableCell>
                                        <TableCell>{label}</TableCell>
                                        <TableCell>
                                            <input
                                                type="email"
                                                class="form__input form__input--small"
                                                prop:value=shown.notification_email.clone()
                                                on:change=move |ev| update_field(id, AlertField::NotificationEmail(event_target_value(&ev)))
                                            />
                                        </TableCell>
                                        <TableCell>
                                            <input
                                                type="checkbox"
                                                prop:checked=shown.notification_dashboard
                                                on:change=move |ev| update_field(id, AlertField::NotificationDashboard(event_target_checked(&ev)))
                                            />
                                        </TableCell>
                                        <TableCell>
                                            {custom.then(|| view! {
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| overrides.update(|o| *o = clear_override(o, id))
                                                >
                                                    "Сбросить"
                                                </Button>
                                            })}
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>
            </section>
        </div>
    }
}
