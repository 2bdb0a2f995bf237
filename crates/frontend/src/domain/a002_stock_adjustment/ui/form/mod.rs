use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::PageHeader;
use crate::shared::data_source::data_source;
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use contracts::domain::a001_product::{Product, ProductId};
use contracts::domain::a002_stock_adjustment::{AdjustmentType, StockAdjustmentForm};
use contracts::shared::feedback::Feedback;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Flex, FlexGap, Input, InputType, Select, Textarea};

/// Ручная корректировка остатков: поступление, списание, потеря, повреждение
#[component]
#[allow(non_snake_case)]
pub fn StockAdjustmentPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let products = RwSignal::new(Vec::<Product>::new());
    let loading = RwSignal::new(false);
    let submitting = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);

    let product_code = RwSignal::new(String::new());
    let type_code = RwSignal::new(AdjustmentType::default().code().to_string());
    let quantity = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());

    // Товар, выбранный кнопкой «Корректировать» на странице остатков
    Effect::new(move |_| {
        if let Some(id) = ctx.adjust_product.get() {
            product_code.set(id.to_string());
        }
    });

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match data_source().list_products().await {
                Ok(list) => {
                    products.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load products for adjustment: {}", e);
                    show_feedback(feedback, Feedback::load_failed("товары", &e));
                }
            }
            loading.set(false);
        });
    };

    let selected = Signal::derive(move || {
        let id = product_code.get().parse::<i64>().ok().map(ProductId::new)?;
        products.with(|items| items.iter().find(|p| p.id == id).cloned())
    });

    let read_form = move || StockAdjustmentForm {
        product_id: product_code.get_untracked().parse::<i64>().ok().map(ProductId::new),
        adjustment_type: AdjustmentType::from_code(&type_code.get_untracked()).unwrap_or_default(),
        quantity: quantity.get_untracked().trim().parse().unwrap_or(0),
        reason: reason.get_untracked(),
    };

    let submit = move |_| {
        let request = match read_form().validate() {
            Ok(request) => request,
            Err(e) => {
                show_feedback(feedback, Feedback::invalid(e));
                return;
            }
        };

        submitting.set(true);
        spawn_local(async move {
            match data_source().submit_adjustment(&request).await {
                Ok(ack) => {
                    let text = format!(
                        "{} Доступно: {}, всего: {}",
                        ack.message, ack.new_stock.available, ack.new_stock.total
                    );
                    show_feedback(feedback, Feedback::success(text));
                    quantity.set(String::new());
                    reason.set(String::new());
                    load();
                }
                Err(e) => {
                    log::error!("Stock adjustment for {} failed: {}", request.product_id, e);
                    show_feedback(feedback, Feedback::submit_failed(&e));
                }
            }
            submitting.set(false);
        });
    };

    load();

    view! {
        <div class="page page--form">
            <PageHeader title="Корректировка остатков" loading=loading />

            <FeedbackBanner slot=feedback />

            <Flex vertical=true gap=FlexGap::Large class="form">
                <div class="form__group">
                    <label class="form__label">"Товар"</label>
                    <Select value=product_code>
                        <option value="">"-- Выберите товар --"</option>
                        <For
                            each=move || products.get()
                            key=|p| p.id
                            children=move |p: Product| {
                                view! { <option value=p.id.to_string()>{format!("{} ({})", p.title, p.sku)}</option> }
                            }
                        />
                    </Select>
                </div>

                {move || selected.get().map(|p| view! {
                    <div class="form__hint">
                        {format!(
                            "Сейчас доступно: {}, недоступно: {}, всего: {}",
                            p.stock.available, p.stock.not_available, p.stock.total
                        )}
                    </div>
                })}

                <div class="form__group">
                    <label class="form__label">"Тип корректировки"</label>
                    <Select value=type_code>
                        {AdjustmentType::all().into_iter().map(|t| view! {
                            <option value=t.code()>{t.display_name()}</option>
                        }).collect_view()}
                    </Select>
                </div>

                <div class="form__group">
                    <label class="form__label">"Количество"</label>
                    <Input input_type=InputType::Number value=quantity placeholder="0" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Причина"</label>
                    <Textarea value=reason placeholder="Например: инвентаризация" attr:rows=3 />
                </div>

                <div class="form__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=submit disabled=submitting>
                        {icon("check")}
                        {move || if submitting.get() { "Сохранение..." } else { "Применить" }}
                    </Button>
                </div>
            </Flex>
        </div>
    }
}
