//! TopHeader component - application top navigation bar.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::domain::a007_notification::unread_count;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let unread = Memo::new(move |_| ctx.notifications.with(|list| unread_count(list)));

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Fulfillment: остатки и продажи"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn top-header__bell"
                    on:click=move |_| ctx.toggle_right()
                    title="Уведомления"
                >
                    {icon("bell")}
                    <Show when=move || { unread.get() > 0 }>
                        <span class="top-header__badge">{move || unread.get()}</span>
                    </Show>
                </button>
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.open_page("a006_alert_settings")
                    title="Настройки оповещений"
                >
                    {icon("settings")}
                </button>
            </div>
        </div>
    }
}
