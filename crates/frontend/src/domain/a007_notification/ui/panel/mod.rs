use crate::layout::global_context::AppGlobalContext;
use crate::shared::data_source::data_source;
use crate::shared::date_utils::{format_datetime, format_relative};
use crate::shared::feedback::{clear_load_error, show_feedback, FeedbackBanner};
use crate::shared::icons::icon;
use contracts::domain::a007_notification::{mark_all_read, mark_read, unread_count, Notification};
use contracts::shared::feedback::Feedback;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, ButtonSize};

/// Панель уведомлений справа. Отметка «прочитано» локальная, на бэкенд не отправляется.
#[component]
#[allow(non_snake_case)]
pub fn NotificationsPanel() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = ctx.notifications;

    let loading = RwSignal::new(false);
    let feedback = RwSignal::new(None::<Feedback>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match data_source().list_notifications().await {
                Ok(list) => {
                    notifications.set(list);
                    clear_load_error(feedback);
                }
                Err(e) => {
                    log::error!("Failed to load notifications: {}", e);
                    show_feedback(feedback, Feedback::load_failed("уведомления", &e));
                }
            }
            loading.set(false);
        });
    };

    load();

    view! {
        <div class="notifications-panel">
            <div class="notifications-panel__header">
                <h3>"Уведомления"</h3>
                <span class="notifications-panel__count">
                    {move || notifications.with(|list| unread_count(list))}
                </span>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| load()
                    disabled=loading
                >
                    {icon("refresh")}
                </Button>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| notifications.update(|list| *list = mark_all_read(list))
                >
                    "Прочитать все"
                </Button>
                <button class="notifications-panel__close" title="Закрыть" on:click=move |_| ctx.toggle_right()>
                    {icon("x")}
                </button>
            </div>

            <FeedbackBanner slot=feedback />

            {move || {
                let list = notifications.get();
                if list.is_empty() {
                    return view! { <p class="notifications-panel__empty">"Новых уведомлений нет"</p> }.into_any();
                }
                view! {
                    <ul class="notifications-panel__list">
                        {list.into_iter().map(|n| view! { <NotificationItem notification=n /> }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn NotificationItem(notification: Notification) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let id = notification.id;

    view! {
        <li
            class=format!("notification {}", notification.kind.css_class())
            class:notification--unread=!notification.read
            on:click=move |_| ctx.notifications.update(|list| *list = mark_read(list, id))
        >
            <span class="notification__icon">{notification.kind.icon()}</span>
            <div class="notification__body">
                <div class="notification__title">{notification.title.clone()}</div>
                <div class="notification__message">{notification.message.clone()}</div>
                <div class="notification__time" title=format_datetime(&notification.timestamp)>
                    {format_relative(notification.timestamp)}
                </div>
            </div>
        </li>
    }
}
