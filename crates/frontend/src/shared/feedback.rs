//! Показ сообщений страниц: ошибки загрузки, ошибки формы, результат отправки

use crate::shared::icons::icon;
use contracts::shared::feedback::{Feedback, FeedbackKind};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Показать сообщение; временные сообщения скрываются сами через `FLASH_DISMISS_MS`.
///
/// Скрывается только то же самое сообщение: более новое остаётся на экране.
pub fn show_feedback(slot: RwSignal<Option<Feedback>>, feedback: Feedback) {
    let dismiss_after = feedback.auto_dismiss_ms();
    slot.set(Some(feedback.clone()));

    if let Some(ms) = dismiss_after {
        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            let _ = slot.try_update(|current| {
                if current.as_ref() == Some(&feedback) {
                    *current = None;
                }
            });
        });
    }
}

/// Убрать ошибку загрузки после успешной повторной загрузки
pub fn clear_load_error(slot: RwSignal<Option<Feedback>>) {
    let is_load_error = slot.with_untracked(|current| {
        current
            .as_ref()
            .is_some_and(|f| f.kind == FeedbackKind::LoadFailed)
    });
    if is_load_error {
        slot.set(None);
    }
}

#[component]
pub fn FeedbackBanner(slot: RwSignal<Option<Feedback>>) -> impl IntoView {
    move || {
        slot.get().map(|feedback| {
            let icon_name = match feedback.kind {
                FeedbackKind::Success => "check",
                _ => "alert",
            };
            view! {
                <div class=feedback.css_class() role="alert">
                    {icon(icon_name)}
                    <span class="alert__text">{feedback.text.clone()}</span>
                    <button class="alert__close" title="Закрыть" on:click=move |_| slot.set(None)>
                        {icon("x")}
                    </button>
                </div>
            }
        })
    }
}
