use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Правая панель (уведомления); открывается кнопкой в шапке
#[component]
pub fn Right(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div data-zone="right" class="right" class:hidden=move || !ctx.right_open.get()>
            {children()}
        </div>
    }
}
