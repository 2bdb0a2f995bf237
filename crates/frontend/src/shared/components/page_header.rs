use crate::shared::icons::icon;
use leptos::prelude::*;

/// Заголовок страницы с кнопками действий
///
/// `loading` показывает индикатор рядом с заголовком, пока страница загружает данные.
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    #[prop(optional, into)]
    loading: Signal<bool>,

    /// Кнопки действий справа
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">
                        {title}
                        <Show when=move || loading.get()>
                            <span class="page-header__spinner" title="Загрузка">{icon("refresh")}</span>
                        </Show>
                    </h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
