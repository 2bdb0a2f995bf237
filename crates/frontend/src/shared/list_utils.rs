/// Универсальные утилиты для списков: поле поиска, подсветка, сортируемые заголовки.
///
/// Фильтрация и сортировка выполняются в contracts (`list_projection`), здесь только UI.
use crate::shared::icons::icon;
use contracts::shared::list_projection::{match_segments, DirectionPolicy, SortField, SortSpec};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::TableHeaderCell;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Подсветка совпадений в тексте (без учёта регистра)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let parts = match_segments(text, filter)
        .into_iter()
        .map(|(segment, matched)| {
            let segment = segment.to_string();
            if matched {
                view! { <mark class="search-highlight">{segment}</mark> }.into_any()
            } else {
                view! { <span>{segment}</span> }.into_any()
            }
        })
        .collect_view();

    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Применённый поисковый запрос
    value: RwSignal<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let input_value = RwSignal::new(value.get_untracked());
    // Номер последнего ввода: применяется только самый свежий
    let generation = RwSignal::new(0u32);

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        generation.update(|g| *g = g.wrapping_add(1));
        let expected = generation.get_untracked();

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_untracked() == Some(expected) {
                value.set(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        generation.update(|g| *g = g.wrapping_add(1));
        input_value.set(String::new());
        value.set(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Очистить">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Заголовок колонки: клик переключает сортировку по правилам страницы
pub fn sortable_header<F>(
    label: &'static str,
    field: F,
    sort: RwSignal<SortSpec<F>>,
    policy: DirectionPolicy,
) -> AnyView
where
    F: SortField + Send + Sync,
{
    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                on:click=move |_| sort.update(|spec| *spec = spec.toggle(field, policy))
            >
                {label}
                <span
                    class="table__sort-indicator"
                    class:table__sort-indicator--active=move || sort.get().field == field
                >
                    {move || sort.get().indicator(field)}
                </span>
            </div>
        </TableHeaderCell>
    }
    .into_any()
}

/// Строка-заглушка для пустой таблицы
pub fn empty_row(colspan: u32, text: &'static str) -> AnyView {
    view! {
        <tr>
            <td class="table__empty" colspan=colspan.to_string()>{text}</td>
        </tr>
    }
    .into_any()
}
