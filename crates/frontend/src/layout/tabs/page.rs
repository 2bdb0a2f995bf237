//! TabPage component - wrapper для отображения контента таба

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// Компонент-обёртка для отдельного таба.
///
/// Контент создаётся один раз при открытии таба; неактивные табы скрываются CSS-классом,
/// поэтому страница сохраняет свой снимок данных при переключении.
#[component]
pub fn TabPage(tab: TabData, ctx: AppGlobalContext) -> impl IntoView {
    let key_for_active = tab.key.clone();
    let is_active = move || ctx.active.get().as_deref() == Some(key_for_active.as_str());

    let content = render_tab_content(&tab.key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab.key
        >
            {content}
        </div>
    }
}
