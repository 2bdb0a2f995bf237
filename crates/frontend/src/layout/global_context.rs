use crate::shared::api_utils::{is_demo_mode, query_params};
use contracts::domain::a001_product::ProductId;
use contracts::domain::a007_notification::Notification;
use leptos::prelude::Effect;
use leptos::prelude::*;
use serde::Serialize;
use web_sys::window;

use super::tabs::tab_label_for_key;

/// Вкладка, открываемая при первом запуске
pub const HOME_TAB: &str = "d100_dashboard";

/// Параметры адресной строки; порядок полей фиксирован
#[derive(Serialize)]
struct TabQuery<'a> {
    active: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    demo: Option<&'a str>,
}

/// `?active=<key>` и, в демо-режиме, `&demo=1`
fn tab_query(active: &str, demo_mode: bool) -> String {
    let query = TabQuery {
        active,
        demo: demo_mode.then_some("1"),
    };
    format!("?{}", serde_qs::to_string(&query).unwrap_or_default())
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    pub right_open: RwSignal<bool>,
    /// Уведомления панели справа (общие для счётчика в шапке)
    pub notifications: RwSignal<Vec<Notification>>,
    /// Товар, выбранный для корректировки на другой странице
    pub adjust_product: RwSignal<Option<ProductId>>,
    pub demo_mode: bool,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            right_open: RwSignal::new(false),
            notifications: RwSignal::new(vec![]),
            adjust_product: RwSignal::new(None),
            demo_mode: is_demo_mode(),
        }
    }

    /// Активная вкладка хранится в `?active=...`; параметр demo сохраняется
    pub fn init_router_integration(&self) {
        let active_key = query_params()
            .get("active")
            .cloned()
            .unwrap_or_else(|| HOME_TAB.to_string());
        self.open_page(&active_key);

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let new_url = tab_query(&active_key, this.demo_mode);

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                // Only update URL if it actually changed
                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    /// Открыть страницу по ключу с заголовком из реестра
    pub fn open_page(&self, key: &str) {
        self.open_tab(key, tab_label_for_key(key));
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    /// Перейти к корректировке остатка выбранного товара
    pub fn adjust_stock(&self, product_id: ProductId) {
        self.adjust_product.set(Some(product_id));
        self.open_page("a002_stock_adjustment");
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    pub fn toggle_right(&self) {
        self.right_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_query_is_stable() {
        assert_eq!(tab_query("a003_sale", false), "?active=a003_sale");
        let first = tab_query("a003_sale", true);
        assert_eq!(first, "?active=a003_sale&demo=1");
        for _ in 0..10 {
            assert_eq!(tab_query("a003_sale", true), first);
        }
    }
}
