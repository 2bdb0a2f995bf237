//! Sidebar component with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "overview",
            label: "Обзор",
            icon: "dashboard",
            items: vec![("d100_dashboard", "dashboard")],
        },
        MenuGroup {
            id: "inventory",
            label: "Склад",
            icon: "inventory",
            items: vec![
                ("a001_product", "products"),
                ("a001_product_stock", "inventory"),
                ("a002_stock_adjustment", "adjust"),
            ],
        },
        MenuGroup {
            id: "sales",
            label: "Продажи",
            icon: "sales",
            items: vec![("a003_sale", "sales")],
        },
        MenuGroup {
            id: "shipments",
            label: "Отправки",
            icon: "shipments",
            items: vec![
                ("a004_shipment", "shipments"),
                ("a004_shipment_planning", "plus"),
            ],
        },
        MenuGroup {
            id: "journal",
            label: "Журнал",
            icon: "history",
            items: vec![("a005_activity", "history")],
        },
        MenuGroup {
            id: "settings",
            label: "Настройки",
            icon: "settings",
            items: vec![("a006_alert_settings", "bell")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // Все группы раскрыты при запуске
    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {ctx.demo_mode.then(|| view! {
                <div class="app-sidebar__demo">"Демо-режим"</div>
            })}
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_for_click = group_id.clone();
                let gid_for_chevron = group_id.clone();
                let gid_for_show = group_id.clone();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_for_click.clone();
                                expanded_groups.update(move |groups| {
                                    if let Some(pos) = groups.iter().position(|x| x == &gid) {
                                        groups.remove(pos);
                                    } else {
                                        groups.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_for_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid_for_show)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_page(key)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{tab_label_for_key(key)}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
